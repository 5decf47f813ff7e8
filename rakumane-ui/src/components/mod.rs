//! UI Components
//!
//! Reusable Leptos components shared by the pages.

pub mod chart;
pub mod loading;
pub mod nav;
pub mod settings_dialog;
pub mod stat_card;
pub mod toast;

pub use chart::Chart;
pub use loading::{CardSkeleton, InlineLoading};
pub use nav::Nav;
pub use settings_dialog::SettingsDialog;
pub use stat_card::{ProgressBar, StatCard};
pub use toast::Toast;
