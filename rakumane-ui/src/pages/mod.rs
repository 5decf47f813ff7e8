//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod generator;

pub use dashboard::Dashboard;
pub use generator::Generator;
