//! State Management
//!
//! Global notifications plus the pure view state behind each page.

pub mod dashboard;
pub mod generator;
pub mod global;

pub use global::{provide_global_state, GlobalState};
