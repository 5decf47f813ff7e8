//! API Routes
//!
//! Route handlers organized by functionality.

pub mod content;
pub mod generate;
pub mod health;
pub mod sales;
pub mod settings;
