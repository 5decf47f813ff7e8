//! Rakumane Web UI
//!
//! Listing generator and sales dashboard built with Leptos (WASM).
//!
//! # Features
//!
//! - Listing generation from a category and target audience
//! - Content generation, copy, download and publish helpers
//! - Month-to-date Gumroad sales dashboard with goal tracking
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. It communicates with the Rakumane API over HTTP.

use leptos::*;

mod api;
mod app;
mod browser;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
