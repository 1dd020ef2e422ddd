//! Backend API
//!
//! Backend origin handling for the web app.

pub mod client;

pub use client::{get_api_base, set_api_base};
