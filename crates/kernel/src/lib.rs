//! Vetrina Kernel Library
//!
//! Custom content type and taxonomy definitions, their registration, and
//! HTML rendering of their items through shortcodes and editor blocks.
//! The main entry point for running the server is the `vetrina` binary.

pub mod blocks;
pub mod cli;
pub mod config;
pub mod content;
pub mod editor;
pub mod error;
pub mod form;
pub mod middleware;
pub mod models;
pub mod notice;
pub mod registry;
pub mod render;
pub mod routes;
pub mod sanitize;
pub mod session;
pub mod shortcode;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, StoreError};
pub use state::AppState;
