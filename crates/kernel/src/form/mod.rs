//! Admin form support: CSRF tokens and form-encoded body parsing.

pub mod csrf;
mod fields;

pub use csrf::{generate_csrf_token, generate_link_token, verify_csrf_token, verify_link_token};
pub use fields::FormFields;
