//! Middleware components for the site

pub mod auth;
pub mod logging;
