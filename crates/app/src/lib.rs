//! Biodex application library.
//!
//! Exposes the building blocks of the `biodex` binary (config, session
//! provider, view host, pages, rendering, command dispatch) so integration
//! tests and the entrypoint can both reach them.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod pages;
pub mod render;
pub mod session;
