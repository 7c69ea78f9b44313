//! Biodex core: domain records, field binding, the ownership gate and the
//! edit controller shared by every editable entity.
//!
//! This crate has **zero database dependencies**. The record store, session
//! provider and view host are collaborator traits implemented by the `db`
//! and `app` crates (and by in-memory fakes in tests).

pub mod editor;
pub mod error;
pub mod fields;
pub mod kingdom;
pub mod profile;
pub mod session;
pub mod species;
pub mod store;
pub mod types;
pub mod view;
