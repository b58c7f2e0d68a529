#![deny(unsafe_code)]

//! Shared test utilities for the phonebook workspace.
//!
//! Provides sample contacts, a temp-file-backed save target, a recording
//! image opener, config builders, and tracing helpers so that individual
//! crate tests stay concise and consistent.
//!
//! Add this crate as a `[dev-dependency]` in any workspace member:
//!
//! ```toml
//! [dev-dependencies]
//! phonebook-test-utils = { workspace = true }
//! ```

pub mod config;
pub mod fixtures;
pub mod opener;
pub mod tracing_setup;
