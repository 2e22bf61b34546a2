//! # Medinfo Core
//!
//! Core business logic for the medinfo record lookup system.
//!
//! This crate contains the pure, deterministic pieces:
//! - The record search service: trim, emptiness check, case-insensitive
//!   substring matching over a configured field set, catalog order preserved
//! - Panel session state machines with a `reduce(state, event)` shape, so
//!   selection and result behaviour can be unit tested without any runtime
//! - Monotonic search sequencing that discards stale completions
//! - Runtime configuration resolved once at process startup
//!
//! **No API concerns**: HTTP servers, timers and the simulated search
//! latency belong in the `medinfo-run` binary and the CLI. Nothing in this
//! crate sleeps, spawns, or reads environment variables during operation.

pub mod config;
pub mod error;
pub mod search;
pub mod session;

pub use config::{
    reclick_policy_from_env_value, search_latency_from_env_value, upload_max_bytes_from_env_value,
    ConfigError, CoreConfig,
};
pub use error::{SearchError, SearchResult};
pub use search::{search, search_records, SearchService};
pub use session::{
    Notice, PanelEffect, PanelEvent, PanelSession, ReclickPolicy, SearchSeq, Selection,
};
