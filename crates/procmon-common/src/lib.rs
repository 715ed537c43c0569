//! # procmon-common
//!
//! Shared record types, error definitions, configuration models, and
//! constants used across the procmon workspace.
//!
//! This crate is the leaf of the dependency graph. It owns the data-model
//! boundary: every captured event enters the workspace through the
//! normalizing conversions in [`types`], so downstream crates never see a
//! malformed record.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
