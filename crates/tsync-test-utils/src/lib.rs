//! Shared test utilities for the token-sync workspace.
//!
//! This crate provides standardised test doubles and fixtures so every crate
//! exercises the sync engine against the same fake remote. It is a
//! dev-dependency only; never published.
//!
//! # Modules
//!
//! - [`fake`]: [`FakeClient`], an in-memory `RemoteDesignClient` with call
//!   recording and failure injection
//! - [`fixtures`]: builders for variables, styles and token files

pub mod fake;
pub mod fixtures;

pub use fake::{Call, FakeClient};
