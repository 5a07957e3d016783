//! Bridge adapter for the remote design tool.
//!
//! This crate provides [`BridgeClient`], the production implementation of
//! `tsync_core::RemoteDesignClient`. Each call spawns the configured bridge
//! executable, writes one JSON request to its stdin and reads one JSON
//! response from its stdout. See [`protocol`] for the wire format.

pub mod client;
pub mod protocol;

pub use client::{BridgeClient, BridgeConfig};
pub use protocol::{Method, Request, Response};
