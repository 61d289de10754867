//! AgentPay Core - Shared types library.
//!
//! This crate provides the common types used across all AgentPay components:
//! - `engine` - The agent orchestration engine (intent routing, tool calling)
//! - `integration-tests` - End-to-end scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no async.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Products, cart items, orders, prices, and chat messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
