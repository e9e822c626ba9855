//! Contact Book Core - Shared domain types.
//!
//! This crate provides the types used across all contact book components:
//! - `server` - HTTP API for syncing and querying contacts
//! - `cli` - Operator commands for creating users and seeding data
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no database
//! access, no HTTP. Database encoding is available behind the `postgres`
//! feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, phone numbers, contact names, and pagination windows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
