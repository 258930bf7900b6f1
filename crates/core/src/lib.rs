//! Dapr Store Core - Shared types library.
//!
//! This crate provides the types exchanged with the Dapr Store backend services:
//! - `client` - API client facade over the service-invocation gateway
//! - `cli` - Command-line front end for the facade
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. The backend
//! services own these records; the client never mutates them locally.
//!
//! # Modules
//!
//! - [`types`] - String ID newtypes and data-transfer schemas for users,
//!   products, carts and orders

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
