//! Walknex Core - Shared types library.
//!
//! This crate provides common types used across all Walknex components:
//! - `storefront` - Cart, wishlist, pricing, and chat engine
//! - `integration-tests` - Cross-component test suite
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, products, and
//!   chat transcripts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
