//! Walknex Storefront engine.
//!
//! This crate provides the storefront's state engine as a library: the cart
//! ledger, wishlist set, coupon/pricing resolver, persistent keyed store,
//! and the chat session responder. The UI layer is a thin subscriber over
//! these components and lives elsewhere.
//!
//! Every mutating operation produces a new immutable snapshot; persistence
//! is synchronous within the triggering event and degrades to memory-only
//! operation when the substrate is unavailable.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod state;
pub mod store;
pub mod wishlist;
