//! Core types for Walknex.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod chat;
pub mod id;
pub mod price;
pub mod product;

pub use chat::{ChatMessage, ProductRef, Sender};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Category, Gender, Product, Size, SizeError};
