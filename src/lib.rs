//! Storefront E-commerce Backend
//!
//! REST backend for a small shop: product catalog, per-user shopping cart,
//! per-user wishlist.
//!
//! ## Features
//! - Product catalog with derived inventory status
//! - Shopping cart with live-price total recomputation
//! - Wishlist with idempotent membership toggles
//! - Optimistic (version compare-and-swap) writes on per-user aggregates

pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod service;
pub mod store;

pub use error::{Result, StorefrontError};
