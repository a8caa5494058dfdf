//! Per-request orchestration over the domain aggregates and the store seam.

pub mod cart;
pub mod catalog;
pub mod wishlist;

pub use cart::{CartItemView, CartService, CartView};
pub use catalog::{CatalogService, NewProduct, ProductPatch};
pub use wishlist::{WishlistService, WishlistView};
