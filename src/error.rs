//! Error taxonomy shared by the service and HTTP layers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    ProductNotFound,

    #[error("Cart not found")]
    CartNotFound,

    #[error("Wishlist not found")]
    WishlistNotFound,

    #[error("Product not found in cart")]
    ItemNotInCart,

    #[error("Not enough items in stock")]
    InsufficientStock,

    #[error("Missing or invalid credentials")]
    Unauthorized,

    #[error("Admin access required")]
    Forbidden,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Wire shape for every failure: a human-readable message plus a
/// machine-checkable kind.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub kind: &'static str,
}

impl StorefrontError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::ProductNotFound
            | Self::CartNotFound
            | Self::WishlistNotFound
            | Self::ItemNotInCart => "not_found",
            Self::InsufficientStock => "insufficient_stock",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Store(_) => "store",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InsufficientStock => StatusCode::BAD_REQUEST,
            Self::ProductNotFound
            | Self::CartNotFound
            | Self::WishlistNotFound
            | Self::ItemNotInCart => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StorefrontError {
    fn into_response(self) -> Response {
        if let Self::Store(ref e) = self {
            tracing::error!(error = %e, "store operation failed");
        }
        let body = ErrorBody {
            message: self.to_string(),
            kind: self.kind(),
        };
        (self.status(), Json(body)).into_response()
    }
}
