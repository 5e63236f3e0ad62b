//! Request and Response models for the menu API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod price;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use price::{Price, PriceError};
pub use requests::{
    DishCreate, DishUpdate, ListParams, MenuCreate, MenuUpdate, SubMenuCreate, SubMenuUpdate,
};
pub use responses::{
    DeleteResponse, DishResponse, ErrorResponse, HealthResponse, MenuResponse, SubMenuResponse,
};
