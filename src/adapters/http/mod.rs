//! HTTP adapters - route handlers, DTOs, and the session middleware.

pub mod auth;
pub mod catalog;
pub mod dto;
pub mod middleware;
pub mod profile;
pub mod rental;

mod router;

pub use router::{app_router, health_check};
