//! Rental HTTP area: request lists and lifecycle actions.

mod dto;
mod handlers;
mod routes;

pub use handlers::RentalHandlers;
pub use routes::rental_routes;
