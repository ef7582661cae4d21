//! Auth HTTP area: sign in, sign up, sign out.

mod dto;
mod handlers;
mod routes;

pub use handlers::AuthHandlers;
pub use routes::auth_routes;
