//! Rental use cases: submitting and resolving requests.

mod cancel_request;
mod complete_request;
mod create_request;
mod list_requests;
mod respond_to_request;

pub use cancel_request::CancelRequestHandler;
pub use complete_request::CompleteRequestHandler;
pub use create_request::{CreateRequestCommand, CreateRequestHandler};
pub use list_requests::{ListRequestsHandler, RequestsOverview};
pub use respond_to_request::{RequestResponse, RespondToRequestHandler};
