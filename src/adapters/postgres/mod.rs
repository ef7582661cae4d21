//! PostgreSQL adapters for the reader and repository ports.

mod category_reader;
mod item_reader;
mod item_repository;
mod profiles;
mod rental_request_reader;
mod rental_request_repository;
mod review_reader;
mod review_repository;

pub use category_reader::PostgresCategoryReader;
pub use item_reader::PostgresItemReader;
pub use item_repository::PostgresItemRepository;
pub use profiles::{PostgresProfileReader, PostgresProfileRepository};
pub use rental_request_reader::PostgresRentalRequestReader;
pub use rental_request_repository::PostgresRentalRequestRepository;
pub use review_reader::PostgresReviewReader;
pub use review_repository::PostgresReviewRepository;
