//! Use-case handlers, one module per area.

pub mod catalog;
pub mod profile;
pub mod rental;
