//! Burrow - peer-to-peer campus rental marketplace backend.
//!
//! Students list items for short-term rental, browse listings, submit
//! rental requests, and approve or decline requests as owners.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
