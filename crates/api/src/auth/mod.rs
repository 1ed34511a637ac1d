//! Authentication primitives.
//!
//! - [`jwt`] -- bearer token generation and validation.

pub mod jwt;
