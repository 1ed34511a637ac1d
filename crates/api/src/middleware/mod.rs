//! Request extractors.
//!
//! - [`auth::Grant`] -- the caller's permissions, from an optional bearer token.

pub mod auth;
