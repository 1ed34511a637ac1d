//! Domain types shared by every comicat crate.
//!
//! Nothing in here touches the database or the network: error taxonomy,
//! field validation rules, list policies and the authorization seam.

pub mod auth;
pub mod error;
pub mod listing;
pub mod types;
pub mod validation;
