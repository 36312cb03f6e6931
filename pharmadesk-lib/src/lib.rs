//! Pharmacy dashboard client library
//!
//! An async Rust client library for a pharmacy management REST backend.
//! The centerpiece is a generic client-side table engine (filter, sort,
//! paginate, select) shared by the Users, Drugs and Orders views, plus a
//! mutation coordinator that sequences remote writes with the required
//! post-mutation reload.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod table;

mod client;

pub use client::*;
