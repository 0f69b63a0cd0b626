//! Core domain types and utilities for groupdesk.
//!
//! This crate provides the foundational types and error handling shared by
//! the session model, the API client and the web dashboard.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::UserId;
