//! Core types shared across modlens.
//!
//! Currently this hosts the error types; see [`error`] for the two-layer
//! design (typed [`ModlensError`] plus user-facing [`ErrorContext`]).

pub mod error;

pub use error::{ErrorContext, ModlensError, user_friendly_error};
