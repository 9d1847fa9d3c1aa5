//! Request middleware.
//!
//! Purpose: request lifecycle concerns that apply to every route: correlation
//! identifiers and, in development, internal error detail.

pub mod error_details;
pub mod trace;

pub use error_details::ErrorDetails;
pub use trace::Trace;
