//! Outbound adapters implementing the driven ports.
//!
//! - **memory**: mutex-guarded in-process stores, the default backend.
//! - **persistence**: PostgreSQL repositories using Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
