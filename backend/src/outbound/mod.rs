//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM.
//! - **memory**: mutex-guarded in-process tables implementing the same ports.
//!
//! Adapters are thin translators between domain records and storage
//! representations.

pub mod memory;
pub mod persistence;
