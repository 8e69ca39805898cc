//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Only PostgreSQL persistence is needed: each adapter converts between
//! domain types and Diesel rows and contains no business logic.

pub mod persistence;
