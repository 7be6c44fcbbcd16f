//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: JSON-file and in-memory patient repositories
//!
//! Adapters are thin translators that convert between domain types and
//! storage representations. They contain no business logic.

pub mod persistence;
