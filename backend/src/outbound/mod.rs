//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **menu**: catalogue sources (built-in menu or a JSON file)
//!
//! Adapters are thin translators between domain types and their external
//! representation. They contain no business logic.

pub mod menu;
