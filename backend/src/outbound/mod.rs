//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! Adapters are thin translators between domain types and the hosted
//! service's wire formats. They contain no business logic.

pub mod supabase;
