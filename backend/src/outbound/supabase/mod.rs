//! Supabase outbound adapters.
//!
//! One reqwest client implements both the `AuthGateway` port (GoTrue under
//! `/auth/v1`) and the `RecordStore` port (PostgREST under `/rest/v1`).

mod auth;
mod client;
mod dto;
mod rest;

pub use client::{SupabaseClient, SupabaseConfig};
