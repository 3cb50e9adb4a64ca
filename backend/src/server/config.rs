//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use staffing_backend::inbound::http::session_config::SessionSettings;
use staffing_backend::outbound::supabase::SupabaseConfig;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) supabase: Option<SupabaseConfig>,
}

impl ServerConfig {
    /// Construct a server configuration backed by fixture adapters.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            supabase: None,
        }
    }

    /// Use the hosted Supabase project for auth and records.
    #[must_use]
    pub fn with_supabase(mut self, supabase: SupabaseConfig) -> Self {
        self.supabase = Some(supabase);
        self
    }
}
