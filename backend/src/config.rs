//! Application settings loaded via OrthoConfig.
//!
//! Values come from `STAFFING_*` environment variables or the matching CLI
//! flags. Session cookie settings are separate; see
//! [`session_config`](crate::inbound::http::session_config).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::supabase::SupabaseConfig;

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED), 8080);

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("STAFFING_SUPABASE_URL is not a valid URL: {0}")]
    InvalidSupabaseUrl(#[from] url::ParseError),
    #[error("{present} is set but {missing} is not")]
    IncompleteSupabase {
        present: &'static str,
        missing: &'static str,
    },
    #[error("STAFFING_REQUEST_TIMEOUT_SECS must be positive")]
    ZeroTimeout,
}

/// Process-level settings for the HTTP server and hosted backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STAFFING")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// Supabase project URL; fixture adapters are used when unset.
    pub supabase_url: Option<String>,
    /// Supabase anon (public) key.
    pub supabase_anon_key: Option<String>,
    /// Timeout for each request to the hosted backend, in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl AppSettings {
    /// Configured bind address, defaulting to `0.0.0.0:8080`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Supabase connection settings, or `None` when the hosted backend is
    /// not configured at all.
    ///
    /// # Errors
    ///
    /// Fails when only one of URL and key is set, the URL does not parse, or
    /// the timeout is zero.
    pub fn supabase(&self) -> Result<Option<SupabaseConfig>, SettingsError> {
        let (url, anon_key) = match (
            non_blank(self.supabase_url.as_deref()),
            non_blank(self.supabase_anon_key.as_deref()),
        ) {
            (None, None) => return Ok(None),
            (Some(url), Some(key)) => (url, key),
            (Some(_), None) => {
                return Err(SettingsError::IncompleteSupabase {
                    present: "STAFFING_SUPABASE_URL",
                    missing: "STAFFING_SUPABASE_ANON_KEY",
                });
            }
            (None, Some(_)) => {
                return Err(SettingsError::IncompleteSupabase {
                    present: "STAFFING_SUPABASE_ANON_KEY",
                    missing: "STAFFING_SUPABASE_URL",
                });
            }
        };
        let timeout_secs = self.request_timeout_secs;
        if timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(Some(
            SupabaseConfig::new(Url::parse(url)?, anon_key)
                .with_timeout(Duration::from_secs(timeout_secs)),
        ))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
