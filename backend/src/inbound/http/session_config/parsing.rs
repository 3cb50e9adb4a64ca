//! Environment parsing helpers for session configuration.

use actix_web::cookie::{SameSite, time::Duration};
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SAMESITE_ENV, SessionConfigError, TTL_MINUTES_ENV};

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";
const TTL_EXPECTED: &str = "whole minutes between 5 and 1440";
const TTL_DEFAULT_MINUTES: i64 = 120;
const TTL_RANGE: std::ops::RangeInclusive<i64> = 5..=1440;

/// Fall back to `fallback` with a warning in debug builds; fail otherwise.
fn fallback_or_error<T>(
    mode: BuildMode,
    fallback: T,
    error: SessionConfigError,
) -> Result<T, SessionConfigError> {
    if mode.is_debug() {
        warn!(%error, "session setting falls back to its development default");
        Ok(fallback)
    } else {
        Err(error)
    }
}

fn missing<T>(env_name: &'static str, mode: BuildMode, fallback: T) -> Result<T, SessionConfigError> {
    fallback_or_error(mode, fallback, SessionConfigError::MissingEnv { name: env_name })
}

fn invalid<T>(
    name: &'static str,
    value: String,
    expected: &'static str,
    mode: BuildMode,
    fallback: T,
) -> Result<T, SessionConfigError> {
    fallback_or_error(
        mode,
        fallback,
        SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        },
    )
}

pub(super) fn parse_bool_env<E: Env>(
    env: &E,
    mode: BuildMode,
    name: &'static str,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        return missing(name, mode, debug_default);
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None => invalid(name, value, BOOL_EXPECTED, mode, debug_default),
    }
}

pub(super) fn parse_same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let debug_default = SameSite::Lax;
    let Some(value) = env.string(SAMESITE_ENV) else {
        return missing(SAMESITE_ENV, mode, debug_default);
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" => fallback_or_error(mode, debug_default, SessionConfigError::InsecureSameSiteNone),
        _ => invalid(SAMESITE_ENV, value, SAMESITE_EXPECTED, mode, debug_default),
    }
}

pub(super) fn parse_ttl_minutes<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<Duration, SessionConfigError> {
    let debug_default = Duration::minutes(TTL_DEFAULT_MINUTES);
    let Some(value) = env.string(TTL_MINUTES_ENV) else {
        return missing(TTL_MINUTES_ENV, mode, debug_default);
    };
    match value.trim().parse::<i64>() {
        Ok(minutes) if TTL_RANGE.contains(&minutes) => Ok(Duration::minutes(minutes)),
        _ => invalid(TTL_MINUTES_ENV, value, TTL_EXPECTED, mode, debug_default),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
