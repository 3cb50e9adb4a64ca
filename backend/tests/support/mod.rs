//! Shared harness for the HTTP behaviour suites.

pub mod api_world;
pub mod steps;
