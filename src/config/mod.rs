/// Configuration management for the reqflow client
///
/// Handles the API endpoint, HTTP timeouts, and diagram canvas parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Requirements API configuration
    pub api: ApiConfig,
    /// Diagram editor configuration
    pub canvas: CanvasConfig,
}

/// External CRUD API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g., "http://localhost:5000/api")
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum number of per-page functionality fetches in flight during an entity load
    pub fetch_concurrency: usize,
}

/// Diagram canvas configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Width of the region new nodes are dropped into
    pub width: f64,
    /// Height of the region new nodes are dropped into
    pub height: f64,
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CanvasConfig {
    /// Usable width and height; non-finite or non-positive sizes fall back to the default
    pub fn extent(&self) -> (f64, f64) {
        let fallback = Self::default();
        (
            usable_dimension(self.width, fallback.width),
            usable_dimension(self.height, fallback.height),
        )
    }
}

fn usable_dimension(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 400.0, height: 400.0 }
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support
    fn default() -> Self {
        let canvas = CanvasConfig::default();
        Self {
            api: ApiConfig {
                base_url: std::env::var("REQFLOW_API_URL")
                    .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
                timeout_secs: env_or("REQFLOW_TIMEOUT_SECS", 30),
                fetch_concurrency: env_or("REQFLOW_FETCH_CONCURRENCY", 4usize).max(1),
            },
            canvas: CanvasConfig {
                width: canvas_dimension("REQFLOW_CANVAS_WIDTH", canvas.width),
                height: canvas_dimension("REQFLOW_CANVAS_HEIGHT", canvas.height),
            },
        }
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

/// Canvas size from the environment; `inf`, `NaN`, zero and negatives are ignored
fn canvas_dimension(key: &str, default: f64) -> f64 {
    let value = env_or(key, default);
    if value.is_finite() && value > 0.0 {
        value
    } else {
        tracing::warn!("⚠️ Ignoring {}={}, using {}", key, value, default);
        default
    }
}
