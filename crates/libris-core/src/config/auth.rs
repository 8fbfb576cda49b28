//! Authentication configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Longest accepted token lifetime: ten years.
pub const MAX_TOKEN_TTL_HOURS: u64 = 10 * 366 * 24;

/// Longest accepted expired-token sweep interval: one week.
pub const MAX_SWEEP_INTERVAL_MINUTES: u64 = 7 * 24 * 60;

/// Credential hashing and bearer token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Lifetime of a newly issued bearer token, in hours.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Argon2id memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2id iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
    /// Argon2id degree of parallelism.
    #[serde(default = "default_argon2_parallelism")]
    pub argon2_parallelism: u32,
    /// Interval between sweeps of expired token rows, in minutes (0 disables).
    #[serde(default = "default_sweep_interval")]
    pub token_sweep_interval_minutes: u64,
}

impl AuthConfig {
    /// Token lifetime as a `Duration`.
    ///
    /// Fails with a configuration error unless the lifetime is between one
    /// hour and [`MAX_TOKEN_TTL_HOURS`].
    pub fn token_ttl(&self) -> AppResult<Duration> {
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&self.token_ttl_hours) {
            return Err(AppError::configuration(format!(
                "auth.token_ttl_hours must be between 1 and {MAX_TOKEN_TTL_HOURS}, got {}",
                self.token_ttl_hours
            )));
        }
        Ok(Duration::from_secs(self.token_ttl_hours * 3600))
    }

    /// Checks the settings that can only fail at use time.
    pub fn validate(&self) -> AppResult<()> {
        self.token_ttl()?;
        if self.token_sweep_interval_minutes > MAX_SWEEP_INTERVAL_MINUTES {
            return Err(AppError::configuration(format!(
                "auth.token_sweep_interval_minutes must be at most {MAX_SWEEP_INTERVAL_MINUTES}, got {}",
                self.token_sweep_interval_minutes
            )));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: default_token_ttl(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
            argon2_parallelism: default_argon2_parallelism(),
            token_sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

fn default_token_ttl() -> u64 {
    24
}

fn default_argon2_memory() -> u32 {
    19456
}

fn default_argon2_iterations() -> u32 {
    2
}

fn default_argon2_parallelism() -> u32 {
    1
}

fn default_sweep_interval() -> u64 {
    60
}
