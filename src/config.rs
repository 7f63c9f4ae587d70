use std::time::Duration;

use crate::client::DEFAULT_BASE_URL;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);
pub const DEFAULT_FULL_REFRESH_EVERY: u32 = 100;

/// Settings of the background refresh worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    /// Root of the score sheet site; the listing lives here
    pub base_url: String,
    /// Pause between two fast refreshes
    pub tick: Duration,
    /// Number of ticks between two full refreshes
    pub full_refresh_every: u32,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tick: DEFAULT_TICK,
            full_refresh_every: DEFAULT_FULL_REFRESH_EVERY,
        }
    }
}

impl RefreshConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_full_refresh_every(mut self, ticks: u32) -> Self {
        self.full_refresh_every = ticks.max(1);
        self
    }
}
