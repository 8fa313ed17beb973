//! Batch workflows built on the client.
//!
//! These drive many resource calls in sequence and decide, per item, whether
//! a failure is skipped or ends the run. Deployment-specific identifiers
//! (group IDs, custom field names, asset type names) are always supplied
//! by the caller.

mod assets;
mod directory;

pub use assets::*;
pub use directory::*;

use std::time::Duration;

/// Options shared by the batch workflows.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Log what would change without issuing mutating calls.
    pub dry_run: bool,

    /// Pause between consecutive mutating calls.
    pub pace: Duration,
}

impl RunOptions {
    pub(crate) async fn pause(&self) {
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_for_pace() {
        let options = RunOptions {
            dry_run: false,
            pace: Duration::from_secs(2),
        };
        let started = tokio::time::Instant::now();
        options.pause().await;
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_pace_does_not_sleep() {
        let started = tokio::time::Instant::now();
        RunOptions::default().pause().await;
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}
