use std::time::Duration;

use async_trait::async_trait;

/// Suspends the caller between polls. Injected so tests run without real delays.
#[async_trait]
pub trait SleeperPort: Send + Sync {
    async fn sleep(&self, duration: Duration);
}
