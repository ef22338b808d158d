//! Wall-clock sleeper backed by the tokio timer

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::outbound::SleeperPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl SleeperPort for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
