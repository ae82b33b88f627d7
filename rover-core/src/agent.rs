use crate::{AgentHistoryList, Result};
use async_trait::async_trait;

/// Runs one task to completion.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;
    fn task(&self) -> &str;
    async fn run(&self) -> Result<AgentHistoryList>;
}
