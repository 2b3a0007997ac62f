mod openai;
mod types;

pub use openai::OpenAiResponsesRunner;
pub use types::RunOutput;

use crate::agent::AgentHandle;
use crate::config::LookupConfig;
use anyhow::Result;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;

/// Interface to a hosted agent runtime
///
/// One call runs the agent to completion: the runtime reasons, calls its
/// tools as often as it likes, and returns the final output. Implementations
/// must not retry; a failed run is reported once.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AgentRunner: Send + Sync {
    /// Run `agent` on `input` and return its final output
    async fn run(&self, agent: &AgentHandle, input: &str) -> Result<RunOutput>;

    /// Get the runner name for logging/debugging
    fn name(&self) -> &str;
}

/// Build the production runner for `config`
pub fn create_runner(config: &LookupConfig) -> crate::error::Result<Arc<dyn AgentRunner>> {
    Ok(Arc::new(OpenAiResponsesRunner::from_config(config)?))
}
