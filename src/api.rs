// API layer for programmatic person lookups
//
// Construction and dispatch fail differently: building a PersonLookupAgent
// returns an error when the key or prompt is unusable, while every lookup
// returns a LookupResult no matter what the remote call does.

use crate::agent::AgentHandle;
use crate::agents::create_person_lookup_agent;
use crate::config::LookupConfig;
use crate::error::Result;
use crate::llm::{create_runner, AgentRunner};
use crate::prompt::{default_template_vars, render_instructions, TemplateVars};
use crate::report::{LookupResult, NO_OUTPUT_ERROR};
use futures::stream::{self, Stream};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Error text when a blocking lookup is attempted where blocking is impossible
pub const BLOCKING_IN_RUNTIME_ERROR: &str =
    "lookup_blocking called from within an async runtime; use lookup";

/// Researches people through a hosted agent with web search
///
/// The agent handle (instructions, tool, model) is fixed at construction and
/// shared by every lookup, so one instance can serve concurrent callers
/// through an `Arc`.
pub struct PersonLookupAgent {
    /// Configured remote agent
    agent: AgentHandle,

    /// Runtime that executes the agent
    runner: Arc<dyn AgentRunner>,
}

impl PersonLookupAgent {
    /// Create an agent from the environment, preferring `api_key` if given
    ///
    /// # Errors
    /// - No API key in the argument or `OPENAI_API_KEY`
    /// - Prompt template missing or not renderable
    pub fn new(api_key: Option<&str>) -> Result<Self> {
        let mut builder = PersonLookupAgentBuilder::new();
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    pub fn builder() -> PersonLookupAgentBuilder {
        PersonLookupAgentBuilder::new()
    }

    /// The configured agent handle
    pub fn agent(&self) -> &AgentHandle {
        &self.agent
    }

    /// Rendered system prompt
    pub fn instructions(&self) -> &str {
        self.agent.instructions()
    }

    /// Look up a person and return a report or a captured error
    ///
    /// Never fails: runner errors, empty output and runner panics all come
    /// back as an unsuccessful `LookupResult`.
    pub async fn lookup(&self, query: &str) -> LookupResult {
        tracing::debug!(
            "Dispatching lookup to {} via {} ({} chars)",
            self.agent.name(),
            self.runner.name(),
            query.len()
        );

        let run = AssertUnwindSafe(async { self.runner.run(&self.agent, query).await });

        match run.catch_unwind().await {
            Ok(Ok(output)) => match output.final_output.filter(|text| !text.trim().is_empty()) {
                Some(report) => {
                    tracing::info!(
                        "Lookup complete ({} chars, {} web searches)",
                        report.len(),
                        output.web_searches
                    );
                    LookupResult::success(query, report)
                }
                None => {
                    tracing::warn!("Lookup produced no output");
                    LookupResult::failure(query, NO_OUTPUT_ERROR)
                }
            },
            Ok(Err(e)) => {
                let message = format!("{:#}", e);
                tracing::warn!("Lookup failed: {}", message);
                LookupResult::failure(query, message)
            }
            Err(panic) => {
                let message = panic_message(&*panic);
                tracing::error!("Agent runner panicked: {}", message);
                LookupResult::failure(query, message)
            }
        }
    }

    /// Blocking variant of [`lookup`](Self::lookup) for synchronous callers
    ///
    /// Outside a runtime, drives the lookup on a private current-thread
    /// runtime. Inside a multi-thread runtime it blocks the worker through
    /// `block_in_place`; inside a current-thread runtime it cannot block
    /// and returns a failed record instead.
    pub fn lookup_blocking(&self, query: &str) -> LookupResult {
        if let Ok(handle) = Handle::try_current() {
            return match handle.runtime_flavor() {
                RuntimeFlavor::MultiThread => {
                    tokio::task::block_in_place(|| handle.block_on(self.lookup(query)))
                }
                _ => {
                    tracing::warn!("lookup_blocking called on a current-thread runtime");
                    LookupResult::failure(query, BLOCKING_IN_RUNTIME_ERROR)
                }
            };
        }

        match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime.block_on(self.lookup(query)),
            Err(e) => LookupResult::failure(query, format!("Failed to start async runtime: {}", e)),
        }
    }

    /// Lookup exposed as a stream
    ///
    /// Yields exactly one item once polled: the full report, or
    /// `"Error: <message>"`. This is not incremental token delivery.
    pub fn lookup_stream<'a>(&'a self, query: &'a str) -> impl Stream<Item = String> + Send + 'a {
        stream::once(async move { self.lookup(query).await.into_message() })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "Agent runner panicked".to_string()
    }
}

/// Look up a person without keeping an agent around
///
/// Equivalent to `PersonLookupAgent::new(api_key)?.lookup(query).await`.
pub async fn lookup_person(query: &str, api_key: Option<&str>) -> Result<LookupResult> {
    let agent = PersonLookupAgent::new(api_key)?;
    Ok(agent.lookup(query).await)
}

/// Builder for creating PersonLookupAgent instances with configuration
pub struct PersonLookupAgentBuilder {
    api_key: Option<String>,
    config: Option<LookupConfig>,
    prompts_dir: Option<PathBuf>,
    template_vars: TemplateVars,
    runner: Option<Arc<dyn AgentRunner>>,
}

impl PersonLookupAgentBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            api_key: None,
            config: None,
            prompts_dir: None,
            template_vars: TemplateVars::new(),
            runner: None,
        }
    }

    /// Explicit API key (takes precedence over `OPENAI_API_KEY`)
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Use this configuration instead of loading one from the environment
    pub fn config(mut self, config: LookupConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Directory containing `person_lookup_prompt.jinja2`
    pub fn prompts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.prompts_dir = Some(dir.into());
        self
    }

    /// Extra template variable, rendered alongside `current_date`
    pub fn template_var(mut self, name: impl Into<String>, value: impl Into<minijinja::Value>) -> Self {
        self.template_vars.insert(name.into(), value.into());
        self
    }

    /// Set the agent runner (optional - the OpenAI runner is used otherwise)
    pub fn runner(mut self, runner: Arc<dyn AgentRunner>) -> Self {
        self.runner = Some(runner);
        self
    }

    /// Build the PersonLookupAgent instance
    pub fn build(self) -> Result<PersonLookupAgent> {
        let mut config = match self.config {
            Some(config) => config,
            None => LookupConfig::load(self.api_key.as_deref())?,
        };
        if let Some(dir) = self.prompts_dir {
            config.prompts_dir = dir;
        }

        if config.export_credential {
            config.credential.export_to_env();
        }

        let mut vars = default_template_vars();
        vars.extend(self.template_vars);
        let instructions = render_instructions(&config.prompts_dir, &vars)?;

        let agent = create_person_lookup_agent(instructions, &config.model);

        let runner = match self.runner {
            Some(runner) => runner,
            None => create_runner(&config)?,
        };

        tracing::info!(
            "Initialized {} agent (model: {}, tools: {:?}, runner: {})",
            agent.name(),
            agent.model(),
            agent.tools().iter().map(|t| t.name()).collect::<Vec<_>>(),
            runner.name()
        );

        Ok(PersonLookupAgent { agent, runner })
    }
}

impl Default for PersonLookupAgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
