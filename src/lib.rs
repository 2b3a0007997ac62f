// Library interface for PersonLookup
// Sends a question about a person to a hosted LLM agent with web search and
// returns a structured report. Usable from Rust code, scripts and tests; the
// binary in main.rs is a demo on top of this API.

pub mod agent;
pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod report;
pub mod version;

// Re-export commonly used types for convenience
pub use agent::{AgentHandle, Tool};
pub use api::{lookup_person, PersonLookupAgent, PersonLookupAgentBuilder};
pub use config::{resolve_credential, Credential, LookupConfig};
pub use error::{LookupError, Result};
pub use llm::{AgentRunner, OpenAiResponsesRunner, RunOutput};
pub use prompt::{default_template_vars, render_instructions, TemplateVars};
pub use report::LookupResult;
