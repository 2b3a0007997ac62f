// Agent Configurations Module
// Contains pre-configured agents for specialized tasks

pub mod person_lookup;

pub use person_lookup::{create_person_lookup_agent, PERSON_LOOKUP_AGENT_NAME};
