// Person Lookup Agent Configuration
// This agent researches individuals on the web and writes a sourced report

use crate::agent::{AgentHandle, Tool};

/// Display name of the person lookup agent
pub const PERSON_LOOKUP_AGENT_NAME: &str = "PersonLookup";

/// Create the person lookup agent
///
/// # Features
/// - Exactly one tool: hosted web search
/// - Instructions are the rendered person lookup prompt
/// - Model is fixed for the lifetime of the handle
pub fn create_person_lookup_agent(instructions: String, model: &str) -> AgentHandle {
    AgentHandle::new(
        PERSON_LOOKUP_AGENT_NAME,
        instructions,
        vec![Tool::WebSearch],
        model.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;

    #[test]
    fn test_person_lookup_agent_creation() {
        let agent = create_person_lookup_agent("Research people.".to_string(), DEFAULT_MODEL);

        assert_eq!(agent.name(), "PersonLookup");
        assert_eq!(agent.instructions(), "Research people.");
        assert_eq!(agent.model(), "gpt-4o-mini");
    }

    #[test]
    fn test_person_lookup_agent_has_only_web_search() {
        let agent = create_person_lookup_agent(String::new(), DEFAULT_MODEL);

        assert_eq!(agent.tools().len(), 1);
        assert_eq!(agent.tools()[0], Tool::WebSearch);
    }
}
