// Agent handle: the fixed binding of instructions, tools and model that the
// hosted agent runtime executes for every query.
//
// Module Organization:
// - Tool and AgentHandle types defined in this file
// - Concrete agent presets live in crate::agents
//
// A handle is built once per PersonLookupAgent and never mutated afterwards,
// so it can be shared freely between concurrent lookups.

use serde::{Deserialize, Serialize};

/// A capability the hosted agent may invoke while reasoning
///
/// Serializes to the Responses API tool format, e.g.
/// `{"type": "web_search_preview"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Tool {
    /// Hosted web search; the agent decides when and how to call it
    #[serde(rename = "web_search_preview")]
    WebSearch,
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::WebSearch => "web_search",
        }
    }
}

/// Configured remote agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentHandle {
    name: String,
    instructions: String,
    tools: Vec<Tool>,
    model: String,
}

impl AgentHandle {
    pub fn new(name: impl Into<String>, instructions: String, tools: Vec<Tool>, model: String) -> Self {
        Self {
            name: name.into(),
            instructions,
            tools,
            model,
        }
    }

    /// Display name for the agent
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendered system prompt
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_search_tool_wire_format() {
        let json = serde_json::to_value(Tool::WebSearch).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "web_search_preview" }));
    }

    #[test]
    fn test_handle_accessors() {
        let handle = AgentHandle::new(
            "Tester",
            "Be brief.".to_string(),
            vec![Tool::WebSearch],
            "gpt-4o-mini".to_string(),
        );

        assert_eq!(handle.name(), "Tester");
        assert_eq!(handle.instructions(), "Be brief.");
        assert_eq!(handle.tools(), &[Tool::WebSearch]);
        assert_eq!(handle.model(), "gpt-4o-mini");
    }
}
