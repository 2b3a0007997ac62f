// Instruction composer: renders the person lookup system prompt
//
// The template is rendered once when the agent is built; the resulting text
// is the agent's fixed instructions for its whole lifetime, so `current_date`
// reflects construction time, not query time.

use crate::error::{LookupError, Result};
use chrono::Local;
use minijinja::{path_loader, Environment, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the system prompt inside the prompts directory
pub const PROMPT_TEMPLATE_NAME: &str = "person_lookup_prompt.jinja2";

/// Variables made available to the template
pub type TemplateVars = BTreeMap<String, Value>;

/// The variables every render receives: today's date as `YYYY-MM-DD`
pub fn default_template_vars() -> TemplateVars {
    let mut vars = TemplateVars::new();
    vars.insert(
        "current_date".to_string(),
        Value::from(Local::now().format("%Y-%m-%d").to_string()),
    );
    vars
}

/// Render `person_lookup_prompt.jinja2` from `prompts_dir` with `vars`
///
/// # Errors
/// - `LookupError::TemplateError` if the template is missing or fails to render;
///   the message includes the minijinja cause
pub fn render_instructions(prompts_dir: &Path, vars: &TemplateVars) -> Result<String> {
    let mut env = Environment::new();
    env.set_loader(path_loader(prompts_dir.to_path_buf()));

    env.get_template(PROMPT_TEMPLATE_NAME)
        .and_then(|template| template.render(vars))
        .map_err(|e| LookupError::TemplateError(format!("Failed to load prompt template: {}", e)))
}
