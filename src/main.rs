// Demo binary: look up one person and print the report
//
// Usage: person-lookup [--json] [QUERY...]
// Without a query the first sample query is used.

use person_lookup::{version, LookupError, PersonLookupAgent};
use tracing_subscriber::EnvFilter;

const SAMPLE_QUERIES: [&str; 3] = [
    "Tell me about Andrew Lippman",
    "Find information about Ada Lovelace, the mathematician",
    "Who is Satya Nadella and what are his recent achievements?",
];

#[tokio::main]
async fn main() {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut words = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--version" | "-V" => {
                println!("{}", version::full_version_info());
                return;
            }
            _ => words.push(arg),
        }
    }
    let query = if words.is_empty() {
        SAMPLE_QUERIES[0].to_string()
    } else {
        words.join(" ")
    };

    let agent = match PersonLookupAgent::new(None) {
        Ok(agent) => agent,
        Err(e) if e.is_configuration_error() => {
            print_configuration_help(&e);
            std::process::exit(2);
        }
        Err(e) => {
            println!("Unexpected error: {}", e);
            std::process::exit(1);
        }
    };

    if !json {
        println!("✓ Agent initialized successfully\n");
        println!("Looking up: {}", query);
        println!("{}", "-".repeat(50));
    }

    let result = agent.lookup(&query).await;

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                tracing::error!("Failed to serialize result: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Some(report) = result.report() {
        println!("{}", report);
        println!("\n{}", "=".repeat(50));
        println!("Report generated at: {}", result.timestamp().to_rfc3339());
    } else {
        println!("Error: {}", result.error().unwrap_or_default());
    }

    if !result.is_success() {
        std::process::exit(1);
    }
}

fn print_configuration_help(error: &LookupError) {
    println!("Configuration Error: {}", error);
    println!("\nPlease make sure to:");
    println!("1. Create a .env file in the project directory");
    println!("2. Add your OpenAI API key: OPENAI_API_KEY=your_key_here");
    println!("3. Run from the directory containing prompts/person_lookup_prompt.jinja2");
    println!("   (or set PERSON_LOOKUP_PROMPTS_DIR)");
}
