// Version information for person-lookup

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub fn version_string() -> String {
    format!("v{}", VERSION)
}

pub fn full_version_info() -> String {
    format!("PersonLookup {}", version_string())
}

/// HTTP User-Agent sent with agent runs
pub fn user_agent() -> String {
    format!("{}/{}", NAME, VERSION)
}
