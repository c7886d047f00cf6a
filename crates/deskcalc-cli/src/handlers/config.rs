//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;

/// Renders the effective configuration as pretty JSON
pub fn render_config(config: &CliConfig) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

/// Execute the config command
pub fn execute_config(config: &CliConfig) -> CliResult<()> {
    println!("{}", render_config(config)?);
    Ok(())
}
