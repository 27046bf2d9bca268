//! Show version information.

use anyhow::Result;
use applog_core::config::ENV_PREFIX;
use applog_core::Severity;
use colored::Colorize;

pub fn execute(verbose: bool) -> Result<()> {
    println!("{} {}", "applog".cyan().bold(), env!("CARGO_PKG_VERSION"));

    if verbose {
        let levels: Vec<&str> = Severity::ALL.iter().map(Severity::as_str).collect();
        println!("  severities: {}", levels.join(" < "));
        println!("  environment overrides: {}*", ENV_PREFIX);
        println!("  platform: {}-{}", std::env::consts::ARCH, std::env::consts::OS);
    }

    Ok(())
}
