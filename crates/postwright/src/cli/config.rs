//! Configuration command handlers.

use super::commands::ConfigCommands;
use postwright::{ConfigReport, PostwrightConfig, PostwrightResult};

/// Handle configuration commands.
pub fn handle_config_command(cmd: ConfigCommands, config: &PostwrightConfig) -> PostwrightResult<()> {
    match cmd {
        ConfigCommands::Check => {
            let report = config.report();
            print!("{}", render_report(&report));
            println!("Brand guidelines: {}", config.brand().guidelines_path().display());
            println!("Image directory: {}", config.output().image_dir().display());
            println!("Platforms: {}", config.platforms().names().join(", "));
        }
    }
    Ok(())
}

fn render_report(report: &ConfigReport) -> String {
    let mut out = String::from("Configuration check\n");
    for (name, present) in report.checks() {
        let mark = if present { "ok" } else { "missing" };
        out.push_str(&format!("  {:<18} {}\n", name, mark));
    }
    let verdict = if report.can_generate() {
        "Ready to generate posts"
    } else {
        "Generation needs OPENAI_API_KEY and GOOGLE_API_KEY"
    };
    out.push_str(verdict);
    out.push('\n');
    out
}
