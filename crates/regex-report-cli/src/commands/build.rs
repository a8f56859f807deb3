//! Build command - validate every prefix and write the report.

use colored::Colorize;
use regex_report::report::DetailAction;
use regex_report::{RegexReport, ReportConfig};

use crate::console::Console;

pub fn run(
    single: Option<String>,
    verbose: bool,
    console: &Console,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = ReportConfig::from_env()?;

    if verbose {
        println!(
            "{} {}",
            "Registry:".cyan().bold(),
            config.registry.to_string().white()
        );
        println!(
            "{} {}",
            "Identifiers:".cyan().bold(),
            config.identifiers_dir.display().to_string().white()
        );
        println!(
            "{} {}",
            "Output:".cyan().bold(),
            config.output_dir.display().to_string().white()
        );
        println!();
    }

    let report = RegexReport::from_config(config)?;
    let summary = report.run(single.as_deref(), console)?;

    println!();
    println!(
        "Validated {} prefixes ({} with invalid identifiers, {} consistent, {} skipped)",
        summary.processed.to_string().white().bold(),
        summary.scored.len().to_string().yellow(),
        summary.consistent.to_string().green(),
        summary.absent.len().to_string().dimmed()
    );

    if verbose && !summary.absent.is_empty() {
        println!("{}", "Skipped:".yellow().bold());
        for (prefix, reason) in &summary.absent {
            println!("  {} {} ({})", "•".dimmed(), prefix, reason);
        }
    }

    if verbose {
        for (_, action) in &summary.details {
            match action {
                DetailAction::Written(path) => println!("  {} {}", "wrote".green(), path.display()),
                DetailAction::Removed(path) => {
                    println!("  {} {}", "removed".yellow(), path.display())
                }
                DetailAction::Unchanged => {}
            }
        }
    }

    match (&summary.table, &summary.document) {
        (Some(table), Some(document)) => {
            println!(
                "{} {} and {}",
                "Saved to".green().bold(),
                table.display().to_string().white(),
                document.display().to_string().white()
            );
        }
        _ => {
            if let Some(prefix) = single {
                println!(
                    "{} aggregate report not written for single prefix {}",
                    "Note:".yellow(),
                    prefix.cyan()
                );
            }
        }
    }

    Ok(())
}
