use crate::admin::AdminClient;
use crate::checks::{self, catalog, CheckDescriptor, CheckOutcome, CheckStatus};
use crate::cmd::progress;
use crate::config::ConfigManager;
use crate::error::{Cis365Error, Result};
use crate::session::Session;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Control IDs to run, e.g. 6.1.1 6.5.4
    #[arg(required = true)]
    ids: Vec<String>,

    /// Tenant name (defaults to the active tenant)
    #[arg(short, long)]
    tenant: Option<String>,

    /// Output format: text, json
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[derive(Serialize)]
struct RunRecord<'a> {
    id: &'static str,
    title: &'static str,
    #[serde(flatten)]
    outcome: &'a CheckOutcome,
}

/// Process exit status for a set of outcomes: 0 all pass, 1 any fail, 2 any error
pub fn exit_code(outcomes: &[CheckOutcome]) -> i32 {
    if outcomes.iter().any(|o| o.status() == CheckStatus::Error) {
        2
    } else if outcomes.iter().any(|o| o.status() == CheckStatus::Fail) {
        1
    } else {
        0
    }
}

fn resolve(ids: &[String]) -> Result<Vec<&'static CheckDescriptor>> {
    ids.iter()
        .map(|id| catalog::find(id).ok_or_else(|| Cis365Error::UnknownControl(id.clone())))
        .collect()
}

pub async fn run(args: RunArgs) -> Result<i32> {
    let json = match args.format.to_ascii_lowercase().as_str() {
        "json" => true,
        "text" => false,
        other => {
            return Err(Cis365Error::ConfigError(format!(
                "Unknown output format '{}' (expected text or json)",
                other
            )))
        }
    };

    let selected = resolve(&args.ids)?;

    let config = ConfigManager::load()?;
    let session = Session::load(&config, args.tenant.as_deref())?;
    let client = AdminClient::new(session, config.endpoints()?)?;

    if !json {
        println!(
            "\n{} {} check(s) against tenant {}",
            "→".cyan(),
            selected.len(),
            client.session().tenant_id().bold()
        );
    }

    let mut outcomes = Vec::with_capacity(selected.len());

    for check in &selected {
        let spinner = if json {
            progress::hidden_spinner()
        } else {
            progress::create_spinner(&format!("{} {}", check.id(), check.metadata.title))
        };

        let outcome = checks::execute(&client, check).await;
        let label = format!("{} {}", check.id(), check.metadata.title);

        match outcome.status() {
            CheckStatus::Pass => progress::finish_spinner_success(&spinner, &label),
            CheckStatus::Fail => progress::finish_spinner_fail(&spinner, &label),
            CheckStatus::Error => progress::finish_spinner_error(&spinner, &label),
        }

        if !json {
            print_outcome(&outcome);
        }

        outcomes.push(outcome);
    }

    if json {
        let records: Vec<RunRecord> = selected
            .iter()
            .zip(&outcomes)
            .map(|(check, outcome)| RunRecord {
                id: check.id(),
                title: check.metadata.title,
                outcome,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print_summary(&outcomes);
    }

    Ok(exit_code(&outcomes))
}

fn print_outcome(outcome: &CheckOutcome) {
    if let Some(message) = outcome.error_message() {
        println!("    {} {}", "Error:".red(), message);
        return;
    }

    for result in outcome.details() {
        let marker = if result.is_compliant {
            "✓".green()
        } else {
            "✗".red()
        };
        let name = match &result.resource {
            Some(resource) => format!("{} [{}]", result.name, resource),
            None => result.name.clone(),
        };

        print!("    {} {} = {}", marker, name, result.current_value);
        if let (false, Some(expected)) = (result.is_compliant, &result.expected_value) {
            print!(" {}", format!("(expected {})", expected).dimmed());
        }
        println!();

        if let Some(details) = &result.details {
            println!("      {}", details.dimmed());
        }
    }
}

fn print_summary(outcomes: &[CheckOutcome]) {
    let count = |status: CheckStatus| outcomes.iter().filter(|o| o.status() == status).count();

    println!("\n{}", "─".repeat(60));
    println!(
        "{} {} passed, {} failed, {} error(s)",
        "→".cyan(),
        count(CheckStatus::Pass).to_string().green(),
        count(CheckStatus::Fail).to_string().yellow(),
        count(CheckStatus::Error).to_string().red()
    );
}
