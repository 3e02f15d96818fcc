use crate::checks::catalog::{self, CatalogFilter};
use crate::checks::{CheckDescriptor, Level, License, Rule};
use crate::error::{Cis365Error, Result};
use crate::session::Service;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Benchmark section number (1, 2, 3, 5, 6, 7, 8)
    #[arg(short, long)]
    section: Option<u8>,

    /// Profile level: L1 or L2
    #[arg(short, long)]
    level: Option<Level>,

    /// Tenant license tier: E3 or E5
    #[arg(long)]
    license: Option<License>,

    /// Upstream service: graph, exchange, teams
    #[arg(long)]
    service: Option<Service>,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Control ID, e.g. 6.5.4
    id: String,

    /// Print the metadata block as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ListEntry {
    id: &'static str,
    title: &'static str,
    level: Level,
    license: License,
    service: Service,
}

pub async fn list(args: ListArgs) -> Result<()> {
    let filter = CatalogFilter {
        section: args.section,
        level: args.level,
        license: args.license,
        service: args.service,
    };
    let checks = catalog::filter(&filter);

    if args.json {
        let entries: Vec<ListEntry> = checks
            .iter()
            .map(|c| ListEntry {
                id: c.id(),
                title: c.metadata.title,
                level: c.metadata.level,
                license: c.metadata.license,
                service: c.source.service(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if checks.is_empty() {
        println!("{} No checks match the filter", "!".yellow());
        return Ok(());
    }

    let mut current_section = None;
    for check in &checks {
        let section = check.metadata.section;
        if current_section != Some(section) {
            println!("\n{} {}", section.number().to_string().bold(), section.title().bold());
            println!("{}", "─".repeat(60));
            current_section = Some(section);
        }

        println!(
            "  {:<9} {} {}  {}",
            check.id().cyan(),
            check.metadata.level.to_string().dimmed(),
            check.metadata.license.to_string().dimmed(),
            check.metadata.title
        );
    }

    println!("\n{} {} check(s)", "→".cyan(), checks.len());

    Ok(())
}

pub async fn show(args: ShowArgs) -> Result<()> {
    let check = catalog::find(&args.id).ok_or_else(|| Cis365Error::UnknownControl(args.id.clone()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(check.metadata)?);
        return Ok(());
    }

    print_metadata(check);
    Ok(())
}

fn print_metadata(check: &CheckDescriptor) {
    let meta = check.metadata;

    println!("\n{} {}", meta.id.cyan().bold(), meta.title.bold());
    println!("{}", "─".repeat(60));
    println!(
        "  Section:      {} {}",
        meta.section.number(),
        meta.section.title()
    );
    println!("  Profile:      {} ({})", meta.level, meta.license);
    println!("  Service:      {}", check.source.service());
    println!("  Source:       {}", check.source.name());

    println!("\n{}", "Expected configuration:".bold());
    match check.rule {
        Rule::Each(fields) => {
            for rule in fields {
                println!("  {} {} {}", "•".cyan(), rule.field, rule.expect.describe());
            }
        }
        Rule::All { label, fields, .. } => {
            println!("  {} (all of):", label);
            for rule in fields {
                println!("    {} {} {}", "•".cyan(), rule.field, rule.expect.describe());
            }
        }
    }

    println!("\n{}\n  {}", "Description:".bold(), meta.description);
    println!("\n{}\n  {}", "Rationale:".bold(), meta.rationale);
    println!("\n{}\n  {}", "Audit:".bold(), meta.audit);
    println!("\n{}\n  {}", "Remediation:".bold(), meta.remediation);

    if !meta.cis_controls.is_empty() {
        println!(
            "\n{} {}",
            "CIS Controls v8:".bold(),
            meta.cis_controls.join(", ")
        );
    }

    if !meta.references.is_empty() {
        println!("\n{}", "References:".bold());
        for reference in meta.references {
            println!("  {}", reference.dimmed());
        }
    }
}
