//! Terminal output formatting.

use aero_core::mapping::MappingReport;
use aero_db::queries::mappings::CriticalMappingRow;
use aero_graph::GraphSummary;
use colored::Colorize;

/// Print per-record mapper outcomes, one block per source record.
pub fn print_outcomes(report: &MappingReport) {
    for outcome in &report.outcomes {
        println!("{} {}", "●".cyan(), outcome.name.bold());

        for created in &outcome.created {
            if created.critical {
                println!(
                    "  {} {} ({}) {}",
                    "→".dimmed(),
                    created.entity.green(),
                    created.detail,
                    "[CRITICAL]".red().bold()
                );
            } else {
                println!(
                    "  {} {} ({})",
                    "→".dimmed(),
                    created.entity.green(),
                    created.detail
                );
            }
        }

        for code in &outcome.unresolved {
            println!(
                "  {} {} {}",
                "→".dimmed(),
                code.yellow(),
                "(unknown entity)".dimmed()
            );
        }

        for code in &outcome.failed {
            println!(
                "  {} {} {}",
                "→".dimmed(),
                code.red(),
                "(write failed)".dimmed()
            );
        }
    }
}

/// Print the batch summary block for one mapper run.
pub fn print_summary(noun: &str, report: &MappingReport) {
    println!();
    println!("{}", "─".repeat(60).dimmed());
    println!("{}", "Summary".bold());
    println!("  {:<20} {}", format!("Total {}:", noun), report.total_records);
    println!(
        "  {:<20} {}",
        "Mapped:",
        report.records_mapped.to_string().green()
    );
    println!("  {:<20} {}", "Not mapped:", report.records_not_mapped());
    println!(
        "  {:<20} {}",
        "Mappings created:",
        report.mappings_created.to_string().green()
    );

    if report.unresolved > 0 {
        println!(
            "  {:<20} {}",
            "Unresolved entities:",
            report.unresolved.to_string().yellow()
        );
    }
    if report.failed > 0 {
        println!(
            "  {:<20} {}",
            "Failed writes:",
            report.failed.to_string().red()
        );
    }
}

/// Print the mappings-by-entity distribution.
pub fn print_distribution(counts: &[(String, i64)], noun: &str, include_zeros: bool) {
    println!();
    println!("{}", "Mappings by data entity:".bold());

    for (code, count) in counts {
        if !include_zeros && *count == 0 {
            continue;
        }
        println!("  {}: {} {}", code.cyan(), count, noun);
    }
}

/// Print the critical real-time agent feeds, first five only.
pub fn print_critical_agents(rows: &[CriticalMappingRow]) {
    println!();
    println!("{}", "Critical real-time agents:".bold());

    if rows.is_empty() {
        println!("  {}", "(none configured)".dimmed());
        return;
    }

    for row in rows.iter().take(5) {
        println!(
            "  {} {} {} {}",
            "⚠".yellow(),
            row.agent_name,
            "→".dimmed(),
            row.entity_code.red()
        );
    }
    if rows.len() > 5 {
        println!("  {}", format!("... and {} more", rows.len() - 5).dimmed());
    }
}

/// Print the per-label graph summary.
pub fn print_graph_summary(summary: &GraphSummary) {
    println!("  Workflows:     {}", summary.workflows.to_string().cyan());
    println!("  Versions:      {}", summary.versions.to_string().cyan());
    println!("  Agents:        {}", summary.agents.to_string().cyan());
    println!("  Domains:       {}", summary.domains.to_string().cyan());
    println!("  Subdomains:    {}", summary.subdomains.to_string().cyan());
    println!(
        "  Opportunities: {}",
        summary.opportunities.to_string().cyan()
    );
}
