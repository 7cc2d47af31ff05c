use crate::cli::CommonArgs;
use crate::git::GitRepo;
use crate::model::{AggregationResult, AuthorEntry, AuthorTotals, DateWindow, StatsOutput, SCHEMA_VERSION};
use crate::util::{group_thousands, signed_thousands};
use anyhow::Result;
use chrono::Utc;
use console::style;
use std::fmt::Write;

const WIDTH: usize = 60;

pub fn build_output(
    result: &AggregationResult,
    repository_path: String,
    window: &DateWindow,
    author_filter: Option<String>,
    include_commits: bool,
) -> StatsOutput {
    StatsOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path,
        start_date: window.start,
        end_date: window.end,
        author_filter,
        authors: result
            .by_author()
            .iter()
            .map(|(author, totals)| AuthorEntry::new(author, totals))
            .collect(),
        total: AuthorEntry::new("TOTAL", &result.total()),
        commits: include_commits.then(|| result.commits().to_vec()),
    }
}

pub fn output_json(
    result: &AggregationResult,
    repo: &GitRepo,
    window: &DateWindow,
    common: &CommonArgs,
    include_commits: bool,
) -> Result<()> {
    let output = build_output(
        result,
        repo.path().to_string_lossy().to_string(),
        window,
        common.author.clone(),
        include_commits,
    );
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn output_ndjson(result: &AggregationResult) -> Result<()> {
    for (author, totals) in result.by_author().iter() {
        println!("{}", serde_json::to_string(&AuthorEntry::new(author, totals))?);
    }
    Ok(())
}

pub fn output_table(
    result: &AggregationResult,
    window: &DateWindow,
    common: &CommonArgs,
    include_commits: bool,
) -> Result<()> {
    print!("{}", render_table(result, window, common.author.as_deref(), include_commits)?);
    Ok(())
}

pub fn render_table(
    result: &AggregationResult,
    window: &DateWindow,
    author_filter: Option<&str>,
    include_commits: bool,
) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "{}", "═".repeat(WIDTH))?;
    writeln!(out, "{}", style("Git Repository Analysis").bold())?;
    writeln!(out, "Period: {} to {}", window.start, window.end)?;
    if let Some(author) = author_filter {
        writeln!(out, "Author: {author}")?;
    }
    writeln!(out, "{}", "─".repeat(WIDTH))?;

    if result.is_empty() {
        writeln!(out, "\nNo commits found in this period")?;
    }

    for (author, totals) in result.by_author().iter() {
        writeln!(out, "\nAuthor: {}", style(author).cyan())?;
        writeln!(out, "{}", "─".repeat(WIDTH))?;
        write_totals(&mut out, "Commits:       ", totals)?;
    }

    if result.by_author().len() > 1 {
        writeln!(out, "\n{}", style("TOTAL STATISTICS").bold())?;
        writeln!(out, "{}", "─".repeat(WIDTH))?;
        write_totals(&mut out, "Total commits: ", &result.total())?;
    }

    if include_commits && !result.is_empty() {
        writeln!(out, "\n{}", style("COMMITS").bold())?;
        writeln!(out, "{}", "─".repeat(WIDTH))?;
        for c in result.commits() {
            let short: String = c.id.chars().take(8).collect();
            writeln!(
                out,
                "{} {} {:<20} {:>8} {:>8}  {}",
                style(short).dim(),
                c.date,
                c.author,
                style(format!("+{}", group_thousands(c.insertions))).green(),
                style(format!("-{}", group_thousands(c.deletions))).red(),
                c.message
            )?;
        }
    }

    writeln!(out, "{}", "═".repeat(WIDTH))?;
    Ok(out)
}

fn write_totals(out: &mut String, commits_label: &str, totals: &AuthorTotals) -> std::fmt::Result {
    writeln!(out, "{commits_label} {}", group_thousands(totals.commits))?;
    writeln!(out, "Lines added:    +{}", group_thousands(totals.insertions))?;
    writeln!(out, "Lines removed:  -{}", group_thousands(totals.deletions))?;
    writeln!(out, "Lines changed:   {}", group_thousands(totals.lines_changed()))?;
    writeln!(out, "Net change:     {}", signed_thousands(totals.net_change()))
}
