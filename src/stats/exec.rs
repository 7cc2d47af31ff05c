use crate::aggregate::collect_stats;
use crate::cli::{CommonArgs, OutputArgs};
use crate::git::GitRepo;
use crate::progress::ProgressReporter;
use crate::window::{parse_date_arg, resolve_window};
use super::{output_json, output_ndjson, output_table};
use anyhow::Context;
use chrono::Local;
use tracing::info;

pub fn exec(common: CommonArgs, output: OutputArgs) -> anyhow::Result<()> {
    // Dates are validated before the repository is touched.
    let start = common
        .start_date
        .as_deref()
        .map(parse_date_arg)
        .transpose()
        .context("Invalid --start-date")?;
    let end = common
        .end_date
        .as_deref()
        .map(parse_date_arg)
        .transpose()
        .context("Invalid --end-date")?;

    let repo = GitRepo::open(common.repo.as_ref()).context("Failed to open git repository")?;

    let window = resolve_window(&repo, start, end, Local::now().date_naive())
        .context("Failed to resolve date range")?;
    info!(start = %window.start, end = %window.end, author = ?common.author, "resolved window");

    let reporter = ProgressReporter::new(!output.no_progress && !output.machine_readable());
    let result = collect_stats(&repo, &window, common.author.as_deref(), |idx, total| {
        reporter.tick(idx, total)
    });
    reporter.finish();
    let result = result.context("Failed to analyze commits")?;

    if output.json {
        output_json(&result, &repo, &window, &common, output.commits)?;
    } else if output.ndjson {
        output_ndjson(&result)?;
    } else {
        output_table(&result, &window, &common, output.commits)?;
    }

    Ok(())
}
