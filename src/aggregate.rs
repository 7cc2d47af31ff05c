use crate::error::{excerpt, GitlinesError, ParseError, Result};
use crate::git::HistorySource;
use crate::model::{AggregationResult, CommitRecord, DateWindow};
use crate::parse::parse_commit;
use tracing::{debug, info};

/// Fetch, parse and fold every id in order.
///
/// `on_progress(index, total)` fires once per id after it is processed, with
/// a 1-based index. The fetched header must name the listed id. The first
/// fetch, parse or overflow failure aborts the run and no partial result is
/// returned.
pub fn aggregate<F, P, R>(ids: &[String], mut fetch: F, parse: P, mut on_progress: R) -> Result<AggregationResult>
where
    F: FnMut(&str) -> Result<String>,
    P: Fn(&str) -> std::result::Result<CommitRecord, ParseError>,
    R: FnMut(usize, usize),
{
    let total = ids.len();
    let mut result = AggregationResult::new();

    for (idx, id) in ids.iter().enumerate() {
        let raw = fetch(id)?;
        let record = parse(&raw).map_err(|source| GitlinesError::MalformedCommitText {
            id: id.clone(),
            source,
        })?;
        if record.id != *id {
            return Err(GitlinesError::MalformedCommitText {
                id: id.clone(),
                source: ParseError::IdMismatch {
                    found: record.id,
                    excerpt: excerpt(&raw),
                },
            });
        }
        debug!(id = %id, author = %record.author, insertions = record.insertions, deletions = record.deletions, "folded commit");
        if !result.fold(record)? {
            debug!(id = %id, "commit already folded, skipping");
        }
        on_progress(idx + 1, total);
    }

    Ok(result)
}

/// List the commits in `window` and aggregate them with the stock parser.
pub fn collect_stats<S, R>(
    source: &S,
    window: &DateWindow,
    author: Option<&str>,
    on_progress: R,
) -> Result<AggregationResult>
where
    S: HistorySource + ?Sized,
    R: FnMut(usize, usize),
{
    let ids = source.list_commit_ids(window, author)?;
    info!(commits = ids.len(), start = %window.start, end = %window.end, "analyzing commits");
    aggregate(&ids, |id| source.fetch_commit(id), parse_commit, on_progress)
}
