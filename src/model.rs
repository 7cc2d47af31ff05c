use crate::error::{GitlinesError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const SCHEMA_VERSION: u32 = 1;

/// One commit as read from the history source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub id: String,
    pub author: String,
    pub date: NaiveDate,
    pub message: String,
    pub insertions: u64,
    pub deletions: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTotals {
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
}

impl AuthorTotals {
    /// Totals with `record` counted in, or `None` if any sum would overflow.
    pub fn checked_add_commit(&self, record: &CommitRecord) -> Option<AuthorTotals> {
        Some(AuthorTotals {
            commits: self.commits.checked_add(1)?,
            insertions: self.insertions.checked_add(record.insertions)?,
            deletions: self.deletions.checked_add(record.deletions)?,
        })
    }

    pub fn lines_changed(&self) -> u128 {
        u128::from(self.insertions) + u128::from(self.deletions)
    }

    pub fn net_change(&self) -> i128 {
        i128::from(self.insertions) - i128::from(self.deletions)
    }
}

/// Per-author totals keyed by author name, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorTable {
    entries: Vec<(String, AuthorTotals)>,
    index: HashMap<String, usize>,
}

impl AuthorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&mut self, author: &str) -> &mut AuthorTotals {
        let idx = match self.index.get(author) {
            Some(&idx) => idx,
            None => {
                self.entries.push((author.to_string(), AuthorTotals::default()));
                let idx = self.entries.len() - 1;
                self.index.insert(author.to_string(), idx);
                idx
            }
        };
        &mut self.entries[idx].1
    }

    pub fn get(&self, author: &str) -> Option<&AuthorTotals> {
        self.index.get(author).map(|&idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorTotals)> {
        self.entries.iter().map(|(name, totals)| (name.as_str(), totals))
    }

    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of one aggregation run: per-author totals plus every processed
/// commit, retrievable by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationResult {
    by_author: AuthorTable,
    commits: Vec<CommitRecord>,
    by_id: HashMap<String, usize>,
    total: AuthorTotals,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record in. Returns `Ok(false)` and leaves totals untouched
    /// when a commit with the same id was already folded. Nothing changes
    /// when a sum would overflow.
    pub fn fold(&mut self, record: CommitRecord) -> Result<bool> {
        if self.by_id.contains_key(&record.id) {
            return Ok(false);
        }
        let current = self.by_author.get(&record.author).copied().unwrap_or_default();
        let (Some(author_totals), Some(total)) =
            (current.checked_add_commit(&record), self.total.checked_add_commit(&record))
        else {
            return Err(GitlinesError::CountOverflow {
                id: record.id,
                author: record.author,
            });
        };
        *self.by_author.entry(&record.author) = author_totals;
        self.total = total;
        self.by_id.insert(record.id.clone(), self.commits.len());
        self.commits.push(record);
        Ok(true)
    }

    pub fn by_author(&self) -> &AuthorTable {
        &self.by_author
    }

    pub fn commit(&self, id: &str) -> Option<&CommitRecord> {
        self.by_id.get(id).map(|&idx| &self.commits[idx])
    }

    /// Commits in processing order.
    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn total(&self) -> AuthorTotals {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Inclusive calendar window handed to the history source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub author: String,
    pub commits: u64,
    pub insertions: u64,
    pub deletions: u64,
    pub lines_changed: u128,
    pub net_change: i128,
}

impl AuthorEntry {
    pub fn new(author: &str, totals: &AuthorTotals) -> Self {
        Self {
            author: author.to_string(),
            commits: totals.commits,
            insertions: totals.insertions,
            deletions: totals.deletions,
            lines_changed: totals.lines_changed(),
            net_change: totals.net_change(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub author_filter: Option<String>,
    pub authors: Vec<AuthorEntry>,
    pub total: AuthorEntry,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<CommitRecord>>,
}
