use crate::error::Result;
use crate::model::DateWindow;
use chrono::NaiveDate;

/// The two queries the aggregation needs from a version-control history.
///
/// Implementations return raw text; interpretation belongs to
/// [`crate::parse`].
pub trait HistorySource {
    /// Commit ids in `window`, optionally restricted to authors matching
    /// `author`. An empty window yields an empty list.
    fn list_commit_ids(&self, window: &DateWindow, author: Option<&str>) -> Result<Vec<String>>;

    /// Header line plus change summary for one commit.
    fn fetch_commit(&self, id: &str) -> Result<String>;
}

/// Date of the oldest commit, regardless of any author filter.
pub trait HistoryOrigin {
    fn first_commit_date(&self) -> Result<Option<NaiveDate>>;
}
