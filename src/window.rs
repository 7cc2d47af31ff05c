use crate::error::{GitlinesError, Result};
use crate::git::HistoryOrigin;
use crate::model::DateWindow;
use crate::parse::DATE_FORMAT;
use chrono::NaiveDate;
use tracing::debug;

/// Parse a user supplied `YYYY-MM-DD` date.
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|e| GitlinesError::InvalidDateInput {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Fill in missing window bounds.
///
/// A missing start becomes the date of the repository's first commit, looked
/// up over the whole history without any author filter. A missing end becomes
/// `today`. A history without commits starts the window at its end.
pub fn resolve_window<O>(
    origin: &O,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<DateWindow>
where
    O: HistoryOrigin + ?Sized,
{
    let end = end.unwrap_or(today);
    let start = match start {
        Some(s) => s,
        None => {
            let first = origin.first_commit_date()?;
            debug!(first_commit = ?first, "resolved default start date");
            first.unwrap_or(end)
        }
    };
    Ok(DateWindow::new(start, end))
}
