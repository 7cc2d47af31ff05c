//! Reading one commit's `git show --stat` style text into a [`CommitRecord`].
//!
//! The first line is a `id|author|date|message` header. Counts are taken from
//! every `<n> insertion` / `<n> deletion` occurrence after the header and
//! summed, so multi-group summaries add up instead of keeping the last match.

use crate::error::{excerpt, ParseError};
use crate::model::CommitRecord;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static INSERTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+insertion").expect("valid insertion pattern"));
static DELETION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+deletion").expect("valid deletion pattern"));

pub fn parse_commit(raw: &str) -> Result<CommitRecord, ParseError> {
    let (header, body) = match raw.split_once('\n') {
        Some((header, body)) => (header, body),
        None => (raw, ""),
    };
    let header = header.trim_end_matches('\r');
    if header.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let fields: Vec<&str> = header.splitn(4, '|').collect();
    let &[id, author, date, message] = fields.as_slice() else {
        return Err(ParseError::Header {
            found: fields.len(),
            excerpt: excerpt(header),
        });
    };

    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| ParseError::Date {
        value: date.to_string(),
        excerpt: excerpt(header),
    })?;

    Ok(CommitRecord {
        id: id.trim().to_string(),
        author: author.to_string(),
        date,
        message: message.to_string(),
        insertions: sum_counts(&INSERTION_RE, body)?,
        deletions: sum_counts(&DELETION_RE, body)?,
    })
}

fn sum_counts(pattern: &Regex, body: &str) -> Result<u64, ParseError> {
    let mut total = 0u64;
    for caps in pattern.captures_iter(body) {
        let value = &caps[1];
        let n = value
            .parse::<u64>()
            .ok()
            .and_then(|n| total.checked_add(n))
            .ok_or_else(|| ParseError::Count {
                value: value.to_string(),
                excerpt: excerpt(body),
            })?;
        total = n;
    }
    Ok(total)
}
