use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitlinesError>;

#[derive(Error, Debug)]
pub enum GitlinesError {
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("Commit not found: {id}: {detail}")]
    CommitNotFound { id: String, detail: String },
    #[error("Malformed commit text for {id}: {source}")]
    MalformedCommitText {
        id: String,
        #[source]
        source: ParseError,
    },
    #[error("Invalid date input '{input}': expected YYYY-MM-DD ({reason})")]
    InvalidDateInput { input: String, reason: String },
    #[error("Line counts overflow at commit {id} (author {author})")]
    CountOverflow { id: String, author: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GitlinesError {
    /// Short name of the error kind, used in user-facing diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            GitlinesError::SourceUnavailable(_) => "SourceUnavailable",
            GitlinesError::CommitNotFound { .. } => "CommitNotFound",
            GitlinesError::MalformedCommitText { .. } => "MalformedCommitText",
            GitlinesError::InvalidDateInput { .. } => "InvalidDateInput",
            GitlinesError::CountOverflow { .. } => "CountOverflow",
            GitlinesError::Io(_) => "Io",
        }
    }
}

/// Failure to read one commit's raw text block. Carries an excerpt of the
/// offending text for diagnosis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty commit text")]
    Empty,
    #[error("header has {found} of 4 '|' separated fields: {excerpt:?}")]
    Header { found: usize, excerpt: String },
    #[error("invalid date '{value}' in header: {excerpt:?}")]
    Date { value: String, excerpt: String },
    #[error("count '{value}' out of range: {excerpt:?}")]
    Count { value: String, excerpt: String },
    #[error("header names commit '{found}' instead of the requested one: {excerpt:?}")]
    IdMismatch { found: String, excerpt: String },
}

const EXCERPT_LEN: usize = 120;

/// First `EXCERPT_LEN` characters of `text`, on a char boundary.
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
