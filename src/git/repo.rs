use crate::error::{GitlinesError, Result};
use crate::git::source::{HistoryOrigin, HistorySource};
use crate::model::DateWindow;
use crate::parse::DATE_FORMAT;
use chrono::NaiveDate;
use gix::{discover, Repository};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::{debug, warn};

const SHOW_FORMAT: &str = "--format=%H|%an|%ad|%s";

/// `git log` arguments listing commit ids in `window`.
fn list_args(window: &DateWindow, author: Option<&str>) -> Vec<String> {
    // Explicit times keep both bounds whole-day inclusive; a bare date
    // would inherit the current time of day.
    let mut args = vec![
        "log".to_string(),
        "--no-show-signature".to_string(),
        "--since".to_string(),
        format!("{} 00:00:00", window.start.format(DATE_FORMAT)),
        "--until".to_string(),
        format!("{} 23:59:59", window.end.format(DATE_FORMAT)),
        "--pretty=format:%H".to_string(),
    ];
    if let Some(a) = author {
        args.push("--author".to_string());
        args.push(a.to_string());
    }
    args
}

fn show_args(id: &str) -> [&str; 7] {
    ["show", "--no-show-signature", "--stat", "--no-color", SHOW_FORMAT, "--date=short", id]
}

const FIRST_DATE_ARGS: [&str; 5] = ["log", "--no-show-signature", "--reverse", "--pretty=format:%ad", "--date=short"];

/// History source backed by the `git` executable.
pub struct GitRepo {
    repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at `path`, or current dir if `None`
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let repo_path = match path {
            Some(p) => p.as_ref().to_path_buf(),
            None => std::env::current_dir()?,
        };

        let repo = discover(&repo_path).map_err(|e| {
            GitlinesError::SourceUnavailable(format!("{} is not a git repository: {e}", repo_path.display()))
        })?;
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened repository");

        Ok(Self { repo, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_unborn(&self) -> Result<bool> {
        let head = self
            .repo
            .head()
            .map_err(|e| GitlinesError::SourceUnavailable(format!("cannot read HEAD: {e}")))?;
        Ok(head.is_unborn())
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        debug!(args = %args.join(" "), "running git");
        Command::new("git")
            .arg("-C")
            .arg(&self.path)
            .args(args)
            .output()
            .map_err(|e| GitlinesError::SourceUnavailable(format!("failed to run git {}: {e}", args.join(" "))))
    }

    /// Stdout of a query whose failure means the history cannot be read.
    fn query(&self, args: &[&str]) -> Result<String> {
        let out = self.run_git(args)?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            warn!(status = %out.status, "git {} failed", args.join(" "));
            return Err(GitlinesError::SourceUnavailable(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl HistorySource for GitRepo {
    fn list_commit_ids(&self, window: &DateWindow, author: Option<&str>) -> Result<Vec<String>> {
        if window.is_empty() {
            debug!(start = %window.start, end = %window.end, "empty window, nothing to list");
            return Ok(Vec::new());
        }
        if self.is_unborn()? {
            debug!("HEAD is unborn, nothing to list");
            return Ok(Vec::new());
        }

        let args = list_args(window, author);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let stdout = self.query(&args)?;
        let ids: Vec<String> = stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        debug!(count = ids.len(), "listed commits");
        Ok(ids)
    }

    fn fetch_commit(&self, id: &str) -> Result<String> {
        let out = self.run_git(&show_args(id))?;
        if !out.status.success() {
            let stderr = String::from_utf8_lossy(&out.stderr);
            warn!(id, status = %out.status, "git show failed");
            return Err(GitlinesError::CommitNotFound {
                id: id.to_string(),
                detail: stderr.trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl HistoryOrigin for GitRepo {
    fn first_commit_date(&self) -> Result<Option<NaiveDate>> {
        if self.is_unborn()? {
            return Ok(None);
        }
        let stdout = self.query(&FIRST_DATE_ARGS)?;
        let Some(first) = stdout.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(first, DATE_FORMAT)
            .map(Some)
            .map_err(|e| GitlinesError::SourceUnavailable(format!("unexpected first commit date '{first}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::tempdir;

    fn has_git() -> bool {
        Command::new("git").arg("--version").output().is_ok()
    }

    fn git(dir: &Path, args: &[&str]) {
        assert!(Command::new("git").args(args).current_dir(dir).status().unwrap().success());
    }

    fn init(dir: &Path) {
        git(dir, &["init"]);
    }

    fn init_with_commit(dir: &Path) {
        init(dir);
        git(dir, &["config", "user.email", "you@example.com"]);
        git(dir, &["config", "user.name", "Your Name"]);
        std::fs::write(dir.join("a.txt"), "a\n").unwrap();
        git(dir, &["add", "."]);
        git(dir, &["commit", "-m", "add a"]);
    }

    fn window() -> DateWindow {
        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        DateWindow::new(d(2000), d(2100))
    }

    #[test]
    fn plain_directory_is_unavailable() {
        let dir = tempdir().unwrap();
        let err = GitRepo::open(Some(dir.path())).err().unwrap();
        assert!(matches!(err, GitlinesError::SourceUnavailable(_)));
    }

    #[test]
    fn unborn_repository_has_no_history() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init(dir.path());
        let repo = GitRepo::open(Some(dir.path())).unwrap();
        assert!(repo.list_commit_ids(&window(), None).unwrap().is_empty());
        assert_eq!(repo.first_commit_date().unwrap(), None);
    }

    #[test]
    fn unknown_commit_is_not_found() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init(dir.path());
        let repo = GitRepo::open(Some(dir.path())).unwrap();
        let err = repo.fetch_commit("0123456789abcdef0123456789abcdef01234567").unwrap_err();
        assert!(matches!(err, GitlinesError::CommitNotFound { ref id, .. } if id.starts_with("0123")));
    }

    #[test]
    fn failing_log_is_unavailable_with_git_stderr() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_with_commit(dir.path());
        let repo = GitRepo::open(Some(dir.path())).unwrap();
        // An unbalanced bracket is an invalid --author regex, so git log exits non-zero.
        let err = repo.list_commit_ids(&window(), Some("[")).unwrap_err();
        match err {
            GitlinesError::SourceUnavailable(msg) => {
                assert!(msg.contains("git log"), "{msg}");
                assert!(msg.contains("fatal"), "{msg}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn queries_disable_signature_output() {
        let args = list_args(&window(), Some("alice"));
        assert!(args.iter().any(|a| a == "--no-show-signature"));
        assert_eq!(&args[args.len() - 2..], ["--author", "alice"]);
        assert!(show_args("abc").contains(&"--no-show-signature"));
        assert!(FIRST_DATE_ARGS.contains(&"--no-show-signature"));
    }

    #[test]
    fn show_signature_config_does_not_leak_into_output() {
        if !has_git() {
            return;
        }
        let dir = tempdir().unwrap();
        init_with_commit(dir.path());
        git(dir.path(), &["config", "log.showSignature", "true"]);
        let repo = GitRepo::open(Some(dir.path())).unwrap();

        let ids = repo.list_commit_ids(&window(), None).unwrap();
        assert_eq!(ids.len(), 1);
        let raw = repo.fetch_commit(&ids[0]).unwrap();
        assert!(raw.starts_with(&format!("{}|Your Name|", ids[0])), "{raw}");
        assert!(repo.first_commit_date().unwrap().is_some());
    }
}
