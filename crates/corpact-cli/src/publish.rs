//! Commit and push the generated report files with git.

use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::NaiveDate;
use tracing::{debug, info};

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("git executable not found: {0}")]
    GitNotFound(#[from] which::Error),

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Runs `git add`, `git commit`, and `git push` inside a working tree.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    git: PathBuf,
    repo_dir: PathBuf,
}

impl GitPublisher {
    /// Locate `git` on `PATH`.
    pub fn locate(repo_dir: impl Into<PathBuf>) -> Result<Self, PublishError> {
        Ok(Self {
            git: which::which("git")?,
            repo_dir: repo_dir.into(),
        })
    }

    /// Use a specific git binary.
    pub fn with_git_binary(git: impl Into<PathBuf>, repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            git: git.into(),
            repo_dir: repo_dir.into(),
        }
    }

    /// Argument lists for the three git invocations, in order.
    pub fn commands(files: &[&Path], date: NaiveDate) -> Vec<Vec<String>> {
        let mut add = vec!["add".to_string()];
        add.extend(files.iter().map(|f| f.display().to_string()));
        vec![
            add,
            vec![
                "commit".to_string(),
                "-m".to_string(),
                format!("Auto update {}", date.format("%Y-%m-%d")),
            ],
            vec!["push".to_string()],
        ]
    }

    /// Stage `files`, commit with a dated message, and push. Stops at the
    /// first command that fails.
    pub fn publish(&self, files: &[&Path], date: NaiveDate) -> Result<(), PublishError> {
        for args in Self::commands(files, date) {
            self.run(&args)?;
        }
        info!(repo = %self.repo_dir.display(), "reports published");
        Ok(())
    }

    fn run(&self, args: &[String]) -> Result<(), PublishError> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running");
        let output = Command::new(&self.git)
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|source| PublishError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(PublishError::Failed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
