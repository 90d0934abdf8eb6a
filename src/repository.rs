//! Source repository handling
//!
//! Fetching is deliberately minimal: a URL-parameterized `git clone` into
//! the recipe's source directory, skipped when a checkout already exists.
//! Updating, authentication and mirror selection are out of scope.

use crate::error::{ForgeError, ForgeResult};
use crate::process;
use std::path::Path;
use tracing::{debug, info};

/// Where a recipe's source comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRepository {
    url: &'static str,
    rev: Option<&'static str>,
}

impl GitRepository {
    pub const fn new(url: &'static str) -> Self {
        Self { url, rev: None }
    }

    /// Pin the clone to a branch or tag
    pub const fn with_rev(url: &'static str, rev: &'static str) -> Self {
        Self { url, rev: Some(rev) }
    }

    pub fn url(&self) -> &str {
        self.url
    }

    pub fn rev(&self) -> Option<&str> {
        self.rev
    }

    /// Clone into `dest` unless a checkout is already present
    pub async fn ensure_cloned(&self, dest: &Path) -> ForgeResult<()> {
        if dest.join(".git").exists() {
            debug!("Source already present at {}", dest.display());
            return Ok(());
        }

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ForgeError::io(format!("creating source root {}", parent.display()), e)
            })?;
        }

        info!("Cloning {} into {}", self.url, dest.display());

        let mut args = vec!["clone".to_string()];
        if let Some(rev) = self.rev {
            args.push("--branch".to_string());
            args.push(rev.to_string());
        }
        args.push(self.url.to_string());
        args.push(dest.display().to_string());

        let output = process::run("git", &args, None).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ForgeError::Clone {
                url: self.url.to_string(),
                reason: stderr.trim().to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_accessors() {
        let repo = GitRepository::new("https://example.org/project.git");
        assert_eq!(repo.url(), "https://example.org/project.git");
        assert!(repo.rev().is_none());

        let pinned = GitRepository::with_rev("https://example.org/project.git", "v1.2");
        assert_eq!(pinned.rev(), Some("v1.2"));
    }

    #[tokio::test]
    async fn existing_checkout_is_left_alone() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("project");
        std::fs::create_dir_all(dest.join(".git")).unwrap();

        // Bogus URL: would fail if a clone were attempted
        let repo = GitRepository::new("https://invalid.invalid/project.git");
        repo.ensure_cloned(&dest).await.unwrap();
    }
}
