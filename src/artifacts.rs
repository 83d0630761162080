use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::{AppError, Result};

/// Persists stage artifacts (test cases, scripts, reports) under a
/// run-scoped directory.
///
/// Persistence failures are logged and never fail the workflow.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Store rooted at a fresh timestamped directory for one workflow run.
    pub fn for_run(base_dir: &Path) -> Self {
        let run_dir = base_dir.join(format!("run-{}", Utc::now().format("%Y%m%dT%H%M%S%.3fZ")));
        Self::new(run_dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write an artifact, logging (not propagating) any failure.
    pub async fn save(&self, name: &str, content: &str) {
        if let Err(e) = self.try_save(name, content).await {
            tracing::warn!(artifact = name, error = %e, "Failed to persist artifact");
        } else {
            tracing::debug!(artifact = name, "Artifact persisted");
        }
    }

    async fn try_save(&self, name: &str, content: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::Artifact(format!("Failed to create artifact dir: {e}")))?;

        let path = self.dir.join(name);
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| AppError::Artifact(format!("Failed to write {name}: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_writes_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(tmp.path().join("run-1"));

        store.save("test_cases.md", "| TC-1 | Login |").await;

        let written = std::fs::read_to_string(tmp.path().join("run-1/test_cases.md")).unwrap();
        assert_eq!(written, "| TC-1 | Login |");
    }

    #[tokio::test]
    async fn test_save_failure_is_non_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        // Occupy the directory path with a plain file so create_dir_all fails.
        let blocked = tmp.path().join("blocked");
        std::fs::write(&blocked, "not a directory").unwrap();

        let store = ArtifactStore::new(blocked);
        store.save("report.md", "content").await;
    }

    #[tokio::test]
    async fn test_for_run_nests_under_base_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ArtifactStore::for_run(tmp.path());
        assert!(store.dir().starts_with(tmp.path()));
    }
}
