//! End-of-build file rewriting.
//!
//! Applies the pipeline's transform to an explicit list of on-disk targets,
//! strictly one file at a time so log order is deterministic and no two
//! in-flight writes can overlap. Every failure is caught at its point of
//! origin, logged, and recorded as a per-target outcome; nothing aborts the
//! remaining targets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::abstractions::FileStore;
use crate::pipeline::Pipeline;

/// What happened to one batch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetOutcome {
    /// Read, transformed and written back in place.
    Rewritten,
    /// Target did not exist; no read or write was attempted.
    SkippedMissing,
    /// Read or write failed; the batch continued with the next target.
    Failed { reason: String },
}

/// Outcome record for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    pub path: PathBuf,
    pub outcome: TargetOutcome,
}

/// Aggregated outcomes of one batch run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<TargetReport>,
}

impl BatchReport {
    /// Number of targets rewritten in place.
    pub fn rewritten(&self) -> usize {
        self.count(|outcome| matches!(outcome, TargetOutcome::Rewritten))
    }

    /// Number of missing targets skipped.
    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, TargetOutcome::SkippedMissing))
    }

    /// Number of targets that failed to read or write.
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, TargetOutcome::Failed { .. }))
    }

    /// One-line summary of the whole batch.
    pub fn summary(&self) -> String {
        format!(
            "{} rewritten, {} skipped, {} failed",
            self.rewritten(),
            self.skipped(),
            self.failed()
        )
    }

    fn count(&self, predicate: impl Fn(&TargetOutcome) -> bool) -> usize {
        self.outcomes
            .iter()
            .filter(|report| predicate(&report.outcome))
            .count()
    }
}

/// Rewrites batch targets through a pipeline's transform.
pub struct BatchProcessor<'a> {
    pipeline: &'a Pipeline,
    store: Arc<dyn FileStore>,
}

impl<'a> BatchProcessor<'a> {
    /// Create a processor over `pipeline` and a file store.
    pub fn new(pipeline: &'a Pipeline, store: Arc<dyn FileStore>) -> Self {
        Self { pipeline, store }
    }

    /// End-of-build hook: rewrite every file registered in the pipeline's
    /// configuration.
    pub async fn rewrite_files(&self) -> BatchReport {
        self.run(self.pipeline.replace_files()).await
    }

    /// Process `targets` in order, one at a time.
    ///
    /// Targets are explicit, so no exclusion filtering applies. Never
    /// returns an error: every failure becomes a [`TargetOutcome`].
    pub async fn run(&self, targets: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport::default();
        for target in targets {
            let outcome = self.process_target(target).await;
            match &outcome {
                TargetOutcome::Rewritten => info!("Rewrote {}", target.display()),
                TargetOutcome::SkippedMissing => {
                    warn!("Skipping missing file: {}", target.display());
                }
                TargetOutcome::Failed { reason } => {
                    warn!("Failed to rewrite {}: {}", target.display(), reason);
                }
            }
            report.outcomes.push(TargetReport {
                path: target.clone(),
                outcome,
            });
        }
        info!("Batch rewrite complete: {}", report.summary());
        report
    }

    async fn process_target(&self, path: &Path) -> TargetOutcome {
        if !self.store.exists(path).await {
            return TargetOutcome::SkippedMissing;
        }
        let content = match self.store.read_to_string(path).await {
            Ok(content) => content,
            Err(e) => {
                return TargetOutcome::Failed {
                    reason: format!("{e:#}"),
                }
            }
        };
        let transformed = self.pipeline.transform(&content);
        match self.store.write(path, &transformed).await {
            Ok(()) => TargetOutcome::Rewritten,
            Err(e) => TargetOutcome::Failed {
                reason: format!("{e:#}"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abstractions::MockFileStore;
    use crate::config::PipelineConfig;

    fn pipeline() -> Pipeline {
        Pipeline::new(PipelineConfig::new().replace("VERSION", "2.0")).unwrap()
    }

    #[tokio::test]
    async fn test_missing_target_is_skipped_without_io() {
        let pipeline = pipeline();
        let store = Arc::new(MockFileStore::new());
        let processor = BatchProcessor::new(&pipeline, store);

        let report = processor.run(&[PathBuf::from("/nonexistent")]).await;
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.rewritten(), 0);
        assert_eq!(report.failed(), 0);
        assert_eq!(
            report.outcomes[0].outcome,
            TargetOutcome::SkippedMissing
        );
    }

    #[tokio::test]
    async fn test_existing_target_is_rewritten_in_place() {
        let pipeline = pipeline();
        let store = Arc::new(MockFileStore::new());
        store.insert("/app/version.txt", "version: #{VERSION}%").await;
        let processor = BatchProcessor::new(&pipeline, Arc::clone(&store) as Arc<dyn FileStore>);

        let report = processor.run(&[PathBuf::from("/app/version.txt")]).await;
        assert_eq!(report.rewritten(), 1);
        assert_eq!(
            store.contents(Path::new("/app/version.txt")).await.unwrap(),
            "version: 2.0"
        );
    }

    #[tokio::test]
    async fn test_read_failure_does_not_abort_batch() {
        let pipeline = pipeline();
        let store = Arc::new(MockFileStore::new());
        store.fail_read("/broken.txt").await;
        store.insert("/ok.txt", "#{VERSION}%").await;
        let processor = BatchProcessor::new(&pipeline, Arc::clone(&store) as Arc<dyn FileStore>);

        let report = processor
            .run(&[PathBuf::from("/broken.txt"), PathBuf::from("/ok.txt")])
            .await;
        assert_eq!(report.failed(), 1);
        assert_eq!(report.rewritten(), 1);
        assert_eq!(store.contents(Path::new("/ok.txt")).await.unwrap(), "2.0");
        assert!(matches!(
            report.outcomes[0].outcome,
            TargetOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_write_failure_is_recorded() {
        let pipeline = pipeline();
        let store = Arc::new(MockFileStore::new());
        store.insert("/readonly.txt", "#{VERSION}%").await;
        store.fail_write("/readonly.txt").await;
        let processor = BatchProcessor::new(&pipeline, Arc::clone(&store) as Arc<dyn FileStore>);

        let report = processor.run(&[PathBuf::from("/readonly.txt")]).await;
        assert_eq!(report.failed(), 1);
        assert_eq!(
            store.contents(Path::new("/readonly.txt")).await.unwrap(),
            "#{VERSION}%"
        );
    }

    #[tokio::test]
    async fn test_report_serializes_for_host_inspection() {
        let pipeline = pipeline();
        let store = Arc::new(MockFileStore::new());
        let processor = BatchProcessor::new(&pipeline, store);

        let report = processor.run(&[PathBuf::from("/nonexistent")]).await;
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("skipped_missing"));
    }

    #[tokio::test]
    async fn test_rewrite_files_uses_configured_targets() {
        let pipeline = Pipeline::new(
            PipelineConfig::new()
                .replace("VERSION", "2.0")
                .replace_file("/app/version.txt"),
        )
        .unwrap();
        let store = Arc::new(MockFileStore::new());
        store.insert("/app/version.txt", "#{VERSION}%").await;
        let processor = BatchProcessor::new(&pipeline, Arc::clone(&store) as Arc<dyn FileStore>);

        let report = processor.rewrite_files().await;
        assert_eq!(report.rewritten(), 1);
        assert_eq!(
            store.contents(Path::new("/app/version.txt")).await.unwrap(),
            "2.0"
        );
    }
}
