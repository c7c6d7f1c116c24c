//! ResponseAggregator: runs both providers concurrently and merges the results.

use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::conversation::Answers;
use crate::error::AggregationError;
use crate::llm::{GenerationProvider, GenerationRequest, GenerationResult};
use crate::locale::Locale;

use super::report::RoadmapReport;

/// Fans one set of answers out to the primary and supplementary providers.
pub struct ResponseAggregator {
    primary: Arc<dyn GenerationProvider>,
    supplementary: Arc<dyn GenerationProvider>,
    locale: Locale,
}

impl ResponseAggregator {
    pub fn new(
        primary: Arc<dyn GenerationProvider>,
        supplementary: Arc<dyn GenerationProvider>,
        locale: Locale,
    ) -> Self {
        Self {
            primary,
            supplementary,
            locale,
        }
    }

    /// Generate the combined report for `answers`.
    ///
    /// Both provider calls run as separate tasks and are always awaited to
    /// completion. A provider error only swaps in that section's fallback;
    /// `Err` is reserved for a task that panicked or was cancelled.
    pub async fn aggregate(&self, answers: &Answers) -> Result<RoadmapReport, AggregationError> {
        let request = Arc::new(GenerationRequest::new(answers.clone(), self.locale));
        let started = Instant::now();

        let primary_label = self.primary.label().to_string();
        let supplementary_label = self.supplementary.label().to_string();

        let primary = spawn_generation(Arc::clone(&self.primary), Arc::clone(&request));
        let supplementary = spawn_generation(Arc::clone(&self.supplementary), request);
        let (primary, supplementary) = tokio::join!(primary, supplementary);

        let primary = primary.map_err(|e| AggregationError::TaskFailed {
            provider: primary_label,
            reason: e.to_string(),
        })?;
        let supplementary = supplementary.map_err(|e| AggregationError::TaskFailed {
            provider: supplementary_label,
            reason: e.to_string(),
        })?;

        info!(
            primary_ok = primary.succeeded,
            supplementary_ok = supplementary.succeeded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation finished"
        );
        Ok(RoadmapReport::new(self.locale, primary, supplementary))
    }
}

fn spawn_generation(
    provider: Arc<dyn GenerationProvider>,
    request: Arc<GenerationRequest>,
) -> JoinHandle<GenerationResult> {
    tokio::spawn(async move {
        let label = provider.label().to_string();
        let started = Instant::now();
        match provider.generate(&request).await {
            Ok(text) => {
                info!(
                    provider = %label,
                    chars = text.chars().count(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Provider responded"
                );
                GenerationResult::success(label, text)
            }
            Err(e) => {
                error!(provider = %label, error = %e, "Provider call failed");
                GenerationResult::failure(label)
            }
        }
    })
}
