use futures::{future::join_all, stream, StreamExt};
use uuid::Uuid;

use crate::domain::{rank_outcomes, AnalysisOutcome, BatchRequest, BatchResult};

use super::Analyzer;

/// Runs one analysis per URL concurrently and waits for all of them.
///
/// Each analysis resolves to an outcome on its own, so a failing URL never
/// cuts the batch short. With `max_concurrency` set, at most that many
/// analyses are in flight at once; the returned order is then completion
/// order rather than input order.
pub async fn collect_outcomes(
    analyzer: &Analyzer,
    urls: &[String],
    max_concurrency: Option<usize>,
) -> Vec<AnalysisOutcome> {
    if urls.is_empty() {
        return vec![];
    }

    match max_concurrency {
        Some(limit) => {
            stream::iter(urls)
                .map(|url| analyzer.analyze_url(url))
                .buffer_unordered(limit.max(1))
                .collect()
                .await
        }
        None => join_all(urls.iter().map(|url| analyzer.analyze_url(url))).await,
    }
}

pub async fn analyze_batch(
    analyzer: &Analyzer,
    request: BatchRequest,
    max_concurrency: Option<usize>,
) -> BatchResult {
    let batch_id = Uuid::new_v4();
    log::info!(
        "[batch {}] Analyzing {} urls (max concurrency: {:?})",
        batch_id,
        request.urls.len(),
        max_concurrency
    );

    let outcomes = collect_outcomes(analyzer, &request.urls, max_concurrency).await;
    let failed = outcomes.iter().filter(|o| o.relevance_score == 0).count();

    log::info!(
        "[batch {}] Finished {} urls, {} scored zero",
        batch_id,
        outcomes.len(),
        failed
    );

    BatchResult {
        results: rank_outcomes(outcomes),
    }
}
