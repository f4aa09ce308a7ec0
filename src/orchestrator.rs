use tracing::{debug, info, warn};

use crate::config::QueryRequest;
use crate::error::PipelineError;
use crate::fetch::Fetcher;
use crate::models::ScoreReport;
use crate::scoring::{score_with, ScoringParams};

/// Fetch the candidate batch for `req` and score it.
///
/// A fetch error aborts the run with [`PipelineError::FetchFailure`]; an empty
/// batch is scored normally and yields an empty report.
pub async fn run_query(
    fetcher: &dyn Fetcher,
    req: &QueryRequest,
    params: &ScoringParams,
) -> Result<ScoreReport, PipelineError> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - query={:?}, region={}, rpm={}, max_results={}",
        req.query,
        req.region.code(),
        req.rpm,
        req.max_results
    );

    // 1) fetch
    let fetch_start = std::time::Instant::now();
    let items = fetcher
        .fetch_candidates(&req.query, req.region, req.max_results)
        .await
        .map_err(|e| PipelineError::FetchFailure(format!("{:#}", e)))?;
    info!(
        "Fetch completed - duration={:.2}s, items={}",
        fetch_start.elapsed().as_secs_f32(),
        items.len()
    );
    if items.is_empty() {
        warn!("Empty batch - nothing to rank for query={:?}", req.query);
    }

    // 2) score
    let score_start = std::time::Instant::now();
    let report = score_with(&items, req.rpm, params)?;
    debug!(
        "Scoring completed - duration={:.3}s, rows={}, tags={}",
        score_start.elapsed().as_secs_f32(),
        report.rows.len(),
        report.tag_freq.len()
    );

    info!(
        "Pipeline completed successfully - total_duration={:.2}s, rows={}, total_views={}",
        pipeline_start.elapsed().as_secs_f32(),
        report.summary.item_count,
        report.summary.total_views
    );
    Ok(report)
}
