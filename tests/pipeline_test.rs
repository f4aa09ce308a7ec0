use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Mutex;

use niche_scout::config::{QueryRequest, Region};
use niche_scout::orchestrator::run_query;
use niche_scout::{Fetcher, PipelineError, RawItem, ScoringParams};

/// In-memory fetcher recording the calls it receives.
struct FixtureFetcher {
    items: Vec<RawItem>,
    fail: bool,
    calls: Mutex<Vec<(String, Region, u32)>>,
}

impl FixtureFetcher {
    fn new(items: Vec<RawItem>) -> Self {
        Self { items, fail: false, calls: Mutex::new(Vec::new()) }
    }

    fn failing() -> Self {
        Self { items: Vec::new(), fail: true, calls: Mutex::new(Vec::new()) }
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch_candidates(&self, query: &str, region: Region, limit: u32) -> Result<Vec<RawItem>> {
        self.calls.lock().unwrap().push((query.to_string(), region, limit));
        if self.fail {
            return Err(anyhow!("quotaExceeded").context("search returned HTTP 403"));
        }
        Ok(self.items.clone())
    }
}

fn request() -> QueryRequest {
    QueryRequest::new(Some("key".into()), "woodworking", Some(Region::Ca), Some(4.0))
        .unwrap()
        .with_max_results(25)
}

#[tokio::test]
async fn scores_fetched_batch() {
    let fetcher = FixtureFetcher::new(vec![
        RawItem { id: "1".into(), title: "Great bench build".into(), views: Some(2000), ..Default::default() },
        RawItem { id: "2".into(), title: "Shop tour".into(), views: Some(1000), ..Default::default() },
    ]);
    let report = run_query(&fetcher, &request(), &ScoringParams::default()).await.unwrap();

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].virality_score, 100.0);
    assert_eq!(report.rows[1].virality_score, 50.0);
    assert_eq!(report.rows[0].estimated_earnings, 8.0);
    assert_eq!(
        fetcher.calls.lock().unwrap().as_slice(),
        &[("woodworking".to_string(), Region::Ca, 25)]
    );
}

#[tokio::test]
async fn empty_batch_is_not_an_error() {
    let fetcher = FixtureFetcher::new(Vec::new());
    let report = run_query(&fetcher, &request(), &ScoringParams::default()).await.unwrap();
    assert!(report.rows.is_empty());
    assert!(report.tag_freq.is_empty());
}

#[tokio::test]
async fn fetch_error_becomes_single_flat_failure() {
    let fetcher = FixtureFetcher::failing();
    let err = run_query(&fetcher, &request(), &ScoringParams::default()).await.unwrap_err();
    match err {
        PipelineError::FetchFailure(msg) => {
            assert!(msg.contains("HTTP 403"));
            assert!(msg.contains("quotaExceeded"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
