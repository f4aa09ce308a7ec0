use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoreError;
use crate::models::{BatchSummary, RawItem, ScoreReport, ScoredItem};
use crate::sentiment::{self, SentimentPolicy};
use crate::tags::top_tags;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub views: f64,    // 0.7
    pub likes: f64,    // 50
    pub comments: f64, // 100
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            views: 0.7,
            likes: 50.0,
            comments: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub weights: ScoreWeights,
    pub tag_limit: usize,
    pub sentiment: SentimentPolicy,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            tag_limit: 15,
            sentiment: SentimentPolicy::default(),
        }
    }
}

fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}

pub fn engagement_pct(views: u64, likes: u64, comments: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    // counters are summed as f64 so u64::MAX inputs cannot overflow
    round_to((likes as f64 + comments as f64) / views as f64 * 100.0, 2)
}

pub fn estimated_earnings(views: u64, rpm: f64) -> f64 {
    round_to(views as f64 / 1000.0 * rpm, 2)
}

pub fn raw_score(views: u64, likes: u64, comments: u64, w: ScoreWeights) -> f64 {
    views as f64 * w.views + likes as f64 * w.likes + comments as f64 * w.comments
}

/// Scale `raw` against the batch maximum onto [0, 100]. A zero maximum yields 0.
pub fn virality(raw: f64, max_raw: f64) -> f64 {
    if max_raw <= 0.0 {
        return 0.0;
    }
    round_to(raw / max_raw * 100.0, 1).clamp(0.0, 100.0)
}

/// Score a batch with the default weights, tag limit and sentiment policy.
///
/// The default policy labels Positive/Neutral/Negative. For the binary
/// Positive/Neutral labelling (polarity > 0 is Positive, anything else
/// Neutral) call [`score_with`] with `sentiment: SentimentPolicy::binary()`.
pub fn score(items: &[RawItem], rpm: f64) -> Result<ScoreReport, ScoreError> {
    score_with(items, rpm, &ScoringParams::default())
}

pub fn score_with(
    items: &[RawItem],
    rpm: f64,
    params: &ScoringParams,
) -> Result<ScoreReport, ScoreError> {
    if !(rpm.is_finite() && rpm > 0.0) {
        return Err(ScoreError::InvalidRpm(rpm));
    }

    debug!("Scoring started - items={}, rpm={}", items.len(), rpm);

    let mut rows: Vec<ScoredItem> = items.iter().map(|it| score_item(it, rpm, params)).collect();

    let max_raw = rows.iter().map(|r| r.raw_score).fold(0.0f64, f64::max);
    if max_raw <= 0.0 && !rows.is_empty() {
        debug!("All raw scores are zero - virality pinned to 0 for {} rows", rows.len());
    }
    for r in rows.iter_mut() {
        r.virality_score = virality(r.raw_score, max_raw);
    }

    let tag_freq = top_tags(items.iter().map(|it| it.tags.as_slice()), params.tag_limit);
    let summary = summarize(&rows);

    debug!(
        "Scoring completed - rows={}, distinct_top_tags={}, max_raw_score={:.1}",
        rows.len(),
        tag_freq.len(),
        max_raw
    );

    Ok(ScoreReport {
        rows,
        tag_freq,
        summary,
    })
}

fn score_item(it: &RawItem, rpm: f64, params: &ScoringParams) -> ScoredItem {
    let views = it.views.unwrap_or(0);
    let likes = it.likes.unwrap_or(0);
    let comments = it.comments.unwrap_or(0);
    let polarity = sentiment::polarity(&it.title);

    ScoredItem {
        id: it.id.clone(),
        title: it.title.clone(),
        tags: it.tags.clone(),
        views,
        likes,
        comments,
        published_at: it.published_at.clone(),
        thumbnail_url: it.thumbnail_url.clone(),
        engagement_pct: engagement_pct(views, likes, comments),
        estimated_earnings: estimated_earnings(views, rpm),
        polarity: round_to(polarity, 3),
        sentiment: params.sentiment.classify(polarity),
        title_length: it.title.chars().count(),
        raw_score: raw_score(views, likes, comments, params.weights),
        virality_score: 0.0, // filled once the batch maximum is known
    }
}

fn summarize(rows: &[ScoredItem]) -> BatchSummary {
    if rows.is_empty() {
        return BatchSummary::default();
    }
    let n = rows.len();
    BatchSummary {
        item_count: n,
        total_views: rows.iter().map(|r| r.views).fold(0u64, u64::saturating_add),
        total_earnings: round_to(rows.iter().map(|r| r.estimated_earnings).sum(), 2),
        avg_virality: round_to(rows.iter().map(|r| r.virality_score).sum::<f64>() / n as f64, 1),
        avg_title_length: rows.iter().map(|r| r.title_length).sum::<usize>() / n,
    }
}
