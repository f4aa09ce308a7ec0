use serde::{Deserialize, Serialize};

/// One candidate video as handed over by a [`Fetcher`](crate::fetch::Fetcher).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub views: Option<u64>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub published_at: String, // ISO8601, passed through
    #[serde(default)]
    pub thumbnail_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A [`RawItem`] with missing counters resolved to 0 plus the derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredItem {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub published_at: String,
    pub thumbnail_url: String,

    pub engagement_pct: f64,     // 2 decimals
    pub estimated_earnings: f64, // 2 decimals
    pub polarity: f64,           // [-1.0, 1.0], 3 decimals
    pub sentiment: SentimentLabel,
    pub title_length: usize,
    pub raw_score: f64,
    pub virality_score: f64, // [0.0, 100.0], batch-relative, 1 decimal
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: u32,
}

/// Headline metrics over one scored batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub item_count: usize,
    pub total_views: u64,
    pub total_earnings: f64,
    pub avg_virality: f64,
    pub avg_title_length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Same cardinality and order as the input batch.
    pub rows: Vec<ScoredItem>,
    /// Descending by count, ties in first-seen order.
    pub tag_freq: Vec<TagCount>,
    pub summary: BatchSummary,
}

impl ScoreReport {
    /// Rows by descending virality; `rows` itself is left untouched.
    pub fn ranked_by_virality(&self) -> Vec<&ScoredItem> {
        let mut ranked: Vec<&ScoredItem> = self.rows.iter().collect();
        ranked.sort_by(|a, b| {
            b.virality_score
                .partial_cmp(&a.virality_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }

    /// Comma separated tag list, ready to paste into an upload form.
    pub fn copy_tags_line(&self) -> String {
        use itertools::Itertools;
        self.tag_freq.iter().map(|t| t.tag.as_str()).join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, virality: f64) -> ScoredItem {
        ScoredItem {
            id: id.into(),
            title: id.into(),
            tags: vec![],
            views: 0,
            likes: 0,
            comments: 0,
            published_at: String::new(),
            thumbnail_url: String::new(),
            engagement_pct: 0.0,
            estimated_earnings: 0.0,
            polarity: 0.0,
            sentiment: SentimentLabel::Neutral,
            title_length: id.len(),
            raw_score: 0.0,
            virality_score: virality,
        }
    }

    #[test]
    fn ranking_does_not_reorder_rows() {
        let report = ScoreReport {
            rows: vec![row("a", 10.0), row("b", 100.0), row("c", 55.5), row("d", 55.5)],
            ..Default::default()
        };
        let ranked: Vec<&str> = report.ranked_by_virality().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ranked, vec!["b", "c", "d", "a"]);

        let canonical: Vec<&str> = report.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(canonical, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn copy_tags_line_joins_in_rank_order() {
        let report = ScoreReport {
            tag_freq: vec![
                TagCount { tag: "rust".into(), count: 3 },
                TagCount { tag: "cli".into(), count: 1 },
            ],
            ..Default::default()
        };
        assert_eq!(report.copy_tags_line(), "rust, cli");
        assert_eq!(ScoreReport::default().copy_tags_line(), "");
    }

    #[test]
    fn raw_item_defaults_missing_fields() {
        let item: RawItem = serde_json::from_str(r#"{"id":"x","title":"t"}"#).unwrap();
        assert!(item.tags.is_empty());
        assert_eq!(item.views, None);
        assert_eq!(item.thumbnail_url, "");
    }
}
