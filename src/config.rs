use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, ScoreError};
use crate::fetch::MAX_RESULTS_CAP;
use crate::scoring::{ScoreWeights, ScoringParams};
use crate::sentiment::SentimentPolicy;

/// Target market for the search. Only forwarded to the platform API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "UPPER")]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Us,
    In,
    Gb,
    Ca,
    Au,
}

impl Region {
    pub fn code(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::In => "IN",
            Region::Gb => "GB",
            Region::Ca => "CA",
            Region::Au => "AU",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Markdown,
    Json,
}

/// Niche Scout - rank the top videos for a topic by batch-relative virality
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Niche / topic to search for
    pub query: String,

    /// Data API key for the video platform
    #[arg(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Target region (US, IN, GB, CA, AU)
    #[arg(short, long, env = "NICHE_SCOUT_REGION", ignore_case = true)]
    pub region: Option<Region>,

    /// Estimated revenue per 1000 views, in dollars
    #[arg(long, env = "NICHE_SCOUT_RPM")]
    pub rpm: Option<f64>,

    /// Number of candidates to fetch in the single search page
    #[arg(long, default_value_t = MAX_RESULTS_CAP, value_parser = clap::value_parser!(u32).range(1..=MAX_RESULTS_CAP as i64))]
    pub max_results: u32,

    /// How many tags to keep in the frequency ranking
    #[arg(long, default_value_t = 15)]
    pub tag_limit: usize,

    /// Polarity magnitude a title must exceed to count as Positive/Negative
    #[arg(long, default_value_t = 0.0)]
    pub sentiment_epsilon: f64,

    /// Report negative titles as Neutral (binary Positive/Neutral labels)
    #[arg(long)]
    pub merge_negative: bool,

    /// Report format written to stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub format: OutputFormat,

    /// Also write report.json / tags.json / report.md under this directory
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

/// A query whose required inputs have all been supplied and checked.
#[derive(Clone)]
pub struct QueryRequest {
    api_key: String,
    pub query: String,
    pub region: Region,
    pub rpm: f64,
    pub max_results: u32,
}

impl std::fmt::Debug for QueryRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRequest")
            .field("api_key", &"<redacted>")
            .field("query", &self.query)
            .field("region", &self.region)
            .field("rpm", &self.rpm)
            .field("max_results", &self.max_results)
            .finish()
    }
}

impl QueryRequest {
    pub fn new(
        api_key: Option<String>,
        query: impl Into<String>,
        region: Option<Region>,
        rpm: Option<f64>,
    ) -> Result<Self, PipelineError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| PipelineError::input_missing("API key", "Pass --api-key or set YOUTUBE_API_KEY."))?;
        let region = region.ok_or_else(|| {
            PipelineError::input_missing("target region", "Pass --region (US, IN, GB, CA or AU).")
        })?;
        let rpm = rpm.ok_or_else(|| {
            PipelineError::input_missing("RPM", "Pass --rpm with your estimated revenue per 1000 views.")
        })?;
        if !(rpm.is_finite() && rpm > 0.0) {
            return Err(ScoreError::InvalidRpm(rpm).into());
        }

        Ok(Self {
            api_key,
            query: query.into(),
            region,
            rpm,
            max_results: MAX_RESULTS_CAP,
        })
    }

    pub fn with_max_results(mut self, n: u32) -> Self {
        self.max_results = n.clamp(1, MAX_RESULTS_CAP);
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl Args {
    pub fn to_request(&self) -> Result<QueryRequest, PipelineError> {
        Ok(QueryRequest::new(self.api_key.clone(), self.query.clone(), self.region, self.rpm)?
            .with_max_results(self.max_results))
    }

    pub fn scoring_params(&self) -> ScoringParams {
        ScoringParams {
            weights: ScoreWeights::default(),
            tag_limit: self.tag_limit,
            sentiment: SentimentPolicy {
                epsilon: self.sentiment_epsilon.abs(),
                merge_negative: self.merge_negative,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "niche-scout", "home espresso", "--api-key", "k", "--region", "gb", "--rpm", "3.5",
            "--max-results", "20", "--merge-negative", "--format", "json",
        ])
        .unwrap();
        assert_eq!(args.region, Some(Region::Gb));
        assert_eq!(args.format, OutputFormat::Json);

        let req = args.to_request().unwrap();
        assert_eq!(req.query, "home espresso");
        assert_eq!(req.region.code(), "GB");
        assert_eq!(req.rpm, 3.5);
        assert_eq!(req.max_results, 20);
        assert!(args.scoring_params().sentiment.merge_negative);
        assert_eq!(args.scoring_params().tag_limit, 15);
    }

    #[test]
    fn rejects_max_results_above_page_size() {
        assert!(Args::try_parse_from(["niche-scout", "q", "--max-results", "51"]).is_err());
        assert!(Args::try_parse_from(["niche-scout", "q", "--max-results", "0"]).is_err());
    }

    #[test]
    fn missing_inputs_are_reported_before_fetch() {
        let err = QueryRequest::new(None, "q", Some(Region::Us), Some(2.5)).unwrap_err();
        assert!(matches!(err, PipelineError::InputMissing(ref m) if m.contains("API key")));

        let err = QueryRequest::new(Some("   ".into()), "q", Some(Region::Us), Some(2.5)).unwrap_err();
        assert!(matches!(err, PipelineError::InputMissing(_)));

        let err = QueryRequest::new(Some("k".into()), "q", None, Some(2.5)).unwrap_err();
        assert!(matches!(err, PipelineError::InputMissing(ref m) if m.contains("region")));

        let err = QueryRequest::new(Some("k".into()), "q", Some(Region::Us), None).unwrap_err();
        assert!(matches!(err, PipelineError::InputMissing(ref m) if m.contains("RPM")));
    }

    #[test]
    fn non_positive_rpm_is_invalid() {
        let err = QueryRequest::new(Some("k".into()), "q", Some(Region::In), Some(0.0)).unwrap_err();
        assert!(matches!(err, PipelineError::Score(ScoreError::InvalidRpm(_))));
    }

    #[test]
    fn empty_query_is_allowed() {
        assert!(QueryRequest::new(Some("k".into()), "", Some(Region::Au), Some(1.0)).is_ok());
    }

    #[test]
    fn debug_redacts_credential() {
        let req = QueryRequest::new(Some("secret-key".into()), "q", Some(Region::Ca), Some(1.0)).unwrap();
        let dbg = format!("{:?}", req);
        assert!(!dbg.contains("secret-key"));
        assert_eq!(req.api_key(), "secret-key");
    }
}
