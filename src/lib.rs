pub mod api_types;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod scoring;
pub mod sentiment;
pub mod tags;
pub mod viz_export;

pub use error::{PipelineError, ScoreError};
pub use fetch::{Fetcher, YouTubeFetcher};
pub use models::{BatchSummary, RawItem, ScoreReport, ScoredItem, SentimentLabel, TagCount};
pub use scoring::{score, score_with, ScoreWeights, ScoringParams};
pub use sentiment::SentimentPolicy;
