use thiserror::Error;

/// The only way the scoring engine can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("RPM must be a positive number, got {0}")]
    InvalidRpm(f64),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required setting was not supplied; raised before any fetch.
    #[error("{0}")]
    InputMissing(String),

    /// Search or lookup against the video platform failed.
    #[error("Fetch failed: {0}")]
    FetchFailure(String),

    #[error(transparent)]
    Score(#[from] ScoreError),
}

impl PipelineError {
    pub fn input_missing(what: &str, hint: &str) -> Self {
        PipelineError::InputMissing(format!("Missing {}. {}", what, hint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_flat_and_actionable() {
        let e = PipelineError::input_missing("API key", "Pass --api-key or set YOUTUBE_API_KEY.");
        assert_eq!(e.to_string(), "Missing API key. Pass --api-key or set YOUTUBE_API_KEY.");

        let e: PipelineError = ScoreError::InvalidRpm(-1.0).into();
        assert_eq!(e.to_string(), "RPM must be a positive number, got -1");
    }
}
