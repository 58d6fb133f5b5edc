use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source answered but had nothing usable for the request.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A row was missing its price or carried a non-numeric field.
    #[error("malformed snapshot for {id}: {reason}")]
    MalformedSnapshot { id: String, reason: String },
}

impl MarketError {
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedSnapshot {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
