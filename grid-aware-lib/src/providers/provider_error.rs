use core::error::Error;

/// Failures talking to a data provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered with a non-success HTTP status.
    #[error("Network response was not ok")]
    Status { status: u16, status_text: String },

    /// The request could not be sent, or the response could not be read or parsed.
    #[error("fetch operation failed")]
    Fetch { cause: String },

    /// The response did not include the metric the configured mode needs.
    #[error("Provider response did not include {field}")]
    MissingMetric { field: &'static str },
}

impl ProviderError {
    /// Build a [`ProviderError::Fetch`] that records the whole source chain of `error`.
    pub fn fetch(error: &(dyn Error + 'static)) -> Self {
        let mut cause = error.to_string();
        let mut source = error.source();
        while let Some(inner) = source {
            cause.push_str(": ");
            cause.push_str(&inner.to_string());
            source = inner.source();
        }

        Self::Fetch { cause }
    }

    /// Extra detail to show alongside the fixed message.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Status { status_text, .. } => Some(status_text.clone()),
            Self::Fetch { cause } => Some(cause.clone()),
            Self::MissingMetric { .. } => None,
        }
    }
}
