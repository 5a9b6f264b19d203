use crate::providers::ProviderError;
use strum::Display;

/// Why a location input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvalidZone {
    #[strum(to_string = "Zone must be a string or an object containing lat and lon properties.")]
    WrongType,

    #[strum(to_string = "Zone object must contain lat and lon properties.")]
    MissingCoordinates,
}

/// Everything that can stop a check from producing a verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    /// No API key was configured. Detected before any network access.
    #[error("Zone and API key are both required")]
    MissingCredentials,

    /// No location was supplied. Detected before any network access.
    #[error("Zone and API key are both required")]
    MissingLocation,

    /// The location is neither a zone string nor a valid coordinate pair.
    #[error("Invalid zone. {0}")]
    InvalidZoneShape(InvalidZone),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl CheckError {
    /// Extra detail to show alongside the message.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Provider(e) => e.details(),
            Self::MissingCredentials | Self::MissingLocation | Self::InvalidZoneShape(_) => None,
        }
    }
}
