/// A rejected configuration value.
///
/// Returned synchronously by constructors and setters. The configuration that was in place
/// before the failed call stays in effect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid mode. Mode must be {expected}.")]
    InvalidMode { value: String, expected: &'static str },

    #[error("Invalid {name}. {name} must be {requirement}.")]
    InvalidThreshold { name: &'static str, requirement: &'static str },

    #[error("Invalid dataProvider. Data provider must be one of {accepted}.")]
    InvalidProvider { value: String, accepted: String },
}
