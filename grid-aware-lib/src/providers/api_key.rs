use core::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

/// An access token for a data provider.
///
/// The token is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// Wraps a token, returning `None` when it is empty or only whitespace.
    #[must_use]
    pub fn new(token: impl AsRef<str>) -> Option<Self> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            None
        } else {
            Some(Self(Arc::from(token)))
        }
    }

    /// The raw token, for placing into a request header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_rejected() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new("   ").is_none());
    }

    #[test]
    fn test_token_is_trimmed() {
        assert_eq!(ApiKey::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = ApiKey::new("super-secret").unwrap();
        let debug_str = format!("{key:?}");
        assert!(!debug_str.contains("super-secret"));
    }
}
