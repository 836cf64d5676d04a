//! Session token primitive.
//!
//! The backend issues an opaque bearer credential on login or signup. The
//! client never inspects it; it only stores it and presents it on later
//! requests.

use std::fmt;

use zeroize::Zeroizing;

/// Validation errors returned by [`SessionToken::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTokenError {
    /// Token was missing or blank once trimmed.
    Empty,
    /// Token contained whitespace after trimming, which cannot survive the
    /// `Authorization` header.
    ContainsWhitespace,
}

impl fmt::Display for SessionTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "session token must not be empty"),
            Self::ContainsWhitespace => write!(f, "session token must not contain whitespace"),
        }
    }
}

impl std::error::Error for SessionTokenError {}

/// Opaque bearer credential issued by the backend.
///
/// ## Invariants
/// - Non-empty after trimming surrounding whitespace.
/// - No interior whitespace.
///
/// The raw value is zeroed on drop and redacted from `Debug` output.
///
/// # Examples
/// ```
/// use ideation_client::domain::SessionToken;
///
/// let token = SessionToken::new(" abc123 ").unwrap();
/// assert_eq!(token.as_str(), "abc123");
/// assert_eq!(token.bearer_header(), "Bearer abc123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Validate and wrap a raw token string.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, SessionTokenError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(SessionTokenError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(SessionTokenError::ContainsWhitespace);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token value.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Value for the `Authorization` header.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.as_str())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}
