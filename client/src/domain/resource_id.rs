//! Identifiers spliced into endpoint paths.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`ResourceId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceIdError {
    Empty,
    /// The identifier contains a character that would change the path
    /// structure (`/`, `?`, `#`, `%`) or whitespace.
    InvalidCharacter(char),
    /// The identifier is `.` or `..`, which URL resolution would collapse.
    DotSegment,
}

impl fmt::Display for ResourceIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "resource id must not be empty"),
            Self::InvalidCharacter(ch) => {
                write!(f, "resource id must not contain {ch:?}")
            }
            Self::DotSegment => write!(f, "resource id must not be a dot segment"),
        }
    }
}

impl std::error::Error for ResourceIdError {}

/// Opaque backend identifier for users, ideas, conversations, and so on.
///
/// # Examples
/// ```
/// use ideation_client::domain::ResourceId;
///
/// let id = ResourceId::new("65f1c0ffee").unwrap();
/// assert_eq!(id.as_ref(), "65f1c0ffee");
/// assert!(ResourceId::new("../admin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Validate and construct an identifier.
    pub fn new(id: impl AsRef<str>) -> Result<Self, ResourceIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, ResourceIdError> {
        if id.is_empty() {
            return Err(ResourceIdError::Empty);
        }
        if let Some(ch) = id
            .chars()
            .find(|ch| matches!(ch, '/' | '?' | '#' | '%') || ch.is_whitespace())
        {
            return Err(ResourceIdError::InvalidCharacter(ch));
        }
        if matches!(id.as_str(), "." | "..") {
            return Err(ResourceIdError::DotSegment);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ResourceIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}
