use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

const DEFAULT_TAG: &str = "latest";

/// A container image reference: repository name plus tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef {
    pub name: String,
    pub tag: String,
}

impl FromStr for ImageRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ParseError::ImageRef { input: s.to_string(), reason };
        if s.is_empty() {
            return Err(invalid("empty reference"));
        }

        // A colon before the last slash belongs to a registry host:port.
        let path_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
        let (name, tag) = match s[path_start..].rfind(':') {
            Some(i) => (&s[..path_start + i], &s[path_start + i + 1..]),
            None => (s, DEFAULT_TAG),
        };

        if name.is_empty() || name.ends_with('/') {
            return Err(invalid("missing image name"));
        }
        if tag.is_empty() {
            return Err(invalid("empty tag"));
        }
        Ok(ImageRef { name: name.to_string(), tag: tag.to_string() })
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ImageRef> for String {
    fn from(image: ImageRef) -> Self {
        image.to_string()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.tag)
    }
}
