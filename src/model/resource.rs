use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Kind assumed for identifiers written in the legacy `<namespace>/<name>` form.
const LEGACY_KIND: &str = "service";

/// Identifies a workload in the cluster, e.g. `default:deployment/helloworld`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId {
    namespace: String,
    kind: String,
    name: String,
}

impl ResourceId {
    /// Build an id from its parts, rejecting anything that would not
    /// round-trip through the `<namespace>:<kind>/<name>` form.
    pub fn new(namespace: &str, kind: &str, name: &str) -> Result<Self, ParseError> {
        let invalid = |reason| ParseError::ResourceId { input: format!("{namespace}:{kind}/{name}"), reason };

        if namespace.is_empty() || kind.is_empty() || name.is_empty() {
            return Err(invalid("empty component"));
        }
        if namespace.contains(':') || kind.contains([':', '/']) || name.contains('/') {
            return Err(invalid("unexpected separator"));
        }
        if [namespace, kind, name].iter().any(|part| part.contains(char::is_control)) {
            return Err(invalid("control character"));
        }
        Ok(Self {
            namespace: namespace.to_string(),
            kind: kind.to_lowercase(),
            name: name.to_string(),
        })
    }

    /// Bytes of the rendered form, without allocating it.
    fn canonical_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.namespace
            .bytes()
            .chain(std::iter::once(b':'))
            .chain(self.kind.bytes())
            .chain(std::iter::once(b'/'))
            .chain(self.name.bytes())
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ResourceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ParseError::ResourceId { input: s.to_string(), reason };

        let (namespace, kind, name) = match s.split_once(':') {
            Some((namespace, rest)) => {
                let (kind, name) = rest
                    .split_once('/')
                    .ok_or_else(|| invalid("expected <namespace>:<kind>/<name>"))?;
                (namespace, kind, name)
            }
            None => {
                let (namespace, name) = s
                    .split_once('/')
                    .ok_or_else(|| invalid("expected <namespace>:<kind>/<name>"))?;
                (namespace, LEGACY_KIND, name)
            }
        };

        ResourceId::new(namespace, kind, name).map_err(|err| match err {
            ParseError::ResourceId { reason, .. } => invalid(reason),
            other => other,
        })
    }
}

impl TryFrom<String> for ResourceId {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ResourceId> for String {
    fn from(id: ResourceId) -> Self {
        id.to_string()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.namespace, self.kind, self.name)
    }
}

// Lexical on the rendered form, so menus list resources the way they are printed.
impl Ord for ResourceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_bytes().cmp(other.canonical_bytes())
    }
}

impl PartialOrd for ResourceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
