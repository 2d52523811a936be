use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::image::ImageRef;
use super::resource::ResourceId;

/// Coarse outcome of a release for one resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Success,
    Failed,
    Skipped,
    Ignored,
    #[default]
    Unknown,
}

impl ReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseStatus::Success => "success",
            ReleaseStatus::Failed => "failed",
            ReleaseStatus::Skipped => "skipped",
            ReleaseStatus::Ignored => "ignored",
            ReleaseStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One container's image moving from `current` to `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerUpdate {
    pub container: String,
    pub current: ImageRef,
    pub target: ImageRef,
}

impl fmt::Display for ContainerUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.container, self.current, self.target.tag)
    }
}

/// Release outcome for a single resource.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerResult {
    #[serde(default)]
    pub status: ReleaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub per_container: Vec<ContainerUpdate>,
}

impl ControllerResult {
    /// Error text, treating an empty string as no error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

/// Results keyed by resource, iterated in lexical id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(BTreeMap<ResourceId, ControllerResult>);

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ResourceId) -> Option<&ControllerResult> {
        self.0.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceId, &ControllerResult)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(ResourceId, ControllerResult)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (ResourceId, ControllerResult)>>(iter: I) -> Self {
        ResultSet(iter.into_iter().collect())
    }
}

/// Which statuses make it into the menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Hide skipped and ignored resources.
    #[default]
    Quiet,
    /// Show skipped resources, hide ignored ones.
    Skipped,
    /// Show everything.
    All,
}

impl Verbosity {
    pub fn includes(&self, status: ReleaseStatus) -> bool {
        match status {
            ReleaseStatus::Ignored => *self >= Verbosity::All,
            ReleaseStatus::Skipped => *self >= Verbosity::Skipped,
            _ => true,
        }
    }
}

impl From<u8> for Verbosity {
    fn from(level: u8) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Skipped,
            _ => Verbosity::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_filters_statuses() {
        assert!(!Verbosity::Quiet.includes(ReleaseStatus::Skipped));
        assert!(!Verbosity::Quiet.includes(ReleaseStatus::Ignored));
        assert!(Verbosity::Quiet.includes(ReleaseStatus::Failed));
        assert!(Verbosity::Skipped.includes(ReleaseStatus::Skipped));
        assert!(!Verbosity::Skipped.includes(ReleaseStatus::Ignored));
        assert!(Verbosity::All.includes(ReleaseStatus::Ignored));
    }

    #[test]
    fn verbosity_clamps_high_levels() {
        assert_eq!(Verbosity::from(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from(1), Verbosity::Skipped);
        assert_eq!(Verbosity::from(2), Verbosity::All);
        assert_eq!(Verbosity::from(7), Verbosity::All);
    }

    #[test]
    fn empty_error_string_is_no_error() {
        let result = ControllerResult { error: Some(String::new()), ..Default::default() };
        assert_eq!(result.error(), None);
    }

    #[test]
    fn container_update_renders_target_tag_only() {
        let update = ContainerUpdate {
            container: "app".into(),
            current: "repo/app:1.0".parse().unwrap(),
            target: "repo/app:2.0".parse().unwrap(),
        };
        assert_eq!(update.to_string(), "app: repo/app:1.0 -> 2.0");
    }

    #[test]
    fn result_set_deserializes_from_json() {
        let json = r#"{
            "default:deployment/b": {"status": "ignored"},
            "default:deployment/a": {
                "status": "success",
                "per_container": [
                    {"container": "app", "current": "app:1.0", "target": "app:2.0"}
                ]
            }
        }"#;
        let results: ResultSet = serde_json::from_str(json).unwrap();
        let ids: Vec<String> = results.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["default:deployment/a", "default:deployment/b"]);
        let b = results.get(&"default:deployment/b".parse().unwrap()).unwrap();
        assert_eq!(b.status, ReleaseStatus::Ignored);
        assert!(b.per_container.is_empty());
    }
}
