//! Result records emitted by a check run

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Overall status of one check invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
}

impl CheckStatus {
    /// Numeric status code carried next to the status on the wire
    pub fn status_id(&self) -> u8 {
        match self {
            CheckStatus::Pass => 1,
            CheckStatus::Fail | CheckStatus::Error => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "Pass",
            CheckStatus::Fail => "Fail",
            CheckStatus::Error => "Error",
        }
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key layout of a serialized [`ResourceResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultShape {
    /// `Name`, `Resource`, `CurrentValue`, `ExpectedValue`, `IsCompliant`, `Details`
    #[default]
    Compared,
    /// `Name`, `Resource`, `Value`, `IsCompliant`, `Details`
    Observed,
    /// The label reported under `Resource`, then `IsCompliant` and `Details`
    Labelled,
}

/// One evaluated fact
///
/// Optional keys are omitted when empty. Which value keys appear depends on
/// `shape`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResult {
    pub name: String,

    /// Record the fact was read from, for collection sources
    pub resource: Option<String>,

    pub current_value: Value,
    pub expected_value: Option<Value>,
    pub is_compliant: bool,
    pub details: Option<String>,
    pub shape: ResultShape,
}

impl Serialize for ResourceResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        match self.shape {
            ResultShape::Labelled => match &self.resource {
                Some(resource) => {
                    map.serialize_entry("Resource", &format!("{} ({})", self.name, resource))?
                }
                None => map.serialize_entry("Resource", &self.name)?,
            },
            ResultShape::Compared | ResultShape::Observed => {
                map.serialize_entry("Name", &self.name)?;
                if let Some(resource) = &self.resource {
                    map.serialize_entry("Resource", resource)?;
                }
                if self.shape == ResultShape::Observed {
                    map.serialize_entry("Value", &self.current_value)?;
                } else {
                    map.serialize_entry("CurrentValue", &self.current_value)?;
                    if let Some(expected) = &self.expected_value {
                        map.serialize_entry("ExpectedValue", expected)?;
                    }
                }
            }
        }

        map.serialize_entry("IsCompliant", &self.is_compliant)?;
        if let Some(details) = &self.details {
            map.serialize_entry("Details", details)?;
        }
        map.end()
    }
}

/// Aggregate of one check run
///
/// Built only through [`CheckOutcome::from_results`] or [`CheckOutcome::error`],
/// so the status always agrees with the result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    status: CheckStatus,
    status_id: u8,
    #[serde(rename = "Details")]
    details: Vec<ResourceResult>,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl CheckOutcome {
    pub fn from_results(details: Vec<ResourceResult>) -> Self {
        let status = if details.iter().all(|r| r.is_compliant) {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        };

        Self {
            status,
            status_id: status.status_id(),
            details,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let mut message = message.into();
        if message.trim().is_empty() {
            message = "check failed without an error message".to_string();
        }

        Self {
            status: CheckStatus::Error,
            status_id: CheckStatus::Error.status_id(),
            details: Vec::new(),
            error: Some(message),
        }
    }

    pub fn status(&self) -> CheckStatus {
        self.status
    }

    pub fn status_id(&self) -> u8 {
        self.status_id
    }

    pub fn details(&self) -> &[ResourceResult] {
        &self.details
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn non_compliant(&self) -> impl Iterator<Item = &ResourceResult> {
        self.details.iter().filter(|r| !r.is_compliant)
    }
}
