//! Static benchmark metadata attached to every check

use crate::session::Service;
use serde::Serialize;
use std::fmt;

/// CIS profile level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Level {
    L1,
    L2,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::L1 => "L1",
            Level::L2 => "L2",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L1" | "1" => Ok(Level::L1),
            "L2" | "2" => Ok(Level::L2),
            other => Err(format!("unknown level '{}'", other)),
        }
    }
}

/// Minimum license tier a control applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum License {
    E3,
    E5,
}

impl License {
    /// E3 controls apply to E5 tenants as well
    pub fn applies_to(&self, tenant: License) -> bool {
        *self <= tenant
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            License::E3 => "E3",
            License::E5 => "E5",
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for License {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "E3" => Ok(License::E3),
            "E5" => Ok(License::E5),
            other => Err(format!("unknown license tier '{}'", other)),
        }
    }
}

/// Top-level benchmark section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    AdminCenter,
    Defender,
    Purview,
    Entra,
    Exchange,
    SharePoint,
    Teams,
}

impl Section {
    pub fn number(&self) -> u8 {
        match self {
            Section::AdminCenter => 1,
            Section::Defender => 2,
            Section::Purview => 3,
            Section::Entra => 5,
            Section::Exchange => 6,
            Section::SharePoint => 7,
            Section::Teams => 8,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::AdminCenter => "Microsoft 365 admin center",
            Section::Defender => "Microsoft 365 Defender",
            Section::Purview => "Microsoft Purview",
            Section::Entra => "Microsoft Entra admin center",
            Section::Exchange => "Exchange admin center",
            Section::SharePoint => "SharePoint admin center",
            Section::Teams => "Microsoft Teams admin center",
        }
    }
}

/// Benchmark metadata for one control
///
/// Authored next to the check and consumed by catalog tooling. The executor
/// never reads the prose fields.
#[derive(Debug, Clone, Serialize)]
pub struct CheckMetadata {
    pub id: &'static str,
    pub title: &'static str,
    pub section: Section,
    pub level: Level,
    pub license: License,
    pub services: &'static [Service],
    pub description: &'static str,
    pub rationale: &'static str,
    pub audit: &'static str,
    pub remediation: &'static str,
    /// CIS Controls v8 safeguards
    pub cis_controls: &'static [&'static str],
    pub references: &'static [&'static str],
}

impl CheckMetadata {
    /// "6.5.4" -> "6.5"
    pub fn subsection(&self) -> &'static str {
        match self.id.rfind('.') {
            Some(idx) => &self.id[..idx],
            None => self.id,
        }
    }

    /// Leading number of the control ID
    pub fn section_number(&self) -> Option<u8> {
        self.id.split('.').next().and_then(|n| n.parse().ok())
    }

    /// Numeric sort key: "5.1.10" sorts after "5.1.9"
    pub fn sort_key(&self) -> Vec<u32> {
        self.id
            .split('.')
            .map(|part| part.parse().unwrap_or(u32::MAX))
            .collect()
    }
}
