use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grammar of a mapping file.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MappingFormat {
    /// Class list plus optional member list, one record per line.
    #[default]
    Flat,
    /// Class header lines followed by indented member lines.
    Retrace,
}

impl fmt::Display for MappingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingFormat::Flat => f.write_str("flat"),
            MappingFormat::Retrace => f.write_str("retrace"),
        }
    }
}

impl std::str::FromStr for MappingFormat {
    type Err = crate::ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" | "csrg" => Ok(MappingFormat::Flat),
            "retrace" | "proguard" => Ok(MappingFormat::Retrace),
            other => Err(crate::ApiError::InvalidArgument(format!(
                "unknown mapping format '{}'",
                other
            ))),
        }
    }
}

/// Where one side of a mapping pair is read from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct MappingSource {
    #[serde(default)]
    pub format: MappingFormat,
    /// Location of the class list (flat) or of the whole file (retrace).
    pub location: String,
    /// Member list location; only read for the flat format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<String>,
}

impl MappingSource {
    pub fn flat(location: impl Into<String>, members: Option<String>) -> Self {
        Self {
            format: MappingFormat::Flat,
            location: location.into(),
            members,
        }
    }

    pub fn retrace(location: impl Into<String>) -> Self {
        Self {
            format: MappingFormat::Retrace,
            location: location.into(),
            members: None,
        }
    }
}

/// A named pair of mapping sources: the community side and the canonical side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct MappingProfile {
    pub id: String,
    pub community: MappingSource,
    pub canonical: MappingSource,
    /// Set for profiles shipped as presets; never persisted.
    #[serde(skip)]
    pub preset: bool,
}

impl MappingProfile {
    pub fn new(id: impl Into<String>, community: MappingSource, canonical: MappingSource) -> Self {
        Self {
            id: id.into(),
            community,
            canonical,
            preset: false,
        }
    }

    pub fn is_preset(&self) -> bool {
        self.preset
    }
}

/// Per-project selection of the active profile.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct ProjectSettings {
    #[serde(default)]
    pub selected_profile: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults() {
        let json = r#"{
            "id": "1.19.2",
            "community": { "location": "classes.csrg", "members": "members.csrg" },
            "canonical": { "format": "retrace", "location": "server.txt" }
        }"#;
        let profile: MappingProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.community.format, MappingFormat::Flat);
        assert_eq!(profile.community.members.as_deref(), Some("members.csrg"));
        assert_eq!(profile.canonical.format, MappingFormat::Retrace);
        assert!(!profile.is_preset());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSRG".parse::<MappingFormat>().unwrap(), MappingFormat::Flat);
        assert_eq!("proguard".parse::<MappingFormat>().unwrap(), MappingFormat::Retrace);
        assert!("tiny".parse::<MappingFormat>().is_err());
    }
}
