use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// MODELS
//
// Wire format matches the flags documents exactly: camelCase field names
// (`featureName`, `updatedAt`, ...) and snake_case rule types.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Uat,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Uat, Environment::Prod];
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Dev => "dev",
            Environment::Uat => "uat",
            Environment::Prod => "prod",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Environment::Dev),
            "uat" => Ok(Environment::Uat),
            "prod" => Ok(Environment::Prod),
            other => Err(format!(
                "Unknown environment '{}'. Must be one of: dev, uat, prod",
                other
            )),
        }
    }
}

/// Comparison applied to a single context field.
///
/// Older documents spell the prefix type `start_with`; both spellings are
/// accepted on input, `starts_with` is emitted. Anything else parses as
/// `Unknown` and fails closed at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    Equals,
    StartsWith,
    Unknown,
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tag = String::deserialize(deserializer)?;
        Ok(match tag.as_str() {
            "equals" => RuleType::Equals,
            "starts_with" | "start_with" => RuleType::StartsWith,
            _ => RuleType::Unknown,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRule {
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub field_name: String,
    pub field_value: String,
}

/// A single flag as it appears in the document. Individual flags with
/// missing fields are tolerated: absent strings read as empty, an absent
/// value reads as false, absent context rules read as none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureFlag {
    #[serde(rename = "featureName", default)]
    pub name: String,
    #[serde(rename = "featureValue", default)]
    pub value: bool,
    #[serde(rename = "featureDescription", default)]
    pub description: String,
    #[serde(
        rename = "featureContext",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub context_rules: Vec<ContextRule>,
}

impl FeatureFlag {
    pub fn has_context(&self) -> bool {
        !self.context_rules.is_empty()
    }
}

/// One per-environment document. `environment` and `flags` are required;
/// a document missing either is rejected at load. `updatedAt` is kept
/// optional because the viewer can still render without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagsDocument {
    pub environment: Environment,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub flags: Vec<FeatureFlag>,
}

impl FlagsDocument {
    /// Look up a flag by name. Names are unique within a document; with
    /// duplicates the first occurrence wins here.
    pub fn flag(&self, name: &str) -> Option<&FeatureFlag> {
        self.flags.iter().find(|f| f.name == name)
    }
}
