use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationType {
    Club,
    YouthCenter,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown organization type {0}")]
pub struct UnknownOrganizationType(pub String);

impl OrganizationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizationType::Club => "club",
            OrganizationType::YouthCenter => "youth_center",
        }
    }

    pub fn arabic_label(&self) -> &'static str {
        match self {
            OrganizationType::Club => "نادي",
            OrganizationType::YouthCenter => "مركز شباب",
        }
    }
}

impl FromStr for OrganizationType {
    type Err = UnknownOrganizationType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "club" => Ok(OrganizationType::Club),
            "youth_center" => Ok(OrganizationType::YouthCenter),
            other => Err(UnknownOrganizationType(other.to_string())),
        }
    }
}

impl std::fmt::Display for OrganizationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
