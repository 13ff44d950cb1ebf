use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Action requested against a project, instance, or team.
///
/// Transports parse the action from a string; anything outside the four
/// known verbs becomes [`Action::Unknown`] and is always denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
    Delete,
    Access,
    #[serde(other)]
    Unknown,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Access => "access",
            Action::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "create" => Action::Create,
            "update" => Action::Update,
            "delete" => Action::Delete,
            "access" => Action::Access,
            _ => Action::Unknown,
        })
    }
}

/// Resource kinds the decision engine guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Project,
    Instance,
    Team,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Project => "project",
            ResourceKind::Instance => "instance",
            ResourceKind::Team => "team",
        }
    }

    pub fn plural(self) -> &'static str {
        match self {
            ResourceKind::Project => "projects",
            ResourceKind::Instance => "instances",
            ResourceKind::Team => "teams",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognised_actions_parse_to_unknown() {
        assert_eq!("CREATE".parse::<Action>(), Ok(Action::Create));
        assert_eq!("access".parse::<Action>(), Ok(Action::Access));
        assert_eq!("purge".parse::<Action>(), Ok(Action::Unknown));
        assert_eq!("".parse::<Action>(), Ok(Action::Unknown));
    }
}
