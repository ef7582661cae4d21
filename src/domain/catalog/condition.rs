//! Physical condition of a listed item.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Physical condition declared by the owner when listing an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemCondition {
    LikeNew,
    Good,
    Fair,
    Worn,
}

impl ItemCondition {
    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            ItemCondition::LikeNew => "Like New",
            ItemCondition::Good => "Good",
            ItemCondition::Fair => "Fair",
            ItemCondition::Worn => "Worn",
        }
    }

    /// Database/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemCondition::LikeNew => "like-new",
            ItemCondition::Good => "good",
            ItemCondition::Fair => "fair",
            ItemCondition::Worn => "worn",
        }
    }
}

impl fmt::Display for ItemCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ItemCondition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like-new" => Ok(ItemCondition::LikeNew),
            "good" => Ok(ItemCondition::Good),
            "fair" => Ok(ItemCondition::Fair),
            "worn" => Ok(ItemCondition::Worn),
            other => Err(ValidationError::invalid_format(
                "condition",
                format!("unknown condition '{}'", other),
            )),
        }
    }
}
