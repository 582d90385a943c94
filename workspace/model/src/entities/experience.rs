use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use thiserror::Error;

/// How much hiking a user has done.
/// Stored in `app_user.experience` as the upper-case variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum Experience {
    #[sea_orm(string_value = "BEGINNER")]
    Beginner,
    #[sea_orm(string_value = "INTERMEDIATE")]
    Intermediate,
    #[sea_orm(string_value = "ADVANCED")]
    Advanced,
    #[sea_orm(string_value = "EXPERT")]
    Expert,
}

/// Returned when text does not name an [`Experience`] level.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown experience level '{0}', expected one of: BEGINNER, INTERMEDIATE, ADVANCED, EXPERT")]
pub struct ParseExperienceError(pub String);

impl Experience {
    /// The textual name persisted in the database and sent over the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "BEGINNER",
            Experience::Intermediate => "INTERMEDIATE",
            Experience::Advanced => "ADVANCED",
            Experience::Expert => "EXPERT",
        }
    }
}

impl FromStr for Experience {
    type Err = ParseExperienceError;

    /// Matching ignores case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Experience::iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseExperienceError(s.to_string()))
    }
}
