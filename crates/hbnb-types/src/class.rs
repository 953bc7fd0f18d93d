use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The closed set of record classes the console can create and look up.
///
/// Class names arriving from user input are matched exactly (case-sensitive)
/// against this set. Nothing else resolves to a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClassName {
    BaseModel,
    User,
    State,
    City,
    Place,
    Amenity,
    Review,
}

impl ClassName {
    /// Every known class, in declaration order.
    pub const ALL: [ClassName; 7] = [
        ClassName::BaseModel,
        ClassName::User,
        ClassName::State,
        ClassName::City,
        ClassName::Place,
        ClassName::Amenity,
        ClassName::Review,
    ];

    /// The textual class name as typed by users and stored in keys.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Place => "Place",
            Self::Amenity => "Amenity",
            Self::Review => "Review",
        }
    }

    /// Look up a class by its exact name.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl FromStr for ClassName {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s).ok_or_else(|| TypeError::UnknownClass(s.to_string()))
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
