//! Team and match models.
//!
//! Teams are small immutable records identified by name; a match is an
//! ordered home/away pairing of two teams.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A participating team.
///
/// Identity is the team name alone: two `Team` values with the same name
/// compare equal regardless of display colors, and hash identically.
/// Colors are display metadata consumed by export/UI collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team name (the identity).
    pub name: String,
    /// Display background color (hex).
    pub color: String,
    /// Display font color (hex). `None` = renderer default.
    pub font_color: Option<String>,
}

impl Team {
    /// Creates a team with default colors.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: "#FFFFFF".to_string(),
            font_color: None,
        }
    }

    /// Sets the background color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the font color.
    pub fn with_font_color(mut self, font_color: impl Into<String>) -> Self {
        self.font_color = Some(font_color.into());
        self
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An ordered pairing of two teams.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    /// Home side.
    pub home: Team,
    /// Away side.
    pub away: Team,
}

impl Match {
    /// Creates a match.
    pub fn new(home: Team, away: Team) -> Self {
        Self { home, away }
    }

    /// Returns the same pairing with home and away swapped.
    pub fn flipped(&self) -> Self {
        Self {
            home: self.away.clone(),
            away: self.home.clone(),
        }
    }

    /// Whether the given team plays in this match (home or away).
    pub fn involves(&self, team: &Team) -> bool {
        &self.home == team || &self.away == team
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.home, self.away)
    }
}
