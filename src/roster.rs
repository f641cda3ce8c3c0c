// This file is part of padel-rotation.
//
// padel-rotation is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// padel-rotation is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{PLAYERS_PER_COURT, error::TournamentError};

/// The players of one tournament in entry order. A player's index in the
/// roster never changes.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Roster(Vec<String>);

impl Roster {
    /// # Errors
    ///
    /// If a name is empty after trimming, a name is repeated, or there are
    /// fewer than four players.
    pub fn new<I, S>(names: I) -> Result<Self, TournamentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut players = Vec::new();
        let mut seen = FxHashSet::default();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(TournamentError::Configuration(
                    "please enter all player names".to_string(),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(TournamentError::Configuration(format!(
                    "player names must be unique, '{name}' is repeated"
                )));
            }

            players.push(name.to_string());
        }

        if players.len() < PLAYERS_PER_COURT {
            return Err(TournamentError::Configuration(format!(
                "at least {PLAYERS_PER_COURT} players are needed, got {}",
                players.len()
            )));
        }

        Ok(Self(players))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|player| player == name)
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|player| player == name)
    }
}

impl fmt::Display for Roster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() -> anyhow::Result<()> {
        let roster = Roster::new([" Ana", "Bea ", "Cris", "Dani"])?;
        assert_eq!(roster.names(), ["Ana", "Bea", "Cris", "Dani"]);
        assert_eq!(roster.index_of("Cris"), Some(2));
        assert!(!roster.contains("Eva"));

        Ok(())
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!(Roster::new(["ana", "Ana", "ANA", "aNa"]).is_ok());
    }

    #[test]
    fn invalid_rosters() {
        assert!(matches!(
            Roster::new(["Ana", "Bea", " ", "Dani"]),
            Err(TournamentError::Configuration(_))
        ));
        assert!(matches!(
            Roster::new(["Ana", "Bea", "Ana ", "Dani"]),
            Err(TournamentError::Configuration(_))
        ));
        assert!(matches!(
            Roster::new(["Ana", "Bea", "Cris"]),
            Err(TournamentError::Configuration(_))
        ));
    }
}
