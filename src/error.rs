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

use thiserror::Error;

use crate::format::MatchFormat;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TournamentError {
    #[error("configuration: {0}")]
    Configuration(String),
    #[error("insufficient players: a court needs 4 distinct players, got {distinct}")]
    InsufficientPlayers { distinct: usize },
    #[error("score: the maximum score for {format} is {max}, got {score1}-{score2}")]
    ScoreRange {
        format: MatchFormat,
        max: u32,
        score1: u32,
        score2: u32,
    },
    #[error("duplicate assignment: {0}")]
    DuplicateAssignment(String),
    #[error("score: there is no match with id '{0}'")]
    MatchNotFound(String),
}

impl TournamentError {
    /// Errors that can only come from a defect in the scheduling algorithm,
    /// as opposed to bad input.
    #[must_use]
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::InsufficientPlayers { .. } | Self::DuplicateAssignment(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_errors() {
        assert!(TournamentError::InsufficientPlayers { distinct: 3 }.is_integrity());
        assert!(TournamentError::DuplicateAssignment("Ana".to_string()).is_integrity());
        assert!(!TournamentError::Configuration("courts".to_string()).is_integrity());
        assert!(!TournamentError::MatchNotFound("R9M9".to_string()).is_integrity());
    }

    #[test]
    fn score_range_message() {
        let error = TournamentError::ScoreRange {
            format: MatchFormat::BestOf3,
            max: 3,
            score1: 4,
            score2: 1,
        };

        assert_eq!(
            error.to_string(),
            "score: the maximum score for best_of_3 is 3, got 4-1"
        );
    }
}
