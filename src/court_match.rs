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

use serde::{Deserialize, Serialize};

use crate::{error::TournamentError, format::MatchFormat};

pub type Team = [String; 2];

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub score1: u32,
    pub score2: u32,
}

impl Score {
    /// # Errors
    ///
    /// If either score is above the format's maximum.
    pub fn new(score1: u32, score2: u32, format: MatchFormat) -> Result<Self, TournamentError> {
        let max = format.max_score();
        if score1 > max || score2 > max {
            return Err(TournamentError::ScoreRange {
                format,
                max,
                score1,
                score2,
            });
        }

        Ok(Self { score1, score2 })
    }

    /// Level scores count for team two.
    #[must_use]
    pub fn team1_won(&self) -> bool {
        self.score1 > self.score2
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.score1, self.score2)
    }
}

/// One court in one round. A match without a score is scheduled, a match
/// with a score is completed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "MatchRecord", into = "MatchRecord")]
pub struct Match {
    pub id: String,
    pub round: u32,
    pub court: u32,
    pub team1: Team,
    pub team2: Team,
    pub score: Option<Score>,
    pub format: MatchFormat,
}

/// The saved form of a [`Match`]: flat scores and a completed flag. A
/// scheduled match is written as `0-0`, not completed.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchRecord {
    id: String,
    round: u32,
    court: u32,
    team1: Team,
    team2: Team,
    #[serde(default)]
    score1: u32,
    #[serde(default)]
    score2: u32,
    #[serde(default)]
    completed: bool,
    #[serde(default, alias = "format")]
    match_format: MatchFormat,
}

impl From<MatchRecord> for Match {
    fn from(record: MatchRecord) -> Self {
        let score = record.completed.then_some(Score {
            score1: record.score1,
            score2: record.score2,
        });

        Self {
            id: record.id,
            round: record.round,
            court: record.court,
            team1: record.team1,
            team2: record.team2,
            score,
            format: record.match_format,
        }
    }
}

impl From<Match> for MatchRecord {
    fn from(court_match: Match) -> Self {
        let (score1, score2) = court_match
            .score
            .map_or((0, 0), |score| (score.score1, score.score2));

        Self {
            id: court_match.id,
            round: court_match.round,
            court: court_match.court,
            team1: court_match.team1,
            team2: court_match.team2,
            score1,
            score2,
            completed: court_match.score.is_some(),
            match_format: court_match.format,
        }
    }
}

impl Match {
    #[must_use]
    pub fn new(round: u32, court: u32, team1: Team, team2: Team, format: MatchFormat) -> Self {
        Self {
            id: match_id(round, court),
            round,
            court,
            team1,
            team2,
            score: None,
            format,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.score.is_some()
    }

    pub fn players(&self) -> impl Iterator<Item = &String> {
        self.team1.iter().chain(self.team2.iter())
    }

    /// Records or overwrites the score. Nothing changes if the score is out
    /// of range.
    ///
    /// # Errors
    ///
    /// If either score is above the format's maximum.
    pub fn set_score(&mut self, score1: u32, score2: u32) -> Result<(), TournamentError> {
        self.score = Some(Score::new(score1, score2, self.format)?);
        Ok(())
    }

    /// The winning and losing teams with their scores, if completed.
    #[must_use]
    pub fn outcome(&self) -> Option<((&Team, u32), (&Team, u32))> {
        let score = self.score?;
        if score.team1_won() {
            Some(((&self.team1, score.score1), (&self.team2, score.score2)))
        } else {
            Some(((&self.team2, score.score2), (&self.team1, score.score1)))
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} court {}: {} & {} vs {} & {}",
            self.id, self.court, self.team1[0], self.team1[1], self.team2[0], self.team2[1],
        )?;

        if let Some(score) = &self.score {
            write!(f, " {score} ({})", self.format.short())
        } else {
            write!(f, " scheduled")
        }
    }
}

#[must_use]
pub fn match_id(round: u32, court: u32) -> String {
    format!("R{round}M{court}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_match() -> Match {
        Match::new(
            2,
            1,
            ["Ana".to_string(), "Bea".to_string()],
            ["Cris".to_string(), "Dani".to_string()],
            MatchFormat::BestOf3,
        )
    }

    #[test]
    fn id_from_round_and_court() {
        let court_match = new_match();
        assert_eq!(court_match.id, "R2M1");
        assert!(!court_match.is_completed());
        assert_eq!(court_match.players().count(), 4);
    }

    #[test]
    fn score_in_range() -> anyhow::Result<()> {
        let mut court_match = new_match();
        court_match.set_score(3, 1)?;
        assert!(court_match.is_completed());

        // Completed -> Completed with the new score.
        court_match.set_score(1, 3)?;
        assert_eq!(
            court_match.score,
            Some(Score {
                score1: 1,
                score2: 3
            })
        );

        Ok(())
    }

    #[test]
    fn score_out_of_range_changes_nothing() {
        let mut court_match = new_match();
        let result = court_match.set_score(4, 1);
        assert!(matches!(result, Err(TournamentError::ScoreRange { max: 3, .. })));
        assert!(!court_match.is_completed());
    }

    #[test]
    fn flat_score_fields() -> anyhow::Result<()> {
        let mut court_match = new_match();
        let json = serde_json::to_value(&court_match)?;
        assert_eq!(json["score1"], 0);
        assert_eq!(json["completed"], false);
        assert_eq!(json["matchFormat"], "best_of_3");
        assert!(json.get("score").is_none());

        court_match.set_score(3, 2)?;
        let restored: Match = serde_json::from_value(serde_json::to_value(&court_match)?)?;
        assert_eq!(restored, court_match);

        let scheduled: Match = serde_json::from_str(
            r#"{"id":"R1M2","round":1,"court":2,"team1":["Ana","Bea"],"team2":["Cris","Dani"],"score1":0,"score2":0,"completed":false}"#,
        )?;
        assert!(!scheduled.is_completed());
        assert_eq!(scheduled.id, match_id(1, 2));

        Ok(())
    }

    #[test]
    fn level_score_goes_to_team_two() -> anyhow::Result<()> {
        let mut court_match = new_match();
        court_match.set_score(2, 2)?;

        let Some(((winners, _), (losers, _))) = court_match.outcome() else {
            anyhow::bail!("the match is completed");
        };
        assert_eq!(winners, &court_match.team2);
        assert_eq!(losers, &court_match.team1);

        Ok(())
    }
}
