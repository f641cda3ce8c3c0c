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

use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    court_match::{Match, Score, match_id},
    error::TournamentError,
    format::MatchFormat,
    partnership::PartnershipLedger,
    rest::RestLedger,
    roster::Roster,
    schedule,
    stats::{Highlights, PairStats, PlayerStats},
    tournament::TournamentState,
};

/// The saved form of a tournament. The stats are written for readers of the
/// file and ignored when loading; the partnership counts are rebuilt from the
/// match history. Current matches missing from the history are added to it.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub players: Vec<String>,
    pub player_count: usize,
    pub court_count: usize,
    pub match_format: MatchFormat,
    pub current_round: u32,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub match_history: Vec<Match>,
    #[serde(default, skip_deserializing)]
    pub player_stats: Vec<PlayerStats>,
    #[serde(default, skip_deserializing)]
    pub pair_stats: Vec<PairStats>,
    #[serde(default)]
    pub rest_history: RestLedger,
    #[serde(default)]
    pub current_resting: Vec<String>,
}

impl Snapshot {
    /// # Errors
    ///
    /// If serialization fails.
    pub fn to_ron(&self) -> anyhow::Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// # Errors
    ///
    /// If the string is not a valid snapshot.
    pub fn from_ron(string: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(string)?)
    }
}

impl From<&TournamentState> for Snapshot {
    fn from(tournament: &TournamentState) -> Self {
        let stats = tournament.stats();

        Self {
            players: tournament.roster.names().to_vec(),
            player_count: tournament.roster.len(),
            court_count: tournament.court_count,
            match_format: tournament.match_format,
            current_round: tournament.current_round,
            matches: tournament.current_matches().cloned().collect(),
            match_history: tournament.match_history.clone(),
            player_stats: stats.players,
            pair_stats: stats.pairs,
            rest_history: tournament.rests.clone(),
            current_resting: tournament.current_resting.clone(),
        }
    }
}

impl TryFrom<Snapshot> for TournamentState {
    type Error = TournamentError;

    fn try_from(snapshot: Snapshot) -> Result<Self, Self::Error> {
        let roster = Roster::new(&snapshot.players)?;
        if snapshot.player_count != roster.len() {
            return Err(TournamentError::Configuration(format!(
                "the snapshot says {} players but lists {}",
                snapshot.player_count,
                roster.len()
            )));
        }
        schedule::resting_count(roster.len(), snapshot.court_count)?;

        let mut rests = RestLedger::new(&roster);
        for (player, record) in snapshot.rest_history.0 {
            if !roster.contains(&player) {
                return Err(TournamentError::Configuration(format!(
                    "rest history for unknown player '{player}'"
                )));
            }
            if !record.is_consistent() {
                return Err(TournamentError::Configuration(format!(
                    "rest history for '{player}' counts {} rests in {} rounds",
                    record.times_rested,
                    record.rounds_rested.len()
                )));
            }
            if record
                .rounds_rested
                .iter()
                .any(|round| *round == 0 || *round > snapshot.current_round)
            {
                return Err(TournamentError::Configuration(format!(
                    "rest history for '{player}' has a round after round {}",
                    snapshot.current_round
                )));
            }
            rests.0.insert(player, record);
        }

        let mut match_history = snapshot.match_history;
        let mut ids: FxHashSet<String> = FxHashSet::default();
        for court_match in &match_history {
            if !ids.insert(court_match.id.clone()) {
                return Err(TournamentError::Configuration(format!(
                    "match '{}' appears twice in the history",
                    court_match.id
                )));
            }
        }
        for court_match in snapshot.matches {
            if ids.insert(court_match.id.clone()) {
                match_history.push(court_match);
            }
        }

        for court_match in &mut match_history {
            court_match.format = snapshot.match_format;
            check_match(court_match, &roster, snapshot.current_round)?;
        }

        for player in &snapshot.current_resting {
            if !roster.contains(player) {
                return Err(TournamentError::Configuration(format!(
                    "the snapshot rests unknown player '{player}'"
                )));
            }
        }

        Ok(Self {
            partnerships: PartnershipLedger::from_matches(&match_history),
            roster,
            court_count: snapshot.court_count,
            match_format: snapshot.match_format,
            current_round: snapshot.current_round,
            match_history,
            rests,
            current_resting: snapshot.current_resting,
        })
    }
}

fn check_match(
    court_match: &Match,
    roster: &Roster,
    current_round: u32,
) -> Result<(), TournamentError> {
    let id = &court_match.id;
    if court_match.round == 0 || court_match.round > current_round {
        return Err(TournamentError::Configuration(format!(
            "match '{id}' is in round {} but the tournament is in round {current_round}",
            court_match.round
        )));
    }
    if court_match.court == 0 || *id != match_id(court_match.round, court_match.court) {
        return Err(TournamentError::Configuration(format!(
            "match '{id}' is listed as round {} court {}",
            court_match.round, court_match.court
        )));
    }

    let mut players = FxHashSet::default();
    for player in court_match.players() {
        if !roster.contains(player) {
            return Err(TournamentError::Configuration(format!(
                "match '{id}' has unknown player '{player}'"
            )));
        }
        if !players.insert(player) {
            return Err(TournamentError::Configuration(format!(
                "match '{id}' has '{player}' twice"
            )));
        }
    }

    if let Some(score) = court_match.score {
        Score::new(score.score1, score.score2, court_match.format)
            .map_err(|error| TournamentError::Configuration(format!("match '{id}': {error}")))?;
    }

    Ok(())
}

/// The snapshot plus the highlights, for sharing results.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Export {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub highlights: Highlights,
}

impl Export {
    #[must_use]
    pub fn new(tournament: &TournamentState) -> Self {
        Self {
            snapshot: Snapshot::from(tournament),
            highlights: tournament.stats().highlights(),
        }
    }

    /// # Errors
    ///
    /// If serialization fails.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[must_use]
    pub fn file_name(date: NaiveDate) -> String {
        format!("padel-tournament-{}.json", date.format("%Y-%m-%d"))
    }
}
