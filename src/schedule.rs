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

use log::{debug, error, info};
use rand::{Rng, seq::SliceRandom};
use rustc_hash::FxHashSet;

use crate::{
    MAX_COURTS, PLAYERS_PER_COURT,
    court_match::Match,
    error::TournamentError,
    format::MatchFormat,
    pairer,
    partnership::PartnershipLedger,
    rest::RestLedger,
    roster::Roster,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<Match>,
    pub resting: Vec<String>,
}

/// # Errors
///
/// If the court count is outside `1..=MAX_COURTS` or the courts need more
/// players than the roster has.
pub fn resting_count(player_count: usize, court_count: usize) -> Result<usize, TournamentError> {
    if !(1..=MAX_COURTS).contains(&court_count) {
        return Err(TournamentError::Configuration(format!(
            "the number of courts must be between 1 and {MAX_COURTS}, got {court_count}"
        )));
    }

    let playing = court_count * PLAYERS_PER_COURT;
    player_count.checked_sub(playing).ok_or_else(|| {
        TournamentError::Configuration(format!(
            "{court_count} court(s) need {playing} players, only {player_count} entered"
        ))
    })
}

/// Who sits out `round`.
///
/// The least rested players rest first, ties broken by name. When more
/// players share the lowest rest count than there are rest slots, the slots
/// rotate through that group by round number. When there are not more of
/// them, the sorted prefix is taken, which can pull in players with one more
/// rest than the minimum.
#[must_use]
pub fn select_resting(
    ledger: &RestLedger,
    roster: &Roster,
    round: u32,
    resting_count: usize,
) -> Vec<String> {
    if resting_count == 0 {
        return Vec::new();
    }

    let sorted = ledger.least_rested_first(roster);
    if round <= 1 {
        return sorted.into_iter().take(resting_count).collect();
    }

    let least = sorted
        .first()
        .map_or(0, |player| ledger.times_rested(player));
    let candidates: Vec<&String> = sorted
        .iter()
        .filter(|player| ledger.times_rested(player) == least)
        .collect();

    if candidates.len() <= resting_count {
        return sorted.into_iter().take(resting_count).collect();
    }

    let offset = usize::try_from(round - 1).unwrap_or_default() % candidates.len();
    (0..resting_count)
        .map(|i| candidates[(offset + i) % candidates.len()].clone())
        .collect()
}

/// Shuffles the playing players and deals them out four to a court.
#[must_use]
pub fn partition_courts<R: Rng + ?Sized>(playing: &[String], rng: &mut R) -> Vec<Vec<String>> {
    let mut players = playing.to_vec();
    players.shuffle(rng);

    players
        .chunks(PLAYERS_PER_COURT)
        .map(<[String]>::to_vec)
        .collect()
}

/// Generates round number `round` and commits it to both ledgers. On error
/// neither ledger is touched.
///
/// # Errors
///
/// A configuration error if the counts don't fit, an integrity error if the
/// round came out malformed.
pub fn generate_round<R: Rng + ?Sized>(
    roster: &Roster,
    court_count: usize,
    format: MatchFormat,
    round: u32,
    rest_ledger: &mut RestLedger,
    partnership_ledger: &mut PartnershipLedger,
    rng: &mut R,
) -> Result<Round, TournamentError> {
    let resting_count = resting_count(roster.len(), court_count)?;

    let resting = select_resting(rest_ledger, roster, round, resting_count);
    let playing: Vec<String> = roster
        .names()
        .iter()
        .filter(|player| !resting.contains(player))
        .cloned()
        .collect();

    let expected = court_count * PLAYERS_PER_COURT;
    if playing.len() != expected {
        return Err(integrity(TournamentError::DuplicateAssignment(format!(
            "expected {expected} playing players, got {}",
            playing.len()
        ))));
    }

    let mut partnerships = partnership_ledger.clone();
    let mut matches = Vec::with_capacity(court_count);

    for (court, group) in (1..).zip(partition_courts(&playing, rng)) {
        let split = pairer::pair_teams(&group, &mut partnerships, rng).map_err(integrity)?;
        debug!("round {round} court {court}: {split:?}");
        matches.push(Match::new(round, court, split.team1, split.team2, format));
    }

    check_assignment(roster, court_count, &resting, &matches).map_err(integrity)?;

    for player in &resting {
        rest_ledger.record_rest(player, round);
    }
    *partnership_ledger = partnerships;

    info!(
        "round {round}: playing: {}, resting: {}",
        playing.join(", "),
        resting.join(", ")
    );

    Ok(Round {
        number: round,
        matches,
        resting,
    })
}

/// The resting players and the players of every match together are the
/// roster, each exactly once.
///
/// # Errors
///
/// If a player is missing, repeated, or unknown, or the number of matches is
/// not the number of courts.
pub fn check_assignment(
    roster: &Roster,
    court_count: usize,
    resting: &[String],
    matches: &[Match],
) -> Result<(), TournamentError> {
    if matches.len() != court_count {
        return Err(TournamentError::DuplicateAssignment(format!(
            "expected {court_count} matches, got {}",
            matches.len()
        )));
    }

    let mut assigned = FxHashSet::default();
    for player in resting
        .iter()
        .chain(matches.iter().flat_map(Match::players))
    {
        if !roster.contains(player) {
            return Err(TournamentError::DuplicateAssignment(format!(
                "'{player}' is not on the roster"
            )));
        }
        if !assigned.insert(player) {
            return Err(TournamentError::DuplicateAssignment(format!(
                "'{player}' is assigned twice"
            )));
        }
    }

    if assigned.len() != roster.len() {
        return Err(TournamentError::DuplicateAssignment(format!(
            "{} of {} players assigned",
            assigned.len(),
            roster.len()
        )));
    }

    Ok(())
}

fn integrity(error: TournamentError) -> TournamentError {
    error!("{error}");
    error
}
