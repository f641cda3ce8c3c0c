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

//! Splits the four players of one court into two teams of two.
//!
//! Four players can only be split three ways, `{01|23}`, `{02|13}` and
//! `{03|12}`, so every split is scored and the best one wins. Repeated
//! partners cost more than repeated opponents.

use rand::Rng;
use rustc_hash::FxHashSet;

use crate::{
    PLAYERS_PER_COURT, court_match::Team, error::TournamentError,
    partnership::PartnershipLedger,
};

pub const BASE_SCORE: f64 = 1_000.0;
pub const PARTNER_PENALTY: f64 = 10.0;
pub const OPPONENT_PENALTY: f64 = 5.0;
/// Jitter is drawn from `0.0..MAX_JITTER`.
pub const MAX_JITTER: f64 = 10.0;

const SPLITS: [[usize; 4]; 3] = [[0, 1, 2, 3], [0, 2, 1, 3], [0, 3, 1, 2]];

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Split {
    pub team1: Team,
    pub team2: Team,
}

impl Split {
    /// The score without jitter.
    #[must_use]
    pub fn novelty(&self, ledger: &PartnershipLedger) -> f64 {
        let partnered = ledger.times_partnered(&self.team1[0], &self.team1[1])
            + ledger.times_partnered(&self.team2[0], &self.team2[1]);

        let mut opposed = 0;
        for p1 in &self.team1 {
            for p2 in &self.team2 {
                opposed += ledger.times_opposed(p1, p2);
            }
        }

        BASE_SCORE - PARTNER_PENALTY * f64::from(partnered) - OPPONENT_PENALTY * f64::from(opposed)
    }

    /// The split's two partner pairs, each sorted, in sorted order. Two splits
    /// of the same players are the same pairing iff their keys are equal.
    #[must_use]
    pub fn pairing_key(&self) -> [[String; 2]; 2] {
        let sorted = |team: &Team| {
            let mut team = team.clone();
            team.sort();
            team
        };

        let mut key = [sorted(&self.team1), sorted(&self.team2)];
        key.sort();
        key
    }
}

/// All three ways to split four players.
///
/// # Errors
///
/// If there are not exactly four distinct players.
pub fn candidate_splits(group: &[String]) -> Result<Vec<Split>, TournamentError> {
    let distinct = group.iter().collect::<FxHashSet<_>>().len();
    if group.len() != PLAYERS_PER_COURT || distinct != PLAYERS_PER_COURT {
        return Err(TournamentError::InsufficientPlayers { distinct });
    }

    Ok(SPLITS
        .iter()
        .map(|[a, b, c, d]| Split {
            team1: [group[*a].clone(), group[*b].clone()],
            team2: [group[*c].clone(), group[*d].clone()],
        })
        .collect())
}

/// Picks the split with the highest novelty plus jitter. The ledger is not
/// updated.
///
/// # Errors
///
/// If there are not exactly four distinct players.
pub fn choose_split<R: Rng + ?Sized>(
    group: &[String],
    ledger: &PartnershipLedger,
    rng: &mut R,
) -> Result<Split, TournamentError> {
    let mut best: Option<(f64, Split)> = None;

    for split in candidate_splits(group)? {
        let score = split.novelty(ledger) + rng.random_range(0.0..MAX_JITTER);

        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            best = Some((score, split));
        }
    }

    best.map(|(_, split)| split)
        .ok_or(TournamentError::InsufficientPlayers { distinct: 0 })
}

/// Chooses a split and records its partnerships and oppositions.
///
/// # Errors
///
/// If there are not exactly four distinct players.
pub fn pair_teams<R: Rng + ?Sized>(
    group: &[String],
    ledger: &mut PartnershipLedger,
    rng: &mut R,
) -> Result<Split, TournamentError> {
    let split = choose_split(group, ledger, rng)?;
    ledger.record_teams(&split.team1, &split.team2);
    Ok(split)
}
