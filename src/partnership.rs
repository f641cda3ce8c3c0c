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

use rustc_hash::FxHashMap;

use crate::court_match::{Match, Team};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PartnershipCount {
    pub times_partnered: u32,
    pub times_opposed: u32,
}

/// Counts per unordered pair of players. `(a, b)` and `(b, a)` share one
/// counter.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PartnershipLedger(FxHashMap<(String, String), PartnershipCount>);

fn key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

impl PartnershipLedger {
    /// Rebuilds the ledger by replaying every match that was ever scheduled.
    #[must_use]
    pub fn from_matches<'a, I: IntoIterator<Item = &'a Match>>(matches: I) -> Self {
        let mut ledger = Self::default();
        for court_match in matches {
            ledger.record_teams(&court_match.team1, &court_match.team2);
        }
        ledger
    }

    #[must_use]
    pub fn get(&self, a: &str, b: &str) -> PartnershipCount {
        self.0.get(&key(a, b)).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn times_partnered(&self, a: &str, b: &str) -> u32 {
        self.get(a, b).times_partnered
    }

    #[must_use]
    pub fn times_opposed(&self, a: &str, b: &str) -> u32 {
        self.get(a, b).times_opposed
    }

    pub fn record_partnership(&mut self, a: &str, b: &str) {
        self.0.entry(key(a, b)).or_default().times_partnered += 1;
    }

    pub fn record_opposition(&mut self, a: &str, b: &str) {
        self.0.entry(key(a, b)).or_default().times_opposed += 1;
    }

    /// Both partnerships and all four oppositions of one match.
    pub fn record_teams(&mut self, team1: &Team, team2: &Team) {
        self.record_partnership(&team1[0], &team1[1]);
        self.record_partnership(&team2[0], &team2[1]);

        for p1 in team1 {
            for p2 in team2 {
                self.record_opposition(p1, p2);
            }
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
