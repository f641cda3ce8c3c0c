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

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::roster::Roster;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestRecord {
    #[serde(default)]
    pub times_rested: u32,
    #[serde(default)]
    pub rounds_rested: Vec<u32>,
}

impl RestRecord {
    /// `times_rested` always equals the number of rounds rested.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        usize::try_from(self.times_rested).is_ok_and(|times| times == self.rounds_rested.len())
    }
}

/// How often and when every player has sat out.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RestLedger(pub BTreeMap<String, RestRecord>);

impl RestLedger {
    #[must_use]
    pub fn new(roster: &Roster) -> Self {
        Self(
            roster
                .names()
                .iter()
                .map(|name| (name.clone(), RestRecord::default()))
                .collect(),
        )
    }

    /// Callers must record a player at most once per round.
    pub fn record_rest(&mut self, player: &str, round: u32) {
        let record = self.0.entry(player.to_string()).or_default();
        record.times_rested += 1;
        record.rounds_rested.push(round);
    }

    #[must_use]
    pub fn times_rested(&self, player: &str) -> u32 {
        self.0.get(player).map_or(0, |record| record.times_rested)
    }

    #[must_use]
    pub fn get(&self, player: &str) -> Option<&RestRecord> {
        self.0.get(player)
    }

    /// The roster ordered by times rested, then by name.
    #[must_use]
    pub fn least_rested_first(&self, roster: &Roster) -> Vec<String> {
        let mut players = roster.names().to_vec();
        players.sort_by(|a, b| {
            self.times_rested(a)
                .cmp(&self.times_rested(b))
                .then_with(|| a.cmp(b))
        });
        players
    }

    /// The largest difference in rest counts between two players.
    #[must_use]
    pub fn spread(&self, roster: &Roster) -> u32 {
        let counts = roster.names().iter().map(|name| self.times_rested(name));
        let max = counts.clone().max().unwrap_or_default();
        let min = counts.min().unwrap_or_default();
        max - min
    }
}
