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

//! Win/loss tables derived from the match history.
//!
//! Nothing here is stored: the tables are rebuilt from scratch by replaying
//! every completed match, so an edited score can never leave them stale.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::{
    court_match::{Match, Team},
    rest::RestLedger,
    roster::Roster,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player: String,
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
    pub points_against: u32,
    pub rested: u32,
}

impl PlayerStats {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.matches)
    }
}

impl fmt::Display for PlayerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} matches {}W - {}L {}% points {}:{} rested {}",
            self.player,
            self.matches,
            self.wins,
            self.losses,
            percent(self.win_rate()),
            self.points,
            self.points_against,
            self.rested,
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairStats {
    pub players: [String; 2],
    pub matches: u32,
    pub wins: u32,
    pub losses: u32,
}

impl PairStats {
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        win_rate(self.wins, self.matches)
    }
}

impl fmt::Display for PairStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} & {} {} wins, {} losses {}%",
            self.players[0],
            self.players[1],
            self.wins,
            self.losses,
            percent(self.win_rate())
        )
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlights {
    pub best_pair: Option<PairStats>,
    pub worst_pair: Option<PairStats>,
    pub most_wins: Option<PlayerStats>,
    pub most_losses: Option<PlayerStats>,
}

impl fmt::Display for Highlights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_highlight(f, "best pair", self.best_pair.as_ref())?;
        write_highlight(f, "worst pair", self.worst_pair.as_ref())?;
        write_highlight(f, "most wins", self.most_wins.as_ref())?;
        write_highlight(f, "most losses", self.most_losses.as_ref())
    }
}

fn write_highlight<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    value: Option<&T>,
) -> fmt::Result {
    match value {
        Some(value) => writeln!(f, "{label}: {value}"),
        None => writeln!(f, "{label}: no data available"),
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// In roster order.
    pub players: Vec<PlayerStats>,
    /// In the order each pair first played together.
    pub pairs: Vec<PairStats>,
}

impl Stats {
    /// Replays the completed matches from empty tables.
    #[must_use]
    pub fn compute<'a, I: IntoIterator<Item = &'a Match>>(
        roster: &Roster,
        rests: &RestLedger,
        matches: I,
    ) -> Self {
        let mut players: Vec<PlayerStats> = roster
            .names()
            .iter()
            .map(|name| PlayerStats {
                player: name.clone(),
                rested: rests.times_rested(name),
                ..PlayerStats::default()
            })
            .collect();
        let player_index: FxHashMap<&str, usize> = roster
            .names()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut pairs: Vec<PairStats> = Vec::new();
        let mut pair_index: FxHashMap<Team, usize> = FxHashMap::default();

        for court_match in matches {
            let Some(((winners, won_with), (losers, lost_with))) = court_match.outcome() else {
                continue;
            };

            for (team, points, points_against, won) in [
                (winners, won_with, lost_with, true),
                (losers, lost_with, won_with, false),
            ] {
                for player in team {
                    if let Some(stats) = player_index
                        .get(player.as_str())
                        .and_then(|i| players.get_mut(*i))
                    {
                        stats.matches += 1;
                        if won {
                            stats.wins += 1;
                        } else {
                            stats.losses += 1;
                        }
                        stats.points += points;
                        stats.points_against += points_against;
                    }
                }

                let mut key = team.clone();
                key.sort();
                let index = *pair_index.entry(key.clone()).or_insert_with(|| {
                    pairs.push(PairStats {
                        players: key,
                        ..PairStats::default()
                    });
                    pairs.len() - 1
                });

                if let Some(pair) = pairs.get_mut(index) {
                    pair.matches += 1;
                    if won {
                        pair.wins += 1;
                    } else {
                        pair.losses += 1;
                    }
                }
            }
        }

        Self { players, pairs }
    }

    /// Highest and lowest pair win rates and most wins and losses. Ties go to
    /// the first entry in table order.
    #[must_use]
    pub fn highlights(&self) -> Highlights {
        let played = || self.pairs.iter().filter(|pair| pair.matches > 0);

        let best_pair = played()
            .fold(None::<&PairStats>, |best, pair| match best {
                Some(best) if pair.win_rate() <= best.win_rate() => Some(best),
                _ => Some(pair),
            })
            .cloned();

        let worst_pair = played()
            .fold(None::<&PairStats>, |worst, pair| match worst {
                Some(worst) if pair.win_rate() >= worst.win_rate() => Some(worst),
                _ => Some(pair),
            })
            .cloned();

        let most_wins = self
            .players
            .iter()
            .filter(|player| player.wins > 0)
            .fold(None::<&PlayerStats>, |best, player| match best {
                Some(best) if player.wins <= best.wins => Some(best),
                _ => Some(player),
            })
            .cloned();

        let most_losses = self
            .players
            .iter()
            .filter(|player| player.losses > 0)
            .fold(None::<&PlayerStats>, |worst, player| match worst {
                Some(worst) if player.losses <= worst.losses => Some(worst),
                _ => Some(player),
            })
            .cloned();

        Highlights {
            best_pair,
            worst_pair,
            most_wins,
            most_losses,
        }
    }

    /// Players by win rate, best first.
    #[must_use]
    pub fn standings(&self) -> Vec<PlayerStats> {
        let mut players = self.players.clone();
        players.sort_by(|a, b| b.win_rate().total_cmp(&a.win_rate()));
        players
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for player in self.standings() {
            writeln!(f, "{player}")?;
        }
        for pair in &self.pairs {
            writeln!(f, "{pair}")?;
        }
        Ok(())
    }
}

fn win_rate(wins: u32, matches: u32) -> f64 {
    if matches == 0 {
        0.0
    } else {
        f64::from(wins) / f64::from(matches)
    }
}

fn percent(rate: f64) -> String {
    format!("{:.0}", rate * 100.0)
}
