//! A round based rotation scheduler for social padel.
//!
//! Every round each court gets four players split into two teams of two.
//! When there are more players than places the rest rotate fairly: nobody
//! sits out a second time while someone else has sat out less. Teams are
//! chosen to avoid repeating partners and opponents.
//!
//! ## Flow
//!
//! 1. Build a [`tournament::Setup`] and a [`tournament::TournamentState`] from it.
//! 2. Call [`tournament::TournamentState::next_round`] with a seedable random source.
//! 3. Enter scores with [`tournament::TournamentState::record_score`].
//! 4. Read [`stats::Stats`] and [`stats::Highlights`] at any time.
//!
//! [`session::Session`] wraps all of this behind a line based text protocol
//! and saves a [`snapshot::Snapshot`] after every round and every score.

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

#![deny(clippy::panic)]

pub mod court_match;
pub mod error;
pub mod format;
pub mod pairer;
pub mod partnership;
pub mod rest;
pub mod roster;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod stats;
pub mod tournament;
pub mod utils;

pub const HOME: &str = "padel-rotation";
pub const DATA_FILE: &str = "tournament.ron";
pub const PLAYERS_PER_COURT: usize = 4;
pub const MAX_COURTS: usize = 4;

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the padel-rotation project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the padel-rotation project
Licensed under the AGPLv3"
);
