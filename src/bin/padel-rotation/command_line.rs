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

use std::{io::Write as _, path::PathBuf};

use clap::{CommandFactory, Parser};
use padel_rotation::{COPYRIGHT, LONG_VERSION};

/// Padel Rotation
///
/// Reads one command per line from stdin and schedules the rounds of a
/// padel tournament. Enter 'list_commands' for a list of commands.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Padel Rotation")]
pub(crate) struct Args {
    /// Seed the random source so the same commands give the same rounds
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to save the tournament
    ///
    /// [default: <data dir>/padel-rotation/tournament.ron]
    #[arg(long, value_name = "path")]
    pub data_file: Option<PathBuf>,

    /// Whether to skip the data file
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether the application is being run by systemd
    #[arg(long)]
    pub systemd: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("padel-rotation").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-17");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("padel-rotation.1", buffer)?;
        Ok(())
    }
}
