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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;

use std::io;

use clap::Parser;
use log::info;
use padel_rotation::{
    DATA_FILE,
    error::TournamentError,
    session::Session,
    utils::{self, create_data_folder, data_file},
};

use crate::command_line::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger("padel_rotation", args.debug, args.systemd);

    if args.man {
        return Args::generate_man_page();
    }

    let data_file = if args.skip_the_data_file {
        None
    } else if let Some(path) = args.data_file {
        Some(path)
    } else {
        create_data_folder()?;
        Some(data_file(DATA_FILE))
    };

    let mut session = Session::new(args.seed, data_file);
    session.load()?;

    if let Some(tournament) = session.tournament() {
        info!(
            "round {} of a tournament with {}",
            tournament.current_round(),
            tournament.roster()
        );
    }

    let stdin = io::stdin();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        match stdin.read_line(&mut buffer) {
            Ok(0) => return Ok(()),
            Ok(_) => {}
            Err(error) => {
                println!("? {error}\n");
                return Ok(());
            }
        }

        match session.read_line(&buffer) {
            Err(error) => {
                if error
                    .downcast_ref::<TournamentError>()
                    .is_some_and(TournamentError::is_integrity)
                {
                    println!("? internal error, please report it: {error}\n");
                } else {
                    println!("? {error}\n");
                }
            }
            Ok(Some(message)) => println!("= {message}\n"),
            Ok(None) => println!("=\n"),
        }
    }
}
