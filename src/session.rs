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

//! The one writer of a tournament.
//!
//! A [`Session`] owns the [`TournamentState`] and the random source, applies
//! one command at a time, and saves a snapshot after every round and every
//! score. Saving never fails a command: errors are logged and the in-memory
//! state moves on.

use std::{
    fmt::Write as _,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::Local;
use log::{debug, error, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    error::TournamentError,
    format::MatchFormat,
    schedule::Round,
    snapshot::{Export, Snapshot},
    tournament::{Setup, TournamentState},
};

pub const COMMANDS: &str = "list_commands setup next_round score matches resting history stats highlights export save reset";

pub struct Session {
    tournament: Option<TournamentState>,
    rng: StdRng,
    data_file: Option<PathBuf>,
}

impl Session {
    /// Without a seed the random source is seeded from the OS. Without a data
    /// file nothing is saved.
    #[must_use]
    pub fn new(seed: Option<u64>, data_file: Option<PathBuf>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            tournament: None,
            rng,
            data_file,
        }
    }

    #[must_use]
    pub fn tournament(&self) -> Option<&TournamentState> {
        self.tournament.as_ref()
    }

    /// Resumes from the data file. A missing file is a fresh start.
    ///
    /// # Errors
    ///
    /// If the file can't be read or isn't a valid snapshot.
    pub fn load(&mut self) -> anyhow::Result<()> {
        let Some(data_file) = &self.data_file else {
            return Ok(());
        };

        match fs::read_to_string(data_file) {
            Ok(string) => {
                let snapshot = Snapshot::from_ron(&string).map_err(|err| {
                    anyhow::Error::msg(format!("RON: {}: {err}", data_file.display()))
                })?;
                let tournament = TournamentState::try_from(snapshot)?;
                info!(
                    "resumed round {} with {} players",
                    tournament.current_round(),
                    tournament.roster().len()
                );
                self.tournament = Some(tournament);
            }
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {}
                _ => return Err(anyhow::Error::msg(err.to_string())),
            },
        }

        Ok(())
    }

    pub fn save(&self) {
        let (Some(data_file), Some(tournament)) = (&self.data_file, &self.tournament) else {
            return;
        };

        match Snapshot::from(tournament).to_ron() {
            Ok(string) => {
                if let Err(error) = fs::write(data_file, string) {
                    error!("save file {}: {error}", data_file.display());
                }
            }
            Err(error) => error!("save file: {error}"),
        }
    }

    /// Starts a new tournament and generates its first round.
    ///
    /// # Errors
    ///
    /// If the setup is invalid.
    pub fn setup(&mut self, setup: &Setup) -> Result<Round, TournamentError> {
        let mut tournament = TournamentState::new(setup)?;
        let round = tournament.next_round(&mut self.rng)?;
        info!(
            "new tournament: {} players, {} court(s), {}",
            tournament.roster().len(),
            tournament.court_count(),
            tournament.match_format().display_name()
        );

        self.tournament = Some(tournament);
        self.save();
        Ok(round)
    }

    /// # Errors
    ///
    /// If there is no tournament, the current round has unscored matches, or
    /// the round can't be generated.
    pub fn next_round(&mut self) -> anyhow::Result<Round> {
        let Some(tournament) = self.tournament.as_mut() else {
            return Err(anyhow::Error::msg("no tournament, start one with setup"));
        };
        if !tournament.round_complete() {
            return Err(anyhow::Error::msg(format!(
                "next_round: round {} still has unscored matches",
                tournament.current_round()
            )));
        }

        let round = tournament.next_round(&mut self.rng)?;
        self.save();
        Ok(round)
    }

    /// # Errors
    ///
    /// If there is no tournament, no such match, or the score is out of
    /// range.
    pub fn record_score(&mut self, match_id: &str, score1: u32, score2: u32) -> anyhow::Result<String> {
        let reply = self
            .tournament_mut()?
            .record_score(match_id, score1, score2)?
            .to_string();

        self.save();
        Ok(reply)
    }

    /// Writes the export artifact and returns where it went.
    ///
    /// # Errors
    ///
    /// If there is no tournament or the file can't be written.
    pub fn export(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let tournament = self.tournament_ref()?;
        let path = path.map_or_else(
            || PathBuf::from(Export::file_name(Local::now().date_naive())),
            Path::to_path_buf,
        );

        fs::write(&path, Export::new(tournament).to_json()?)?;
        info!("exported results to {}", path.display());
        Ok(path)
    }

    /// Forgets the tournament and deletes the saved snapshot.
    pub fn reset(&mut self) {
        self.tournament = None;

        if let Some(data_file) = &self.data_file
            && let Err(error) = fs::remove_file(data_file)
            && error.kind() != ErrorKind::NotFound
        {
            error!("remove file {}: {error}", data_file.display());
        }
    }

    /// Applies one protocol line. `Ok(None)` means there was nothing to do.
    /// Words are separated by whitespace; a name with spaces goes in double
    /// quotes, as in `setup best_of_3 1 "Ana Maria" Bea Cris Dani`.
    ///
    /// # Errors
    ///
    /// If the command is unknown, malformed, or fails.
    pub fn read_line(&mut self, line: &str) -> anyhow::Result<Option<String>> {
        let words = split_words(line)?;
        let Some((command, args)) = words.split_first() else {
            return Ok(None);
        };
        debug!("command: {line}");

        match command.as_str() {
            "list_commands" => Ok(Some(COMMANDS.to_string())),
            "setup" => {
                let [format, courts, players @ ..] = args else {
                    return Err(anyhow::Error::msg(
                        "setup: expected a format, a court count, and player names",
                    ));
                };

                let setup = Setup {
                    players: players.iter().map(ToString::to_string).collect(),
                    court_count: courts.parse()?,
                    match_format: MatchFormat::from_str(format)?,
                };
                let round = self.setup(&setup)?;
                Ok(Some(display_round(&round)))
            }
            "next_round" => {
                let round = self.next_round()?;
                Ok(Some(display_round(&round)))
            }
            "score" => {
                let [match_id, score1, score2] = args else {
                    return Err(anyhow::Error::msg(
                        "score: expected a match id and two scores",
                    ));
                };
                Ok(Some(self.record_score(match_id, score1.parse()?, score2.parse()?)?))
            }
            "matches" => {
                let tournament = self.tournament_ref()?;
                let matches: Vec<String> =
                    tournament.current_matches().map(ToString::to_string).collect();
                Ok(Some(matches.join("\n")))
            }
            "resting" => {
                let tournament = self.tournament_ref()?;
                Ok(Some(display_resting(tournament)))
            }
            "history" => {
                let tournament = self.tournament_ref()?;
                let matches: Vec<String> = tournament
                    .match_history()
                    .iter()
                    .rev()
                    .map(ToString::to_string)
                    .collect();
                Ok(Some(matches.join("\n")))
            }
            "stats" => Ok(Some(self.tournament_ref()?.stats().to_string())),
            "highlights" => Ok(Some(self.tournament_ref()?.stats().highlights().to_string())),
            "export" => {
                let path = self.export(args.first().map(Path::new))?;
                Ok(Some(path.display().to_string()))
            }
            "save" => {
                self.save();
                Ok(None)
            }
            "reset" => {
                self.reset();
                Ok(None)
            }
            _ => Err(anyhow::Error::msg(format!("unknown command: {command}"))),
        }
    }

    fn tournament_ref(&self) -> anyhow::Result<&TournamentState> {
        self.tournament
            .as_ref()
            .ok_or_else(|| anyhow::Error::msg("no tournament, start one with setup"))
    }

    fn tournament_mut(&mut self) -> anyhow::Result<&mut TournamentState> {
        self.tournament
            .as_mut()
            .ok_or_else(|| anyhow::Error::msg("no tournament, start one with setup"))
    }
}

fn split_words(line: &str) -> anyhow::Result<Vec<String>> {
    let mut words = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut word));
                    in_word = false;
                }
            }
            c => {
                word.push(c);
                in_word = true;
            }
        }
    }

    if quoted {
        return Err(anyhow::Error::msg("unterminated quote"));
    }
    if in_word {
        words.push(word);
    }

    Ok(words)
}

fn display_round(round: &Round) -> String {
    let mut string = format!("round {}", round.number);
    for court_match in &round.matches {
        let _ok = write!(string, "\n{court_match}");
    }
    if !round.resting.is_empty() {
        let _ok = write!(string, "\nresting: {}", round.resting.join(", "));
    }
    string
}

fn display_resting(tournament: &TournamentState) -> String {
    if tournament.current_resting().is_empty() {
        return "all players are playing".to_string();
    }

    tournament
        .current_resting()
        .iter()
        .map(|player| {
            let times = tournament.rests().times_rested(player);
            let plural = if times == 1 { "" } else { "s" };
            format!("{player} (rested {times} time{plural})")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
