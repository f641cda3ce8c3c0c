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

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    court_match::Match,
    error::TournamentError,
    format::MatchFormat,
    partnership::PartnershipLedger,
    rest::RestLedger,
    roster::Roster,
    schedule::{self, Round},
    stats::Stats,
};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Setup {
    pub players: Vec<String>,
    pub court_count: usize,
    pub match_format: MatchFormat,
}

impl Setup {
    /// # Errors
    ///
    /// If the names are invalid or the courts need more players than there
    /// are.
    pub fn validate(&self) -> Result<Roster, TournamentError> {
        let roster = Roster::new(&self.players)?;
        schedule::resting_count(roster.len(), self.court_count)?;
        Ok(roster)
    }
}

/// Everything about one tournament. Round 0 means no round has been
/// generated yet.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TournamentState {
    pub(crate) roster: Roster,
    pub(crate) court_count: usize,
    pub(crate) match_format: MatchFormat,
    pub(crate) current_round: u32,
    pub(crate) match_history: Vec<Match>,
    pub(crate) rests: RestLedger,
    pub(crate) partnerships: PartnershipLedger,
    pub(crate) current_resting: Vec<String>,
}

impl TournamentState {
    /// # Errors
    ///
    /// If the setup is invalid.
    pub fn new(setup: &Setup) -> Result<Self, TournamentError> {
        let roster = setup.validate()?;

        Ok(Self {
            rests: RestLedger::new(&roster),
            roster,
            court_count: setup.court_count,
            match_format: setup.match_format,
            current_round: 0,
            match_history: Vec::new(),
            partnerships: PartnershipLedger::default(),
            current_resting: Vec::new(),
        })
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub fn court_count(&self) -> usize {
        self.court_count
    }

    #[must_use]
    pub fn match_format(&self) -> MatchFormat {
        self.match_format
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    /// Every match ever scheduled, scored or not.
    #[must_use]
    pub fn match_history(&self) -> &[Match] {
        &self.match_history
    }

    #[must_use]
    pub fn rests(&self) -> &RestLedger {
        &self.rests
    }

    #[must_use]
    pub fn partnerships(&self) -> &PartnershipLedger {
        &self.partnerships
    }

    #[must_use]
    pub fn current_resting(&self) -> &[String] {
        &self.current_resting
    }

    pub fn current_matches(&self) -> impl Iterator<Item = &Match> {
        self.match_history
            .iter()
            .filter(move |court_match| court_match.round == self.current_round)
    }

    /// Whether every match of the current round has a score.
    #[must_use]
    pub fn round_complete(&self) -> bool {
        self.current_round > 0 && self.current_matches().all(Match::is_completed)
    }

    /// Generates the next round. On error the tournament is unchanged.
    ///
    /// # Errors
    ///
    /// A configuration error if the counts don't fit, an integrity error if
    /// the round came out malformed.
    pub fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Round, TournamentError> {
        let number = self.current_round + 1;

        let round = schedule::generate_round(
            &self.roster,
            self.court_count,
            self.match_format,
            number,
            &mut self.rests,
            &mut self.partnerships,
            rng,
        )?;

        self.match_history.extend(round.matches.iter().cloned());
        self.current_resting.clone_from(&round.resting);
        self.current_round = number;

        Ok(round)
    }

    /// Records or overwrites the score of any match, current or past.
    ///
    /// # Errors
    ///
    /// If there is no such match or the score is above the format's maximum.
    pub fn record_score(
        &mut self,
        match_id: &str,
        score1: u32,
        score2: u32,
    ) -> Result<&Match, TournamentError> {
        let court_match = self
            .match_history
            .iter_mut()
            .find(|court_match| court_match.id == match_id)
            .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;

        court_match.set_score(score1, score2)?;
        debug!("score {court_match}");

        Ok(court_match)
    }

    /// Changes the number of courts from the next round on.
    ///
    /// # Errors
    ///
    /// If the roster can't fill that many courts.
    pub fn set_court_count(&mut self, court_count: usize) -> Result<(), TournamentError> {
        schedule::resting_count(self.roster.len(), court_count)?;
        self.court_count = court_count;
        Ok(())
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::compute(&self.roster, &self.rests, &self.match_history)
    }

    /// Starts over with the same players, courts, and format.
    pub fn reset(&mut self) {
        self.current_round = 0;
        self.match_history.clear();
        self.rests = RestLedger::new(&self.roster);
        self.partnerships.clear();
        self.current_resting.clear();
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn setup() -> Setup {
        Setup {
            players: ["A", "B", "C", "D", "E"].map(String::from).to_vec(),
            court_count: 1,
            match_format: MatchFormat::BestOf3,
        }
    }

    #[test]
    fn invalid_setups() {
        let mut setup = setup();
        setup.court_count = 2;
        assert!(matches!(
            TournamentState::new(&setup),
            Err(TournamentError::Configuration(_))
        ));

        let mut setup = self::setup();
        setup.players[4] = "A".to_string();
        assert!(TournamentState::new(&setup).is_err());
    }

    #[test]
    fn rounds_and_scores() -> anyhow::Result<()> {
        let mut tournament = TournamentState::new(&setup())?;
        let mut rng = StdRng::seed_from_u64(5);
        assert!(!tournament.round_complete());

        let round = tournament.next_round(&mut rng)?;
        assert_eq!(round.number, 1);
        assert_eq!(tournament.current_resting(), ["A"]);
        assert!(!tournament.round_complete());

        tournament.record_score("R1M1", 3, 1)?;
        assert!(tournament.round_complete());

        let error = tournament.record_score("R1M1", 4, 1);
        assert!(matches!(error, Err(TournamentError::ScoreRange { .. })));
        assert_eq!(
            tournament.match_history()[0].score.map(|score| score.score1),
            Some(3)
        );

        tournament.next_round(&mut rng)?;
        assert_eq!(tournament.current_round(), 2);
        assert_eq!(tournament.current_matches().count(), 1);
        assert_eq!(tournament.match_history().len(), 2);
        assert!(!tournament.round_complete());

        // A past score can still be edited.
        tournament.record_score("R1M1", 0, 3)?;
        assert!(matches!(
            tournament.record_score("R7M1", 1, 0),
            Err(TournamentError::MatchNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn unscored_match_stays_scheduled() -> anyhow::Result<()> {
        let mut tournament = TournamentState::new(&setup())?;
        tournament.next_round(&mut StdRng::seed_from_u64(1))?;

        assert!(tournament.record_score("R1M1", 4, 1).is_err());
        assert!(!tournament.match_history()[0].is_completed());

        Ok(())
    }

    #[test]
    fn resize_courts() -> anyhow::Result<()> {
        let mut setup = setup();
        setup.players.extend(["F", "G", "H"].map(String::from));
        let mut tournament = TournamentState::new(&setup)?;

        tournament.set_court_count(2)?;
        assert_eq!(tournament.court_count(), 2);
        assert!(tournament.set_court_count(3).is_err());
        assert_eq!(tournament.court_count(), 2);

        let round = tournament.next_round(&mut StdRng::seed_from_u64(2))?;
        assert!(round.resting.is_empty());
        assert_eq!(round.matches.len(), 2);

        Ok(())
    }

    #[test]
    fn reset_clears_progress() -> anyhow::Result<()> {
        let mut tournament = TournamentState::new(&setup())?;
        let fresh = tournament.clone();
        let mut rng = StdRng::seed_from_u64(8);
        tournament.next_round(&mut rng)?;
        tournament.next_round(&mut rng)?;

        tournament.reset();
        assert_eq!(tournament, fresh);

        Ok(())
    }
}
