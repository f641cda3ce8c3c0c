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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum MatchFormat {
    #[default]
    #[serde(rename = "best_of_3")]
    BestOf3,
    #[serde(rename = "best_of_5")]
    BestOf5,
    #[serde(rename = "full_set")]
    FullSet,
}

impl MatchFormat {
    /// The highest score either team may enter.
    #[must_use]
    pub fn max_score(self) -> u32 {
        match self {
            Self::BestOf3 => 3,
            Self::BestOf5 => 5,
            Self::FullSet => 10,
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::BestOf3 => "Best of 3",
            Self::BestOf5 => "Best of 5",
            Self::FullSet => "Full Set",
        }
    }

    #[must_use]
    pub fn short(self) -> &'static str {
        match self {
            Self::BestOf3 => "Bo3",
            Self::BestOf5 => "Bo5",
            Self::FullSet => "Set",
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BestOf3 => write!(f, "best_of_3"),
            Self::BestOf5 => write!(f, "best_of_5"),
            Self::FullSet => write!(f, "full_set"),
        }
    }
}

impl FromStr for MatchFormat {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> anyhow::Result<Self> {
        match string.to_lowercase().as_str() {
            "best_of_3" | "bo3" => Ok(Self::BestOf3),
            "best_of_5" | "bo5" => Ok(Self::BestOf5),
            "full_set" | "set" => Ok(Self::FullSet),
            _ => Err(anyhow::Error::msg(format!(
                "Error trying to convert '{string}' to a MatchFormat!"
            ))),
        }
    }
}
