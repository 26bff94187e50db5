use std::fmt;

use serde::{Deserialize, Serialize};

/// One game as served by the results endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub team: String,
    pub opponent: String,
    pub date: String, // display string, never parsed
    pub is_home_game: bool,
    pub score: Score,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    /// Points for the tracked team.
    pub unc: u32,
    pub opponent: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => f.write_str("W"),
            Outcome::Loss => f.write_str("L"),
        }
    }
}

impl Game {
    pub fn team_display(&self) -> &str {
        &self.team
    }

    pub fn location_display(&self) -> &'static str {
        if self.is_home_game { "Home" } else { "Away" }
    }

    /// Win only on a strictly greater score; a tie counts as a loss.
    pub fn result(&self) -> Outcome {
        if self.score.unc > self.score.opponent {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }

    pub fn score_display(&self) -> String {
        format!("{} - {}", self.score.unc, self.score.opponent)
    }

    pub fn formatted_date(&self) -> &str {
        &self.date
    }

    pub fn is_mens(&self) -> bool {
        self.team == "Men"
    }
}
