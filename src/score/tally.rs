use serde::{Deserialize, Serialize};

use crate::game::RoundEnded;

/// Running win/loss/draw counts across rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub human: u64,
    pub cpu: u64,
    pub draw: u64,
}

impl Score {
    pub fn record(&mut self, ended: RoundEnded) {
        match ended {
            RoundEnded::HumanWin => self.human += 1,
            RoundEnded::CpuWin => self.cpu += 1,
            RoundEnded::Draw => self.draw += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Score::default();
    }

    pub fn rounds(&self) -> u64 {
        self.human + self.cpu + self.draw
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "You {} · CPU {} · Draw {}", self.human, self.cpu, self.draw)
    }
}
