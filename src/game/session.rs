//! Round lifecycle: human and CPU turns, terminal detection, and the epoch
//! guard for deferred CPU replies.

use tracing::{debug, info, warn};

use super::{Board, Mark, Outcome, WinLine};
use crate::ai::{CpuPlayer, Difficulty};
use crate::error::MoveError;

/// Emitted once when a round reaches a terminal state. The score tally is
/// updated from this, not from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnded {
    HumanWin,
    CpuWin,
    Draw,
}

/// A successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveApplied {
    pub index: usize,
    pub mark: Mark,
    pub round_ended: Option<RoundEnded>,
}

/// Ticket for a CPU reply scheduled after a delay. Only valid for the
/// round it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTurn {
    epoch: u64,
}

impl CpuTurn {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

pub struct Session {
    board: Board,
    player_to_move: Mark,
    status: Outcome,
    last_move: Option<usize>,
    human_mark: Mark,
    next_human_mark: Mark,
    cpu: CpuPlayer,
    epoch: u64,
}

impl Session {
    /// Fresh round with X to move.
    pub fn new(cpu: CpuPlayer, human_mark: Mark) -> Self {
        Session {
            board: Board::new(),
            player_to_move: Mark::X,
            status: Outcome::Ongoing,
            last_move: None,
            human_mark,
            next_human_mark: human_mark,
            cpu,
            epoch: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> Outcome {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn winning_line(&self) -> Option<WinLine> {
        self.status.winning_line()
    }

    pub fn player_to_move(&self) -> Mark {
        self.player_to_move
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn cpu_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    /// Mark the human will play from the next round on.
    pub fn next_human_mark(&self) -> Mark {
        self.next_human_mark
    }

    pub fn difficulty(&self) -> Difficulty {
        self.cpu.difficulty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Takes effect on the CPU's next decision.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        info!(difficulty = difficulty.name(), "difficulty changed");
        self.cpu.set_difficulty(difficulty);
    }

    /// Takes effect when the next round starts.
    pub fn set_human_mark(&mut self, mark: Mark) {
        self.next_human_mark = mark;
    }

    /// Clear the board and begin a new round.
    ///
    /// With no override X opens. With an override the CPU opens when
    /// `cpu_starts` is true and the human opens otherwise. Any CPU turn
    /// scheduled before this call becomes stale.
    pub fn start_new_round(&mut self, cpu_starts: Option<bool>) {
        self.human_mark = self.next_human_mark;
        self.board = Board::new();
        self.status = Outcome::Ongoing;
        self.last_move = None;
        self.player_to_move = match cpu_starts {
            None => Mark::X,
            Some(true) => self.cpu_mark(),
            Some(false) => self.human_mark,
        };
        self.epoch += 1;
        info!(
            epoch = self.epoch,
            human = %self.human_mark,
            first = %self.player_to_move,
            "new round"
        );
    }

    /// Apply `acting`'s move at `index`.
    ///
    /// Refused moves leave the session untouched. A move that completes a
    /// line or fills the board ends the round and reports it.
    pub fn submit_move(&mut self, index: usize, acting: Mark) -> Result<MoveApplied, MoveError> {
        if self.is_over() {
            return Err(MoveError::RoundOver);
        }
        if acting != self.player_to_move {
            return Err(MoveError::NotYourTurn(acting));
        }

        self.board.place(index, acting)?;
        self.last_move = Some(index);
        self.status = self.board.outcome();
        debug!(index, mark = %acting, board = %self.board, "move applied");

        let round_ended = match self.status {
            Outcome::Ongoing => {
                self.player_to_move = acting.opponent();
                None
            }
            Outcome::Win { mark, line } => {
                info!(winner = %mark, line = ?line.indices(), "round won");
                Some(if mark == self.human_mark {
                    RoundEnded::HumanWin
                } else {
                    RoundEnded::CpuWin
                })
            }
            Outcome::Draw => {
                info!("round drawn");
                Some(RoundEnded::Draw)
            }
        };

        Ok(MoveApplied {
            index,
            mark: acting,
            round_ended,
        })
    }

    pub fn submit_human_move(&mut self, index: usize) -> Result<MoveApplied, MoveError> {
        self.submit_move(index, self.human_mark)
    }

    /// Whether the round is waiting on the CPU.
    pub fn cpu_to_move(&self) -> bool {
        !self.is_over() && self.player_to_move == self.cpu_mark()
    }

    /// Issue a ticket for a deferred CPU reply, if the CPU is to move.
    pub fn schedule_cpu_turn(&self) -> Option<CpuTurn> {
        self.cpu_to_move().then_some(CpuTurn { epoch: self.epoch })
    }

    /// Play a deferred CPU reply. Returns `None` and changes nothing if the
    /// round was restarted since the ticket was issued, or if the CPU is no
    /// longer to move.
    pub fn play_cpu_turn(&mut self, turn: CpuTurn) -> Option<MoveApplied> {
        if turn.epoch != self.epoch || !self.cpu_to_move() {
            debug!(
                ticket = turn.epoch,
                epoch = self.epoch,
                "discarding stale cpu turn"
            );
            return None;
        }

        let cpu_mark = self.cpu_mark();
        let choice = self.cpu.choose(&self.board, cpu_mark);
        match self.submit_move(choice.index, cpu_mark) {
            Ok(applied) => Some(applied),
            Err(err) => {
                warn!(%err, index = choice.index, "cpu produced an illegal move");
                None
            }
        }
    }

    /// Play the CPU's reply immediately, if it is the CPU's turn.
    pub fn play_cpu_now(&mut self) -> Option<MoveApplied> {
        let turn = self.schedule_cpu_turn()?;
        self.play_cpu_turn(turn)
    }
}
