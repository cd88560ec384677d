use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use tracing::{debug, error};

use crate::ai::{CpuPlayer, Difficulty};
use crate::config::AppConfig;
use crate::game::{CpuTurn, Mark, MoveApplied, Session, SIZE};
use crate::score::{Score, ScoreStore};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Map a digit key to a cell, numpad style: 7 8 9 is the top row and
/// 1 2 3 the bottom row.
pub fn key_to_index(c: char) -> Option<usize> {
    match c {
        '7' => Some(0),
        '8' => Some(1),
        '9' => Some(2),
        '4' => Some(3),
        '5' => Some(4),
        '6' => Some(5),
        '1' => Some(6),
        '2' => Some(7),
        '3' => Some(8),
        _ => None,
    }
}

pub struct App {
    session: Session,
    score: Score,
    store: ScoreStore,
    cpu_delay: Duration,
    pending_cpu: Option<(CpuTurn, Instant)>,
    cursor: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let cpu = CpuPlayer::new(config.game.difficulty)
            .with_random_chance(config.game.easy_random_chance);
        Self::with_cpu(config, cpu)
    }

    pub fn with_cpu(config: &AppConfig, cpu: CpuPlayer) -> Self {
        let store = ScoreStore::new(&config.score);
        let score = store.load();
        let human = config.game.human_mark;

        let mut app = App {
            session: Session::new(cpu, human),
            score,
            store,
            cpu_delay: Duration::from_millis(config.game.cpu_delay_ms),
            pending_cpu: None,
            cursor: 4, // Start in the center
            should_quit: false,
            message: None,
        };
        app.new_round();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn cpu_pending(&self) -> bool {
        self.pending_cpu.is_some()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events, waking early when a CPU reply is due.
    fn handle_events(&mut self) -> io::Result<()> {
        let timeout = match self.pending_cpu {
            Some((_, due)) => due
                .saturating_duration_since(Instant::now())
                .min(POLL_INTERVAL),
            None => POLL_INTERVAL,
        };
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Play the deferred CPU reply once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        let Some((turn, due)) = self.pending_cpu else {
            return;
        };
        if now < due {
            return;
        }
        self.pending_cpu = None;
        if let Some(applied) = self.session.play_cpu_turn(turn) {
            self.after_move(applied);
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
        {
            return;
        }

        // Clear message on any key press
        self.message = None;

        if let KeyCode::Char(c) = key.code {
            if let Some(index) = key_to_index(c) {
                self.cursor = index;
                self.human_move(index);
                return;
            }
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.human_move(self.cursor);
            }
            KeyCode::Char('n') => {
                self.new_round();
                self.message = Some("New round started!".to_string());
            }
            KeyCode::Char('e') => self.set_difficulty(Difficulty::Easy),
            KeyCode::Char('h') => self.set_difficulty(Difficulty::Hard),
            KeyCode::Char('x') => self.choose_side(Mark::X),
            KeyCode::Char('o') => self.choose_side(Mark::O),
            KeyCode::Char('r') => {
                self.score.reset();
                self.save_score();
                self.message = Some("Score reset.".to_string());
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let row = (self.cursor / SIZE) as isize + d_row;
        let col = (self.cursor % SIZE) as isize + d_col;
        let max = SIZE as isize - 1;
        self.cursor = (row.clamp(0, max) * SIZE as isize + col.clamp(0, max)) as usize;
    }

    fn human_move(&mut self, index: usize) {
        match self.session.submit_human_move(index) {
            Ok(applied) => self.after_move(applied),
            Err(err) => debug!(%err, index, "move ignored"),
        }
    }

    fn after_move(&mut self, applied: MoveApplied) {
        if let Some(ended) = applied.round_ended {
            self.score.record(ended);
            self.save_score();
        }
        self.schedule_cpu();
    }

    fn schedule_cpu(&mut self) {
        self.pending_cpu = self
            .session
            .schedule_cpu_turn()
            .map(|turn| (turn, Instant::now() + self.cpu_delay));
    }

    /// The CPU opens whenever the human plays O.
    fn new_round(&mut self) {
        let cpu_starts = self.session.next_human_mark() == Mark::O;
        self.session.start_new_round(Some(cpu_starts));
        self.schedule_cpu();
    }

    fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.session.set_difficulty(difficulty);
        self.message = Some(format!("Difficulty: {}", difficulty.name()));
    }

    fn choose_side(&mut self, mark: Mark) {
        self.session.set_human_mark(mark);
        self.new_round();
        self.message = Some(format!("You play {mark}."));
    }

    fn save_score(&self) {
        if let Err(err) = self.store.save(&self.score) {
            error!(%err, "failed to save score");
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(
            frame,
            &self.session,
            &self.score,
            self.cursor,
            &self.message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Cell, RoundEnded};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(dir: &std::path::Path, human: Mark) -> App {
        let mut config = AppConfig::default();
        config.game.cpu_delay_ms = 0;
        config.game.human_mark = human;
        config.score.data_dir = dir.to_path_buf();
        App::with_cpu(&config, CpuPlayer::with_seed(Difficulty::Hard, 0))
    }

    #[test]
    fn test_numpad_mapping() {
        assert_eq!(key_to_index('7'), Some(0));
        assert_eq!(key_to_index('9'), Some(2));
        assert_eq!(key_to_index('5'), Some(4));
        assert_eq!(key_to_index('1'), Some(6));
        assert_eq!(key_to_index('3'), Some(8));
        assert_eq!(key_to_index('0'), None);
        assert_eq!(key_to_index('a'), None);
    }

    #[test]
    fn test_digit_places_human_mark_and_defers_cpu() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);

        app.handle_key(key(KeyCode::Char('5')));
        assert_eq!(app.session().board().get(4), Cell::X);
        assert!(app.cpu_pending());
        assert_eq!(app.session().board().empty_count(), 8);

        app.tick(Instant::now());
        assert!(!app.cpu_pending());
        assert_eq!(app.session().board().get(0), Cell::O);
    }

    #[test]
    fn test_modifier_chords_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);

        let mut chord = key(KeyCode::Char('5'));
        chord.modifiers = KeyModifiers::ALT;
        app.handle_key(chord);
        assert_eq!(*app.session().board(), Board::new());
    }

    #[test]
    fn test_new_round_discards_pending_cpu_reply() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);

        app.handle_key(key(KeyCode::Char('5')));
        let stale = app.pending_cpu.unwrap().0;
        app.handle_key(key(KeyCode::Char('n')));
        assert!(!app.cpu_pending());

        // A late firing of the old ticket does nothing
        assert_eq!(app.session.play_cpu_turn(stale), None);
        assert_eq!(*app.session().board(), Board::new());
    }

    #[test]
    fn test_choosing_o_lets_cpu_open() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.session().human_mark(), Mark::O);
        assert!(app.cpu_pending());

        app.tick(Instant::now());
        assert_eq!(app.session().board().get(0), Cell::X);
        assert_eq!(app.session().player_to_move(), Mark::O);
    }

    #[test]
    fn test_starting_as_o_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path(), Mark::O);
        assert_eq!(app.session().cpu_mark(), Mark::X);
        assert!(app.cpu_pending());
    }

    #[test]
    fn test_cursor_moves_and_clamps() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);
        assert_eq!(app.cursor(), 4);

        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor(), 1);
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor(), 1);
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.cursor(), 2);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.cursor(), 4);

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().board().get(4), Cell::X);
    }

    #[test]
    fn test_finished_round_is_scored_and_saved() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);

        // Perfect play on both sides ends in a draw
        let mut human = crate::ai::MinimaxAgent::new();
        while !app.session().is_over() {
            if app.cpu_pending() {
                app.tick(Instant::now());
            } else {
                let idx = crate::ai::Agent::select_move(&mut human, app.session().board(), Mark::X);
                app.human_move(idx);
            }
        }

        assert_eq!(app.score().draw, 1);
        let stored = ScoreStore::new(&crate::score::ScoreStoreConfig {
            data_dir: dir.path().to_path_buf(),
        })
        .load();
        assert_eq!(stored.draw, 1);

        let mut fresh = Score::default();
        fresh.record(RoundEnded::Draw);
        assert_eq!(stored, fresh);
    }

    #[test]
    fn test_reset_score_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = ScoreStore::new(&crate::score::ScoreStoreConfig {
            data_dir: dir.path().to_path_buf(),
        });
        store.save(&Score { human: 3, cpu: 1, draw: 0 }).unwrap();

        let mut app = test_app(dir.path(), Mark::X);
        assert_eq!(app.score().human, 3);

        app.handle_key(key(KeyCode::Char('r')));
        assert_eq!(*app.score(), Score::default());
        assert_eq!(store.load(), Score::default());
    }

    #[test]
    fn test_difficulty_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.session().difficulty(), Difficulty::Easy);
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(app.session().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = test_app(dir.path(), Mark::X);
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());

        let mut app = test_app(dir.path(), Mark::X);
        let mut ctrl_c = key(KeyCode::Char('c'));
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        app.handle_key(ctrl_c);
        assert!(app.should_quit());
    }
}
