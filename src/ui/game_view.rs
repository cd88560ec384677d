use crate::game::{Cell, Outcome, Session, SIZE};
use crate::score::Score;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Status line for the current round.
pub fn turn_text(session: &Session) -> &'static str {
    match session.status() {
        Outcome::Win { mark, .. } if mark == session.human_mark() => "You win",
        Outcome::Win { .. } => "CPU wins",
        Outcome::Draw => "Draw",
        Outcome::Ongoing if session.player_to_move() == session.human_mark() => "Your turn",
        Outcome::Ongoing => "CPU thinking…",
    }
}

pub fn render(
    frame: &mut Frame,
    session: &Session,
    score: &Score,
    cursor: usize,
    message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Score / message
            Constraint::Length(4), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, cursor, chunks[1]);
    render_message(frame, score, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let color = match session.status() {
        Outcome::Win { mark, .. } if mark == session.human_mark() => Color::Green,
        Outcome::Win { .. } => Color::Red,
        _ => Color::Cyan,
    };

    let status = format!(
        "{}  |  You: {}  |  {}",
        turn_text(session),
        session.human_mark(),
        session.difficulty().name()
    );

    let header = Paragraph::new(status)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Tic-Tac-Toe"));

    frame.render_widget(header, area);
}

fn render_board(frame: &mut Frame, session: &Session, cursor: usize, area: Rect) {
    let board = session.board();
    let winning = session.winning_line();
    let mut lines = Vec::new();

    lines.push(Line::from("╔═══╤═══╤═══╗"));
    for row in 0..SIZE {
        let mut spans = vec![Span::raw("║")];
        for col in 0..SIZE {
            let index = row * SIZE + col;
            let (symbol, color) = match board.get(index) {
                Cell::Empty => (" · ", Color::DarkGray),
                Cell::X => (" X ", Color::Cyan),
                Cell::O => (" O ", Color::Magenta),
            };

            let mut style = Style::default().fg(color);
            if winning.is_some_and(|line| line.contains(index)) {
                style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
            } else if session.last_move() == Some(index) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if index == cursor && !session.is_over() {
                style = style.add_modifier(Modifier::REVERSED);
            }

            spans.push(Span::styled(symbol, style));
            spans.push(Span::raw(if col + 1 < SIZE { "│" } else { "║" }));
        }
        lines.push(Line::from(spans));
        if row + 1 < SIZE {
            lines.push(Line::from("╟───┼───┼───╢"));
        }
    }
    lines.push(Line::from("╚═══╧═══╧═══╝"));

    let board_widget = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, score: &Score, message: &Option<String>, area: Rect) {
    let mut spans = vec![Span::styled(
        score.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(text) = message {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(text.as_str(), Style::default().fg(Color::Yellow)));
    }

    let msg_widget = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Score"));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let line1 = Line::from("1-9 / arrows+Enter: Play  |  N: New round  |  R: Reset score  |  Q: Quit");
    let line2 = Line::from(vec![
        Span::styled("Difficulty", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": E Easy  H Hard   "),
        Span::styled("Side", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(": X play first  O let CPU open"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{CpuPlayer, Difficulty};
    use crate::game::Mark;
    use ratatui::{backend::TestBackend, Terminal};

    fn session(human: Mark) -> Session {
        Session::new(CpuPlayer::with_seed(Difficulty::Hard, 0), human)
    }

    #[test]
    fn test_turn_text() {
        let mut s = session(Mark::X);
        assert_eq!(turn_text(&s), "Your turn");
        s.submit_human_move(0).unwrap();
        assert_eq!(turn_text(&s), "CPU thinking…");

        for (idx, mark) in [(3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
            s.submit_move(idx, mark).unwrap();
        }
        assert_eq!(turn_text(&s), "You win");
    }

    #[test]
    fn test_turn_text_cpu_win_and_draw() {
        let mut s = session(Mark::O);
        for (idx, mark) in [(0, Mark::X), (3, Mark::O), (1, Mark::X), (4, Mark::O), (2, Mark::X)] {
            s.submit_move(idx, mark).unwrap();
        }
        assert_eq!(turn_text(&s), "CPU wins");

        let mut s = session(Mark::X);
        for (idx, mark) in [
            (0, Mark::X),
            (1, Mark::O),
            (2, Mark::X),
            (4, Mark::O),
            (3, Mark::X),
            (5, Mark::O),
            (7, Mark::X),
            (6, Mark::O),
            (8, Mark::X),
        ] {
            s.submit_move(idx, mark).unwrap();
        }
        assert_eq!(turn_text(&s), "Draw");
    }

    #[test]
    fn test_render_shows_score_and_marks() {
        let mut s = session(Mark::X);
        s.submit_human_move(4).unwrap();
        let score = Score { human: 1, cpu: 2, draw: 3 };

        let mut terminal = Terminal::new(TestBackend::new(90, 22)).unwrap();
        terminal
            .draw(|f| render(f, &s, &score, 4, &None))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("You 1 · CPU 2 · Draw 3"));
        assert!(text.contains(" X "));
        assert!(text.contains("CPU thinking"));
    }
}
