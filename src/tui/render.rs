use crate::pomodoro::{Activity, State};
use crate::shell::Shell;
use crate::tui::animation;
use crate::tui::widgets::Centered;
use tui::{
    backend::Backend,
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;

/// Colours used throughout the interface.
pub struct Palette {
    pub remaining: Color,
    pub elapsed: Color,
    pub hint: Color,
    pub initial: Color,
    pub title: Color,
}

pub const PALETTE: Palette = Palette {
    remaining: Color::Indexed(46),
    elapsed: Color::Indexed(196),
    hint: Color::Indexed(244),
    initial: Color::Red,
    title: Color::White,
};

const BAR_CELL: &str = "█";

const KEY_BINDINGS: [(&str, &str); 4] = [
    ("SPACE", "Start/Pause timer"),
    ("R", "Reset to work session"),
    ("H or ?", "Toggle help screen"),
    ("Q/ESC", "Quit application"),
];

fn split_initial(str: &str) -> (&str, &str) {
    let mut graphemes = str.graphemes(true);

    let initial = graphemes.next().unwrap_or("");
    let remainder = graphemes.as_str();

    (initial, remainder)
}

fn define_block(title: &str) -> Block<'_> {
    let (initial, remainder) = split_initial(title);

    let text_style = Style::default()
        .fg(PALETTE.title)
        .add_modifier(Modifier::BOLD);
    let initials_style = Style::default()
        .fg(PALETTE.initial)
        .add_modifier(Modifier::BOLD);

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Spans::from(vec![
            Span::styled(initial, initials_style),
            Span::styled(remainder, text_style),
        ]))
}

pub fn heading(activity: Activity) -> (&'static str, &'static str) {
    match activity {
        Activity::Work => ("🍅", "Work Session"),
        Activity::Break => ("☕", "Break Time"),
    }
}

pub fn status_line(state: &State) -> &'static str {
    if state.time_remaining().is_zero() {
        if state.current_activity().is_work() {
            "Work session complete! Starting break..."
        } else {
            "Break complete! Ready for work..."
        }
    } else if state.timer_is_active() {
        "Running... (SPACE to pause)"
    } else {
        "Paused (SPACE to start)"
    }
}

fn progress_bar(remaining_percentage: f64, viewport_width: u16) -> Spans<'static> {
    let width = animation::bar_width(viewport_width);
    let (remaining, elapsed) = animation::split_bar(remaining_percentage, width);

    Spans::from(vec![
        Span::styled(
            BAR_CELL.repeat(remaining),
            Style::default().fg(PALETTE.remaining),
        ),
        Span::styled(
            BAR_CELL.repeat(elapsed),
            Style::default().fg(PALETTE.elapsed),
        ),
    ])
}

/// The countdown screen.
pub fn timer_text(shell: &Shell) -> Text<'static> {
    let state = shell.pomodoro_state();
    let (viewport_width, _) = shell.viewport();
    let (icon, label) = heading(state.current_activity());
    let remaining_percentage = state.remaining_percentage();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    Text::from(vec![
        Spans::from(Span::styled(format!("{icon} {label}"), bold)),
        Spans::default(),
        Spans::from(Span::styled(state.time_remaining().to_string(), bold)),
        Spans::default(),
        progress_bar(remaining_percentage, viewport_width),
        Spans::from(format!("{:.0}% remaining", remaining_percentage.round())),
        Spans::default(),
        Spans::from(status_line(state)),
        Spans::default(),
        Spans::from(Span::styled(
            "Press H for help",
            Style::default().fg(PALETTE.hint),
        )),
    ])
}

/// The key binding screen.
pub fn help_text() -> Text<'static> {
    let hint = Style::default().fg(PALETTE.hint);

    let mut lines = vec![
        Spans::from(Span::styled(
            "🍅 POMODORO TIMER - COMMANDS",
            hint.add_modifier(Modifier::BOLD),
        )),
        Spans::default(),
    ];
    lines.extend(KEY_BINDINGS.iter().map(|(keys, description)| {
        Spans::from(Span::styled(format!("{keys:<10}{description:<22}"), hint))
    }));
    lines.push(Spans::default());
    lines.push(Spans::from(Span::styled("Press H to return to timer", hint)));

    Text::from(lines)
}

pub fn render_ui<B: Backend>(frame: &mut Frame<B>, shell: &Shell) {
    let area = frame.size();
    let widget = if shell.show_help() {
        Centered::new(help_text()).block(define_block("help"))
    } else {
        Centered::new(timer_text(shell)).block(define_block("pomodoro"))
    };

    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, Key};
    use crate::pomodoro::{SessionDuration, Settings};
    use tui::backend::TestBackend;
    use tui::buffer::Buffer;
    use tui::Terminal;

    fn plain(text: &Text) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| line.0.iter().map(|span| span.content.as_ref()).collect())
            .collect()
    }

    fn shell(width: u16) -> Shell {
        let mut shell = Shell::new(Settings {
            work_duration: SessionDuration::from_minutes(1),
            break_duration: SessionDuration::from_minutes(2),
        });
        shell.update(Event::Resize(width, 24));
        shell
    }

    fn draw(shell: &Shell) -> Buffer {
        let (width, height) = shell.viewport();
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render_ui(f, shell)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn rows(buffer: &Buffer) -> Vec<String> {
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer.get(x, y).symbol.as_str())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn fresh_work_session() {
        let shell = shell(80);
        let lines = plain(&timer_text(&shell));

        assert_eq!(lines[0], "🍅 Work Session");
        assert_eq!(lines[2], "01:00");
        assert_eq!(lines[4], "█".repeat(60));
        assert_eq!(lines[5], "100% remaining");
        assert_eq!(lines[7], "Paused (SPACE to start)");
        assert_eq!(lines[9], "Press H for help");
    }

    #[test]
    fn running_session_shows_elapsed_cells() {
        let mut shell = shell(40);
        shell.update(Event::Key(Key::ToggleTimer));
        for _ in 0..15 {
            shell.update(Event::Tick);
        }

        let text = timer_text(&shell);
        let bar = &text.lines[4].0;
        assert_eq!(bar[0].content.as_ref(), "█".repeat(22));
        assert_eq!(bar[0].style.fg, Some(PALETTE.remaining));
        assert_eq!(bar[1].content.as_ref(), "█".repeat(8));
        assert_eq!(bar[1].style.fg, Some(PALETTE.elapsed));

        let lines = plain(&text);
        assert_eq!(lines[2], "00:45");
        assert_eq!(lines[5], "75% remaining");
        assert_eq!(lines[7], "Running... (SPACE to pause)");
    }

    #[test]
    fn break_session_heading() {
        let mut shell = shell(80);
        shell.update(Event::Key(Key::ToggleTimer));
        for _ in 0..60 {
            shell.update(Event::Tick);
        }

        let lines = plain(&timer_text(&shell));
        assert_eq!(lines[0], "☕ Break Time");
        assert_eq!(lines[2], "02:00");
        assert_eq!(lines[7], "Paused (SPACE to start)");
    }

    #[test]
    fn bar_never_narrower_than_twenty_cells() {
        let lines = plain(&timer_text(&shell(12)));
        assert_eq!(lines[4], "█".repeat(20));
    }

    #[test]
    fn empty_session_reports_completion() {
        let zero = SessionDuration::default();
        let shell = Shell::new(Settings {
            work_duration: zero,
            break_duration: zero,
        });
        assert_eq!(
            status_line(shell.pomodoro_state()),
            "Work session complete! Starting break..."
        );
        assert_eq!(plain(&timer_text(&shell))[2], "00:00");
    }

    #[test]
    fn help_lists_every_binding() {
        let lines = plain(&help_text());
        for (keys, description) in KEY_BINDINGS {
            assert!(
                lines
                    .iter()
                    .any(|line| line.starts_with(keys) && line.contains(description)),
                "missing binding {keys}"
            );
        }
    }

    #[test]
    fn help_replaces_timer_view() {
        let mut shell = shell(80);
        shell.update(Event::Key(Key::ToggleHelp));
        let screen = rows(&draw(&shell)).join("\n");

        assert!(screen.contains("Toggle help screen"));
        assert!(!screen.contains("01:00"));
        assert!(!screen.contains("remaining"));
    }

    #[test]
    fn timer_view_is_drawn_centered() {
        let shell = shell(80);
        let rows = rows(&draw(&shell));

        let row = rows
            .iter()
            .position(|row| row.contains("01:00"))
            .expect("remaining time is drawn");
        assert!(row > 1 && row < 22);
        assert!(rows[0].contains("pomodoro"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let shell = shell(80);
        assert_eq!(draw(&shell), draw(&shell));
    }
}
