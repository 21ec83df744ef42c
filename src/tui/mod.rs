//! Three-pane terminal browser for the launcher
//!
//! Projects, the seq/shot tree and the role directory's files sit side by
//! side. The session does all the work; this module only draws it and feeds
//! key presses back in.
//!
//! # Layout
//!
//! ```text
//! ┌ header: role, root ──────────────────────────────┐
//! ├ Projects ──┬ Seq / Shot ────┬ Files ──────────────┤
//! │            │                │                     │
//! ├ Status ────┴────────────────┴─────────────────────┤
//! └ key hints ────────────────────────────────────────┘
//! ```
//!
//! Filesystem changes are picked up between frames, so the panes follow the
//! disk without a manual refresh.

mod app;
mod error;
mod events;
mod theme;
pub mod widgets;

pub use app::{App, Pane};
pub use error::{Result, UiError};
pub use events::{Action, map_key};
pub use theme::Theme;

use crate::config::LauncherConfig;
use crate::session::LauncherSession;
use crate::watcher::{ChangeWatcher, DirWatcher};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::io::{self, Stdout};
use std::time::Duration;
use widgets::{HelpBar, PaneList, StatusBar};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Open the browser on the configured roots and block until the user quits
///
/// # Errors
///
/// Returns an error if no root is configured, the watcher cannot start, or
/// the terminal cannot be set up.
pub fn run(config: LauncherConfig) -> Result<()> {
    let root = config
        .root_path
        .clone()
        .ok_or_else(|| crate::LauncherError::InvalidState("no projects root configured".to_string()))?;

    let mut session = LauncherSession::new(DirWatcher::new()?);
    session.set_roots(root, config.publish_root_path.clone())?;
    let mut app = App::new(session, config);

    let mut terminal = setup_terminal()?;
    let result = run_loop(&mut terminal, &mut app);
    cleanup_terminal()?;
    terminal.show_cursor()?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

fn run_loop<W: ChangeWatcher>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<W>,
) -> Result<()> {
    let theme = Theme::default();
    let hints = HelpBar::default_hints();

    while !app.should_quit() {
        terminal.draw(|frame| render(frame, app, &theme, &hints))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && let Some(action) = map_key(key)
        {
            app.apply(action);
        }
        app.tick();
    }
    Ok(())
}

fn render<W: ChangeWatcher>(frame: &mut Frame, app: &App<W>, theme: &Theme, hints: &[widgets::KeyHint]) {
    let area = frame.area();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Panes
            Constraint::Length(3), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    frame.render_widget(header(app, theme), main_layout[0]);
    render_panes(frame, app, theme, main_layout[1]);

    let message = app.status().latest_message();
    let target = app.launch_target();
    let status_bar = StatusBar::new(message.as_ref(), theme).with_target(target.as_deref());
    frame.render_widget(status_bar, main_layout[2]);

    frame.render_widget(HelpBar::new(hints, theme), main_layout[3]);

    if app.show_help() {
        render_help_overlay(frame, theme);
    }
}

fn header<W: ChangeWatcher>(app: &App<W>, theme: &Theme) -> Paragraph<'static> {
    let selection = app.session().selection();
    let role = selection
        .role()
        .map_or_else(|| "none".to_string(), |role| role.to_string());
    let root = selection
        .root_path()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    Paragraph::new(Line::from(vec![
        Span::styled(" Y Pipeline ", theme.key_style()),
        Span::styled(" role: ", theme.dimmed_style()),
        Span::styled(role, theme.role_style()),
        Span::styled("  root: ", theme.dimmed_style()),
        Span::raw(root),
    ]))
}

fn render_panes<W: ChangeWatcher>(frame: &mut Frame, app: &App<W>, theme: &Theme, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Percentage(45),
        ])
        .split(area);

    let projects = app.project_rows();
    let seq_shots = app.seq_shot_rows();
    let files = app.file_rows();

    frame.render_widget(
        PaneList::new("Projects", &projects, app.cursor(Pane::Projects), theme)
            .focused(app.focus() == Pane::Projects)
            .empty_hint("no projects under root"),
        chunks[0],
    );
    frame.render_widget(
        PaneList::new("Seq / Shot", &seq_shots, app.cursor(Pane::SeqShots), theme)
            .focused(app.focus() == Pane::SeqShots)
            .empty_hint("select a project"),
        chunks[1],
    );
    frame.render_widget(
        PaneList::new("Files", &files, app.cursor(Pane::Files), theme)
            .focused(app.focus() == Pane::Files)
            .empty_hint(app.files_hint()),
        chunks[2],
    );
}

fn render_help_overlay(frame: &mut Frame, theme: &Theme) {
    let lines: Vec<Line> = HelpBar::overlay_lines()
        .into_iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{keys:>20}  "), theme.key_style()),
                Span::raw(action),
            ])
        })
        .collect();

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let area = centered(frame.area(), 76, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(" Help "),
        ),
        area,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
