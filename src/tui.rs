use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::cell::RefCell;
use std::io::{self, stdout};

use crate::logging;
use crate::model::{MenuNode, NodeKind};
use crate::navigator::{self, Level, NavEvent, Navigator};

const HELP: &str = "↑/↓ move  →/Enter select  ←/ESC back  q quit";

/// How the interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user left the root level; the selection stands.
    Confirmed,
    /// Ctrl-C; nothing should be emitted.
    Aborted,
}

/// Translate a key press into a navigation event.
///
/// `None` means the key is ignored.
pub fn map_key(key: &KeyEvent) -> Option<NavEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(NavEvent::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(NavEvent::Down),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            Some(NavEvent::Activate)
        }
        KeyCode::Esc
        | KeyCode::Left
        | KeyCode::Backspace
        | KeyCode::Char('h')
        | KeyCode::Char('q')
        | KeyCode::Char('Q') => Some(NavEvent::Back),
        _ => None,
    }
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// One line of the list as shown to the user.
pub fn row_label(node: &MenuNode) -> String {
    match node.kind {
        NodeKind::Checkbox => {
            format!("[{}] {}", if node.checked { 'x' } else { ' ' }, node.label)
        }
        NodeKind::Section => format!(
            "-> {} ({}/{})",
            node.label,
            node.checked_leaves(),
            node.total_leaves()
        ),
    }
}

pub fn title(crumbs: &[&str]) -> String {
    if crumbs.is_empty() {
        " Checklist ".to_string()
    } else {
        format!(" Checklist › {} ", crumbs.join(" › "))
    }
}

/// Everything needed to repaint the current level, e.g. after a resize.
#[derive(Debug, Default, Clone)]
struct Snapshot {
    title: String,
    rows: Vec<String>,
    cursor: usize,
}

impl Snapshot {
    fn capture(level: &Level<'_>, crumbs: &[&str]) -> Self {
        Self {
            title: title(crumbs),
            rows: level.items.iter().map(row_label).collect(),
            cursor: level.cursor,
        }
    }
}

/// Runs `restore` when dropped, so the terminal is put back on every exit path.
struct OnDrop<F: FnOnce()>(Option<F>);

impl<F: FnOnce()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        if let Some(restore) = self.0.take() {
            restore();
        }
    }
}

pub fn run_tui(nodes: &mut [MenuNode]) -> Result<Outcome> {
    // Initialize TUI.
    enable_raw_mode()?;
    let _restore = OnDrop(Some(|| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }));
    let _quiet = logging::pause_stderr();

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = std::iter::from_fn(|| Some(event::read()));
    navigate(nodes, &mut events, |snapshot| {
        terminal.draw(|f| ui(f, snapshot))?;
        Ok(())
    })
}

/// What a terminal event means for the session.
enum Input {
    Nav(NavEvent),
    Interrupt,
    Repaint,
}

/// Read events until one matters. `None` once the source is exhausted.
fn next_input<I>(events: &mut I) -> Result<Option<Input>>
where
    I: Iterator<Item = io::Result<Event>>,
{
    for event in events.by_ref() {
        match event? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_interrupt(&key) {
                    return Ok(Some(Input::Interrupt));
                }
                if let Some(nav_event) = map_key(&key) {
                    return Ok(Some(Input::Nav(nav_event)));
                }
            }
            Event::Resize(_, _) => return Ok(Some(Input::Repaint)),
            _ => {}
        }
    }
    Ok(None)
}

/// Walk the checklist with terminal events until the root is left or Ctrl-C.
///
/// No event is read after an interrupt.
fn navigate<I, P>(nodes: &mut [MenuNode], events: &mut I, paint: P) -> Result<Outcome>
where
    I: Iterator<Item = io::Result<Event>>,
    P: FnMut(&Snapshot) -> Result<()>,
{
    let paint = RefCell::new(paint);
    let snapshot = RefCell::new(Snapshot::default());
    let mut outcome = Outcome::Confirmed;
    let mut nav = Navigator::new(nodes);

    navigator::run(
        &mut nav,
        || loop {
            match next_input(events)? {
                Some(Input::Nav(nav_event)) => return Ok(Some(nav_event)),
                Some(Input::Interrupt) => {
                    outcome = Outcome::Aborted;
                    return Ok(None);
                }
                Some(Input::Repaint) => (*paint.borrow_mut())(&*snapshot.borrow())?,
                None => return Ok(None),
            }
        },
        |level, crumbs| {
            tracing::trace!(depth = level.depth, cursor = level.cursor, "draw");
            let current = Snapshot::capture(level, crumbs);
            (*paint.borrow_mut())(&current)?;
            *snapshot.borrow_mut() = current;
            Ok(())
        },
    )?;

    if outcome == Outcome::Aborted {
        tracing::info!("selection aborted");
    }
    Ok(outcome)
}

fn ui(f: &mut Frame<'_>, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.area());

    let items: Vec<ListItem> = snapshot
        .rows
        .iter()
        .map(|row| ListItem::new(row.as_str()))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(snapshot.title.as_str()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if !snapshot.rows.is_empty() {
        state.select(Some(snapshot.cursor));
    }
    f.render_stateful_widget(list, chunks[0], &mut state);

    f.render_widget(Paragraph::new(HELP), chunks[1]);
}
