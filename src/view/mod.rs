//! Demo gallery TUI (impure shell).
//!
//! Hosts the engine inside a ratatui event loop: the terminal is the
//! container (one cell = one pixel), key events become scroll signals,
//! terminal resizes become container measurements, and the simulated feed
//! plays the external data owner for the infinite-scroll trigger.

use crate::config::GridConfig;
use crate::engine::{GridEngine, LayoutState};
use crate::model::{Dimensions, VisibleItem};
use crate::scroll::FetchState;
use crate::source::{Card, ItemFeed};
use crate::viewport::ScrollSignal;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Frame budget for the event loop; also the poll timeout while idle.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Rows scrolled per arrow key press.
const SCROLL_STEP: f64 = 2.0;

/// Errors from the demo TUI.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations.
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Rejected engine configuration.
    #[error("Invalid grid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// The demo application: engine, item collection, simulated feed, and the
/// host-side scroll position.
pub struct GalleryApp<B: Backend> {
    terminal: Terminal<B>,
    engine: GridEngine,
    cards: Vec<Card>,
    feed: Option<ItemFeed>,
    scroll_offset: f64,
    grid_height: f64,
    scroll_moved: bool,
}

impl GalleryApp<CrosstermBackend<Stdout>> {
    /// Sets up the terminal (raw mode, alternate screen) and measures the
    /// initial container width.
    pub fn new(
        config: GridConfig,
        cards: Vec<Card>,
        feed: Option<ItemFeed>,
    ) -> Result<Self, TuiError> {
        let engine = GridEngine::new(config)?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut app = Self {
            terminal,
            engine,
            cards,
            feed,
            scroll_offset: 0.0,
            grid_height: 0.0,
            scroll_moved: true,
        };
        app.measure(Instant::now())?;
        Ok(app)
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<(), TuiError> {
        loop {
            if event::poll(FRAME_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            break;
                        }
                    }
                    Event::Resize(_, _) => {
                        self.measure(Instant::now())?;
                    }
                    _ => {}
                }
            }
            self.tick(Instant::now())?;
        }
        self.engine.teardown();
        Ok(())
    }

    fn measure(&mut self, now: Instant) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        // Bottom row is the status bar; the rest is the grid container.
        self.grid_height = f64::from(size.height.saturating_sub(1));
        self.engine.measure_container(f64::from(size.width), now);
        self.scroll_moved = true;
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let page = self.grid_height.max(1.0);
        match (key.code, key.modifiers) {
            (KeyCode::Char('q') | KeyCode::Esc, _) => return true,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Up | KeyCode::Char('k'), _) => self.scroll_by(-SCROLL_STEP),
            (KeyCode::Down | KeyCode::Char('j'), _) => self.scroll_by(SCROLL_STEP),
            (KeyCode::PageUp, _) => self.scroll_by(-page),
            (KeyCode::PageDown | KeyCode::Char(' '), _) => self.scroll_by(page),
            (KeyCode::Home | KeyCode::Char('g'), _) => self.scroll_to(0.0),
            (KeyCode::End | KeyCode::Char('G'), _) => self.scroll_to(f64::MAX),
            _ => {}
        }
        false
    }

    fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_offset + delta);
    }

    fn scroll_to(&mut self, offset: f64) {
        let max = (self.engine.total_height() - self.grid_height).max(0.0);
        let clamped = offset.clamp(0.0, max);
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.scroll_moved = true;
        }
    }

    /// One frame: complete due fetches, feed signals to the engine, run
    /// the recomputation pass, evaluate the fetch trigger, and repaint.
    fn tick(&mut self, now: Instant) -> Result<(), TuiError> {
        if let Some(feed) = &mut self.feed {
            if let Some(page) = feed.poll(now) {
                debug!(appended = page.len(), "feed page arrived");
                self.cards.extend(page);
                self.engine.items_changed();
            }
        }

        if self.scroll_moved {
            self.scroll_moved = false;
            self.engine.record_scroll(ScrollSignal {
                offset: self.scroll_offset,
                viewport: self.grid_height,
                container_offset: 0.0,
            });
        }

        let state = self.engine.on_frame(&self.cards, now);
        let fetch_state = match &self.feed {
            Some(feed) => FetchState {
                has_more: feed.has_more(),
                is_fetching: feed.is_fetching(),
            },
            None => FetchState {
                has_more: false,
                is_fetching: false,
            },
        };

        let scroll_offset = self.scroll_offset;
        let total = self.cards.len();
        self.terminal.draw(|frame| {
            let area = frame.area();
            render(frame, area, &state, scroll_offset, total, fetch_state);
        })?;

        let feed = &mut self.feed;
        self.engine.maybe_fetch(fetch_state, || {
            if let Some(feed) = feed {
                feed.begin_fetch(now);
            }
        });
        Ok(())
    }
}

/// Paints one frame: the grid viewport plus a one-row status bar.
pub fn render(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &LayoutState<'_, Card>,
    scroll_offset: f64,
    total_items: usize,
    fetch_state: FetchState,
) {
    if area.height == 0 {
        return;
    }
    let grid_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + grid_area.height,
        height: 1,
        ..area
    };

    match state {
        LayoutState::Loading => {
            frame.render_widget(
                Paragraph::new("Measuring container...").style(Style::default().fg(Color::DarkGray)),
                grid_area,
            );
        }
        LayoutState::Empty { .. } => {
            frame.render_widget(
                Paragraph::new("No items yet.").style(Style::default().fg(Color::DarkGray)),
                grid_area,
            );
        }
        LayoutState::Ready {
            dimensions,
            visible,
            ..
        } => {
            for item in visible {
                if let Some(rect) = card_rect(item, dimensions.column_width, scroll_offset, grid_area)
                {
                    render_card(frame, rect, item);
                }
            }
        }
    }

    frame.render_widget(status_line(state, scroll_offset, total_items, fetch_state), status_area);
}

/// Maps a positioned item into screen cells, clipped against the grid
/// viewport. Returns `None` when the card is entirely off screen (overscan
/// keeps items in the projection well past the visible rows).
fn card_rect(
    item: &VisibleItem<'_, Card>,
    column_width: f64,
    scroll_offset: f64,
    grid: Rect,
) -> Option<Rect> {
    let top = item.position.top - scroll_offset;
    let bottom = top + item.position.height;
    if bottom <= 0.0 || top >= f64::from(grid.height) {
        return None;
    }

    let left = item.position.left.round();
    if left < 0.0 || left >= f64::from(grid.width) {
        return None;
    }
    let x = grid.x + left as u16;
    // The engine hands out fractional column widths; cells are whole.
    let width = (column_width.max(0.0).round() as u16).min(grid.x + grid.width - x);

    // Clip vertically: the part above or below the viewport is dropped.
    let visible_top = top.max(0.0);
    let visible_bottom = bottom.min(f64::from(grid.height));
    let y = grid.y + visible_top.round() as u16;
    let height = (visible_bottom - visible_top).round().max(0.0) as u16;
    let height = height.min(grid.height.saturating_sub(visible_top.round() as u16));
    if height == 0 || width == 0 {
        return None;
    }
    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

fn render_card(frame: &mut ratatui::Frame<'_>, rect: Rect, item: &VisibleItem<'_, Card>) {
    let tint = match item.item.tint % 7 {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Yellow,
        3 => Color::Blue,
        4 => Color::Magenta,
        5 => Color::Cyan,
        _ => Color::Gray,
    };
    let title = truncate_title(&item.item.title, rect.width.saturating_sub(2) as usize);
    let block = Block::bordered()
        .title(Line::from(title))
        .style(Style::default().fg(tint));
    frame.render_widget(block, rect);
}

/// Truncates a title to the given display width, by terminal columns
/// rather than bytes.
fn truncate_title(title: &str, max_width: usize) -> String {
    if title.width() <= max_width {
        return title.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in title.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn status_line(
    state: &LayoutState<'_, Card>,
    scroll_offset: f64,
    total_items: usize,
    fetch_state: FetchState,
) -> Paragraph<'static> {
    let text = match state {
        LayoutState::Loading => "loading".to_string(),
        LayoutState::Empty { dimensions } => {
            format!("empty | {} columns", dimensions.column_count)
        }
        LayoutState::Ready {
            dimensions:
                Dimensions {
                    column_count,
                    column_width,
                },
            total_height,
            visible,
        } => {
            let fetching = if fetch_state.is_fetching {
                " | fetching..."
            } else if !fetch_state.has_more {
                " | end of feed"
            } else {
                ""
            };
            format!(
                "{} items | {} rendered | {} cols x {:.1} | height {:.0} | offset {:.0}{}",
                total_items,
                visible.len(),
                column_count,
                column_width,
                total_height,
                scroll_offset,
                fetching,
            )
        }
    };
    Paragraph::new(text).style(Style::default().fg(Color::White).bg(Color::DarkGray))
}

/// Runs the demo gallery and restores the terminal even on error.
pub fn run_demo(
    config: GridConfig,
    cards: Vec<Card>,
    feed: Option<ItemFeed>,
) -> Result<(), TuiError> {
    let mut app = GalleryApp::new(config, cards, feed)?;
    let result = app.run();
    restore_terminal()?;
    result
}

/// Disables raw mode and leaves the alternate screen.
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
