//! # Story-Point Bar Chart
//!
//! Renders per-user totals as a vertical ratatui bar chart, either on the
//! alternate screen until a key is pressed or once into an off-screen buffer
//! that is printed as plain text.

use std::io::{self, IsTerminal};

use anyhow::{Result, bail};
use chrono::{Local, NaiveDateTime};
use clap::ValueEnum;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use ratatui::backend::{CrosstermBackend, TestBackend};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::{Frame, Terminal};
use tally_core::format_points;
use tracing::debug;

use crate::report::StoryPointTotals;

/// Narrowest bar, wide enough to print a total like `12.5` on it
const MIN_BAR_WIDTH: u16 = 5;
/// Widest bar; longer usernames are truncated beneath it
const MAX_BAR_WIDTH: u16 = 16;
const BAR_GAP: u16 = 1;
/// Rows given to the bars in inline mode, borders and labels excluded
const INLINE_BAR_ROWS: u16 = 12;
/// Bar heights are hundredths of a point so fractional totals keep their
/// proportions and small totals still get a bar
const HEIGHT_SCALE: f64 = 100.0;

/// How the chart is displayed
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
  /// Full-screen chart, closed with q, Esc or Enter
  Interactive,
  /// Print the chart as text below the report
  Inline,
  /// Do not draw a chart
  Off,
}

impl ChartMode {
  /// Interactive on a terminal, inline otherwise
  pub fn detect() -> Self {
    if io::stdout().is_terminal() {
      ChartMode::Interactive
    } else {
      ChartMode::Inline
    }
  }
}

/// Chart title for a Program Increment at a given moment
pub fn chart_title(pi: &str, at: NaiveDateTime) -> String {
  format!(
    "Total Story Points Completed by Each User in {pi} ({})",
    at.format("%Y-%m-%d %H:%M:%S")
  )
}

/// Entries ordered by total, highest first; ties keep their original order
pub fn sorted_descending(totals: &StoryPointTotals) -> Vec<(String, f64)> {
  let mut entries = totals.entries().to_vec();
  entries.sort_by(|a, b| b.1.total_cmp(&a.1));
  entries
}

fn bar_width(entries: &[(String, f64)]) -> u16 {
  let longest = entries
    .iter()
    .map(|(name, _)| name.chars().count())
    .max()
    .unwrap_or_default();
  u16::try_from(longest)
    .unwrap_or(MAX_BAR_WIDTH)
    .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

fn bar_height(total: f64) -> u64 {
  (total.max(0.0) * HEIGHT_SCALE).round() as u64
}

fn build_chart<'a>(entries: &'a [(String, f64)], title: &'a str) -> BarChart<'a> {
  let bars: Vec<Bar> = entries
    .iter()
    .map(|(name, total)| {
      Bar::default()
        .label(Line::from(name.as_str()))
        .value(bar_height(*total))
        .text_value(format_points(*total))
    })
    .collect();

  BarChart::default()
    .block(Block::default().borders(Borders::ALL).title(title))
    .bar_width(bar_width(entries))
    .bar_gap(BAR_GAP)
    .bar_style(Style::default().fg(Color::LightBlue))
    .value_style(Style::default().fg(Color::Black).bg(Color::LightBlue).add_modifier(Modifier::BOLD))
    .label_style(Style::default().fg(Color::White))
    .data(BarGroup::default().bars(&bars))
}

/// Draw the chart once into an off-screen buffer and return it as text
pub fn render_inline(totals: &StoryPointTotals, title: &str) -> Result<String> {
  if totals.is_empty() {
    bail!("No story points to chart");
  }

  let entries = sorted_descending(totals);
  let count = u16::try_from(entries.len()).unwrap_or(u16::MAX);
  let bars_width = count.saturating_mul(bar_width(&entries) + BAR_GAP);
  let title_width = u16::try_from(title.chars().count()).unwrap_or(u16::MAX);
  let width = bars_width.max(title_width).saturating_add(2);
  // Bars, value labels, and the username row inside the border
  let height = INLINE_BAR_ROWS + 3;

  let mut terminal = Terminal::new(TestBackend::new(width, height))?;
  terminal.draw(|f| f.render_widget(build_chart(&entries, title), f.area()))?;

  let buffer = terminal.backend().buffer();
  let lines: Vec<String> = buffer
    .content()
    .chunks(usize::from(width))
    .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>().trim_end().to_string())
    .collect();

  Ok(lines.join("\n"))
}

/// Show the chart on the alternate screen until q, Esc or Enter is pressed
pub fn show_interactive(totals: &StoryPointTotals, title: &str) -> Result<()> {
  if totals.is_empty() {
    bail!("No story points to chart");
  }

  let entries = sorted_descending(totals);

  let _screen = ScreenGuard::enter()?;
  let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

  run_chart(&mut terminal, &entries, title)
}

/// Raw mode plus the alternate screen, restored on drop whichever way the
/// chart exits
struct ScreenGuard;

impl ScreenGuard {
  fn enter() -> Result<Self> {
    enable_raw_mode()?;
    // From here on, dropping the guard undoes raw mode even if the screen
    // switch below fails
    let guard = ScreenGuard;
    execute!(io::stdout(), EnterAlternateScreen)?;
    Ok(guard)
  }
}

impl Drop for ScreenGuard {
  fn drop(&mut self) {
    if let Err(err) = disable_raw_mode() {
      debug!("Failed to disable raw mode: {err}");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
      debug!("Failed to leave the alternate screen: {err}");
    }
  }
}

fn run_chart(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  entries: &[(String, f64)],
  title: &str,
) -> Result<()> {
  loop {
    terminal.draw(|f| draw(f, entries, title))?;

    if let Event::Key(key) = event::read()?
      && key.kind == KeyEventKind::Press
      && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter)
    {
      return Ok(());
    }
  }
}

fn draw(f: &mut Frame, entries: &[(String, f64)], title: &str) {
  let area: Rect = f.area();
  f.render_widget(build_chart(entries, title), area);
}

/// Display the totals in the requested mode, titled for `pi` at the current
/// local time
pub fn display_chart(totals: &StoryPointTotals, pi: &str, mode: ChartMode) -> Result<()> {
  let title = chart_title(pi, Local::now().naive_local());
  debug!("Rendering chart '{title}' in {mode:?} mode");

  match mode {
    ChartMode::Interactive => show_interactive(totals, &title),
    ChartMode::Inline => {
      let chart = render_inline(totals, &title)?;
      println!("{chart}");
      Ok(())
    }
    ChartMode::Off => Ok(()),
  }
}
