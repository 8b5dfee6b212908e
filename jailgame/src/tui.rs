//! Terminal renderer and input source using ratatui.
//!
//! The 800x600 map space is stretched over the terminal. Each cell shows
//! whatever lies under its centre point: modal box, button, territory or
//! map pixel.

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use image::RgbaImage;
use jailgame_core::layout::{Control, MAP_HEIGHT, MAP_WIDTH};
use jailgame_core::snapshot::{RenderSnapshot, TerritoryView};
use jailgame_core::{point_in_polygon, InputEvent, Key, Point};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

const OWNED: Color = Color::Indexed(34);
const UNOWNED: Color = Color::Indexed(160);
const SELECTED: Color = Color::Indexed(226);
const BUTTON: Color = Color::Indexed(248);
const BUTTON_HOVER: Color = Color::Indexed(244);
const PANEL: Color = Color::Indexed(255);
const STATUS_BG: Color = Color::Indexed(236);

/// Maps between terminal cells and map-space points.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Projection {
    area: Rect,
}

impl Projection {
    fn scale(&self) -> (f32, f32) {
        (
            MAP_WIDTH / self.area.width.max(1) as f32,
            MAP_HEIGHT / self.area.height.max(1) as f32,
        )
    }

    /// Centre of a cell in map space, or `None` outside the map area.
    fn to_map(&self, column: u16, row: u16) -> Option<Point> {
        let a = self.area;
        if column < a.x || row < a.y || column >= a.x + a.width || row >= a.y + a.height {
            return None;
        }
        let (sx, sy) = self.scale();
        Some(Point::new(
            ((column - a.x) as f32 + 0.5) * sx,
            ((row - a.y) as f32 + 0.5) * sy,
        ))
    }

    /// Cell containing a map-space point, clamped to the map area.
    fn to_cell(&self, p: Point) -> (u16, u16) {
        let a = self.area;
        let (sx, sy) = self.scale();
        let col = ((p.x / sx) as i32).clamp(0, a.width.saturating_sub(1) as i32) as u16;
        let row = ((p.y / sy) as i32).clamp(0, a.height.saturating_sub(1) as i32) as u16;
        (a.x + col, a.y + row)
    }
}

pub struct TuiSystem {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    map: RgbaImage,
    /// Map area from the last frame, for translating mouse positions.
    projection: Option<Projection>,
}

impl TuiSystem {
    pub fn new(map: RgbaImage) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            map,
            projection: None,
        })
    }

    pub fn render(&mut self, snap: &RenderSnapshot) -> Result<()> {
        let size = self.terminal.size()?;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(Rect::new(0, 0, size.width, size.height));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Europe Conquest ");
        let inner = block.inner(chunks[0]);
        let projection = Projection { area: inner };
        self.projection = Some(projection);

        let map = &self.map;
        self.terminal.draw(|f| {
            f.render_widget(block, chunks[0]);
            draw_scene(f.buffer_mut(), projection, map, snap);
            draw_status(f, chunks[1], snap);
        })?;
        Ok(())
    }

    /// Drains pending terminal events without blocking.
    pub fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Some(e) = self.translate(event::read()?) {
                events.push(e);
            }
        }
        Ok(events)
    }

    fn translate(&self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(translate_key(key.code)),
            Event::Mouse(mouse) => {
                let p = self.projection?.to_map(mouse.column, mouse.row)?;
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown(p)),
                    MouseEventKind::Moved => Some(InputEvent::PointerMoved(p)),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl Drop for TuiSystem {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = self.terminal.show_cursor();
    }
}

fn translate_key(code: KeyCode) -> InputEvent {
    match code {
        KeyCode::Esc | KeyCode::Char('q') => InputEvent::KeyDown(Key::Escape),
        KeyCode::Char(c) => InputEvent::KeyDown(Key::Char(c)),
        _ => InputEvent::KeyDown(Key::Other),
    }
}

fn draw_scene(buf: &mut Buffer, proj: Projection, map: &RgbaImage, snap: &RenderSnapshot) {
    let area = proj.area;
    let hovered = snap.pointer;

    for row in area.y..area.y + area.height {
        for column in area.x..area.x + area.width {
            let Some(p) = proj.to_map(column, row) else {
                continue;
            };
            let color = cell_color(p, map, snap, hovered);
            let cell = &mut buf[(column, row)];
            cell.set_char(' ');
            cell.set_bg(color);
        }
    }

    let text = Style::default().fg(Color::Black);

    for t in snap.territories.iter() {
        if let Some(label) = &t.price_label {
            put_centered(buf, proj, t.centroid, label, text.bg(territory_color(t)));
        }
    }

    if let Some(frame) = snap.stats_frame {
        for x in [190.0, 330.0, 470.0, 610.0] {
            let (col, row) = proj.to_cell(Point::new(x, frame.y + frame.height / 2.0));
            put(buf, area, col, row, "│", text.bg(PANEL));
        }
    }
    for label in &snap.stats {
        let (col, row) = proj.to_cell(Point::new(label.x, label.y));
        let bg = if snap.stats_frame.is_some() { PANEL } else { Color::Reset };
        let fg = if snap.stats_frame.is_some() { Color::Black } else { Color::White };
        put(buf, area, col, row, &label.text, Style::default().fg(fg).bg(bg));
    }
    if let Some(heading) = &snap.heading {
        put_centered(
            buf,
            proj,
            Point::new(MAP_WIDTH / 2.0, 30.0),
            heading,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        );
    }

    for control in &snap.controls {
        put_control(buf, proj, control, hovered);
    }

    if let Some(modal) = &snap.modal {
        let (col, row) = proj.to_cell(Point::new(modal.frame.x + 8.0, modal.frame.y + 4.0));
        put(
            buf,
            area,
            col,
            row,
            &modal.title,
            text.bg(PANEL).add_modifier(Modifier::BOLD),
        );
        for label in &modal.labels {
            let (col, row) = proj.to_cell(Point::new(label.x, label.y));
            put(buf, area, col, row, &label.text, text.bg(PANEL));
        }
        for control in &modal.controls {
            put_control(buf, proj, control, hovered);
        }
    }

    if let Some(tip) = &snap.tooltip {
        let (_, mut row) = proj.to_cell(tip.anchor);
        for line in &tip.lines {
            let (col, _) = proj.to_cell(tip.anchor);
            let start = col.saturating_sub(line.chars().count() as u16 / 2);
            put(buf, area, start, row, line, text.bg(Color::White));
            row = row.saturating_add(1);
        }
    }
}

fn cell_color(p: Point, map: &RgbaImage, snap: &RenderSnapshot, hovered: Option<Point>) -> Color {
    if let Some(modal) = &snap.modal {
        if let Some(c) = modal.controls.iter().find(|c| c.rect.contains(p)) {
            return button_color(c, hovered);
        }
        if modal.frame.contains(p) {
            return PANEL;
        }
    }
    if let Some(c) = snap.controls.iter().find(|c| c.rect.contains(p)) {
        return button_color(c, hovered);
    }
    if snap.stats_frame.is_some_and(|r| r.contains(p)) {
        return PANEL;
    }
    if let Some(t) = snap
        .territories
        .iter()
        .find(|t| point_in_polygon(p, &t.polygon))
    {
        return territory_color(t);
    }
    pixel_color(map, p)
}

fn territory_color(t: &TerritoryView) -> Color {
    if t.selected {
        SELECTED
    } else if t.owned {
        OWNED
    } else {
        UNOWNED
    }
}

fn button_color(control: &Control, hovered: Option<Point>) -> Color {
    if hovered.is_some_and(|p| control.rect.contains(p)) {
        BUTTON_HOVER
    } else {
        BUTTON
    }
}

fn pixel_color(map: &RgbaImage, p: Point) -> Color {
    let x = (p.x as u32).min(map.width().saturating_sub(1));
    let y = (p.y as u32).min(map.height().saturating_sub(1));
    match map.get_pixel_checked(x, y) {
        Some(px) => Color::Rgb(px[0], px[1], px[2]),
        None => Color::Reset,
    }
}

fn put_control(buf: &mut Buffer, proj: Projection, control: &Control, hovered: Option<Point>) {
    let style = Style::default()
        .fg(Color::Black)
        .bg(button_color(control, hovered));
    put_centered(buf, proj, control.rect.center(), &control.label, style);
}

fn put_centered(buf: &mut Buffer, proj: Projection, center: Point, text: &str, style: Style) {
    let (col, row) = proj.to_cell(center);
    let half = text.chars().count() as u16 / 2;
    put(buf, proj.area, col.saturating_sub(half).max(proj.area.x), row, text, style);
}

/// Writes text clipped to `area`.
fn put(buf: &mut Buffer, area: Rect, col: u16, row: u16, text: &str, style: Style) {
    if row < area.y || row >= area.y + area.height || col < area.x || col >= area.x + area.width {
        return;
    }
    let room = (area.x + area.width - col) as usize;
    buf.set_stringn(col, row, text, room, style);
}

fn draw_status(f: &mut Frame, area: Rect, snap: &RenderSnapshot) {
    let paused = if snap.paused { " PAUSED │" } else { "" };
    let message = snap.notification.as_deref().unwrap_or("");
    let status_text = format!("{paused} {message:<40} │ click:select  esc/q:quit");
    let status_bar = Paragraph::new(status_text).style(Style::default().bg(STATUS_BG));
    f.render_widget(status_bar, area);
}
