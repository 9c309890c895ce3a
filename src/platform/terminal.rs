//! Terminal platform (crossterm)
//!
//! Rasterises each frame onto a character grid, one cell per 6x6 world
//! pixels, and redraws it row by row. Space, Up or W jumps; Q, Esc or
//! Ctrl-C quits.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use super::{FrameLimiter, Platform, PlatformEvent};
use crate::assets::{AssetManifest, ImageInfo, SpriteId};
use crate::consts::*;
use crate::error::{Error, Result};
use crate::render::{DrawCommand, Frame};
use crate::sim::Rect;

/// World pixels per terminal cell
pub const CELL_WIDTH: i32 = 6;
pub const CELL_HEIGHT: i32 = 6;

const CONTROLS_HINT: &str = "space: jump   q: quit";

/// Character grid the frame is rasterised onto
#[derive(Debug, Clone)]
pub struct CharGrid {
    pub grid: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
}

impl CharGrid {
    pub fn new(width: u16, height: u16) -> Self {
        CharGrid {
            grid: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn set_char(&mut self, x: i32, y: i32, c: char) {
        if x >= 0 && y >= 0 && (x as u16) < self.width && (y as u16) < self.height {
            self.grid[y as usize][x as usize] = c;
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(' ');
        }
    }

    pub fn write_str(&mut self, x: i32, y: i32, s: &str) {
        for (i, c) in s.chars().enumerate() {
            self.set_char(x + i as i32, y, c);
        }
    }

    /// Fill every cell a world-space rectangle touches
    pub fn fill_rect(&mut self, rect: &Rect, c: char) {
        if rect.is_empty() {
            return;
        }
        let col0 = rect.left().div_euclid(CELL_WIDTH);
        let col1 = (rect.right() - 1).div_euclid(CELL_WIDTH);
        let row0 = rect.top().div_euclid(CELL_HEIGHT);
        let row1 = (rect.bottom() - 1).div_euclid(CELL_HEIGHT);
        for row in row0..=row1 {
            for col in col0..=col1 {
                self.set_char(col, row, c);
            }
        }
    }

    pub fn row_string(&self, y: u16) -> String {
        self.grid[y as usize].iter().collect()
    }

    pub fn draw(&mut self, frame: &Frame) {
        for command in &frame.commands {
            match command {
                DrawCommand::Clear(_) => self.clear(),
                DrawCommand::FillRect { rect, .. } => {
                    let c = if rect.size.y >= CELL_HEIGHT {
                        '#'
                    } else if rect.size.x >= CELL_WIDTH * 2 {
                        '_'
                    } else {
                        '.'
                    };
                    self.fill_rect(rect, c);
                }
                DrawCommand::Sprite { id, rect, mirrored } => {
                    self.fill_rect(rect, sprite_glyph(*id, *mirrored));
                }
                DrawCommand::Text { x, y, text, .. } => {
                    self.write_str(x.div_euclid(CELL_WIDTH), y.div_euclid(CELL_HEIGHT), text);
                }
            }
        }
    }
}

fn sprite_glyph(id: SpriteId, mirrored: bool) -> char {
    match (id, mirrored) {
        (SpriteId::Character, _) => '@',
        (_, false) => '#',
        (_, true) => '%',
    }
}

pub struct TerminalPlatform<W: Write = Stdout> {
    out: W,
    manifest: AssetManifest,
    grid: CharGrid,
    limiter: FrameLimiter,
    active: bool,
}

impl TerminalPlatform<Stdout> {
    /// Switch the terminal to raw mode on the alternate screen
    pub fn new(manifest: AssetManifest, tick_rate: u32) -> Result<Self> {
        terminal::enable_raw_mode().map_err(|e| {
            log::error!("Failed to enable raw mode: {}", e);
            e
        })?;
        // Raw mode is on: any failure below drops `platform`, which restores it
        let mut platform = Self::with_output(io::stdout(), manifest, tick_rate);
        let (cols, rows) = terminal::size()?;
        platform.enter(cols, rows)?;
        Ok(platform)
    }
}

impl<W: Write> TerminalPlatform<W> {
    /// Platform writing to `out`, with raw mode already on
    fn with_output(out: W, manifest: AssetManifest, tick_rate: u32) -> Self {
        Self {
            out,
            manifest,
            grid: CharGrid::new(0, 0),
            limiter: FrameLimiter::new(tick_rate),
            active: true,
        }
    }

    /// Switch to the alternate screen and size the grid to fit `cols` x `rows`
    fn enter(&mut self, cols: u16, rows: u16) -> Result<()> {
        execute!(self.out, EnterAlternateScreen, Hide, DisableLineWrap, Clear(ClearType::All))?;

        let width = cols.min((WORLD_WIDTH / CELL_WIDTH) as u16);
        let height = rows.min((WORLD_HEIGHT / CELL_HEIGHT) as u16);
        log::info!("Terminal {}x{}, drawing {}x{} cells", cols, rows, width, height);
        self.grid = CharGrid::new(width, height);
        Ok(())
    }

    /// Put the terminal back the way we found it
    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let screen = execute!(self.out, LeaveAlternateScreen, Show, EnableLineWrap);
        terminal::disable_raw_mode()?;
        screen?;
        Ok(())
    }
}

impl<W: Write> Drop for TerminalPlatform<W> {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            log::error!("Failed to restore terminal: {}", e);
        }
    }
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn load_image(&mut self, name: &str) -> Result<ImageInfo> {
        self.manifest.get(name).ok_or_else(|| Error::Asset {
            name: name.to_string(),
        })
    }

    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(PlatformEvent::Quit)
                    }
                    KeyCode::Char('q') | KeyCode::Esc => events.push(PlatformEvent::Quit),
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => {
                        events.push(PlatformEvent::Jump)
                    }
                    _ => {}
                }
            }
        }
        Ok(events)
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        self.grid.draw(frame);
        if self.grid.height > 0 {
            self.grid.write_str(0, self.grid.height as i32 - 1, CONTROLS_HINT);
        }
        for y in 0..self.grid.height {
            queue!(self.out, MoveTo(0, y), Print(self.grid.row_string(y)))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn wait_for_next_tick(&mut self) {
        self.limiter.wait();
    }
}
