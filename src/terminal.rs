//! The terminal as a window: raw-mode setup, key translation and frame output.

use crate::app::{SpecialKey, ESCAPE};
use crate::graphics::Raster;
use crate::state::AppState;
use anyhow::{Context, Result};
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self as term, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::{execute, queue};
use std::io::{self, BufWriter, Stdout, Write};
use std::time::Instant;

/// Size assumed when the terminal cannot be queried
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// A key press the application understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(char),
    Special(SpecialKey),
}

/// Current terminal size as (columns, rows)
pub fn size() -> (u16, u16) {
    termsize::get()
        .map(|size| (size.cols, size.rows))
        .unwrap_or(FALLBACK_SIZE)
}

/// Frame buffer size for a terminal: two pixel rows per cell, minus a status row.
pub fn frame_size(cols: u16, rows: u16, status_line: bool) -> (usize, usize) {
    let rows = if status_line { rows.saturating_sub(1) } else { rows };
    (cols as usize, rows as usize * 2)
}

/// Maps a terminal key event onto application input. Releases are dropped.
pub fn translate_key(event: &KeyEvent) -> Option<Input> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Input::Key(ESCAPE))
        }
        KeyCode::Char(c) => Some(Input::Key(c)),
        KeyCode::Esc => Some(Input::Key(ESCAPE)),
        KeyCode::Up => Some(Input::Special(SpecialKey::Up)),
        KeyCode::Down => Some(Input::Special(SpecialKey::Down)),
        KeyCode::Left => Some(Input::Special(SpecialKey::Left)),
        KeyCode::Right => Some(Input::Special(SpecialKey::Right)),
        KeyCode::PageUp => Some(Input::Special(SpecialKey::PageUp)),
        KeyCode::PageDown => Some(Input::Special(SpecialKey::PageDown)),
        _ => None,
    }
}

/// One-line summary of the camera, animation and lights
pub fn status_line(state: &AppState, fps: f64) -> String {
    let camera = &state.camera;
    let lights: String = state
        .lights
        .enabled
        .iter()
        .enumerate()
        .map(|(i, &on)| if on { char::from(b'0' + i as u8) } else { '-' })
        .collect();
    format!(
        "{} {} | FPS: {:.2} | eye ({:.1}, {:.1}, {:.1}) look ({:.1}, {:.1}, {:.1}) | pitch {:.0} yaw {:.0} roll {:.0} | theta {:.2} fan {:.0} | lights {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        fps,
        camera.eye.x,
        camera.eye.y,
        camera.eye.z,
        camera.look.x,
        camera.look.y,
        camera.look.z,
        camera.pitch,
        camera.yaw,
        camera.roll,
        state.animation.theta,
        state.animation.fan_angle,
        lights,
    )
}

/// Frames-per-second over one-second windows
pub struct FpsCounter {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        FpsCounter {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    /// Counts a frame and returns the latest rate.
    pub fn frame(&mut self) -> f64 {
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }
        self.fps
    }
}

/// Raw-mode alternate screen; restored when dropped
pub struct Terminal {
    out: BufWriter<Stdout>,
}

impl Terminal {
    pub fn enter(title: &str) -> Result<Self> {
        term::enable_raw_mode().context("enabling raw mode")?;
        let mut terminal = Terminal {
            out: BufWriter::new(io::stdout()),
        };
        execute!(
            terminal.out,
            EnterAlternateScreen,
            Hide,
            SetTitle(title),
            Clear(ClearType::All)
        )
        .context("preparing alternate screen")?;
        Ok(terminal)
    }

    /// Draws the frame buffer, two pixel rows per terminal row, then the status line.
    pub fn present(&mut self, raster: &Raster, status: Option<&str>) -> Result<()> {
        self.write_frame(raster, status)
            .and_then(|()| self.out.flush())
            .context("writing frame to terminal")
    }

    fn write_frame(&mut self, raster: &Raster, status: Option<&str>) -> io::Result<()> {
        let rows = raster.height() / 2;
        for row in 0..rows {
            queue!(self.out, MoveTo(0, row as u16))?;
            let mut colors: Option<([u8; 4], [u8; 4])> = None;
            for x in 0..raster.width() {
                let top = raster.pixel(x, row * 2);
                let bottom = raster.pixel(x, row * 2 + 1);
                if colors != Some((top, bottom)) {
                    queue!(
                        self.out,
                        SetForegroundColor(rgb(top)),
                        SetBackgroundColor(rgb(bottom))
                    )?;
                    colors = Some((top, bottom));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }

        if let Some(status) = status {
            let line: String = status.chars().take(raster.width()).collect();
            queue!(
                self.out,
                MoveTo(0, rows as u16),
                ResetColor,
                Print(line),
                Clear(ClearType::UntilNewLine)
            )?;
        }
        queue!(self.out, ResetColor)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = term::disable_raw_mode();
    }
}

fn rgb([r, g, b, _]: [u8; 4]) -> Color {
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_frame_size_reserves_status_row() {
        assert_eq!(frame_size(80, 24, false), (80, 48));
        assert_eq!(frame_size(80, 24, true), (80, 46));
        assert_eq!(frame_size(10, 0, true), (10, 0));
    }

    #[test]
    fn test_translate_printable_keys_keep_case() {
        let upper = press(KeyCode::Char('P'), KeyModifiers::SHIFT);
        assert_eq!(translate_key(&upper), Some(Input::Key('P')));
        let lower = press(KeyCode::Char('p'), KeyModifiers::NONE);
        assert_eq!(translate_key(&lower), Some(Input::Key('p')));
    }

    #[test]
    fn test_translate_escape_and_ctrl_c() {
        assert_eq!(
            translate_key(&press(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Input::Key(ESCAPE))
        );
        assert_eq!(
            translate_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Input::Key(ESCAPE))
        );
    }

    #[test]
    fn test_translate_special_keys() {
        let cases = [
            (KeyCode::Up, SpecialKey::Up),
            (KeyCode::Down, SpecialKey::Down),
            (KeyCode::Left, SpecialKey::Left),
            (KeyCode::Right, SpecialKey::Right),
            (KeyCode::PageUp, SpecialKey::PageUp),
            (KeyCode::PageDown, SpecialKey::PageDown),
        ];
        for (code, key) in cases {
            assert_eq!(
                translate_key(&press(code, KeyModifiers::NONE)),
                Some(Input::Special(key))
            );
        }
        assert_eq!(translate_key(&press(KeyCode::F(1), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut event = press(KeyCode::Char('x'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(translate_key(&event), None);
    }

    #[test]
    fn test_status_line_reports_state() {
        let mut state = AppState::default();
        state.lights.toggle(1);
        let line = status_line(&state, 29.5);
        assert!(line.starts_with(env!("CARGO_PKG_NAME")));
        assert!(line.contains("FPS: 29.50"));
        assert!(line.contains("eye (0.0, 0.0, 50.0)"));
        assert!(line.contains("yaw -90"));
        assert!(line.ends_with("lights 0--"));
    }

    #[test]
    fn test_fps_starts_at_zero() {
        let mut fps = FpsCounter::new();
        assert_eq!(fps.frame(), 0.0);
    }
}
