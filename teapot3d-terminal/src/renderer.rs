/// Half-block blitter for the 1-bit framebuffer
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};
use std::io::{self, Write};
use teapot3d_core::{Display, Framebuffer, Overlay};

/// Glyphs for a column of two pixels (top, bottom)
fn cell_glyph(top: bool, bottom: bool) -> char {
    match (top, bottom) {
        (false, false) => ' ',
        (true, false) => '▀',
        (false, true) => '▄',
        (true, true) => '█',
    }
}

/// Convert the bitmap to text rows, two pixel rows per line
pub fn bitmap_rows(frame: &Framebuffer) -> Vec<String> {
    let width = frame.width() as i32;
    let height = frame.height() as i32;
    (0..height)
        .step_by(2)
        .map(|y| {
            (0..width)
                .map(|x| cell_glyph(frame.pixel(x, y), frame.pixel(x, y + 1)))
                .collect()
        })
        .collect()
}

/// Draws frames into a terminal opened in the alternate screen
pub struct TerminalDisplay<W: Write> {
    out: W,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Display for TerminalDisplay<W> {
    type Error = io::Error;

    fn present(&mut self, frame: &Framebuffer, overlay: &Overlay) -> io::Result<()> {
        self.out.queue(cursor::MoveTo(0, 0))?;

        self.out.queue(SetForegroundColor(Color::White))?;
        for row in bitmap_rows(frame) {
            self.out.queue(Print(row))?;
            self.out.queue(Clear(ClearType::UntilNewLine))?;
            self.out.queue(Print("\r\n"))?;
        }

        let color = if overlay.is_title_screen() {
            Color::Cyan
        } else {
            Color::Yellow
        };
        self.out.queue(SetForegroundColor(color))?;
        for line in overlay.lines() {
            self.out.queue(Print(line))?;
            self.out.queue(Clear(ClearType::UntilNewLine))?;
            self.out.queue(Print("\r\n"))?;
        }
        self.out.queue(ResetColor)?;

        self.out.flush()
    }
}
