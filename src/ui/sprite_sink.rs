use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::animation::FrameSink;
use crate::sprites::Sprite;

/// Draws sprites into a ratatui buffer. Coordinates handed to `blit` are
/// relative to `origin`; anything outside `clip` is dropped and spaces leave
/// the underlying cell untouched.
pub struct BufferSink<'a> {
    buf: &'a mut Buffer,
    clip: Rect,
    origin: (i32, i32),
    style: Style,
}

impl<'a> BufferSink<'a> {
    pub fn new(buf: &'a mut Buffer, clip: Rect, origin: (i32, i32), style: Style) -> Self {
        let clip = clip.intersection(buf.area);
        Self {
            buf,
            clip,
            origin,
            style,
        }
    }

    fn cell_position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        let inside = x >= self.clip.left()
            && x < self.clip.right()
            && y >= self.clip.top()
            && y < self.clip.bottom();
        inside.then_some((x, y))
    }
}

impl FrameSink<Sprite> for BufferSink<'_> {
    fn blit(&mut self, frame: &Sprite, x: i32, y: i32) {
        let left = self.origin.0 + x;
        let top = self.origin.1 + y;

        for (dy, row) in frame.rows().iter().enumerate() {
            let row_y = top + dy as i32;
            for (dx, ch) in row.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let Some(pos) = self.cell_position(left + dx as i32, row_y) else {
                    continue;
                };
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_char(ch).set_style(self.style);
                }
            }
        }
    }
}
