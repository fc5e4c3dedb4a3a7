//! Screen buffer and frame diffing.
//!
//! The `Compositor` holds one frame as a grid of [`StyledCell`]s. Painters
//! place strips into it through a clip region; [`Compositor::diff`] then
//! yields only the cells that changed since the previous frame, which is
//! all the driver needs to write.

use crate::geometry::{Region, Size};

use super::strip::{Strip, StyledCell};

/// One cell that changed between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

/// A frame of terminal cells. `screen[y][x]` is column x of row y.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compositor {
    screen: Vec<Vec<StyledCell>>,
    size: Size,
}

impl Compositor {
    pub fn new(size: Size) -> Self {
        let size = size.max(Size::ZERO);
        Self {
            screen: blank_screen(size),
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole screen as a region.
    pub fn region(&self) -> Region {
        Region::new(0, 0, self.size.width, self.size.height)
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.screen = blank_screen(self.size);
    }

    pub fn resize(&mut self, size: Size) {
        self.size = size.max(Size::ZERO);
        self.clear();
    }

    /// Write strips into the screen. Cells outside `clip` or the screen
    /// are dropped.
    pub fn place_strips(&mut self, strips: &[Strip], clip: Region) {
        let clip = clip.intersection(self.region());
        if clip.is_empty() {
            return;
        }
        for strip in strips {
            if strip.y < clip.y || strip.y >= clip.bottom() {
                continue;
            }
            let row = &mut self.screen[strip.y as usize];
            for (i, cell) in strip.cells.iter().enumerate() {
                let x = strip.x_offset + i as i32;
                if x >= clip.x && x < clip.right() {
                    row[x as usize] = *cell;
                }
            }
        }
    }

    pub fn get_cell(&self, x: i32, y: i32) -> Option<&StyledCell> {
        if x < 0 || y < 0 {
            return None;
        }
        self.screen.get(y as usize)?.get(x as usize)
    }

    /// Cells of this frame that differ from `previous`. Cells outside the
    /// previous frame always count as changed.
    pub fn diff(&self, previous: &Compositor) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.screen.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let before = previous.screen.get(y).and_then(|r| r.get(x));
                if before != Some(cell) {
                    updates.push(CellUpdate {
                        x: x as u16,
                        y: y as u16,
                        cell: *cell,
                    });
                }
            }
        }
        updates
    }

    /// The frame as text: one line per row with trailing blanks trimmed.
    pub fn to_text(&self) -> String {
        let lines: Vec<String> = self
            .screen
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|c| c.ch).collect();
                line.trim_end().to_owned()
            })
            .collect();
        lines.join("\n")
    }
}

fn blank_screen(size: Size) -> Vec<Vec<StyledCell>> {
    vec![vec![StyledCell::blank(); size.width as usize]; size.height as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::strip::CellStyle;

    #[test]
    fn strips_are_clipped() {
        let mut c = Compositor::new(Size::new(10, 3));
        let strips = [
            Strip::text(0, 0, "outside", CellStyle::PLAIN),
            Strip::text(0, 1, "abcdefgh", CellStyle::PLAIN),
        ];
        c.place_strips(&strips, Region::new(2, 1, 4, 1));
        assert_eq!(c.to_text(), "\n  cdef\n");
    }

    #[test]
    fn strips_past_the_screen_edge_are_dropped() {
        let mut c = Compositor::new(Size::new(4, 1));
        c.place_strips(&[Strip::text(2, 0, "xyz", CellStyle::PLAIN)], c.region());
        assert_eq!(c.to_text(), "  xy");
        c.place_strips(&[Strip::text(0, 5, "no", CellStyle::PLAIN)], c.region());
        assert_eq!(c.get_cell(4, 0), None);
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let before = Compositor::new(Size::new(5, 2));
        let mut after = before.clone();
        after.place_strips(&[Strip::text(1, 1, "ok", CellStyle::PLAIN)], after.region());
        let updates = after.diff(&before);
        assert_eq!(updates.len(), 2);
        assert_eq!((updates[0].x, updates[0].y, updates[0].cell.ch), (1, 1, 'o'));
        assert!(after.diff(&after).is_empty());
    }

    #[test]
    fn diff_against_smaller_frame_covers_new_area() {
        let small = Compositor::new(Size::new(1, 1));
        let big = Compositor::new(Size::new(2, 2));
        assert_eq!(big.diff(&small).len(), 3);
    }

    #[test]
    fn resize_blanks() {
        let mut c = Compositor::new(Size::new(3, 1));
        c.place_strips(&[Strip::text(0, 0, "abc", CellStyle::PLAIN)], c.region());
        c.resize(Size::new(2, 2));
        assert_eq!(c.to_text(), "\n");
    }
}
