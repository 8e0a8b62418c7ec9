use crate::chip::{
    chip8::constants::{
        CHIP8_HIRES_HEIGHT, CHIP8_HIRES_WIDTH, CHIP8_HORIZONTAL_SCROLL, CHIP8_LORES_HEIGHT,
        CHIP8_LORES_WIDTH, CHIP8_PLANE_LEN,
    },
    FaultKind,
};

/// Direction and distance of a scroll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Scroll {
    Down(usize),
    Up(usize),
    Left,
    Right,
}

/// One or two bitplanes of one byte per pixel. Every plane is backed by
/// enough cells for the high resolution geometry; in low resolution only the
/// first `64 * 32` cells are addressed, row by row.
pub(super) struct Framebuffer {
    planes: Vec<Box<[u8]>>,

    /// Whether the planes are addressed as 128x64 instead of 64x32.
    hires: bool,

    /// Bit `n` set means plane `n` takes part in clear, scroll and draw.
    plane_mask: u8,

    /// A flag that indicates whether the planes changed since it was last
    /// acknowledged.
    redraw: bool,
}

impl Framebuffer {
    pub(super) fn new(plane_count: usize) -> Self {
        Framebuffer {
            planes: (0..plane_count)
                .map(|_| vec![0; CHIP8_PLANE_LEN].into_boxed_slice())
                .collect(),
            hires: false,
            plane_mask: 1,
            redraw: false,
        }
    }

    pub(super) fn is_hires(&self) -> bool {
        self.hires
    }

    /// Width and height as currently addressed.
    pub(super) fn geometry(&self) -> (usize, usize) {
        if self.hires {
            (CHIP8_HIRES_WIDTH, CHIP8_HIRES_HEIGHT)
        } else {
            (CHIP8_LORES_WIDTH, CHIP8_LORES_HEIGHT)
        }
    }

    pub(super) fn plane_mask(&self) -> u8 {
        self.plane_mask
    }

    /// Selects the planes affected by later operations. Fails for masks
    /// naming planes this framebuffer does not have.
    pub(super) fn select_planes(&mut self, mask: u8) -> Result<(), FaultKind> {
        if (mask as usize) >= (1 << self.planes.len()) {
            return Err(FaultKind::InvalidPlane(mask));
        }
        self.plane_mask = mask;
        Ok(())
    }

    /// Zeroes the whole backing store of the selected planes.
    pub(super) fn clear(&mut self) {
        for plane in self.active_planes_mut() {
            plane.fill(0);
        }
        self.redraw = true;
    }

    /// Switches the addressing mode. Always clears every plane.
    pub(super) fn set_resolution(&mut self, hires: bool) {
        self.hires = hires;
        for plane in self.planes.iter_mut() {
            plane.fill(0);
        }
        self.redraw = true;
    }

    /// Shifts the selected planes, filling the vacated edge with zeroes.
    pub(super) fn scroll(&mut self, scroll: Scroll) {
        let (width, height) = self.geometry();
        for plane in self.active_planes_mut() {
            let plane = &mut plane[..width * height];
            let len = plane.len();
            match scroll {
                Scroll::Down(rows) => {
                    let cells = rows.min(height) * width;
                    plane.copy_within(..len - cells, cells);
                    plane[..cells].fill(0);
                }
                Scroll::Up(rows) => {
                    let cells = rows.min(height) * width;
                    plane.copy_within(cells.., 0);
                    plane[len - cells..].fill(0);
                }
                Scroll::Right => {
                    for row in plane.chunks_mut(width) {
                        row.copy_within(..width - CHIP8_HORIZONTAL_SCROLL, CHIP8_HORIZONTAL_SCROLL);
                        row[..CHIP8_HORIZONTAL_SCROLL].fill(0);
                    }
                }
                Scroll::Left => {
                    for row in plane.chunks_mut(width) {
                        row.copy_within(CHIP8_HORIZONTAL_SCROLL.., 0);
                        row[width - CHIP8_HORIZONTAL_SCROLL..].fill(0);
                    }
                }
            }
        }
        self.redraw = true;
    }

    /// XORs `sprite` into the selected planes with its top left corner at
    /// `(x, y)`, wrapping around the edges. Each row of the sprite is
    /// `row_len` bytes wide. Returns whether a lit pixel was toggled off.
    pub(super) fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8], row_len: usize) -> bool {
        let (width, height) = self.geometry();
        let mut collision = false;

        for (sy, row) in sprite.chunks(row_len).enumerate() {
            for sx in 0..row.len() * 8 {
                if row[sx / 8] & (0x80 >> (sx % 8)) == 0 {
                    continue;
                }
                let pos = (x as usize + sx) % width + ((y as usize + sy) % height) * width;
                for plane in self.active_planes_mut() {
                    collision |= plane[pos] != 0;
                    plane[pos] ^= 1;
                }
            }
        }

        self.redraw = true;
        collision
    }

    /// The cells of plane `index` in the current geometry.
    pub(super) fn plane(&self, index: usize) -> Option<&[u8]> {
        let (width, height) = self.geometry();
        self.planes.get(index).map(|plane| &plane[..width * height])
    }

    pub(super) fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub(super) fn acknowledge_redraw(&mut self) {
        self.redraw = false;
    }

    fn active_planes_mut(&mut self) -> impl Iterator<Item = &mut [u8]> + '_ {
        let mask = self.plane_mask;
        self.planes
            .iter_mut()
            .enumerate()
            .filter(move |(i, _)| mask & (1 << *i) != 0)
            .map(|(_, plane)| &mut plane[..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(framebuffer: &Framebuffer, plane: usize) -> Vec<usize> {
        framebuffer
            .plane(plane)
            .unwrap()
            .iter()
            .enumerate()
            .filter(|(_, &cell)| cell != 0)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_clear_zeroes_backing_store_in_lores() {
        let mut fb = Framebuffer::new(1);
        fb.set_resolution(true);
        fb.draw_sprite(120, 60, &[0xFF], 1);
        // back to lores without clearing, by hand
        fb.hires = false;
        fb.acknowledge_redraw();
        fb.clear();
        assert!(fb.planes[0].iter().all(|&cell| cell == 0));
        assert_eq!(fb.planes[0].len(), 8192);
        assert!(fb.needs_redraw());
    }

    #[test]
    fn test_clear_only_selected_planes() {
        let mut fb = Framebuffer::new(2);
        fb.select_planes(3).unwrap();
        fb.draw_sprite(0, 0, &[0x80], 1);
        fb.select_planes(2).unwrap();
        fb.clear();
        assert_eq!(lit(&fb, 0), vec![0]);
        assert!(lit(&fb, 1).is_empty());
    }

    #[test]
    fn test_select_planes_range() {
        let mut single = Framebuffer::new(1);
        assert_eq!(single.select_planes(2), Err(FaultKind::InvalidPlane(2)));
        assert!(single.select_planes(0).is_ok());
        assert!(single.select_planes(1).is_ok());

        let mut dual = Framebuffer::new(2);
        assert!(dual.select_planes(3).is_ok());
        assert_eq!(dual.select_planes(4), Err(FaultKind::InvalidPlane(4)));
        assert_eq!(dual.plane_mask(), 3);
    }

    #[test]
    fn test_draw_wraps_in_lores() {
        let mut fb = Framebuffer::new(1);
        fb.draw_sprite(62, 31, &[0xF0, 0x80], 1);
        // (62,31) (63,31) (0,31) (1,31) then (62,0)
        assert_eq!(lit(&fb, 0), vec![62, 31 * 64, 31 * 64 + 1, 31 * 64 + 62, 31 * 64 + 63]);
    }

    #[test]
    fn test_draw_collision_and_restore() {
        let mut fb = Framebuffer::new(1);
        assert!(!fb.draw_sprite(3, 4, &[0xAA, 0x55], 1));
        assert!(fb.draw_sprite(3, 4, &[0xAA, 0x55], 1));
        assert!(lit(&fb, 0).is_empty());
    }

    #[test]
    fn test_draw_collision_across_planes() {
        let mut fb = Framebuffer::new(2);
        fb.select_planes(2).unwrap();
        fb.draw_sprite(0, 0, &[0x80], 1);
        fb.select_planes(3).unwrap();
        // plane 0 was dark, plane 1 was lit
        assert!(fb.draw_sprite(0, 0, &[0x80], 1));
        assert_eq!(lit(&fb, 0), vec![0]);
        assert!(lit(&fb, 1).is_empty());
    }

    #[test]
    fn test_draw_sets_redraw_even_without_pixels() {
        let mut fb = Framebuffer::new(1);
        assert!(!fb.draw_sprite(0, 0, &[0x00], 1));
        assert!(fb.needs_redraw());
    }

    #[test]
    fn test_wide_sprite_rows() {
        let mut fb = Framebuffer::new(1);
        fb.set_resolution(true);
        fb.draw_sprite(0, 0, &[0x00, 0x01, 0x80, 0x00], 2);
        assert_eq!(lit(&fb, 0), vec![15, 128]);
    }

    #[test]
    fn test_scroll_down_and_up() {
        let mut fb = Framebuffer::new(1);
        fb.draw_sprite(5, 0, &[0x80], 1);
        fb.scroll(Scroll::Down(3));
        assert_eq!(lit(&fb, 0), vec![3 * 64 + 5]);
        fb.scroll(Scroll::Up(2));
        assert_eq!(lit(&fb, 0), vec![64 + 5]);
        fb.scroll(Scroll::Up(2));
        assert!(lit(&fb, 0).is_empty());
    }

    #[test]
    fn test_scroll_left_and_right() {
        let mut fb = Framebuffer::new(1);
        fb.set_resolution(true);
        fb.draw_sprite(126, 1, &[0x80], 1);
        fb.scroll(Scroll::Left);
        assert_eq!(lit(&fb, 0), vec![128 + 122]);
        fb.scroll(Scroll::Right);
        fb.scroll(Scroll::Right);
        // pushed off the right edge, not wrapped into the next row
        assert!(lit(&fb, 0).is_empty());
    }

    #[test]
    fn test_scroll_only_selected_planes() {
        let mut fb = Framebuffer::new(2);
        fb.select_planes(3).unwrap();
        fb.draw_sprite(0, 0, &[0x80], 1);
        fb.select_planes(1).unwrap();
        fb.scroll(Scroll::Down(1));
        assert_eq!(lit(&fb, 0), vec![64]);
        assert_eq!(lit(&fb, 1), vec![0]);
    }

    #[test]
    fn test_set_resolution_clears_all_planes() {
        let mut fb = Framebuffer::new(2);
        fb.select_planes(3).unwrap();
        fb.draw_sprite(0, 0, &[0xFF], 1);
        fb.select_planes(1).unwrap();
        fb.set_resolution(true);
        assert!(fb.is_hires());
        assert!(lit(&fb, 0).is_empty());
        assert!(lit(&fb, 1).is_empty());
        assert_eq!(fb.plane(0).unwrap().len(), 128 * 64);
    }
}
