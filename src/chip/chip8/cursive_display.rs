use crate::chip::{chip8::Chip8, Chip, ChipWithCursiveDisplay};

use cursive::{
    direction::Direction,
    event::{Event, EventResult},
    theme::{Color, ColorStyle},
    view::{CannotFocus, Nameable, View},
    views::{NamedView, Panel},
    CbSink, Cursive, Printer, Vec2,
};

/// Name under which the screen panel is registered.
pub const SCREEN_NAME: &str = "screen";

const TITLE: &str = "chippy";
const TITLE_WITH_TONE: &str = "chippy ♪";

const COLOR_OFF: Color = Color::Rgb(20, 50, 80);
const COLOR_PLANE_A: Color = Color::Rgb(100, 255, 100);
const COLOR_PLANE_B: Color = Color::Rgb(255, 100, 100);
const COLOR_BOTH: Color = Color::Rgb(255, 255, 100);

/// A snapshot of the display planes of a chip. Each cell holds one bit per
/// plane, plane 0 in the lowest bit.
pub struct Display {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Display {
    /// An unlit display of the given size.
    pub fn blank(width: usize, height: usize) -> Self {
        Display {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Combines all output planes of `chip` into a display.
    pub fn capture<C: Chip>(chip: &C) -> Self {
        let (width, height) = chip.output_geometry();
        let mut display = Display::blank(width, height);
        let mut plane = 0;
        while let Some(cells) = chip.read_output_plane(plane) {
            for (pixel, &cell) in display.pixels.iter_mut().zip(cells) {
                if cell != 0 {
                    *pixel |= 1 << plane;
                }
            }
            plane += 1;
        }
        display
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[x + self.width * y]
    }

    fn color(pixel: u8) -> Color {
        match pixel {
            0 => COLOR_OFF,
            1 => COLOR_PLANE_A,
            2 => COLOR_PLANE_B,
            _ => COLOR_BOTH,
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::blank(64, 32)
    }
}

/// Implements cursive::view::View for Display to enable drawing it
/// as a View out of the box.
impl View for Display {
    fn draw(&self, printer: &Printer) {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = Display::color(self.pixel(x, y));
                printer.with_color(ColorStyle::new(color, color), |printer| {
                    printer.print((x, y), " ");
                });
            }
        }
    }

    fn take_focus(&mut self, _: Direction) -> Result<EventResult, CannotFocus> {
        Ok(EventResult::Consumed(None))
    }

    fn on_event(&mut self, _event: Event) -> EventResult {
        EventResult::Ignored
    }

    fn required_size(&mut self, _: Vec2) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// The titled panel holding the display, ready to be added as a layer.
pub fn screen() -> NamedView<Panel<Display>> {
    Panel::new(Display::default())
        .title(TITLE)
        .with_name(SCREEN_NAME)
}

/// Marks the screen title while the tone sounds.
pub fn show_tone(siv: &mut Cursive, active: bool) {
    siv.call_on_name(SCREEN_NAME, |panel: &mut Panel<Display>| {
        panel.set_title(if active { TITLE_WITH_TONE } else { TITLE });
    });
}

impl ChipWithCursiveDisplay for Chip8 {
    fn update_ui(&mut self, gfx_sink: &CbSink) {
        if !self.output_changed() {
            return;
        }
        let display = Display::capture(&*self);
        let sent = gfx_sink.send(Box::new(move |s: &mut Cursive| {
            s.call_on_name(SCREEN_NAME, |panel: &mut Panel<Display>| {
                *panel.get_inner_mut() = display;
            });
        }));
        if sent.is_err() {
            log::warn!("user interface is gone, dropping display update");
        }
        self.acknowledge_output();
    }
}
