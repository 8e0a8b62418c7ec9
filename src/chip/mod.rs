pub mod chip8;
mod error;
mod profile;

use std::fs;
use std::path::Path;

use cursive::CbSink;

pub use error::{ExecutionError, FaultKind, LoadProgramError};
pub use profile::{MemoryLayout, Profile};

/// What a single execution cycle asks of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Keep calling `cycle`.
    Continue,
    /// The program requested to exit. The program counter stays on the
    /// exit instruction, so calling `cycle` again requests exit again.
    Exit,
}

pub trait Chip {
    /// Address type used to identify a single input pin (key).
    type PinAddress;

    /// Executes one instruction and then lets the timers decay by `elapsed`
    /// seconds. Callers that run several cycles per rendered frame pass `0.0`
    /// to all but one of them.
    fn cycle(&mut self, elapsed: f64) -> Result<Signal, ExecutionError>;

    /// Returns the cells of output plane `plane` in the current geometry
    /// (see `output_geometry`), or `None` if the chip has no such plane.
    fn read_output_plane(&self, plane: usize) -> Option<&[u8]>;

    /// Width and height of the output planes as currently addressed.
    fn output_geometry(&self) -> (usize, usize);

    /// Whether the output planes changed since `acknowledge_output` was last called.
    fn output_changed(&self) -> bool;

    /// Marks the current output as consumed.
    fn acknowledge_output(&mut self);

    /// Whether the tone output should currently sound.
    fn tone_active(&self) -> bool;

    fn set_input_pin(&mut self, pin: Self::PinAddress, value: bool);

    fn reset_input_pins(&mut self);
}

/// A chip that knows how to push its output to a cursive user interface.
pub trait ChipWithCursiveDisplay {
    fn update_ui(&mut self, gfx_sink: &CbSink);
}

/// Reads a program image from `path`. The size is checked against the
/// target profile when the image is installed into a chip.
pub fn load_program_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, LoadProgramError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| LoadProgramError::CouldNotReadFile {
        path: path.display().to_string(),
        source,
    })
}
