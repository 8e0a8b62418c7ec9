use thiserror::Error;

/// The reason an instruction could not be executed. Instructions detect these
/// before touching any state, so a faulted instruction has no effect.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    #[error("unknown opcode")]
    UnknownOpcode,

    #[error("stack overflow, cannot call another subroutine")]
    StackOverflow,

    #[error("stack underflow, return has nowhere to go")]
    StackUnderflow,

    #[error("flag index too high: {0}")]
    InvalidFlagIndex(u8),

    #[error("plane index too high: {0}")]
    InvalidPlane(u8),

    #[error("memory access out of bounds: {0:#06X}")]
    AddressOutOfBounds(usize),
}

/// A fatal interpreter fault, identifying the faulting instruction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at {address:#06X} (opcode {opcode:#06X})")]
pub struct ExecutionError {
    /// Address of the faulting instruction.
    pub address: u16,
    /// The raw instruction word. Zero if the word itself could not be fetched.
    pub opcode: u16,
    pub kind: FaultKind,
}

/// Errors while obtaining a program image and installing it into memory.
#[derive(Debug, Error)]
pub enum LoadProgramError {
    #[error("could not read program file {path}")]
    CouldNotReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("program of {size} bytes does not fit into {capacity} bytes of program memory")]
    ProgramTooLarge { size: usize, capacity: usize },
}
