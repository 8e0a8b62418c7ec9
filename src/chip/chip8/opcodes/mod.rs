#[macro_use]
mod macros;
mod arithmetic_and_logic;
mod graphics;
mod input_and_timers;
mod program_flow;
mod system;
mod transfer;

use core::convert::TryFrom;
use std::marker::PhantomData;

use crate::chip::{
    chip8::{
        opcodes::{
            arithmetic_and_logic::{
                AddIndexInstruction, AddInstruction, AddRegInstruction, AndInstruction,
                LdInstruction, LdLongInstruction, LdrInstruction, MovInstruction, OrInstruction,
                RndInstruction, ShlInstruction, ShrInstruction, SubInstruction, SubnInstruction,
                XorInstruction,
            },
            graphics::{BigFontInstruction, DrwInstruction, FontInstruction, PlaneInstruction},
            input_and_timers::{
                GetDelayInstruction, SetDelayInstruction, SetSoundInstruction, SknpInstruction,
                SkpInstruction, WaitKeyInstruction,
            },
            program_flow::{
                CallInstruction, JmpInstruction, JmprInstruction, SeInstruction, SneInstruction,
                SreInstruction, SrneInstruction,
            },
            system::{
                ClsInstruction, ExitInstruction, HighInstruction, LowInstruction, RetInstruction,
                ScdInstruction, SclInstruction, ScrInstruction, ScuInstruction,
            },
            transfer::{
                BcdInstruction, LoadFlagsInstruction, LoadRangeInstruction, ReadInstruction,
                SaveFlagsInstruction, SaveRangeInstruction, StorInstruction,
            },
        },
        Chip8,
    },
    FaultKind, Profile, Signal,
};

/// Represents a Chip 8 opcode. A Chip 8 opcode is two bytes long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Opcode {
    /// The instruction class is the most significant nibble of the opcode.
    /// Note that we use a u8 to represent the instruction class here for
    /// convenience, but ensure that a valid opcode can only be constructed
    /// if the four most significant bits of the u8 are 0.
    instruction_class: u8,
    /// The payload constitutes the remaining nibbles of the opcode.
    payload: OpcodePayload,
}

/// Represents the payload of a Chip 8 opcode. That is the opcode without
/// the most significant nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct OpcodePayload {
    /// The nibbles representing the payload. Note that we use the u8 type
    /// here for convenience, but ensure that valid payloads can only be
    /// constructed if the four most significant bits of the u8 are 0.
    bytes: [u8; 3],
}

impl OpcodePayload {
    /// Interprets the opcode payload as an address in the range 0x000 to
    /// 0xFFF (inclusive) and returns an u16 containing this address.
    fn address(&self) -> u16 {
        (self.bytes[0] as u16) << 8 | (self.bytes[1] as u16) << 4 | self.bytes[2] as u16
    }

    /// Interprets the most significant nibble of the payload as a register
    /// address in range 0x0 - 0xF (inclusive) and the remaining nibbles
    /// as a value in range 0x00 - 0xFF (inclusive).
    fn reg_and_value(&self) -> (u8, u8) {
        (self.bytes[0], (self.bytes[1] << 4) | self.bytes[2])
    }

    /// Interprets the opcode payload as three operands, each of size
    /// one nibble, i.e., in range 0x0 - 0xF (inclusive).
    fn operands(&self) -> (u8, u8, u8) {
        (self.bytes[0], self.bytes[1], self.bytes[2])
    }
}

impl Opcode {
    /// Constructs a new `Opcode` given its byte representation.
    pub(super) fn new(opcode: &[u8; 2]) -> Opcode {
        Opcode {
            instruction_class: opcode[0] >> 4,
            payload: OpcodePayload {
                bytes: [opcode[0] & 0xF, opcode[1] >> 4, opcode[1] & 0xF],
            },
        }
    }

    /// The opcode as a big-endian 16-bit word.
    pub(super) fn word(&self) -> u16 {
        (self.instruction_class as u16) << 12 | self.payload.address()
    }

    /// Succeeds if the bits of `self` selected by `mask` equal `pattern`.
    fn expect_pattern(&self, mask: u16, pattern: u16) -> Result<(), InstructionParsingError> {
        let word = self.word();
        if word & mask == pattern {
            Ok(())
        } else {
            Err(InstructionParsingError::PatternMismatch {
                word,
                mask,
                pattern,
            })
        }
    }
}

/// Captures errors when converting opcodes to their respective instruction object.
#[derive(Debug, thiserror::Error)]
pub(super) enum InstructionParsingError {
    #[error("opcode {word:04X} masked with {mask:04X} does not match {pattern:04X}")]
    PatternMismatch { word: u16, mask: u16, pattern: u16 },
}

pub(super) type ExecutionResult = Result<Signal, FaultKind>;

/// Represents an opcode that can be executed.
pub(super) trait ExecutableOpcode {
    /// Executes `self` relative to the given state. Note that this
    /// method will in-place modify the given state. A fault is raised
    /// before any part of the state has been modified.
    fn execute(&self, state: &mut Chip8) -> ExecutionResult;
}

/// Represents an opcode without payload.
pub(super) struct InstructionWithoutPayload<T> {
    instruction: PhantomData<T>,
}

/// Represents an opcode that expects the payload to be an address.
pub(super) struct InstructionWithAddress<T> {
    instruction: PhantomData<T>,
    address: u16,
}

/// Represents an opcode that expects the payload to be three operands.
pub(super) struct InstructionWithOperands<T> {
    instruction: PhantomData<T>,
    op1: u8,
    op2: u8,
    op3: u8,
}

/// Represents an opcode that expects the payload to be a register pointer and a value.
pub(super) struct InstructionWithRegAndValue<T> {
    instruction: PhantomData<T>,
    reg: u8,
    value: u8,
}

type Decoder = fn(Opcode) -> Option<Box<dyn ExecutableOpcode>>;

fn decode_as<T>(opcode: Opcode) -> Option<Box<dyn ExecutableOpcode>>
where
    T: ExecutableOpcode + TryFrom<Opcode> + 'static,
{
    T::try_from(opcode)
        .ok()
        .map(|instruction| Box::new(instruction) as Box<dyn ExecutableOpcode>)
}

/// Opcodes every profile understands. Patterns do not overlap, so the order
/// only matters for lookup speed.
static COMMON_OPCODES: &[Decoder] = opcode_table![
    ClsInstruction,
    RetInstruction,
    ScdInstruction,
    ScrInstruction,
    SclInstruction,
    LowInstruction,
    HighInstruction,
    JmpInstruction,
    CallInstruction,
    SeInstruction,
    SneInstruction,
    SreInstruction,
    LdrInstruction,
    AddInstruction,
    MovInstruction,
    OrInstruction,
    AndInstruction,
    XorInstruction,
    AddRegInstruction,
    SubInstruction,
    ShrInstruction,
    SubnInstruction,
    ShlInstruction,
    SrneInstruction,
    LdInstruction,
    JmprInstruction,
    RndInstruction,
    DrwInstruction,
    SkpInstruction,
    SknpInstruction,
    GetDelayInstruction,
    WaitKeyInstruction,
    SetDelayInstruction,
    SetSoundInstruction,
    AddIndexInstruction,
    FontInstruction,
    BigFontInstruction,
    BcdInstruction,
    StorInstruction,
    ReadInstruction,
];

static XO_CHIP_OPCODES: &[Decoder] = opcode_table![
    ScuInstruction,
    ExitInstruction,
    SaveRangeInstruction,
    LoadRangeInstruction,
    LdLongInstruction,
    PlaneInstruction,
    SaveFlagsInstruction,
    LoadFlagsInstruction,
];

/// The opcode patterns of one profile. The profile specific extension is
/// consulted before the common opcodes, first match wins.
#[derive(Clone, Copy)]
pub(super) struct OpcodeTable {
    extension: &'static [Decoder],
    common: &'static [Decoder],
}

impl OpcodeTable {
    pub(super) fn for_profile(profile: Profile) -> Self {
        let extension: &'static [Decoder] = match profile {
            Profile::Schip => &[],
            Profile::XoChip | Profile::XoChipStretched => XO_CHIP_OPCODES,
        };
        OpcodeTable {
            extension,
            common: COMMON_OPCODES,
        }
    }

    /// Returns the instruction `opcode` decodes to, if any pattern matches.
    pub(super) fn decode(&self, opcode: Opcode) -> Option<Box<dyn ExecutableOpcode>> {
        self.extension
            .iter()
            .chain(self.common.iter())
            .find_map(|decode| decode(opcode))
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04X}", self.word())
    }
}
