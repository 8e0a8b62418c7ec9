/// CHIP-8 constants.
mod constants;
/// Cursive display output.
pub mod cursive_display;
/// The display planes.
mod framebuffer;
/// Key states and the press/release tracking of the blocking key read.
mod keypad;
/// The address space.
mod memory;
/// Decoding of opcodes and their execution.
mod opcodes;
/// Delay and sound timers.
mod timers;
/// Convenience functions for modification of the CHIP-8 state.
mod util;


pub use timers::Timer;

use crate::chip::{
    chip8::{
        constants::{
            CHIP8_FLAG_STORE_LEN, CHIP8_KEY_COUNT, CHIP8_PROGRAM_OFFSET, CHIP8_REGISTER_COUNT,
            CHIP8_STACK_DEPTH,
        },
        framebuffer::Framebuffer,
        keypad::Keypad,
        memory::Memory,
        opcodes::{Opcode, OpcodeTable},
        timers::TimerPair,
    },
    Chip, ExecutionError, FaultKind, LoadProgramError, Profile, Signal,
};

/// Represents the state of an SCHIP or XO-CHIP interpreter.
pub struct Chip8 {
    /// The instruction set variant, fixed at construction.
    profile: Profile,

    /// Opcode patterns of `profile`, in match order.
    opcode_table: OpcodeTable,

    /// Main memory, sized by `profile`.
    memory: Memory,

    /// 16 registers where each can store one byte. Register 0xF doubles as
    /// carry, borrow and collision flag.
    registers: [u8; CHIP8_REGISTER_COUNT],

    /// The index register
    index: u16,

    /// The program counter
    program_counter: u16,

    /// Return addresses. There are no instructions that modify the stack
    /// other than call and return.
    stack: [u16; CHIP8_STACK_DEPTH],

    /// Number of occupied entries in `stack`.
    stack_pointer: u8,

    /// The display planes. Usually directly wired up to a screen, but any
    /// consumer may read them through the `Chip` trait.
    framebuffer: Framebuffer,

    timers: TimerPair,

    /// The input pins. Usually wired up to keys.
    keypad: Keypad,

    /// Persistent flag bytes. Only present on profiles that have them.
    flags: Option<[u8; CHIP8_FLAG_STORE_LEN]>,

    /// When set, the exit opcode does nothing instead of signalling exit.
    ignore_exit: bool,
}

impl Chip for Chip8 {
    /// The pins can actually be addressed by using just half a byte.
    /// However, we use a whole byte here and assert whether it is in the right
    /// range, because it is more convenient to handle.
    type PinAddress = u8;

    fn cycle(&mut self, elapsed: f64) -> Result<Signal, ExecutionError> {
        let address = self.program_counter;
        let opcode = self.next_instruction().map_err(|kind| ExecutionError {
            address,
            opcode: 0,
            kind,
        })?;

        log::trace!("{:#06X}: {}", address, opcode);

        let signal = self
            .opcode_table
            .decode(opcode)
            .ok_or(FaultKind::UnknownOpcode)
            .and_then(|instruction| instruction.execute(self))
            .map_err(|kind| {
                let error = ExecutionError {
                    address,
                    opcode: opcode.word(),
                    kind,
                };
                log::debug!("{}", error);
                error
            })?;

        self.timers.decay(elapsed);

        Ok(signal)
    }

    fn read_output_plane(&self, plane: usize) -> Option<&[u8]> {
        self.framebuffer.plane(plane)
    }

    fn output_geometry(&self) -> (usize, usize) {
        self.framebuffer.geometry()
    }

    fn output_changed(&self) -> bool {
        self.framebuffer.needs_redraw()
    }

    fn acknowledge_output(&mut self) {
        self.framebuffer.acknowledge_redraw();
    }

    fn tone_active(&self) -> bool {
        self.timers.get(Timer::Sound) > 0
    }

    fn set_input_pin(&mut self, pin: u8, value: bool) {
        assert!((pin as usize) < CHIP8_KEY_COUNT);
        self.keypad.set(pin as usize, value);
    }

    fn reset_input_pins(&mut self) {
        self.keypad.reset();
    }
}

impl Chip8 {
    /// Constructs a new interpreter for `profile` and installs `program` at
    /// `CHIP8_PROGRAM_OFFSET`, after the charset. The program counter starts
    /// at the first program byte, everything else starts zeroed, low
    /// resolution, with only the first plane selected.
    pub fn new(program: &[u8], profile: Profile) -> Result<Self, LoadProgramError> {
        let memory = Memory::new(profile.memory_layout(), program)?;

        log::debug!(
            "installed {} byte program into {} bytes of {:?} memory",
            program.len(),
            memory.len(),
            profile
        );

        Ok(Chip8 {
            profile,
            opcode_table: OpcodeTable::for_profile(profile),
            memory,
            registers: [0; CHIP8_REGISTER_COUNT],
            index: 0,
            program_counter: CHIP8_PROGRAM_OFFSET,
            stack: [0; CHIP8_STACK_DEPTH],
            stack_pointer: 0,
            framebuffer: Framebuffer::new(profile.plane_count()),
            timers: TimerPair::default(),
            keypad: Keypad::default(),
            flags: if profile.has_flag_store() {
                Some([0; CHIP8_FLAG_STORE_LEN])
            } else {
                None
            },
            ignore_exit: false,
        })
    }

    /// Fetches the instruction at `self.program_counter`.
    fn next_instruction(&self) -> Result<Opcode, FaultKind> {
        let bytes = self.memory.slice(self.program_counter as usize, 2)?;
        Ok(Opcode::new(&[bytes[0], bytes[1]]))
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn registers(&self) -> &[u8; CHIP8_REGISTER_COUNT] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.index
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    /// Number of return addresses currently on the stack.
    pub fn stack_depth(&self) -> usize {
        self.stack_pointer as usize
    }

    pub fn timer(&self, which: Timer) -> u8 {
        self.timers.get(which)
    }

    /// The whole address space, including charset and program.
    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn is_hires(&self) -> bool {
        self.framebuffer.is_hires()
    }

    /// The planes drawing currently applies to, one bit per plane.
    pub fn plane_mask(&self) -> u8 {
        self.framebuffer.plane_mask()
    }

    /// The persistent flag bytes, for profiles that have them. Consumers
    /// read these back at shutdown to persist them.
    pub fn flags(&self) -> Option<&[u8; CHIP8_FLAG_STORE_LEN]> {
        self.flags.as_ref()
    }

    /// Seeds the flag store from previously persisted bytes. Extra bytes are
    /// ignored, missing ones stay zero. Does nothing on profiles without a
    /// flag store.
    pub fn seed_flags(&mut self, persisted: &[u8]) {
        match self.flags.as_mut() {
            Some(flags) => {
                let len = persisted.len().min(CHIP8_FLAG_STORE_LEN);
                flags[..len].copy_from_slice(&persisted[..len]);
            }
            None => log::debug!("{:?} has no flag store, ignoring seed", self.profile),
        }
    }

    /// Makes the exit opcode a plain no-op.
    pub fn set_ignore_exit(&mut self, ignore_exit: bool) {
        self.ignore_exit = ignore_exit;
    }
}
