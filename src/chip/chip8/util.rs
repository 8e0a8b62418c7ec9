use crate::chip::chip8::{constants::CHIP8_FLAG_REGISTER, Chip8};

/// The 4-byte "load 16-bit index" instruction that long skips step over.
const LONG_INSTRUCTION: u16 = 0xF000;

pub fn conditional_skip<T>(opcode: &T, state: &mut Chip8, f: fn(&T, &Chip8) -> bool) {
    if f(opcode, state) {
        skip_next_instruction(state);
    }
}

/// Steps over the next instruction. On profiles with long skips, an
/// `F000 NNNN` is stepped over as a whole.
fn skip_next_instruction(state: &mut Chip8) {
    increment_program_counter(state);
    if state.profile.skips_long_instructions()
        && state.memory.read_word(state.program_counter as usize) == Ok(LONG_INSTRUCTION)
    {
        increment_program_counter(state);
    }
}

pub fn increment_program_counter(state: &mut Chip8) {
    state.program_counter = state.program_counter.wrapping_add(2);
}

pub fn set_flag(state: &mut Chip8, value: bool) {
    state.registers[CHIP8_FLAG_REGISTER] = value as u8;
}
