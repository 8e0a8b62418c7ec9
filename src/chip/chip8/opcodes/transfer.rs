use crate::chip::{
    chip8::{
        constants::CHIP8_FLAG_STORE_LEN,
        opcodes::{ExecutableOpcode, ExecutionResult},
        util, Chip8,
    },
    FaultKind, Signal,
};

define_instruction_with_reg_and_value!(Bcd, BcdInstruction, 0xF0FF, 0xF033);
impl ExecutableOpcode for BcdInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let value = state.registers[self.reg as usize];
        let digits = state.memory.slice_mut(state.index as usize, 3)?;
        digits[0] = value / 100;
        digits[1] = value / 10 % 10;
        digits[2] = value % 10;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Stor, StorInstruction, 0xF0FF, 0xF055);
impl ExecutableOpcode for StorInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let len = self.reg as usize + 1;
        state
            .memory
            .slice_mut(state.index as usize, len)?
            .copy_from_slice(&state.registers[..len]);
        state.index = state.index.wrapping_add(len as u16);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Read, ReadInstruction, 0xF0FF, 0xF065);
impl ExecutableOpcode for ReadInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let len = self.reg as usize + 1;
        let values = state.memory.slice(state.index as usize, len)?;
        state.registers[..len].copy_from_slice(values);
        state.index = state.index.wrapping_add(len as u16);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

// The range transfers address `Vx..=Vy` and leave the index register alone.
// A range with `x > y` transfers nothing.

define_instruction_with_operands!(SaveRange, SaveRangeInstruction, 0xF00F, 0x5002);
impl ExecutableOpcode for SaveRangeInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let (x, y) = (self.op1 as usize, self.op2 as usize);
        if x <= y {
            state
                .memory
                .slice_mut(state.index as usize, y - x + 1)?
                .copy_from_slice(&state.registers[x..=y]);
        }
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(LoadRange, LoadRangeInstruction, 0xF00F, 0x5003);
impl ExecutableOpcode for LoadRangeInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let (x, y) = (self.op1 as usize, self.op2 as usize);
        if x <= y {
            let values = state.memory.slice(state.index as usize, y - x + 1)?;
            state.registers[x..=y].copy_from_slice(values);
        }
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

/// Returns the flag store and the number of flags `V0..=Vx` covers.
fn flag_store(
    state: &mut Chip8,
    reg: u8,
) -> Result<(&mut [u8; CHIP8_FLAG_STORE_LEN], usize), FaultKind> {
    let len = reg as usize + 1;
    if len > CHIP8_FLAG_STORE_LEN {
        return Err(FaultKind::InvalidFlagIndex(reg));
    }
    // The flag opcodes are only decoded on profiles that carry a store.
    let flags = state.flags.as_mut().ok_or(FaultKind::UnknownOpcode)?;
    Ok((flags, len))
}

define_instruction_with_reg_and_value!(SaveFlags, SaveFlagsInstruction, 0xF0FF, 0xF075);
impl ExecutableOpcode for SaveFlagsInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let registers = state.registers;
        let (flags, len) = flag_store(state, self.reg)?;
        flags[..len].copy_from_slice(&registers[..len]);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(LoadFlags, LoadFlagsInstruction, 0xF0FF, 0xF085);
impl ExecutableOpcode for LoadFlagsInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let (flags, len) = flag_store(state, self.reg)?;
        let flags = *flags;
        state.registers[..len].copy_from_slice(&flags[..len]);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}
