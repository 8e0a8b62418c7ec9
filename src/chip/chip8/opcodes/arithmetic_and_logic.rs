use rand::{thread_rng, Rng};

use crate::chip::{
    chip8::{
        constants::CHIP8_INDEX_MODULUS,
        opcodes::{ExecutableOpcode, ExecutionResult},
        util, Chip8,
    },
    Signal,
};

/// Applies `f` to `Vx` and `Vy`, stores the value in `Vx` and then the
/// flag, if any, in `VF`. With `x == 0xF` the flag wins.
fn modify_registers(state: &mut Chip8, r1: u8, r2: u8, f: fn(u8, u8) -> (u8, Option<bool>)) {
    let (val, flag) = f(state.registers[r1 as usize], state.registers[r2 as usize]);
    state.registers[r1 as usize] = val;
    if let Some(flag) = flag {
        util::set_flag(state, flag);
    }
}

/// Shifts `Vy` into `Vx`. The shifted out bit lands in `VF` before `Vx` is
/// written, so with `x == 0xF` the shifted value wins.
fn shift_register(state: &mut Chip8, r1: u8, r2: u8, f: fn(u8) -> (u8, bool)) {
    let (val, flag) = f(state.registers[r2 as usize]);
    util::set_flag(state, flag);
    state.registers[r1 as usize] = val;
}

define_instruction_with_reg_and_value!(Ldr, LdrInstruction, 0xF000, 0x6000);
impl ExecutableOpcode for LdrInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.registers[self.reg as usize] = self.value;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Add, AddInstruction, 0xF000, 0x7000);
impl ExecutableOpcode for AddInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.registers[self.reg as usize] =
            state.registers[self.reg as usize].wrapping_add(self.value);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Mov, MovInstruction, 0xF00F, 0x8000);
impl ExecutableOpcode for MovInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |_, v2| (v2, None));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Or, OrInstruction, 0xF00F, 0x8001);
impl ExecutableOpcode for OrInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |v1, v2| (v1 | v2, None));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(And, AndInstruction, 0xF00F, 0x8002);
impl ExecutableOpcode for AndInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |v1, v2| (v1 & v2, None));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Xor, XorInstruction, 0xF00F, 0x8003);
impl ExecutableOpcode for XorInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |v1, v2| (v1 ^ v2, None));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(AddReg, AddRegInstruction, 0xF00F, 0x8004);
impl ExecutableOpcode for AddRegInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        // A sum of exactly 256 does not carry.
        modify_registers(state, self.op1, self.op2, |v1, v2| {
            let total = v1 as u16 + v2 as u16;
            (total as u8, Some(total > 256))
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Sub, SubInstruction, 0xF00F, 0x8005);
impl ExecutableOpcode for SubInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |v1, v2| {
            (v1.wrapping_sub(v2), Some(v1 >= v2))
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Shr, ShrInstruction, 0xF00F, 0x8006);
impl ExecutableOpcode for ShrInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        shift_register(state, self.op1, self.op2, |v| (v >> 1, v & 0x01 != 0));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Subn, SubnInstruction, 0xF00F, 0x8007);
impl ExecutableOpcode for SubnInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        modify_registers(state, self.op1, self.op2, |v1, v2| {
            (v2.wrapping_sub(v1), Some(v2 >= v1))
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Shl, ShlInstruction, 0xF00F, 0x800E);
impl ExecutableOpcode for ShlInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        shift_register(state, self.op1, self.op2, |v| (v << 1, v & 0x80 != 0));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_address!(Ld, LdInstruction, 0xF000, 0xA000);
impl ExecutableOpcode for LdInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.index = self.address;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(LdLong, LdLongInstruction, 0xF000);
impl ExecutableOpcode for LdLongInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let address = state
            .memory
            .read_word(state.program_counter as usize + 2)?;
        state.index = address;
        util::increment_program_counter(state);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Rnd, RndInstruction, 0xF000, 0xC000);
impl ExecutableOpcode for RndInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let sample: u8 = thread_rng().gen();
        state.registers[self.reg as usize] = sample & self.value;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(AddIndex, AddIndexInstruction, 0xF0FF, 0xF01E);
impl ExecutableOpcode for AddIndexInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let total = state.index as u32 + state.registers[self.reg as usize] as u32;
        state.index = (total % CHIP8_INDEX_MODULUS) as u16;
        util::set_flag(state, total >= CHIP8_INDEX_MODULUS);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}
