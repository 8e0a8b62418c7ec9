use crate::chip::{
    chip8::{
        constants::CHIP8_STACK_DEPTH,
        opcodes::{ExecutableOpcode, ExecutionResult},
        util, Chip8,
    },
    FaultKind, Signal,
};

define_instruction_with_address!(Jmp, JmpInstruction, 0xF000, 0x1000);
impl ExecutableOpcode for JmpInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.program_counter = self.address;
        Ok(Signal::Continue)
    }
}

define_instruction_with_address!(Call, CallInstruction, 0xF000, 0x2000);
impl ExecutableOpcode for CallInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        if state.stack_pointer as usize >= CHIP8_STACK_DEPTH {
            return Err(FaultKind::StackOverflow);
        }
        state.stack[state.stack_pointer as usize] = state.program_counter;
        state.stack_pointer += 1;
        state.program_counter = self.address;
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Se, SeInstruction, 0xF000, 0x3000);
impl ExecutableOpcode for SeInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.reg as usize] == instruction.value
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Sne, SneInstruction, 0xF000, 0x4000);
impl ExecutableOpcode for SneInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.reg as usize] != instruction.value
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Sre, SreInstruction, 0xF00F, 0x5000);
impl ExecutableOpcode for SreInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.op1 as usize] == state.registers[instruction.op2 as usize]
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Srne, SrneInstruction, 0xF00F, 0x9000);
impl ExecutableOpcode for SrneInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            state.registers[instruction.op1 as usize] != state.registers[instruction.op2 as usize]
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_address!(Jmpr, JmprInstruction, 0xF000, 0xB000);
impl ExecutableOpcode for JmprInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.program_counter = self.address.wrapping_add(state.registers[0] as u16);
        Ok(Signal::Continue)
    }
}
