use crate::chip::{
    chip8::{
        opcodes::{ExecutableOpcode, ExecutionResult},
        timers::Timer,
        util, Chip8,
    },
    Signal,
};

define_instruction_with_reg_and_value!(Skp, SkpInstruction, 0xF0FF, 0xE09E);
impl ExecutableOpcode for SkpInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            state
                .keypad
                .is_pressed(state.registers[instruction.reg as usize])
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Sknp, SknpInstruction, 0xF0FF, 0xE0A1);
impl ExecutableOpcode for SknpInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        util::conditional_skip(self, state, |instruction, state| {
            !state
                .keypad
                .is_pressed(state.registers[instruction.reg as usize])
        });
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(GetDelay, GetDelayInstruction, 0xF0FF, 0xF007);
impl ExecutableOpcode for GetDelayInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.registers[self.reg as usize] = state.timers.get(Timer::Delay);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(WaitKey, WaitKeyInstruction, 0xF0FF, 0xF00A);
impl ExecutableOpcode for WaitKeyInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        // Without a completed press and release the program counter stays
        // put and the read is retried on the next cycle.
        if let Some(key) = state.keypad.poll_release() {
            log::debug!("key {:X} released into V{:X}", key, self.reg);
            state.registers[self.reg as usize] = key;
            util::increment_program_counter(state);
        }
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(SetDelay, SetDelayInstruction, 0xF0FF, 0xF015);
impl ExecutableOpcode for SetDelayInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state
            .timers
            .set(Timer::Delay, state.registers[self.reg as usize]);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(SetSound, SetSoundInstruction, 0xF0FF, 0xF018);
impl ExecutableOpcode for SetSoundInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state
            .timers
            .set(Timer::Sound, state.registers[self.reg as usize]);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}
