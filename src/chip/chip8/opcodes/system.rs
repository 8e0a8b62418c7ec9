use crate::chip::{
    chip8::{
        framebuffer::Scroll,
        opcodes::{ExecutableOpcode, ExecutionResult},
        util, Chip8,
    },
    FaultKind, Signal,
};

define_instruction!(Cls, ClsInstruction, 0x00E0);
impl ExecutableOpcode for ClsInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.clear();
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(Ret, RetInstruction, 0x00EE);
impl ExecutableOpcode for RetInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        if state.stack_pointer == 0 {
            return Err(FaultKind::StackUnderflow);
        }
        state.stack_pointer -= 1;
        state.program_counter = state.stack[state.stack_pointer as usize];
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Scd, ScdInstruction, 0xFFF0, 0x00C0);
impl ExecutableOpcode for ScdInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.scroll(Scroll::Down(self.op3 as usize));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_operands!(Scu, ScuInstruction, 0xFFF0, 0x00D0);
impl ExecutableOpcode for ScuInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.scroll(Scroll::Up(self.op3 as usize));
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(Scr, ScrInstruction, 0x00FB);
impl ExecutableOpcode for ScrInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.scroll(Scroll::Right);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(Scl, SclInstruction, 0x00FC);
impl ExecutableOpcode for SclInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.scroll(Scroll::Left);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(Exit, ExitInstruction, 0x00FD);
impl ExecutableOpcode for ExitInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        if state.ignore_exit {
            util::increment_program_counter(state);
            return Ok(Signal::Continue);
        }
        // The program counter stays on the exit opcode.
        log::info!("program requested exit at {:#06X}", state.program_counter);
        Ok(Signal::Exit)
    }
}

define_instruction!(Low, LowInstruction, 0x00FE);
impl ExecutableOpcode for LowInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        log::debug!("switching to low resolution");
        state.framebuffer.set_resolution(false);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction!(High, HighInstruction, 0x00FF);
impl ExecutableOpcode for HighInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        log::debug!("switching to high resolution");
        state.framebuffer.set_resolution(true);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}
