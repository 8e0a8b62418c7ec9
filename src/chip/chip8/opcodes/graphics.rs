use crate::chip::{
    chip8::{
        constants::{
            CHIP8_BIG_CHARSET_GLYPH_LEN, CHIP8_BIG_CHARSET_OFFSET, CHIP8_CHARSET_GLYPH_LEN,
            CHIP8_CHARSET_OFFSET,
        },
        opcodes::{ExecutableOpcode, ExecutionResult},
        util, Chip8,
    },
    Signal,
};

define_instruction_with_operands!(Drw, DrwInstruction, 0xF000, 0xD000);
impl ExecutableOpcode for DrwInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let x = state.registers[self.op1 as usize];
        let y = state.registers[self.op2 as usize];

        // Height 0 draws a 16x16 sprite, two bytes per row.
        let (len, row_len) = match self.op3 {
            0 => (32, 2),
            n => (n as usize, 1),
        };

        let sprite = state.memory.slice(state.index as usize, len)?;
        let collision = state.framebuffer.draw_sprite(x, y, sprite, row_len);

        util::set_flag(state, collision);
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Plane, PlaneInstruction, 0xF0FF, 0xF001);
impl ExecutableOpcode for PlaneInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        state.framebuffer.select_planes(self.reg)?;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(Font, FontInstruction, 0xF0FF, 0xF029);
impl ExecutableOpcode for FontInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let character = (state.registers[self.reg as usize] % 16) as u16;
        state.index = CHIP8_CHARSET_OFFSET + character * CHIP8_CHARSET_GLYPH_LEN;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}

define_instruction_with_reg_and_value!(BigFont, BigFontInstruction, 0xF0FF, 0xF030);
impl ExecutableOpcode for BigFontInstruction {
    fn execute(&self, state: &mut Chip8) -> ExecutionResult {
        let character = (state.registers[self.reg as usize] % 16) as u16;
        state.index = CHIP8_BIG_CHARSET_OFFSET + character * CHIP8_BIG_CHARSET_GLYPH_LEN;
        util::increment_program_counter(state);
        Ok(Signal::Continue)
    }
}
