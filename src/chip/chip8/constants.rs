/// Where the program image is installed, and where execution starts.
pub const CHIP8_PROGRAM_OFFSET: u16 = 0x200; // 512

pub const CHIP8_CHARSET_OFFSET: u16 = 0x50; // 80

/// Bytes per glyph of the small (4x5) charset.
pub const CHIP8_CHARSET_GLYPH_LEN: u16 = 5;

/// The large (8x10) charset follows the small one directly.
pub const CHIP8_BIG_CHARSET_OFFSET: u16 = CHIP8_CHARSET_OFFSET + 16 * CHIP8_CHARSET_GLYPH_LEN;

pub const CHIP8_BIG_CHARSET_GLYPH_LEN: u16 = 10;

pub const CHIP8_REGISTER_COUNT: usize = 16;

/// Register overwritten by carry, borrow and collision results.
pub const CHIP8_FLAG_REGISTER: usize = 0xF;

pub const CHIP8_STACK_DEPTH: usize = 16;

pub const CHIP8_KEY_COUNT: usize = 16;

pub const CHIP8_FLAG_STORE_LEN: usize = 8;

/// Timers count down at this many units per second.
pub const CHIP8_TIMER_FREQUENCY: f64 = 60.0;

/// Index register arithmetic (`Fx1E`) wraps at this value.
pub const CHIP8_INDEX_MODULUS: u32 = 0x1000;

pub const CHIP8_HIRES_WIDTH: usize = 128;
pub const CHIP8_HIRES_HEIGHT: usize = 64;
pub const CHIP8_LORES_WIDTH: usize = 64;
pub const CHIP8_LORES_HEIGHT: usize = 32;

/// Cells per plane, sized for the high resolution geometry.
pub const CHIP8_PLANE_LEN: usize = CHIP8_HIRES_WIDTH * CHIP8_HIRES_HEIGHT;

/// Columns moved by the fixed left/right scroll opcodes.
pub const CHIP8_HORIZONTAL_SCROLL: usize = 4;

pub const CHIP8_CHARSET: [u8; 240] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
    0xFF, 0xFF, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, // big 0
    0x18, 0x78, 0x78, 0x18, 0x18, 0x18, 0x18, 0x18, 0xFF, 0xFF, // big 1
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, // big 2
    0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // big 3
    0xC3, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0x03, 0x03, // big 4
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // big 5
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // big 6
    0xFF, 0xFF, 0x03, 0x03, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x18, // big 7
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, // big 8
    0xFF, 0xFF, 0xC3, 0xC3, 0xFF, 0xFF, 0x03, 0x03, 0xFF, 0xFF, // big 9
    0x7E, 0xFF, 0xC3, 0xC3, 0xC3, 0xFF, 0xFF, 0xC3, 0xC3, 0xC3, // big A
    0xFC, 0xFC, 0xC3, 0xC3, 0xFC, 0xFC, 0xC3, 0xC3, 0xFC, 0xFC, // big B
    0x3C, 0xFF, 0xC3, 0xC0, 0xC0, 0xC0, 0xC0, 0xC3, 0xFF, 0x3C, // big C
    0xFC, 0xFE, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xC3, 0xFE, 0xFC, // big D
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, // big E
    0xFF, 0xFF, 0xC0, 0xC0, 0xFF, 0xFF, 0xC0, 0xC0, 0xC0, 0xC0, // big F
];
