use crate::chip::{
    chip8::constants::{CHIP8_CHARSET, CHIP8_CHARSET_OFFSET, CHIP8_PROGRAM_OFFSET},
    FaultKind, LoadProgramError, MemoryLayout,
};

// NB. addresses handed in are usize so that callers can add offsets without
//     worrying about u16 overflow; the bounds check catches everything.

/// The byte addressable store of a chip. Its size is decided once at
/// construction and never changes afterwards.
pub(super) struct Memory {
    bytes: Box<[u8]>,
}

impl Memory {
    /// Lays out memory for `layout`: charset at `CHIP8_CHARSET_OFFSET`, then
    /// `program` at `CHIP8_PROGRAM_OFFSET`.
    pub(super) fn new(layout: MemoryLayout, program: &[u8]) -> Result<Self, LoadProgramError> {
        let program_offset = CHIP8_PROGRAM_OFFSET as usize;
        let mut bytes = match layout {
            MemoryLayout::Fixed(size) => {
                let capacity = size.saturating_sub(program_offset);
                if program.len() > capacity {
                    return Err(LoadProgramError::ProgramTooLarge {
                        size: program.len(),
                        capacity,
                    });
                }
                vec![0; size]
            }
            MemoryLayout::Stretched => vec![0; program_offset + program.len()],
        };

        let charset_offset = CHIP8_CHARSET_OFFSET as usize;
        bytes[charset_offset..charset_offset + CHIP8_CHARSET.len()].copy_from_slice(&CHIP8_CHARSET);
        bytes[program_offset..program_offset + program.len()].copy_from_slice(program);

        Ok(Memory {
            bytes: bytes.into_boxed_slice(),
        })
    }

    pub(super) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(super) fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Reads the big endian word at `addr`.
    pub(super) fn read_word(&self, addr: usize) -> Result<u16, FaultKind> {
        let word = self.slice(addr, 2)?;
        Ok((word[0] as u16) << 8 | word[1] as u16)
    }

    /// Returns `len` bytes starting at `addr`.
    pub(super) fn slice(&self, addr: usize, len: usize) -> Result<&[u8], FaultKind> {
        let end = self.checked_end(addr, len)?;
        Ok(&self.bytes[addr..end])
    }

    /// Returns `len` writable bytes starting at `addr`.
    pub(super) fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], FaultKind> {
        let end = self.checked_end(addr, len)?;
        Ok(&mut self.bytes[addr..end])
    }

    fn checked_end(&self, addr: usize, len: usize) -> Result<usize, FaultKind> {
        match addr.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(end),
            // report the first byte that is not there
            _ => Err(FaultKind::AddressOutOfBounds(addr.max(self.bytes.len()))),
        }
    }
}
