/// How the address space of a chip is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryLayout {
    /// A store of exactly this many bytes.
    Fixed(usize),
    /// 512 bytes of interpreter area followed by exactly the program bytes.
    Stretched,
}

/// The instruction set variant a chip emulates. Everything that differs
/// between the variants hangs off this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// SUPER-CHIP: 4KB of memory and a single plane.
    Schip,
    /// XO-CHIP with a 64KB address space.
    XoChip,
    /// XO-CHIP with memory sized to fit the program exactly.
    XoChipStretched,
}

impl Profile {
    pub fn memory_layout(self) -> MemoryLayout {
        match self {
            Profile::Schip => MemoryLayout::Fixed(0x1000),
            Profile::XoChip => MemoryLayout::Fixed(0x10000),
            Profile::XoChipStretched => MemoryLayout::Stretched,
        }
    }

    pub fn plane_count(self) -> usize {
        match self {
            Profile::Schip => 1,
            Profile::XoChip | Profile::XoChipStretched => 2,
        }
    }

    /// Whether skips step over the 4-byte `F000 NNNN` as a whole.
    pub fn skips_long_instructions(self) -> bool {
        self.is_xo_chip()
    }

    /// Whether the chip carries the persistent flag store.
    pub fn has_flag_store(self) -> bool {
        self.is_xo_chip()
    }

    pub fn is_xo_chip(self) -> bool {
        matches!(self, Profile::XoChip | Profile::XoChipStretched)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Profile::XoChip
    }
}
