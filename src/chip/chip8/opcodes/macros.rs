/// Defines a struct `$instruction` and a type alias `$name` for
/// `InstructionWithoutPayload<$instruction>`. Implements `TryFrom<Opcode>` for
/// the alias. The implementation of `try_from` will return an error unless
/// the opcode is exactly `$word`.
macro_rules! define_instruction {
    ($instruction:ident, $name:ident, $word:expr) => {
        pub(super) struct $instruction;
        pub(super) type $name = $crate::chip::chip8::opcodes::InstructionWithoutPayload<$instruction>;
        impl ::core::convert::TryFrom<$crate::chip::chip8::opcodes::Opcode> for $name {
            type Error = $crate::chip::chip8::opcodes::InstructionParsingError;

            fn try_from(
                opcode: $crate::chip::chip8::opcodes::Opcode,
            ) -> Result<Self, Self::Error> {
                opcode.expect_pattern(0xFFFF, $word)?;
                Ok(Self {
                    instruction: ::std::marker::PhantomData,
                })
            }
        }
    };
}

/// Defines a struct `$instruction` and a type alias `$name` for
/// `InstructionWithAddress<$instruction>`. Implements `TryFrom<Opcode>` for
/// the alias. The implementation of `try_from` will return an error unless
/// the opcode masked with `$mask` equals `$pattern`.
macro_rules! define_instruction_with_address {
    ($instruction:ident, $name:ident, $mask:expr, $pattern:expr) => {
        pub(super) struct $instruction;
        pub(super) type $name = $crate::chip::chip8::opcodes::InstructionWithAddress<$instruction>;
        impl ::core::convert::TryFrom<$crate::chip::chip8::opcodes::Opcode> for $name {
            type Error = $crate::chip::chip8::opcodes::InstructionParsingError;

            fn try_from(
                opcode: $crate::chip::chip8::opcodes::Opcode,
            ) -> Result<Self, Self::Error> {
                opcode.expect_pattern($mask, $pattern)?;
                Ok(Self {
                    instruction: ::std::marker::PhantomData,
                    address: opcode.payload.address(),
                })
            }
        }
    };
}

/// Defines a struct `$instruction` and a type alias `$name` for
/// `InstructionWithRegAndValue<$instruction>`. Implements `TryFrom<Opcode>`
/// for the alias. The implementation of `try_from` will return an error
/// unless the opcode masked with `$mask` equals `$pattern`.
macro_rules! define_instruction_with_reg_and_value {
    ($instruction:ident, $name:ident, $mask:expr, $pattern:expr) => {
        pub(super) struct $instruction;
        pub(super) type $name =
            $crate::chip::chip8::opcodes::InstructionWithRegAndValue<$instruction>;
        impl ::core::convert::TryFrom<$crate::chip::chip8::opcodes::Opcode> for $name {
            type Error = $crate::chip::chip8::opcodes::InstructionParsingError;

            fn try_from(
                opcode: $crate::chip::chip8::opcodes::Opcode,
            ) -> Result<Self, Self::Error> {
                opcode.expect_pattern($mask, $pattern)?;
                let (reg, value) = opcode.payload.reg_and_value();
                Ok(Self {
                    instruction: ::std::marker::PhantomData,
                    reg,
                    value,
                })
            }
        }
    };
}

/// Defines a struct `$instruction` and a type alias `$name` for
/// `InstructionWithOperands<$instruction>`. Implements `TryFrom<Opcode>` for
/// the alias. The implementation of `try_from` will return an error unless
/// the opcode masked with `$mask` equals `$pattern`.
macro_rules! define_instruction_with_operands {
    ($instruction:ident, $name:ident, $mask:expr, $pattern:expr) => {
        pub(super) struct $instruction;
        pub(super) type $name = $crate::chip::chip8::opcodes::InstructionWithOperands<$instruction>;
        impl ::core::convert::TryFrom<$crate::chip::chip8::opcodes::Opcode> for $name {
            type Error = $crate::chip::chip8::opcodes::InstructionParsingError;

            fn try_from(
                opcode: $crate::chip::chip8::opcodes::Opcode,
            ) -> Result<Self, Self::Error> {
                opcode.expect_pattern($mask, $pattern)?;
                let (op1, op2, op3) = opcode.payload.operands();
                Ok(Self {
                    instruction: ::std::marker::PhantomData,
                    op1,
                    op2,
                    op3,
                })
            }
        }
    };
}

/// Builds an opcode table from instruction types, in match order.
macro_rules! opcode_table {
    ($($instruction:ty),* $(,)?) => {
        &[$(decode_as::<$instruction> as Decoder),*]
    };
}
