//! An interpreter for the SCHIP and XO-CHIP flavours of the CHIP-8 virtual machine.
//! The opcode tables follow the [XO-CHIP specification](https://johnearnest.github.io/Octo/docs/XO-ChipSpecification.html),
//! apart from a few quirks noted on the individual instructions.
//! For graphical output the bundled front end relies on the cursive text user interface library.
pub mod chip;
