//! Cycle-counted, instruction-accurate emulator core for the NMOS 6502.
//!
//! The crate models the 2A03 variant of the processor: the decimal flag is
//! stored but never honored by the arithmetic instructions. The commonly
//! relied-upon subset of the undocumented opcodes is implemented, along with
//! the indirect-JMP page-wrap hardware bug.

#[macro_use]
extern crate bitflags;

pub mod devices;
