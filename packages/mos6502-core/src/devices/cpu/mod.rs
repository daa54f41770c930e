mod cpu;
mod structs;
mod table;
mod utils;

pub use cpu::{init, irq, nmi, reset, step, Cpu6502, WithCpu};
pub use structs::{AddressingMode, CpuState, Mnemonic, Status};
pub use table::{decode, OpDef, OPCODE_TABLE};
pub use utils::trace_line;
