use super::super::bus::Bus;
use super::cpu::WithCpu;
use super::structs::{AddressingMode, Mnemonic};
use super::table::decode;

#[macro_export]
macro_rules! bytes_to_addr {
    ($fst: expr, $snd: expr) => {{
        (u16::from($snd) << 8) | u16::from($fst)
    }};
}

/// Bump the cycle counter. Deltas are non-negative; the table's -1
/// sentinels are clamped before they reach this point.
#[macro_export]
macro_rules! adj_cycles {
    ($mb: expr, $delta: expr) => {{
        $mb.cpu_mut().state.cycles = $mb.cpu().state.cycles.wrapping_add($delta as u64)
    }};
}

#[macro_export]
macro_rules! reg {
    (get $reg: ident, $mb: expr) => {{
        $mb.cpu().state.$reg
    }};

    (set $reg: ident, $mb: expr, $val: expr) => {{
        $mb.cpu_mut().state.$reg = $val
    }};

    (add $reg: ident, $mb: expr, $val: expr) => {{
        $mb.cpu_mut().state.$reg = $mb.cpu().state.$reg.wrapping_add($val)
    }};

    (sub $reg: ident, $mb: expr, $val: expr) => {{
        $mb.cpu_mut().state.$reg = $mb.cpu().state.$reg.wrapping_sub($val)
    }};
}

// Everything below feeds the nestest-format trace line. 0xA5 is the debug
// pattern substituted when a location cannot be peeked without side-effects.

fn peek_or_pattern<T: Bus>(mb: &T, addr: u16) -> u8 {
    mb.peek(addr).unwrap_or(0xA5)
}

/// Resolve a (d),Y pointer without touching the bus latch.
fn peek_ind_y_base<T: Bus>(mb: &T, operand: u8) -> u16 {
    let fst = peek_or_pattern(mb, u16::from(operand));
    let snd = peek_or_pattern(mb, u16::from(operand.wrapping_add(1)));
    bytes_to_addr!(fst, snd)
}

/// Format the next instruction as a `nestest.log` line: program counter,
/// raw bytes, disassembly, then the register file and cycle count as they
/// stand _before_ the instruction executes.
///
/// The PPU columns are stubbed with zeros; this core has no PPU and log
/// comparisons skip those fields.
pub fn trace_line<T: WithCpu + Bus>(mb: &T) -> String {
    let pc = reg!(get pc, mb);
    let opcode = peek_or_pattern(mb, pc);
    let op1 = peek_or_pattern(mb, pc.wrapping_add(1));
    let op2 = peek_or_pattern(mb, pc.wrapping_add(2));
    let def = decode(opcode);

    let ops = match def.mode {
        AddressingMode::Abs | AddressingMode::AbsX | AddressingMode::AbsY | AddressingMode::Ind => {
            format!("{:02X} {:02X} {:02X}", opcode, op1, op2)
        }
        AddressingMode::Acc | AddressingMode::Impl => format!("{:02X}", opcode),
        _ => format!("{:02X} {:02X}", opcode, op1),
    };

    // The log sets the undocumented-opcode marker one column left of the
    // disassembly field, so it is split off the table name here.
    let (marker, name) = match def.name.strip_prefix('*') {
        Some(stripped) => ('*', stripped),
        None => (' ', def.name),
    };

    let operand_addr = bytes_to_addr!(op1, op2);
    let disasm = match def.mode {
        AddressingMode::Abs => {
            let data = peek_or_pattern(mb, operand_addr);
            if def.mnemonic == Mnemonic::JMP || def.mnemonic == Mnemonic::JSR {
                format!("{} ${:04X}", name, operand_addr)
            } else {
                format!("{} ${:04X} = {:02X}", name, operand_addr, data)
            }
        }
        AddressingMode::AbsX => {
            let addr = operand_addr.wrapping_add(u16::from(reg!(get x, mb)));
            let data = peek_or_pattern(mb, addr);
            format!("{} ${:04X},X @ {:04X} = {:02X}", name, operand_addr, addr, data)
        }
        AddressingMode::AbsY => {
            let addr = operand_addr.wrapping_add(u16::from(reg!(get y, mb)));
            let data = peek_or_pattern(mb, addr);
            format!("{} ${:04X},Y @ {:04X} = {:02X}", name, operand_addr, addr, data)
        }
        AddressingMode::Ind => {
            // resolve the pointer with the same page-wrap quirk the CPU has
            let fst = peek_or_pattern(mb, operand_addr);
            let snd = if op1 == 0xFF {
                peek_or_pattern(mb, operand_addr & 0xFF00)
            } else {
                peek_or_pattern(mb, operand_addr.wrapping_add(1))
            };
            format!("{} (${:04X}) = {:04X}", name, operand_addr, bytes_to_addr!(fst, snd))
        }
        AddressingMode::Imm => format!("{} #${:02X}", name, op1),
        AddressingMode::Zpg => {
            let data = peek_or_pattern(mb, u16::from(op1));
            format!("{} ${:02X} = {:02X}", name, op1, data)
        }
        AddressingMode::ZpgX => {
            let addr = op1.wrapping_add(reg!(get x, mb));
            let data = peek_or_pattern(mb, u16::from(addr));
            format!("{} ${:02X},X @ {:02X} = {:02X}", name, op1, addr, data)
        }
        AddressingMode::ZpgY => {
            let addr = op1.wrapping_add(reg!(get y, mb));
            let data = peek_or_pattern(mb, u16::from(addr));
            format!("{} ${:02X},Y @ {:02X} = {:02X}", name, op1, addr, data)
        }
        AddressingMode::Impl => name.to_string(),
        AddressingMode::Acc => format!("{} A", name),
        AddressingMode::Rel => {
            let target = pc.wrapping_add(2).wrapping_add((op1 as i8) as u16);
            format!("{} ${:04X}", name, target)
        }
        AddressingMode::IndX => {
            let ptr = op1.wrapping_add(reg!(get x, mb));
            let fst = peek_or_pattern(mb, u16::from(ptr));
            let snd = peek_or_pattern(mb, u16::from(ptr.wrapping_add(1)));
            let addr = bytes_to_addr!(fst, snd);
            let data = peek_or_pattern(mb, addr);
            format!(
                "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                name, op1, ptr, addr, data
            )
        }
        AddressingMode::IndY => {
            let base = peek_ind_y_base(mb, op1);
            let addr = base.wrapping_add(u16::from(reg!(get y, mb)));
            let data = peek_or_pattern(mb, addr);
            format!(
                "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                name, op1, base, addr, data
            )
        }
    };

    format!(
        //PC    Bytes Disasm   Accum    X reg    Y reg    Status   Stack     PPU col/line    cycles
        "{:04X}  {:8} {}{:32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} PPU:{:>3},{:>3} CYC:{}",
        pc,
        ops,
        marker,
        disasm,
        reg!(get acc, mb),
        reg!(get x, mb),
        reg!(get y, mb),
        reg!(get status, mb).bits(),
        reg!(get stack, mb),
        0,
        0,
        reg!(get cycles, mb)
    )
}
