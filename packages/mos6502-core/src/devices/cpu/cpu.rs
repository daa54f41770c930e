//! Emulator for the MOS 6502
//!
//! This does not include support for Binary Coded Decimal, which was omitted
//! on the 2A03 variant used on the NES and Famicom. The decimal flag can be
//! set and cleared, but ADC and SBC ignore it.
//!
//! Timing is instruction-granular: every instruction retires in one call and
//! charges its whole cycle cost at once. The base cost comes from the lookup
//! table; addressing modes and branches record their page-cross and
//! taken-branch adjustments before the charge lands.

use log::{info, warn};

use super::super::bus::Bus;
use super::structs::{AddressingMode, CpuState, Mnemonic, Status, POWERON_CPU_STATE};
use super::table::decode;
use crate::{adj_cycles, bytes_to_addr, reg};

macro_rules! op_fn {
    ($mnemonic: ident, $mb: ident, $body: expr) => {
        fn $mnemonic<T: WithCpu + Bus>($mb: &mut T) {
            $body
        }
    };
}

pub struct Cpu6502 {
    pub state: CpuState,
}

impl Cpu6502 {
    /// Create a new CPU in the pre-reset power-on state.
    ///
    /// The reset pin starts asserted; run `init` (or `reset` against a bus
    /// with a seeded reset vector) before stepping.
    pub fn new() -> Cpu6502 {
        Cpu6502 {
            state: POWERON_CPU_STATE,
        }
    }
}

impl Default for Cpu6502 {
    fn default() -> Cpu6502 {
        Cpu6502::new()
    }
}

/// Trait for a device that owns a CPU, such as the machine or a test harness
pub trait WithCpu {
    fn cpu(&self) -> &Cpu6502;
    fn cpu_mut(&mut self) -> &mut Cpu6502;
}

/// Power-on initialization: seed the reset vector with the given program
/// start address, then run the reset routine (the reset pin is held low
/// until the routine releases it).
pub fn init<T: WithCpu + Bus>(mb: &mut T, pc_msb: u8, pc_lsb: u8) {
    mb.write(0xFFFC, pc_lsb);
    mb.write(0xFFFD, pc_msb);
    mb.cpu_mut().state = POWERON_CPU_STATE;
    if !reg!(get reset_pin, mb) {
        reset(mb);
    }
}

/// Trigger a hardware reset of the CPU
///
/// Loads PC from the reset vector, clears the register file, and performs
/// the three fake pushes: the reset microcode reuses the interrupt push
/// sequence with the writes suppressed, so SP still drops by 3.
pub fn reset<T: WithCpu + Bus>(mb: &mut T) {
    let fst = mb.read(0xFFFC);
    let snd = mb.read(0xFFFD);
    let cpu = mb.cpu_mut();
    cpu.state.pc = bytes_to_addr!(fst, snd);
    cpu.state.acc = 0;
    cpu.state.x = 0;
    cpu.state.y = 0;
    cpu.state.stack = cpu.state.stack.wrapping_sub(3);
    // The unused bit is hardwired to logic 1; IRQs stay masked until
    // software clears the flag.
    cpu.state.status = Status::UNUSED | Status::IRQ_DISABLE;
    cpu.state.abs_addr = 0;
    cpu.state.rel_addr = 0;
    cpu.state.opcode = 0;
    cpu.state.addr_mode = AddressingMode::Impl;
    cpu.state.mnemonic = Mnemonic::UNK;
    cpu.state.jammed = false;
    cpu.state.reset_pin = true;
    cpu.state.cycles = cpu.state.cycles.wrapping_add(7);
}

/// Maskable interrupt line
///
/// The push-and-vector sequence only runs when IRQs are enabled, but the
/// 7-cycle cost is charged either way; that is the policy the reference
/// trace was produced with.
pub fn irq<T: WithCpu + Bus>(mb: &mut T) {
    if !reg!(get status, mb).contains(Status::IRQ_DISABLE) {
        info!("servicing IRQ");
        let addr_bytes = reg!(get pc, mb).to_le_bytes();
        push_stack(mb, addr_bytes[1]);
        push_stack(mb, addr_bytes[0]);
        let status = reg!(get status, mb).bits();
        push_stack(mb, status);
        set_flag(mb, Status::IRQ_DISABLE, true);
        set_flag(mb, Status::BREAK, false);
        let fst = mb.read(0xFFFE);
        let snd = mb.read(0xFFFF);
        reg!(set pc, mb, bytes_to_addr!(fst, snd));
    }
    adj_cycles!(mb, 7);
}

/// Non-maskable interrupt line
pub fn nmi<T: WithCpu + Bus>(mb: &mut T) {
    info!("servicing NMI");
    let addr_bytes = reg!(get pc, mb).to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    let status = reg!(get status, mb).bits();
    push_stack(mb, status);
    set_flag(mb, Status::IRQ_DISABLE, true);
    set_flag(mb, Status::BREAK, false);
    let fst = mb.read(0xFFFA);
    let snd = mb.read(0xFFFB);
    reg!(set pc, mb, bytes_to_addr!(fst, snd));
    adj_cycles!(mb, 7);
}

/// Fetch and execute one instruction
///
/// The opcode is read at PC (which then advances past it), the addressing
/// mode consumes the operand bytes and latches the effective address, and
/// the handler runs. A jammed CPU refuses to dispatch until reset.
pub fn step<T: WithCpu + Bus>(mb: &mut T) {
    if reg!(get jammed, mb) {
        return;
    }
    let pc = reg!(get pc, mb);
    let opcode = mb.read(pc);
    let def = decode(opcode);
    {
        let cpu = mb.cpu_mut();
        cpu.state.opcode = opcode;
        cpu.state.addr_mode = def.mode;
        cpu.state.mnemonic = def.mnemonic;
    }
    adv_pc(mb, 1);
    fetch_operand(mb);
    let handler = match_handler(def.mnemonic);
    handler(mb);
    adj_cycles!(mb, def.cycles.max(0));
}

/// Advance the program counter, with overflow
fn adv_pc<T: WithCpu>(mb: &mut T, increment: u16) {
    reg!(add pc, mb, increment);
}

/// Read the byte at PC and advance past it
fn next_byte<T: WithCpu + Bus>(mb: &mut T) -> u8 {
    let pc = reg!(get pc, mb);
    let value = mb.read(pc);
    adv_pc(mb, 1);
    value
}

//region Addressing modes

// The penalty sets below are the documented opcode subsets that spend an
// extra cycle when indexing crosses a page: the CPU reads from the
// un-carried address first and has to go around again. Read-modify-write
// and store instructions always take the corrective cycle, so their table
// entries already include it.

fn takes_abs_x_penalty(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::ADC
            | Mnemonic::AND
            | Mnemonic::CMP
            | Mnemonic::EOR
            | Mnemonic::LDA
            | Mnemonic::LDY
            | Mnemonic::NOP
            | Mnemonic::ORA
            | Mnemonic::SBC
    )
}

fn takes_abs_y_penalty(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::ADC
            | Mnemonic::AND
            | Mnemonic::CMP
            | Mnemonic::EOR
            | Mnemonic::LAX
            | Mnemonic::LDA
            | Mnemonic::LDX
            | Mnemonic::ORA
            | Mnemonic::SBC
    )
}

fn takes_ind_y_penalty(mnemonic: Mnemonic) -> bool {
    matches!(
        mnemonic,
        Mnemonic::ADC
            | Mnemonic::AND
            | Mnemonic::CMP
            | Mnemonic::EOR
            | Mnemonic::LAX
            | Mnemonic::LDA
            | Mnemonic::ORA
            | Mnemonic::SBC
    )
}

/// Run the addressing-mode fetch for the current opcode: consume the
/// operand bytes at PC and latch the effective address (or the sign-extended
/// displacement for branches).
fn fetch_operand<T: WithCpu + Bus>(mb: &mut T) {
    match reg!(get addr_mode, mb) {
        // the operand is a register, or there is none
        AddressingMode::Acc | AddressingMode::Impl => {}
        AddressingMode::Imm => {
            let pc = reg!(get pc, mb);
            reg!(set abs_addr, mb, pc);
            adv_pc(mb, 1);
        }
        AddressingMode::Zpg => {
            let op = next_byte(mb);
            reg!(set abs_addr, mb, u16::from(op));
        }
        // Zero-page indexing never leaves the zero page; the carry out of
        // the low byte is dropped.
        AddressingMode::ZpgX => {
            let op = next_byte(mb);
            let x = reg!(get x, mb);
            reg!(set abs_addr, mb, u16::from(op.wrapping_add(x)));
        }
        AddressingMode::ZpgY => {
            let op = next_byte(mb);
            let y = reg!(get y, mb);
            reg!(set abs_addr, mb, u16::from(op.wrapping_add(y)));
        }
        AddressingMode::Abs => {
            let fst = next_byte(mb);
            let snd = next_byte(mb);
            reg!(set abs_addr, mb, bytes_to_addr!(fst, snd));
        }
        AddressingMode::AbsX => {
            let fst = next_byte(mb);
            let snd = next_byte(mb);
            let base = bytes_to_addr!(fst, snd);
            let addr = base.wrapping_add(u16::from(reg!(get x, mb)));
            reg!(set abs_addr, mb, addr);
            if (addr & 0xFF00) != (base & 0xFF00) && takes_abs_x_penalty(reg!(get mnemonic, mb)) {
                adj_cycles!(mb, 1);
            }
        }
        AddressingMode::AbsY => {
            let fst = next_byte(mb);
            let snd = next_byte(mb);
            let base = bytes_to_addr!(fst, snd);
            let addr = base.wrapping_add(u16::from(reg!(get y, mb)));
            reg!(set abs_addr, mb, addr);
            if (addr & 0xFF00) != (base & 0xFF00) && takes_abs_y_penalty(reg!(get mnemonic, mb)) {
                adj_cycles!(mb, 1);
            }
        }
        AddressingMode::Ind => {
            let fst = next_byte(mb);
            let snd = next_byte(mb);
            let ptr = bytes_to_addr!(fst, snd);
            // A pointer ending in $FF wraps within its own page when the
            // high byte is fetched: the original silicon never carries into
            // the pointer's high byte.
            let lo = mb.read(ptr);
            let hi = if fst == 0xFF {
                mb.read(ptr & 0xFF00)
            } else {
                mb.read(ptr.wrapping_add(1))
            };
            reg!(set abs_addr, mb, bytes_to_addr!(lo, hi));
        }
        AddressingMode::IndX => {
            let op = next_byte(mb);
            let ptr = op.wrapping_add(reg!(get x, mb));
            // both pointer bytes come from the zero page, wrapping at $FF
            let fst = mb.read(u16::from(ptr));
            let snd = mb.read(u16::from(ptr.wrapping_add(1)));
            reg!(set abs_addr, mb, bytes_to_addr!(fst, snd));
        }
        AddressingMode::IndY => {
            let op = next_byte(mb);
            let fst = mb.read(u16::from(op));
            let snd = mb.read(u16::from(op.wrapping_add(1)));
            let base = bytes_to_addr!(fst, snd);
            let addr = base.wrapping_add(u16::from(reg!(get y, mb)));
            reg!(set abs_addr, mb, addr);
            if (addr & 0xFF00) != (base & 0xFF00) && takes_ind_y_penalty(reg!(get mnemonic, mb)) {
                adj_cycles!(mb, 1);
            }
        }
        AddressingMode::Rel => {
            let op = next_byte(mb);
            reg!(set rel_addr, mb, (op as i8) as u16);
        }
    }
}

//endregion

/// Read the data at the resolved address
fn read_operand<T: WithCpu + Bus>(mb: &mut T) -> u8 {
    match reg!(get addr_mode, mb) {
        AddressingMode::Acc => reg!(get acc, mb),
        _ => {
            let addr = reg!(get abs_addr, mb);
            mb.read(addr)
        }
    }
}

/// Write the data back to the shift/rotate target: the accumulator or the
/// resolved address, depending on the addressing mode
fn write_operand<T: WithCpu + Bus>(mb: &mut T, data: u8) {
    match reg!(get addr_mode, mb) {
        AddressingMode::Acc => reg!(set acc, mb, data),
        _ => {
            let addr = reg!(get abs_addr, mb);
            mb.write(addr, data);
        }
    }
}

/// Absolute address of the stack pointer within page 1
fn stack_addr(stack: u8) -> u16 {
    0x0100 | u16::from(stack)
}

fn push_stack<T: WithCpu + Bus>(mb: &mut T, data: u8) {
    let addr = stack_addr(reg!(get stack, mb));
    mb.write(addr, data);
    reg!(sub stack, mb, 1);
}

fn pop_stack<T: WithCpu + Bus>(mb: &mut T) -> u8 {
    reg!(add stack, mb, 1);
    let addr = stack_addr(reg!(get stack, mb));
    mb.read(addr)
}

fn set_flag<T: WithCpu>(mb: &mut T, flag: Status, value: bool) {
    mb.cpu_mut().state.status.set(flag, value);
}

fn check_carry<T: WithCpu>(mb: &mut T, val: u16) {
    set_flag(mb, Status::CARRY, val & 0x100 == 0x100);
}

fn check_zero<T: WithCpu>(mb: &mut T, val: u8) {
    set_flag(mb, Status::ZERO, val == 0);
}

fn check_negative<T: WithCpu>(mb: &mut T, val: u8) {
    set_flag(mb, Status::NEGATIVE, val & 0x80 != 0);
}

/// Signed overflow out of bit 7: set when both addends share a sign that
/// the sum does not.
fn check_overflow<T: WithCpu>(mb: &mut T, lhs: u8, rhs: u8, sum: u16) {
    let overflow = (!(lhs ^ rhs) & (lhs ^ (sum as u8)) & 0x80) != 0;
    set_flag(mb, Status::OVERFLOW, overflow);
}

/// A + data + C. Carry out of bit 8, signed overflow out of bit 7, N/Z from
/// the truncated sum. SBC routes through here with the operand complemented.
fn add_with_carry<T: WithCpu + Bus>(mb: &mut T, data: u8) {
    let augend = reg!(get acc, mb);
    let carry = u16::from(reg!(get status, mb).contains(Status::CARRY));
    let sum = u16::from(augend) + u16::from(data) + carry;
    check_carry(mb, sum);
    check_overflow(mb, augend, data, sum);
    let result = (sum & 0x00FF) as u8;
    reg!(set acc, mb, result);
    check_zero(mb, result);
    check_negative(mb, result);
}

/// Shared CMP/CPX/CPY tail: carry means no borrow, N/Z from the difference
fn compare_values<T: WithCpu>(mb: &mut T, lhs: u8, rhs: u8) {
    let diff = lhs.wrapping_sub(rhs);
    set_flag(mb, Status::CARRY, lhs >= rhs);
    check_zero(mb, diff);
    check_negative(mb, diff);
}

/// Load a pulled status byte. Bits 4 and 5 of the stacked copy are
/// artifacts of the push: the pulled B is ignored (live B clears) and the
/// unused bit stays hardwired to 1.
fn restore_status<T: WithCpu>(mb: &mut T, pulled: u8) {
    let status = (Status::from_bits_truncate(pulled) - Status::BREAK) | Status::UNUSED;
    reg!(set status, mb, status);
}

/// Shared branch tail: a taken branch costs one extra cycle, two if the
/// target lands on a different page than the post-operand PC
fn branch<T: WithCpu + Bus>(mb: &mut T, taken: bool) {
    if !taken {
        return;
    }
    adj_cycles!(mb, 1);
    let pc = reg!(get pc, mb);
    let target = pc.wrapping_add(reg!(get rel_addr, mb));
    if (target & 0xFF00) != (pc & 0xFF00) {
        adj_cycles!(mb, 1);
    }
    reg!(set abs_addr, mb, target);
    reg!(set pc, mb, target);
}

#[allow(type_alias_bounds)] // leaving this in for self-documenting reasons
type OpcodeHandler<T: WithCpu + Bus> = fn(mb: &mut T);

fn match_handler<T: WithCpu + Bus>(mnemonic: Mnemonic) -> OpcodeHandler<T> {
    match mnemonic {
        Mnemonic::ADC => op_adc,
        Mnemonic::AND => op_and,
        Mnemonic::ASL => op_asl,
        Mnemonic::BCC => op_bcc,
        Mnemonic::BCS => op_bcs,
        Mnemonic::BEQ => op_beq,
        Mnemonic::BIT => op_bit,
        Mnemonic::BMI => op_bmi,
        Mnemonic::BNE => op_bne,
        Mnemonic::BPL => op_bpl,
        Mnemonic::BRK => op_brk,
        Mnemonic::BVC => op_bvc,
        Mnemonic::BVS => op_bvs,
        Mnemonic::CLC => op_clc,
        Mnemonic::CLD => op_cld,
        Mnemonic::CLI => op_cli,
        Mnemonic::CLV => op_clv,
        Mnemonic::CMP => op_cmp,
        Mnemonic::CPX => op_cpx,
        Mnemonic::CPY => op_cpy,
        Mnemonic::DEC => op_dec,
        Mnemonic::DEX => op_dex,
        Mnemonic::DEY => op_dey,
        Mnemonic::EOR => op_eor,
        Mnemonic::INC => op_inc,
        Mnemonic::INX => op_inx,
        Mnemonic::INY => op_iny,
        Mnemonic::JMP => op_jmp,
        Mnemonic::JSR => op_jsr,
        Mnemonic::LDA => op_lda,
        Mnemonic::LDX => op_ldx,
        Mnemonic::LDY => op_ldy,
        Mnemonic::LSR => op_lsr,
        Mnemonic::NOP => op_nop,
        Mnemonic::ORA => op_ora,
        Mnemonic::PHA => op_pha,
        Mnemonic::PHP => op_php,
        Mnemonic::PLA => op_pla,
        Mnemonic::PLP => op_plp,
        Mnemonic::ROL => op_rol,
        Mnemonic::ROR => op_ror,
        Mnemonic::RTI => op_rti,
        Mnemonic::RTS => op_rts,
        Mnemonic::SBC => op_sbc,
        Mnemonic::SEC => op_sec,
        Mnemonic::SED => op_sed,
        Mnemonic::SEI => op_sei,
        Mnemonic::STA => op_sta,
        Mnemonic::STX => op_stx,
        Mnemonic::STY => op_sty,
        Mnemonic::TAX => op_tax,
        Mnemonic::TAY => op_tay,
        Mnemonic::TSX => op_tsx,
        Mnemonic::TXA => op_txa,
        Mnemonic::TXS => op_txs,
        Mnemonic::TYA => op_tya,
        Mnemonic::DCP => op_dcp,
        Mnemonic::ISB => op_isb,
        Mnemonic::JAM => op_jam,
        Mnemonic::LAX => op_lax,
        Mnemonic::RLA => op_rla,
        Mnemonic::RRA => op_rra,
        Mnemonic::SAX => op_sax,
        Mnemonic::SLO => op_slo,
        Mnemonic::SRE => op_sre,
        Mnemonic::UNK => op_unk,
    }
}

//region Arithmetic ops
// ADC SBC
op_fn!(op_adc, mb, {
    if reg!(get status, mb).contains(Status::DECIMAL) {
        warn!("the decimal flag is set, but BCD arithmetic is not emulated");
    }
    let data = read_operand(mb);
    add_with_carry(mb, data);
});
op_fn!(op_sbc, mb, {
    if reg!(get status, mb).contains(Status::DECIMAL) {
        warn!("the decimal flag is set, but BCD arithmetic is not emulated");
    }
    // two's-complement subtract: add the one's complement, with the carry
    // flag supplying the +1 (carry set means no borrow)
    let data = read_operand(mb);
    add_with_carry(mb, data ^ 0xFF);
});
//endregion

//region Bitwise ops
// AND BIT EOR ORA
op_fn!(op_and, mb, {
    let data = read_operand(mb) & reg!(get acc, mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_bit, mb, {
    let data = read_operand(mb);
    let masked = reg!(get acc, mb) & data;
    check_zero(mb, masked);
    // bits 7 and 6 of the operand copy straight into N and V
    set_flag(mb, Status::NEGATIVE, data & 0x80 != 0);
    set_flag(mb, Status::OVERFLOW, data & 0x40 != 0);
});
op_fn!(op_eor, mb, {
    let data = read_operand(mb) ^ reg!(get acc, mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_ora, mb, {
    let data = read_operand(mb) | reg!(get acc, mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
//endregion

//region Shifts and rotates
// ASL LSR ROL ROR
op_fn!(op_asl, mb, {
    let data = read_operand(mb);
    let shifted = u16::from(data) << 1;
    check_carry(mb, shifted);
    let result = (shifted & 0x00FF) as u8;
    write_operand(mb, result);
    check_zero(mb, result);
    check_negative(mb, result);
});
op_fn!(op_lsr, mb, {
    let data = read_operand(mb);
    let result = data >> 1;
    set_flag(mb, Status::CARRY, data & 0x01 != 0);
    write_operand(mb, result);
    check_zero(mb, result);
    // bit 7 of a right shift is always 0, so N always clears
    check_negative(mb, result);
});
op_fn!(op_rol, mb, {
    let data = read_operand(mb);
    let carry_in = u16::from(reg!(get status, mb).contains(Status::CARRY));
    let rotated = (u16::from(data) << 1) | carry_in;
    check_carry(mb, rotated);
    let result = (rotated & 0x00FF) as u8;
    write_operand(mb, result);
    check_zero(mb, result);
    check_negative(mb, result);
});
op_fn!(op_ror, mb, {
    let data = read_operand(mb);
    let carry_in = u8::from(reg!(get status, mb).contains(Status::CARRY));
    let result = (data >> 1) | (carry_in << 7);
    set_flag(mb, Status::CARRY, data & 0x01 != 0);
    write_operand(mb, result);
    check_zero(mb, result);
    check_negative(mb, result);
});
//endregion

//region Branch instructions
// BPL BMI BVC BVS BCC BCS BNE BEQ
op_fn!(op_bpl, mb, {
    let taken = !reg!(get status, mb).contains(Status::NEGATIVE);
    branch(mb, taken);
});
op_fn!(op_bmi, mb, {
    let taken = reg!(get status, mb).contains(Status::NEGATIVE);
    branch(mb, taken);
});
op_fn!(op_bvc, mb, {
    let taken = !reg!(get status, mb).contains(Status::OVERFLOW);
    branch(mb, taken);
});
op_fn!(op_bvs, mb, {
    let taken = reg!(get status, mb).contains(Status::OVERFLOW);
    branch(mb, taken);
});
op_fn!(op_bcc, mb, {
    let taken = !reg!(get status, mb).contains(Status::CARRY);
    branch(mb, taken);
});
op_fn!(op_bcs, mb, {
    let taken = reg!(get status, mb).contains(Status::CARRY);
    branch(mb, taken);
});
op_fn!(op_bne, mb, {
    let taken = !reg!(get status, mb).contains(Status::ZERO);
    branch(mb, taken);
});
op_fn!(op_beq, mb, {
    let taken = reg!(get status, mb).contains(Status::ZERO);
    branch(mb, taken);
});
//endregion

op_fn!(op_brk, mb, {
    // BRK is a two-byte instruction: the byte after the opcode is a
    // signature byte that the pushed return address skips over
    adv_pc(mb, 1);
    let addr_bytes = reg!(get pc, mb).to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    let status = reg!(get status, mb) | Status::BREAK | Status::UNUSED;
    push_stack(mb, status.bits());
    set_flag(mb, Status::IRQ_DISABLE, true);
    set_flag(mb, Status::BREAK, true);
    let fst = mb.read(0xFFFE);
    let snd = mb.read(0xFFFF);
    reg!(set pc, mb, bytes_to_addr!(fst, snd));
});

//region Compare instructions
// CMP CPX CPY
op_fn!(op_cmp, mb, {
    let data = read_operand(mb);
    let acc = reg!(get acc, mb);
    compare_values(mb, acc, data);
});
op_fn!(op_cpx, mb, {
    let data = read_operand(mb);
    let x = reg!(get x, mb);
    compare_values(mb, x, data);
});
op_fn!(op_cpy, mb, {
    let data = read_operand(mb);
    let y = reg!(get y, mb);
    compare_values(mb, y, data);
});
//endregion

//region Memory increments
// DEC INC
op_fn!(op_dec, mb, {
    let data = read_operand(mb).wrapping_sub(1);
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_inc, mb, {
    let data = read_operand(mb).wrapping_add(1);
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
//endregion

//region Flag instructions
// CLC SEC CLI SEI CLV CLD SED
op_fn!(op_clc, mb, set_flag(mb, Status::CARRY, false));
op_fn!(op_sec, mb, set_flag(mb, Status::CARRY, true));
op_fn!(op_cli, mb, set_flag(mb, Status::IRQ_DISABLE, false));
op_fn!(op_sei, mb, set_flag(mb, Status::IRQ_DISABLE, true));
op_fn!(op_clv, mb, set_flag(mb, Status::OVERFLOW, false));
op_fn!(op_cld, mb, set_flag(mb, Status::DECIMAL, false));
op_fn!(op_sed, mb, set_flag(mb, Status::DECIMAL, true));
//endregion

//region Jumps
// JMP JSR RTI RTS
op_fn!(op_jmp, mb, {
    reg!(set pc, mb, reg!(get abs_addr, mb));
});
op_fn!(op_jsr, mb, {
    // PC sits past the operand here; the stacked address is the operand's
    // last byte so the RTS increment lands on the next instruction
    let ret = reg!(get pc, mb).wrapping_sub(1);
    let addr_bytes = ret.to_le_bytes();
    push_stack(mb, addr_bytes[1]);
    push_stack(mb, addr_bytes[0]);
    reg!(set pc, mb, reg!(get abs_addr, mb));
});
op_fn!(op_rti, mb, {
    let pulled = pop_stack(mb);
    restore_status(mb, pulled);
    let fst = pop_stack(mb);
    let snd = pop_stack(mb);
    reg!(set pc, mb, bytes_to_addr!(fst, snd));
});
op_fn!(op_rts, mb, {
    let fst = pop_stack(mb);
    let snd = pop_stack(mb);
    reg!(set pc, mb, bytes_to_addr!(fst, snd).wrapping_add(1));
});
//endregion

//region Loads
op_fn!(op_lda, mb, {
    let data = read_operand(mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_ldx, mb, {
    let data = read_operand(mb);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_ldy, mb, {
    let data = read_operand(mb);
    reg!(set y, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
//endregion

op_fn!(op_nop, _mb, {
    // no operation; any page-cross penalty was already recorded by the
    // addressing mode
});

//region Register instructions
op_fn!(op_tax, mb, {
    let data = reg!(get acc, mb);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_txa, mb, {
    let data = reg!(get x, mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_tay, mb, {
    let data = reg!(get acc, mb);
    reg!(set y, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_tya, mb, {
    let data = reg!(get y, mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_inx, mb, {
    let data = reg!(get x, mb).wrapping_add(1);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_dex, mb, {
    let data = reg!(get x, mb).wrapping_sub(1);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_iny, mb, {
    let data = reg!(get y, mb).wrapping_add(1);
    reg!(set y, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_dey, mb, {
    let data = reg!(get y, mb).wrapping_sub(1);
    reg!(set y, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
//endregion

//region Store instructions
op_fn!(op_sta, mb, {
    let addr = reg!(get abs_addr, mb);
    let data = reg!(get acc, mb);
    mb.write(addr, data);
});
op_fn!(op_stx, mb, {
    let addr = reg!(get abs_addr, mb);
    let data = reg!(get x, mb);
    mb.write(addr, data);
});
op_fn!(op_sty, mb, {
    let addr = reg!(get abs_addr, mb);
    let data = reg!(get y, mb);
    mb.write(addr, data);
});
//endregion

//region Stack instructions
op_fn!(op_txs, mb, {
    // the one transfer that sets no flags
    let data = reg!(get x, mb);
    reg!(set stack, mb, data);
});
op_fn!(op_tsx, mb, {
    let data = reg!(get stack, mb);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_pha, mb, {
    let data = reg!(get acc, mb);
    push_stack(mb, data);
});
op_fn!(op_php, mb, {
    // the stacked copy always has B and the unused bit set
    let status = reg!(get status, mb) | Status::BREAK | Status::UNUSED;
    push_stack(mb, status.bits());
});
op_fn!(op_pla, mb, {
    let data = pop_stack(mb);
    reg!(set acc, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_plp, mb, {
    let pulled = pop_stack(mb);
    restore_status(mb, pulled);
});
//endregion

//region Undocumented instructions
op_fn!(op_jam, mb, {
    // trapped in T1 with $FF on the data bus; only a reset recovers
    info!("CPU jammed by opcode {:02X}", reg!(get opcode, mb));
    mb.cpu_mut().state.jammed = true;
    mb.force_databus(0xFF);
});
op_fn!(op_lax, mb, {
    // LDA and LDX in one fetch
    let data = read_operand(mb);
    reg!(set acc, mb, data);
    reg!(set x, mb, data);
    check_zero(mb, data);
    check_negative(mb, data);
});
op_fn!(op_sax, mb, {
    // stores A & X without touching any flags
    let addr = reg!(get abs_addr, mb);
    let data = reg!(get acc, mb) & reg!(get x, mb);
    mb.write(addr, data);
});
op_fn!(op_dcp, mb, {
    // DEC the operand, then CMP against the accumulator
    let data = read_operand(mb).wrapping_sub(1);
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, data);
    let acc = reg!(get acc, mb);
    compare_values(mb, acc, data);
});
op_fn!(op_isb, mb, {
    // INC the operand, then SBC it
    let data = read_operand(mb).wrapping_add(1);
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, data);
    add_with_carry(mb, data ^ 0xFF);
});
op_fn!(op_slo, mb, {
    // ASL the operand, then ORA it into the accumulator
    let data = read_operand(mb);
    let shifted = u16::from(data) << 1;
    check_carry(mb, shifted);
    let result = (shifted & 0x00FF) as u8;
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, result);
    let acc = reg!(get acc, mb) | result;
    reg!(set acc, mb, acc);
    check_zero(mb, acc);
    check_negative(mb, acc);
});
op_fn!(op_sre, mb, {
    // LSR the operand, then EOR it into the accumulator
    let data = read_operand(mb);
    set_flag(mb, Status::CARRY, data & 0x01 != 0);
    let result = data >> 1;
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, result);
    let acc = reg!(get acc, mb) ^ result;
    reg!(set acc, mb, acc);
    check_zero(mb, acc);
    check_negative(mb, acc);
});
op_fn!(op_rla, mb, {
    // ROL the operand, then AND it into the accumulator
    let data = read_operand(mb);
    let carry_in = u16::from(reg!(get status, mb).contains(Status::CARRY));
    let rotated = (u16::from(data) << 1) | carry_in;
    check_carry(mb, rotated);
    let result = (rotated & 0x00FF) as u8;
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, result);
    let acc = reg!(get acc, mb) & result;
    reg!(set acc, mb, acc);
    check_zero(mb, acc);
    check_negative(mb, acc);
});
op_fn!(op_rra, mb, {
    // ROR the operand, then ADC it; the rotate's carry-out feeds the add
    let data = read_operand(mb);
    let carry_in = u8::from(reg!(get status, mb).contains(Status::CARRY));
    let result = (data >> 1) | (carry_in << 7);
    set_flag(mb, Status::CARRY, data & 0x01 != 0);
    let addr = reg!(get abs_addr, mb);
    mb.write(addr, result);
    add_with_carry(mb, result);
});
op_fn!(op_unk, mb, {
    // placeholder for the undefined slots: leave every register alone
    warn!(
        "unimplemented opcode {:02X} treated as a no-op",
        reg!(get opcode, mb)
    );
});
//endregion
