//! The 256-entry instruction lookup table.
//!
//! Each slot carries the display name (a leading `*` marks an undocumented
//! opcode), the mnemonic and addressing-mode tags used for dispatch, and
//! the base cycle cost charged when the instruction retires. A cost of -1
//! marks the slots whose timing is undefined on real silicon; the control
//! unit clamps those to zero.

use super::structs::{AddressingMode, Mnemonic};

/// One row of the decode table.
#[derive(Debug)]
pub struct OpDef {
    pub name: &'static str,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    pub cycles: i8,
}

const fn def(name: &'static str, mnemonic: Mnemonic, mode: AddressingMode, cycles: i8) -> OpDef {
    OpDef {
        name,
        mnemonic,
        mode,
        cycles,
    }
}

/// Look up the table row for an opcode byte. Total over all 256 values.
pub fn decode(opcode: u8) -> &'static OpDef {
    &OPCODE_TABLE[opcode as usize]
}

use super::structs::AddressingMode::*;
use super::structs::Mnemonic::*;

#[rustfmt::skip]
pub static OPCODE_TABLE: [OpDef; 256] = [
    // 0x0_
    def("BRK", BRK, Impl, 7),  def("ORA", ORA, IndX, 6),  def("*JAM", JAM, Impl, -1), def("*SLO", SLO, IndX, 8),
    def("*NOP", NOP, Zpg, 3),  def("ORA", ORA, Zpg, 3),   def("ASL", ASL, Zpg, 5),    def("*SLO", SLO, Zpg, 5),
    def("PHP", PHP, Impl, 3),  def("ORA", ORA, Imm, 2),   def("ASL", ASL, Acc, 2),    def("UNK", UNK, Impl, -1),
    def("*NOP", NOP, Abs, 4),  def("ORA", ORA, Abs, 4),   def("ASL", ASL, Abs, 6),    def("*SLO", SLO, Abs, 6),
    // 0x1_
    def("BPL", BPL, Rel, 2),   def("ORA", ORA, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*SLO", SLO, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("ORA", ORA, ZpgX, 4),  def("ASL", ASL, ZpgX, 6),   def("*SLO", SLO, ZpgX, 6),
    def("CLC", CLC, Impl, 2),  def("ORA", ORA, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*SLO", SLO, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("ORA", ORA, AbsX, 4),  def("ASL", ASL, AbsX, 7),   def("*SLO", SLO, AbsX, 7),
    // 0x2_
    def("JSR", JSR, Abs, 6),   def("AND", AND, IndX, 6),  def("*JAM", JAM, Impl, -1), def("*RLA", RLA, IndX, 8),
    def("BIT", BIT, Zpg, 3),   def("AND", AND, Zpg, 3),   def("ROL", ROL, Zpg, 5),    def("*RLA", RLA, Zpg, 5),
    def("PLP", PLP, Impl, 4),  def("AND", AND, Imm, 2),   def("ROL", ROL, Acc, 2),    def("UNK", UNK, Impl, -1),
    def("BIT", BIT, Abs, 4),   def("AND", AND, Abs, 4),   def("ROL", ROL, Abs, 6),    def("*RLA", RLA, Abs, 6),
    // 0x3_
    def("BMI", BMI, Rel, 2),   def("AND", AND, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*RLA", RLA, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("AND", AND, ZpgX, 4),  def("ROL", ROL, ZpgX, 6),   def("*RLA", RLA, ZpgX, 6),
    def("SEC", SEC, Impl, 2),  def("AND", AND, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*RLA", RLA, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("AND", AND, AbsX, 4),  def("ROL", ROL, AbsX, 7),   def("*RLA", RLA, AbsX, 7),
    // 0x4_
    def("RTI", RTI, Impl, 6),  def("EOR", EOR, IndX, 6),  def("*JAM", JAM, Impl, -1), def("*SRE", SRE, IndX, 8),
    def("*NOP", NOP, Zpg, 3),  def("EOR", EOR, Zpg, 3),   def("LSR", LSR, Zpg, 5),    def("*SRE", SRE, Zpg, 5),
    def("PHA", PHA, Impl, 3),  def("EOR", EOR, Imm, 2),   def("LSR", LSR, Acc, 2),    def("UNK", UNK, Impl, -1),
    def("JMP", JMP, Abs, 3),   def("EOR", EOR, Abs, 4),   def("LSR", LSR, Abs, 6),    def("*SRE", SRE, Abs, 6),
    // 0x5_
    def("BVC", BVC, Rel, 2),   def("EOR", EOR, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*SRE", SRE, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("EOR", EOR, ZpgX, 4),  def("LSR", LSR, ZpgX, 6),   def("*SRE", SRE, ZpgX, 6),
    def("CLI", CLI, Impl, 2),  def("EOR", EOR, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*SRE", SRE, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("EOR", EOR, AbsX, 4),  def("LSR", LSR, AbsX, 7),   def("*SRE", SRE, AbsX, 7),
    // 0x6_
    def("RTS", RTS, Impl, 6),  def("ADC", ADC, IndX, 6),  def("*JAM", JAM, Impl, -1), def("*RRA", RRA, IndX, 8),
    def("*NOP", NOP, Zpg, 3),  def("ADC", ADC, Zpg, 3),   def("ROR", ROR, Zpg, 5),    def("*RRA", RRA, Zpg, 5),
    def("PLA", PLA, Impl, 4),  def("ADC", ADC, Imm, 2),   def("ROR", ROR, Acc, 2),    def("UNK", UNK, Impl, -1),
    def("JMP", JMP, Ind, 5),   def("ADC", ADC, Abs, 4),   def("ROR", ROR, Abs, 6),    def("*RRA", RRA, Abs, 6),
    // 0x7_
    def("BVS", BVS, Rel, 2),   def("ADC", ADC, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*RRA", RRA, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("ADC", ADC, ZpgX, 4),  def("ROR", ROR, ZpgX, 6),   def("*RRA", RRA, ZpgX, 6),
    def("SEI", SEI, Impl, 2),  def("ADC", ADC, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*RRA", RRA, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("ADC", ADC, AbsX, 4),  def("ROR", ROR, AbsX, 7),   def("*RRA", RRA, AbsX, 7),
    // 0x8_
    def("*NOP", NOP, Imm, 2),  def("STA", STA, IndX, 6),  def("*NOP", NOP, Imm, 2),   def("*SAX", SAX, IndX, 6),
    def("STY", STY, Zpg, 3),   def("STA", STA, Zpg, 3),   def("STX", STX, Zpg, 3),    def("*SAX", SAX, Zpg, 3),
    def("DEY", DEY, Impl, 2),  def("*NOP", NOP, Imm, 2),  def("TXA", TXA, Impl, 2),   def("UNK", UNK, Impl, -1),
    def("STY", STY, Abs, 4),   def("STA", STA, Abs, 4),   def("STX", STX, Abs, 4),    def("*SAX", SAX, Abs, 4),
    // 0x9_
    def("BCC", BCC, Rel, 2),   def("STA", STA, IndY, 6),  def("*JAM", JAM, Impl, -1), def("UNK", UNK, Impl, -1),
    def("STY", STY, ZpgX, 4),  def("STA", STA, ZpgX, 4),  def("STX", STX, ZpgY, 4),   def("*SAX", SAX, ZpgY, 4),
    def("TYA", TYA, Impl, 2),  def("STA", STA, AbsY, 5),  def("TXS", TXS, Impl, 2),   def("UNK", UNK, Impl, -1),
    def("UNK", UNK, Impl, -1), def("STA", STA, AbsX, 5),  def("UNK", UNK, Impl, -1),  def("UNK", UNK, Impl, -1),
    // 0xA_
    def("LDY", LDY, Imm, 2),   def("LDA", LDA, IndX, 6),  def("LDX", LDX, Imm, 2),    def("*LAX", LAX, IndX, 6),
    def("LDY", LDY, Zpg, 3),   def("LDA", LDA, Zpg, 3),   def("LDX", LDX, Zpg, 3),    def("*LAX", LAX, Zpg, 3),
    def("TAY", TAY, Impl, 2),  def("LDA", LDA, Imm, 2),   def("TAX", TAX, Impl, 2),   def("UNK", UNK, Impl, -1),
    def("LDY", LDY, Abs, 4),   def("LDA", LDA, Abs, 4),   def("LDX", LDX, Abs, 4),    def("*LAX", LAX, Abs, 4),
    // 0xB_
    def("BCS", BCS, Rel, 2),   def("LDA", LDA, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*LAX", LAX, IndY, 5),
    def("LDY", LDY, ZpgX, 4),  def("LDA", LDA, ZpgX, 4),  def("LDX", LDX, ZpgY, 4),   def("*LAX", LAX, ZpgY, 4),
    def("CLV", CLV, Impl, 2),  def("LDA", LDA, AbsY, 4),  def("TSX", TSX, Impl, 2),   def("UNK", UNK, Impl, -1),
    def("LDY", LDY, AbsX, 4),  def("LDA", LDA, AbsX, 4),  def("LDX", LDX, AbsY, 4),   def("*LAX", LAX, AbsY, 4),
    // 0xC_
    def("CPY", CPY, Imm, 2),   def("CMP", CMP, IndX, 6),  def("*NOP", NOP, Imm, 2),   def("*DCP", DCP, IndX, 8),
    def("CPY", CPY, Zpg, 3),   def("CMP", CMP, Zpg, 3),   def("DEC", DEC, Zpg, 5),    def("*DCP", DCP, Zpg, 5),
    def("INY", INY, Impl, 2),  def("CMP", CMP, Imm, 2),   def("DEX", DEX, Impl, 2),   def("UNK", UNK, Impl, -1),
    def("CPY", CPY, Abs, 4),   def("CMP", CMP, Abs, 4),   def("DEC", DEC, Abs, 6),    def("*DCP", DCP, Abs, 6),
    // 0xD_
    def("BNE", BNE, Rel, 2),   def("CMP", CMP, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*DCP", DCP, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("CMP", CMP, ZpgX, 4),  def("DEC", DEC, ZpgX, 6),   def("*DCP", DCP, ZpgX, 6),
    def("CLD", CLD, Impl, 2),  def("CMP", CMP, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*DCP", DCP, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("CMP", CMP, AbsX, 4),  def("DEC", DEC, AbsX, 7),   def("*DCP", DCP, AbsX, 7),
    // 0xE_
    def("CPX", CPX, Imm, 2),   def("SBC", SBC, IndX, 6),  def("*NOP", NOP, Imm, 2),   def("*ISB", ISB, IndX, 8),
    def("CPX", CPX, Zpg, 3),   def("SBC", SBC, Zpg, 3),   def("INC", INC, Zpg, 5),    def("*ISB", ISB, Zpg, 5),
    def("INX", INX, Impl, 2),  def("SBC", SBC, Imm, 2),   def("NOP", NOP, Impl, 2),   def("*SBC", SBC, Imm, 2),
    def("CPX", CPX, Abs, 4),   def("SBC", SBC, Abs, 4),   def("INC", INC, Abs, 6),    def("*ISB", ISB, Abs, 6),
    // 0xF_
    def("BEQ", BEQ, Rel, 2),   def("SBC", SBC, IndY, 5),  def("*JAM", JAM, Impl, -1), def("*ISB", ISB, IndY, 8),
    def("*NOP", NOP, ZpgX, 4), def("SBC", SBC, ZpgX, 4),  def("INC", INC, ZpgX, 6),   def("*ISB", ISB, ZpgX, 6),
    def("SED", SED, Impl, 2),  def("SBC", SBC, AbsY, 4),  def("*NOP", NOP, Impl, 2),  def("*ISB", ISB, AbsY, 7),
    def("*NOP", NOP, AbsX, 4), def("SBC", SBC, AbsX, 4),  def("INC", INC, AbsX, 7),   def("*ISB", ISB, AbsX, 7),
];
