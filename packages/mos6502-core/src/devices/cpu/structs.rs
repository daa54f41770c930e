/// A struct holding state information about a 6502 CPU.
///
/// This struct is held internally, but can be copied to power things like
/// debug formatters and, if taken at the end of an instruction,
/// serialization.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct CpuState {
    /// The Accumulator register
    pub acc: u8,

    /// X index register
    pub x: u8,

    /// Y index register
    pub y: u8,

    /// The stack pointer
    ///
    /// # Note
    ///
    /// This register is a pointer to a location in memory on the first page
    /// ($01XX) of memory. The 6502 uses a bottom-up stack, so the 'first'
    /// location on the stack is `$01FF` and the 'last' is `$0100`.
    ///
    /// Stack _overflow_ occurs when the stack pointer decreases all the way
    /// to $00 and wraps around to $FF (the beginning). _Underflow_ occurs
    /// the other way around, from $FF to $00.
    pub stack: u8,

    /// The program counter
    pub pc: u16,

    /// The program status register.
    pub status: Status,

    /// The total number of cycles that this CPU has run
    ///
    /// Cycles are charged in bulk when an instruction retires: the base
    /// cost from the lookup table plus any page-cross or taken-branch
    /// adjustments recorded along the way.
    pub cycles: u64,

    /// The effective address latched by the addressing-mode fetch
    ///
    /// Valid only between the operand fetch and the opcode handler that
    /// consumes it.
    pub abs_addr: u16,

    /// The sign-extended branch displacement latched by relative addressing
    pub rel_addr: u16,

    /// The opcode byte most recently fetched
    pub opcode: u8,

    /// The addressing mode of the opcode being executed
    pub addr_mode: AddressingMode,

    /// The mnemonic of the opcode being executed
    pub mnemonic: Mnemonic,

    /// Set when a halting illegal opcode has executed. Only a reset clears
    /// it; the driver loop must stop dispatching while it is set.
    pub jammed: bool,

    /// The reset pin, active low. Power-on holds it low so the first init
    /// runs the reset routine; the routine releases it.
    pub reset_pin: bool,
}

/// The addressing mode for the CPU
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum AddressingMode {
    /// Operate directly on the accumulator
    Acc,
    /// No operand at all
    Impl,
    /// The operand byte itself is the data
    Imm,
    /// Zero-Page
    Zpg,
    /// Zero-Page indexed, X register (wraps within the zero page)
    ZpgX,
    /// Zero-Page indexed, Y register (wraps within the zero page)
    ZpgY,
    /// The 16-bit address is included in the operand
    Abs,
    /// Absolute indexed, plus X register
    AbsX,
    /// Absolute indexed, plus Y register
    AbsY,
    /// Indirect through a 16-bit pointer; JMP only, complete with the
    /// page-wrap hardware bug
    Ind,
    /// Indexed Indirect (d, x)
    IndX,
    /// Indirect Indexed (d), y
    IndY,
    /// Signed displacement relative to the next instruction
    Rel,
}

/// The CPU opcode mnemonic
///
/// Mnemonics past `TYA` are the implemented subset of the undocumented
/// opcodes; `UNK` stands in for the slots that are stable enough to decode
/// but not worth emulating.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[rustfmt::skip]
pub enum Mnemonic {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC,
    CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP,
    JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI,
    RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
    // undocumented
    DCP, ISB, JAM, LAX, RLA, RRA, SAX, SLO, SRE, UNK,
}

bitflags! {
    pub struct Status: u8 {
        const CARRY = 0x01;
        const ZERO = 0x02;
        const IRQ_DISABLE = 0x04;
        const DECIMAL = 0x08;
        const BREAK = 0x10;
        const UNUSED = 0x20;
        const OVERFLOW = 0x40;
        const NEGATIVE = 0x80;
    }
}

/// State at the moment power is applied, before the reset routine runs.
///
/// The stack pointer starts at $00; the reset routine's three fake pushes
/// then leave it at $FD, which is what the hardware (and nestest) observe.
pub const POWERON_CPU_STATE: CpuState = CpuState {
    acc: 0,
    x: 0,
    y: 0,
    stack: 0x00,
    pc: 0,
    status: Status::empty(),
    cycles: 0,
    abs_addr: 0,
    rel_addr: 0,
    opcode: 0,
    addr_mode: AddressingMode::Impl,
    mnemonic: Mnemonic::UNK,
    jammed: false,
    reset_pin: false,
};
