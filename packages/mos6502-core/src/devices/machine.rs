//! The reference machine: a 6502 wired to a flat 64 KiB memory space
//!
//! Real consoles hang a memory map off the bus; this machine exists so the
//! core can be validated on its own, the way the nestest ROM exercises it
//! in automation mode.

use super::bus::{Bus, BusDevice};
use super::cpu::{self, Cpu6502, WithCpu};
use super::mem::Ram;
use super::rom::{self, RomError};

const MEMORY_LEN: usize = 0x1_0000;

/// Where the automation driver maps the first PRG chunk
const PRG_BASE: u16 = 0xC000;

pub struct Machine {
    cpu: Cpu6502,
    ram: Ram,
    /// The one-byte databus latch: the last value driven by a read or write
    last_bus_value: u8,
}

impl Bus for Machine {
    fn read(&mut self, addr: u16) -> u8 {
        let res = self.ram.read(addr, self.last_bus_value);
        self.last_bus_value = res;
        res
    }

    fn peek(&self, addr: u16) -> Option<u8> {
        self.ram.peek(addr).to_optional()
    }

    fn write(&mut self, addr: u16, data: u8) {
        self.ram.write(addr, data);
        self.last_bus_value = data;
    }

    fn force_databus(&mut self, data: u8) {
        self.last_bus_value = data;
    }
}

impl WithCpu for Machine {
    fn cpu(&self) -> &Cpu6502 {
        &self.cpu
    }

    fn cpu_mut(&mut self) -> &mut Cpu6502 {
        &mut self.cpu
    }
}

impl Machine {
    pub fn new() -> Machine {
        Machine {
            cpu: Cpu6502::new(),
            ram: Ram::new(MEMORY_LEN),
            last_bus_value: 0x00,
        }
    }

    /// Power-on: seed the reset vector with the program start address and
    /// run the reset routine
    pub fn init(&mut self, pc_msb: u8, pc_lsb: u8) {
        cpu::init(self, pc_msb, pc_lsb);
    }

    /// Trigger a hardware reset; the only way to recover a jammed CPU
    pub fn reset(&mut self) {
        cpu::reset(self);
    }

    /// Pull the maskable interrupt line between instructions
    pub fn irq(&mut self) {
        cpu::irq(self);
    }

    /// Pull the non-maskable interrupt line between instructions
    pub fn nmi(&mut self) {
        cpu::nmi(self);
    }

    /// Execute one instruction. Returns false once the CPU has jammed, in
    /// which case nothing was dispatched and the caller should stop.
    pub fn step(&mut self) -> bool {
        if self.cpu.state.jammed {
            return false;
        }
        cpu::step(self);
        !self.cpu.state.jammed
    }

    /// Format the nestest-style trace line for the next instruction, then
    /// execute it
    pub fn trace_step(&mut self) -> String {
        let line = cpu::trace_line(self);
        self.step();
        line
    }

    /// The current databus latch value
    pub fn databus(&self) -> u8 {
        self.last_bus_value
    }

    /// Copy the first PRG chunk of an iNES image to $C000, the automation
    /// entry point the reference ROM documents
    pub fn load_ines(&mut self, buf: &[u8]) -> Result<(), RomError> {
        let image = rom::parse(buf)?;
        for (offset, byte) in image.prg_chunk(0).iter().enumerate() {
            self.write(PRG_BASE.wrapping_add(offset as u16), *byte);
        }
        Ok(())
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}
