//! Behavior tests for the CPU core: the power-on/reset contract, flag
//! arithmetic, subroutine and stack discipline, branch timing, the
//! indirect-JMP page-wrap bug, and the undocumented opcodes.

use mos6502_core::devices::bus::Bus;
use mos6502_core::devices::cpu::{Status, WithCpu};
use mos6502_core::devices::machine::Machine;

const PROGRAM_BASE: u16 = 0x0600;

/// Build a machine with `program` at $0600 and the reset vector aimed at it
fn machine_with_program(program: &[u8]) -> Machine {
    let mut machine = Machine::new();
    for (offset, byte) in program.iter().enumerate() {
        machine.write(PROGRAM_BASE + offset as u16, *byte);
    }
    machine.init((PROGRAM_BASE >> 8) as u8, (PROGRAM_BASE & 0xFF) as u8);
    machine
}

fn step_n(machine: &mut Machine, count: usize) {
    for _ in 0..count {
        machine.step();
    }
}

#[test]
fn reset_loads_vector_and_power_on_state() {
    let mut machine = Machine::new();
    machine.init(0x12, 0x34);

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x1234, "Program counter mismatch");
    assert_eq!(state.acc, 0x00, "Accumulator mismatch");
    assert_eq!(state.x, 0x00, "X register mismatch");
    assert_eq!(state.y, 0x00, "Y register mismatch");
    assert_eq!(state.stack, 0xFD, "Stack pointer mismatch");
    assert!(state.status.contains(Status::IRQ_DISABLE), "I should be set");
    assert!(state.status.contains(Status::UNUSED), "U should be set");
    assert_eq!(state.cycles, 7, "Reset should charge 7 cycles");
}

#[test]
fn lda_immediate_sets_negative() {
    let mut machine = machine_with_program(&[0xA9, 0x80, 0x00]);
    let cycles = machine.cpu().state.cycles;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x80, "Accumulator mismatch");
    assert!(state.status.contains(Status::NEGATIVE), "N should be set");
    assert!(!state.status.contains(Status::ZERO), "Z should be clear");
    assert_eq!(state.pc, 0x0602, "Program counter mismatch");
    assert_eq!(state.cycles - cycles, 2, "Cycle count mismatch");
}

#[test]
fn adc_overflows_into_bit_7() {
    // 0x7F + 0x01 flips the sign bit: N and V set, no carry out
    let mut machine = machine_with_program(&[0xA9, 0x7F, 0x69, 0x01]);
    step_n(&mut machine, 2);

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x80, "Accumulator mismatch");
    assert!(state.status.contains(Status::NEGATIVE), "N should be set");
    assert!(state.status.contains(Status::OVERFLOW), "V should be set");
    assert!(!state.status.contains(Status::CARRY), "C should be clear");
    assert!(!state.status.contains(Status::ZERO), "Z should be clear");
}

#[test]
fn sbc_borrows_out() {
    // 0x50 - 0x70 with no borrow in: borrow out (C clear), negative result
    let mut machine = machine_with_program(&[0xA9, 0x50, 0x38, 0xE9, 0x70]);
    step_n(&mut machine, 3);

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0xE0, "Accumulator mismatch");
    assert!(!state.status.contains(Status::CARRY), "C should be clear");
    assert!(state.status.contains(Status::NEGATIVE), "N should be set");
    assert!(!state.status.contains(Status::OVERFLOW), "V should be clear");
}

#[test]
fn sbc_is_adc_of_the_complement() {
    let mut sbc = machine_with_program(&[0xA9, 0x50, 0x38, 0xE9, 0x70]);
    let mut adc = machine_with_program(&[0xA9, 0x50, 0x38, 0x69, 0x70 ^ 0xFF]);
    step_n(&mut sbc, 3);
    step_n(&mut adc, 3);

    assert_eq!(
        sbc.cpu().state.acc,
        adc.cpu().state.acc,
        "Accumulator mismatch"
    );
    assert_eq!(
        sbc.cpu().state.status,
        adc.cpu().state.status,
        "Status register mismatch"
    );
}

#[test]
fn jsr_rts_round_trip() {
    // JSR $0609 ... RTS at $0609; execution resumes at $0603
    let mut machine = machine_with_program(&[
        0x20, 0x09, 0x06, // $0600 JSR $0609
        0xEA, 0xEA, 0xEA, 0xEA, 0xEA, 0xEA, // padding
        0x60, // $0609 RTS
    ]);

    machine.step();
    {
        let state = &machine.cpu().state;
        assert_eq!(state.pc, 0x0609, "Program counter mismatch after JSR");
        assert_eq!(state.stack, 0xFB, "Stack pointer mismatch after JSR");
    }
    // the stacked return address is the JSR's last byte, high byte first
    assert_eq!(machine.peek(0x01FD), Some(0x06), "Stacked PC high mismatch");
    assert_eq!(machine.peek(0x01FC), Some(0x02), "Stacked PC low mismatch");

    machine.step();
    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x0603, "Program counter mismatch after RTS");
    assert_eq!(state.stack, 0xFD, "Stack pointer mismatch after RTS");
}

#[test]
fn indirect_jmp_page_wrap_bug() {
    // a pointer at $02FF takes its high byte from $0200, not $0300
    let mut machine = Machine::new();
    machine.write(PROGRAM_BASE, 0x6C);
    machine.write(PROGRAM_BASE + 1, 0xFF);
    machine.write(PROGRAM_BASE + 2, 0x02);
    machine.write(0x02FF, 0x34);
    machine.write(0x0200, 0x12);
    machine.write(0x0300, 0xFF);
    machine.init(0x06, 0x00);

    let cycles = machine.cpu().state.cycles;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x1234, "Program counter mismatch");
    assert_eq!(state.cycles - cycles, 5, "Cycle count mismatch");
}

#[test]
fn taken_branch_across_a_page_costs_four() {
    // BCC from $00F0 with +$20: 2 base + 1 taken + 1 page cross
    let mut machine = Machine::new();
    machine.write(0x00F0, 0x90);
    machine.write(0x00F1, 0x20);
    machine.init(0x00, 0xF0);

    let cycles = machine.cpu().state.cycles;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x0112, "Program counter mismatch");
    assert_eq!(state.cycles - cycles, 4, "Cycle count mismatch");
}

#[test]
fn taken_branch_within_a_page_costs_three() {
    let mut machine = machine_with_program(&[0x90, 0x10]);
    let cycles = machine.cpu().state.cycles;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x0612, "Program counter mismatch");
    assert_eq!(state.cycles - cycles, 3, "Cycle count mismatch");
}

#[test]
fn untaken_branch_costs_two() {
    // BCS with carry clear falls through
    let mut machine = machine_with_program(&[0xB0, 0x10]);
    let cycles = machine.cpu().state.cycles;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x0602, "Program counter mismatch");
    assert_eq!(state.cycles - cycles, 2, "Cycle count mismatch");
}

#[test]
fn absolute_y_page_cross_charges_the_documented_reads() {
    // LDA $12F0,Y with Y=$20 crosses into $13xx: 4 + 1 cycles
    let mut crossing = machine_with_program(&[0xA0, 0x20, 0xB9, 0xF0, 0x12]);
    let cycles = crossing.cpu().state.cycles;
    step_n(&mut crossing, 2);
    assert_eq!(
        crossing.cpu().state.cycles - cycles,
        2 + 5,
        "Cycle count mismatch on a page cross"
    );

    let mut direct = machine_with_program(&[0xA0, 0x01, 0xB9, 0xF0, 0x12]);
    let cycles = direct.cpu().state.cycles;
    step_n(&mut direct, 2);
    assert_eq!(
        direct.cpu().state.cycles - cycles,
        2 + 4,
        "Cycle count mismatch without a page cross"
    );
}

#[test]
fn zero_page_x_wraps_within_the_zero_page() {
    // base $FF + X=$02 lands on $0001, not $0101
    let mut machine = Machine::new();
    machine.write(0x0001, 0x77);
    machine.write(PROGRAM_BASE, 0xA2);
    machine.write(PROGRAM_BASE + 1, 0x02);
    machine.write(PROGRAM_BASE + 2, 0xB5);
    machine.write(PROGRAM_BASE + 3, 0xFF);
    machine.init(0x06, 0x00);

    step_n(&mut machine, 2);
    assert_eq!(machine.cpu().state.acc, 0x77, "Accumulator mismatch");
}

#[test]
fn stack_push_wraps_from_the_bottom_of_page_one() {
    // with SP=$00, a push writes $0100 and SP wraps to $FF
    let mut machine = machine_with_program(&[0xA2, 0x00, 0x9A, 0xA9, 0xAB, 0x48]);
    step_n(&mut machine, 4);

    assert_eq!(machine.peek(0x0100), Some(0xAB), "Stacked byte mismatch");
    assert_eq!(machine.cpu().state.stack, 0xFF, "Stack pointer mismatch");
}

#[test]
fn pha_pla_round_trip() {
    let mut machine = machine_with_program(&[0xA9, 0x42, 0x48, 0xA9, 0x00, 0x68]);
    step_n(&mut machine, 4);

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x42, "Accumulator mismatch");
    assert!(!state.status.contains(Status::ZERO), "Z should be clear");
    assert!(!state.status.contains(Status::NEGATIVE), "N should be clear");
    assert_eq!(state.stack, 0xFD, "Stack pointer mismatch");
}

#[test]
fn php_plp_round_trip() {
    let mut machine = machine_with_program(&[
        0x38, // SEC
        0xF8, // SED
        0x08, // PHP
        0x18, // CLC
        0xD8, // CLD
        0x28, // PLP
    ]);
    step_n(&mut machine, 3);
    // the stacked copy carries B and the unused bit regardless of live state
    assert_eq!(machine.peek(0x01FD), Some(0x3D), "Stacked status mismatch");

    step_n(&mut machine, 3);
    let status = machine.cpu().state.status;
    assert!(status.contains(Status::CARRY), "C should be restored");
    assert!(status.contains(Status::DECIMAL), "D should be restored");
    assert!(!status.contains(Status::BREAK), "B should be clear after PLP");
    assert!(status.contains(Status::UNUSED), "U should stay set");
}

#[test]
fn jam_halts_until_reset() {
    let mut machine = machine_with_program(&[0x02]);

    assert!(!machine.step(), "JAM should report a halt");
    let state = &machine.cpu().state;
    assert!(state.jammed, "JAM flag mismatch");
    assert_eq!(state.pc, 0x0601, "Program counter mismatch");
    assert_eq!(machine.databus(), 0xFF, "Databus latch mismatch");

    // a jammed CPU refuses to dispatch
    assert!(!machine.step());
    assert_eq!(machine.cpu().state.pc, 0x0601, "PC moved while jammed");

    machine.reset();
    assert!(!machine.cpu().state.jammed, "Reset should clear the jam");
    assert_eq!(machine.cpu().state.pc, 0x0600, "Program counter mismatch");
}

#[test]
fn masked_irq_still_charges_seven_cycles() {
    let mut machine = machine_with_program(&[0xEA]);
    let state = machine.cpu().state;
    machine.irq();

    let after = &machine.cpu().state;
    assert_eq!(after.pc, state.pc, "PC should not move under a masked IRQ");
    assert_eq!(after.stack, state.stack, "SP should not move under a masked IRQ");
    assert_eq!(after.cycles - state.cycles, 7, "Cycle count mismatch");
}

#[test]
fn irq_services_when_unmasked() {
    let mut machine = Machine::new();
    machine.write(PROGRAM_BASE, 0x58); // CLI
    machine.write(0xFFFE, 0x00);
    machine.write(0xFFFF, 0x80);
    machine.init(0x06, 0x00);

    machine.step();
    let cycles = machine.cpu().state.cycles;
    machine.irq();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x8000, "Program counter mismatch");
    assert_eq!(state.stack, 0xFA, "Stack pointer mismatch");
    assert!(state.status.contains(Status::IRQ_DISABLE), "I should be set");
    assert_eq!(state.cycles - cycles, 7, "Cycle count mismatch");
    // the status was stacked before I was set, with B clear
    assert_eq!(machine.peek(0x01FB), Some(0x20), "Stacked status mismatch");
}

#[test]
fn nmi_vectors_unconditionally() {
    let mut machine = Machine::new();
    machine.write(PROGRAM_BASE, 0xEA);
    machine.write(0xFFFA, 0x00);
    machine.write(0xFFFB, 0x90);
    machine.init(0x06, 0x00);

    let cycles = machine.cpu().state.cycles;
    machine.nmi();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x9000, "Program counter mismatch");
    assert_eq!(state.stack, 0xFA, "Stack pointer mismatch");
    assert_eq!(state.cycles - cycles, 7, "Cycle count mismatch");
}

#[test]
fn lsr_always_clears_negative() {
    let mut machine = machine_with_program(&[0xA9, 0x01, 0x4A]);
    step_n(&mut machine, 2);

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x00, "Accumulator mismatch");
    assert!(state.status.contains(Status::CARRY), "C should take bit 0");
    assert!(state.status.contains(Status::ZERO), "Z should be set");
    assert!(!state.status.contains(Status::NEGATIVE), "N should be clear");
}

#[test]
fn ror_rotates_through_carry() {
    let mut machine = machine_with_program(&[0x38, 0xA9, 0x02, 0x6A]);
    step_n(&mut machine, 3);

    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x81, "Accumulator mismatch");
    assert!(!state.status.contains(Status::CARRY), "C should take old bit 0");
    assert!(state.status.contains(Status::NEGATIVE), "N should be set");
}

#[test]
fn asl_on_memory_leaves_the_accumulator_alone() {
    let mut machine = Machine::new();
    machine.write(0x0010, 0x80);
    machine.write(PROGRAM_BASE, 0x06);
    machine.write(PROGRAM_BASE + 1, 0x10);
    machine.init(0x06, 0x00);

    machine.step();
    assert_eq!(machine.peek(0x0010), Some(0x00), "Memory operand mismatch");
    assert_eq!(machine.cpu().state.acc, 0x00, "Accumulator mismatch");
    let status = machine.cpu().state.status;
    assert!(status.contains(Status::CARRY), "C should take bit 7");
    assert!(status.contains(Status::ZERO), "Z should be set");
}

#[test]
fn lax_loads_both_registers() {
    let mut machine = Machine::new();
    machine.write(0x0010, 0x55);
    machine.write(PROGRAM_BASE, 0xA7);
    machine.write(PROGRAM_BASE + 1, 0x10);
    machine.init(0x06, 0x00);

    machine.step();
    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x55, "Accumulator mismatch");
    assert_eq!(state.x, 0x55, "X register mismatch");
}

#[test]
fn sax_stores_the_conjunction_without_flags() {
    let mut machine = machine_with_program(&[0xA9, 0xCC, 0xA2, 0xAA, 0x87, 0x10]);
    step_n(&mut machine, 3);

    assert_eq!(machine.peek(0x0010), Some(0x88), "Stored value mismatch");
    // flags still reflect the LDX, untouched by SAX
    assert!(
        machine.cpu().state.status.contains(Status::NEGATIVE),
        "N should be left from LDX"
    );
}

#[test]
fn dcp_decrements_then_compares() {
    let mut machine = Machine::new();
    machine.write(0x0010, 0x41);
    machine.write(PROGRAM_BASE, 0xA9);
    machine.write(PROGRAM_BASE + 1, 0x40);
    machine.write(PROGRAM_BASE + 2, 0xC7);
    machine.write(PROGRAM_BASE + 3, 0x10);
    machine.init(0x06, 0x00);

    step_n(&mut machine, 2);
    assert_eq!(machine.peek(0x0010), Some(0x40), "Memory operand mismatch");
    let status = machine.cpu().state.status;
    assert!(status.contains(Status::ZERO), "Z should be set on equality");
    assert!(status.contains(Status::CARRY), "C should be set on no-borrow");
}

#[test]
fn isb_increments_then_subtracts() {
    let mut machine = Machine::new();
    machine.write(0x0010, 0x3F);
    machine.write(PROGRAM_BASE, 0xA9);
    machine.write(PROGRAM_BASE + 1, 0x50);
    machine.write(PROGRAM_BASE + 2, 0x38);
    machine.write(PROGRAM_BASE + 3, 0xE7);
    machine.write(PROGRAM_BASE + 4, 0x10);
    machine.init(0x06, 0x00);

    step_n(&mut machine, 3);
    assert_eq!(machine.peek(0x0010), Some(0x40), "Memory operand mismatch");
    let state = &machine.cpu().state;
    assert_eq!(state.acc, 0x10, "Accumulator mismatch");
    assert!(state.status.contains(Status::CARRY), "C should be set");
}

#[test]
fn unknown_opcode_is_a_silent_no_op() {
    let mut machine = machine_with_program(&[0x0B, 0xEA]);
    let before = machine.cpu().state;
    machine.step();

    let state = &machine.cpu().state;
    assert_eq!(state.pc, 0x0601, "Program counter mismatch");
    assert_eq!(state.cycles, before.cycles, "Don't-care slots charge nothing");
    assert_eq!(state.acc, before.acc, "Accumulator mismatch");
    assert_eq!(state.status, before.status, "Status register mismatch");
}
