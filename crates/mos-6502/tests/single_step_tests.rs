//! Integration tests using Tom Harte's `SingleStepTests` for the 6502.
//!
//! Each documented opcode file holds 10,000 cases comparing register and
//! memory state, plus the cycle count, after a single instruction.
//! Undocumented opcodes are skipped, as are ADC/SBC cases that start in
//! decimal mode (arithmetic here is always binary).
//!
//! Test data lives in `test-data/65x02/6502/v1/XX.json`.

use std::fs;
use std::path::Path;

use emu_core::{Bus, Cpu};
use mos_6502::{Mnemonic, Mos6502, Opcode, Registers, Status, flags};
use serde::Deserialize;

/// Flat 64KB RAM bus for testing.
struct TestBus {
    ram: Box<[u8]>,
}

impl TestBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x1_0000].into_boxed_slice(),
        }
    }

    fn load_ram(&mut self, entries: &[(u16, u8)]) {
        for &(addr, value) in entries {
            self.ram[usize::from(addr)] = value;
        }
    }

    fn peek(&self, addr: u16) -> u8 {
        self.ram[usize::from(addr)]
    }
}

impl Bus for TestBus {
    fn read(&mut self, addr: u16) -> u8 {
        self.ram[usize::from(addr)]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.ram[usize::from(addr)] = value;
    }
}

/// JSON test case format.
#[derive(Deserialize)]
struct TestCase {
    name: String,
    initial: CpuState,
    #[serde(rename = "final")]
    final_state: CpuState,
    cycles: Vec<(u16, u8, String)>,
}

/// JSON CPU state format.
#[derive(Deserialize)]
struct CpuState {
    pc: u16,
    s: u8,
    a: u8,
    x: u8,
    y: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

/// Set up the CPU and bus from the initial test state.
fn setup(cpu: &mut Mos6502, bus: &mut TestBus, state: &CpuState) {
    bus.load_ram(&state.ram);
    cpu.set_registers(Registers {
        a: state.a,
        x: state.x,
        y: state.y,
        s: state.s,
        pc: state.pc,
        p: Status::from_byte(state.p),
    });
}

/// Compare the CPU/bus state against expected, returning a list of mismatches.
fn compare(cpu: &Mos6502, bus: &TestBus, expected: &CpuState) -> Vec<String> {
    let mut errors = Vec::new();
    let regs = cpu.registers();

    if regs.pc != expected.pc {
        errors.push(format!("PC: got ${:04X}, want ${:04X}", regs.pc, expected.pc));
    }
    if regs.s != expected.s {
        errors.push(format!("S: got ${:02X}, want ${:02X}", regs.s, expected.s));
    }
    if regs.a != expected.a {
        errors.push(format!("A: got ${:02X}, want ${:02X}", regs.a, expected.a));
    }
    if regs.x != expected.x {
        errors.push(format!("X: got ${:02X}, want ${:02X}", regs.x, expected.x));
    }
    if regs.y != expected.y {
        errors.push(format!("Y: got ${:02X}, want ${:02X}", regs.y, expected.y));
    }

    // B and U only exist in pushed copies of P.
    let actual_p = regs.p.to_byte() | flags::B | flags::U;
    let expected_p = expected.p | flags::B | flags::U;
    if actual_p != expected_p {
        errors.push(format!(
            "P: got ${actual_p:02X} ({actual_p:08b}), want ${expected_p:02X} ({expected_p:08b})"
        ));
    }

    for &(addr, expected_val) in &expected.ram {
        let actual_val = bus.peek(addr);
        if actual_val != expected_val {
            errors.push(format!(
                "RAM[${addr:04X}]: got ${actual_val:02X}, want ${expected_val:02X}"
            ));
        }
    }

    errors
}

#[test]
#[ignore = "requires test-data/65x02 - run with --ignored"]
fn run_all() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("parent of crate dir")
        .parent()
        .expect("workspace root")
        .join("test-data/65x02/6502/v1");

    if !test_dir.exists() {
        eprintln!("Test data not found at {}", test_dir.display());
        eprintln!("Skipping SingleStepTests.");
        return;
    }

    let mut total_pass = 0u64;
    let mut total_fail = 0u64;
    let mut total_files = 0u32;

    for opcode in 0..=0xFF_u8 {
        let Some(op) = Opcode::decode(opcode) else {
            continue;
        };
        let filename = format!("{opcode:02x}.json");
        let path = test_dir.join(&filename);
        if !path.exists() {
            continue;
        }

        let data = fs::read_to_string(&path).unwrap_or_else(|e| {
            panic!("Failed to read {}: {e}", path.display());
        });
        let tests: Vec<TestCase> = serde_json::from_str(&data).unwrap_or_else(|e| {
            panic!("Failed to parse {}: {e}", path.display());
        });
        let decimal_sensitive = matches!(op.mnemonic, Mnemonic::Adc | Mnemonic::Sbc);

        let mut file_pass = 0u32;
        let mut file_fail = 0u32;
        let mut first_failures: Vec<String> = Vec::new();

        for test in &tests {
            if decimal_sensitive && test.initial.p & flags::D != 0 {
                continue;
            }

            let mut cpu = Mos6502::new();
            let mut bus = TestBus::new();
            setup(&mut cpu, &mut bus, &test.initial);

            let mut errors = match cpu.step(&mut bus) {
                Ok(cycles) if usize::from(cycles) != test.cycles.len() => vec![format!(
                    "cycles: got {cycles}, want {}",
                    test.cycles.len()
                )],
                Ok(_) => Vec::new(),
                Err(e) => vec![e.to_string()],
            };
            errors.extend(compare(&cpu, &bus, &test.final_state));

            if errors.is_empty() {
                file_pass += 1;
            } else {
                file_fail += 1;
                if first_failures.len() < 5 {
                    first_failures.push(format!("  FAIL [{}]: {}", test.name, errors.join(", ")));
                }
            }
        }

        let status = if file_fail == 0 { "PASS" } else { "FAIL" };
        println!(
            "Opcode ${opcode:02X} {} ({filename}): {status} - {file_pass}/{} passed",
            op.mnemonic,
            file_pass + file_fail
        );
        for msg in &first_failures {
            println!("{msg}");
        }

        total_pass += u64::from(file_pass);
        total_fail += u64::from(file_fail);
        total_files += 1;
    }

    println!();
    println!("=== SingleStepTests Summary ===");
    println!(
        "Files: {total_files}, Total: {}, Pass: {total_pass}, Fail: {total_fail}",
        total_pass + total_fail
    );

    assert_eq!(total_fail, 0, "{total_fail} tests failed");
}
