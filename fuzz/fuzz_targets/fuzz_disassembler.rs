//! Fuzz target for the disassembler.
//!
//! This target feeds arbitrary byte sequences to the disassembler
//! to find edge cases and crashes in instruction decoding.

#![no_main]

use arbitrary::Arbitrary;
use libsm83::disassembler::format_instruction;
use libsm83::disassemble;
use libfuzzer_sys::fuzz_target;

/// Complete fuzz input
#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
}

fuzz_target!(|input: FuzzInput| {
    // Limit input size to prevent OOM
    if input.bytes.len() > 65536 {
        return;
    }

    let instructions = disassemble(&input.bytes, input.start_address);

    // Verify invariants
    let mut total_size: usize = 0;
    let mut expected_address = input.start_address;

    for instr in &instructions {
        // Each instruction should have correct address
        assert_eq!(instr.address, expected_address);

        // Size should be 1-3 bytes
        assert!(instr.size_bytes >= 1 && instr.size_bytes <= 3);

        // `.byte` entries carry their byte as the operand
        assert!(instr.operand_bytes.len() <= instr.size_bytes as usize);

        // Every template placeholder gets filled in
        let text = format_instruction(instr);
        assert!(!text.is_empty() && !text.contains('{'));

        total_size += instr.size_bytes as usize;
        expected_address = expected_address.wrapping_add(instr.size_bytes as u16);
    }

    // Total size should equal input size
    assert_eq!(total_size, input.bytes.len());
});
