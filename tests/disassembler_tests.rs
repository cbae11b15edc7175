//! Tests for the disassembler against the opcode table.

use libsm83::disassembler::format_instruction;
use libsm83::{disassemble, disassemble_at, FlatMemory, MemoryBus, CPU, OPCODE_TABLE};

#[test]
fn test_cartridge_entry_listing() {
    // Typical header entry followed by a short loop
    let code = [
        0x00, // NOP
        0xC3, 0x50, 0x01, // JP $0150
        0xF3, // DI
        0x31, 0xFE, 0xFF, // LD SP,$FFFE
        0xAF, // XOR A
        0xE0, 0x0F, // LDH ($FF0F),A
        0x05, // DEC B
        0x20, 0xFD, // JR NZ,$010B
    ];

    let text: Vec<String> = disassemble(&code, 0x0100)
        .iter()
        .map(format_instruction)
        .collect();

    assert_eq!(
        text,
        [
            "NOP",
            "JP $0150",
            "DI",
            "LD SP,$FFFE",
            "XOR A",
            "LDH ($FF0F),A",
            "DEC B",
            "JR NZ,$010B",
        ]
    );
}

#[test]
fn test_every_opcode_formats_without_placeholders() {
    for opcode in 0u8..=0xFF {
        let instr = &disassemble(&[opcode, 0x12, 0x34], 0x0000)[0];
        let text = format_instruction(instr);

        assert!(!text.contains('{'), "opcode 0x{:02X}: {}", opcode, text);
        assert!(!text.is_empty());

        let metadata = &OPCODE_TABLE[opcode as usize];
        if metadata.defined {
            assert_eq!(instr.size_bytes, metadata.size_bytes);
        } else {
            assert_eq!(text, format!(".byte ${:02X}", opcode));
        }
    }
}

#[test]
fn test_every_cb_opcode_disassembles() {
    let mut seen = std::collections::HashSet::new();

    for cb_opcode in 0u8..=0xFF {
        let instr = &disassemble(&[0xCB, cb_opcode], 0x0000)[0];
        assert_eq!(instr.size_bytes, 2);
        seen.insert(format_instruction(instr));
    }

    // All 256 CB instructions are distinct
    assert_eq!(seen.len(), 256);
}

#[test]
fn test_disassemble_at_follows_cpu() {
    let mut memory = FlatMemory::new();
    memory.load(
        0x0100,
        &[
            0x21, 0x00, 0xC0, // LD HL,$C000
            0xCB, 0xFE, // SET 7,(HL)
            0x18, 0xF9, // JR $0100
        ],
    );

    let mut cpu = CPU::new(memory);
    let expected = ["LD HL,$C000", "SET 7,(HL)", "JR $0100", "LD HL,$C000"];

    for text in expected {
        let instr = disassemble_at(cpu.memory(), cpu.pc());
        assert_eq!(format_instruction(&instr), text);
        cpu.step().unwrap();
    }
}
