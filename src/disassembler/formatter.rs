//! Formatting functions for disassembled instructions
//!
//! Numbers are written in hexadecimal with a `$` prefix. Relative jumps show
//! their target address, SP displacements a signed decimal offset.

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::instructions::cb;
use crate::opcodes::OPCODE_TABLE;

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string containing the formatted assembly instruction
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format the operand text from the opcode's template
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    // Special case for .byte directive (data / undefined opcodes)
    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let template = OPCODE_TABLE[instr.opcode as usize].operands;
    let byte = instr.operand_bytes.first().copied().unwrap_or(0);

    let value = match instr.addressing_mode {
        Implied => return template.to_string(),
        Prefix => return cb::operands(byte),
        Immediate8 => format!("${:02X}", byte),
        Immediate16 | Absolute => {
            let high = instr.operand_bytes.get(1).copied().unwrap_or(0);
            format!("${:04X}", u16::from_le_bytes([byte, high]))
        }
        HighPage => format!("${:04X}", 0xFF00 | byte as u16),
        Relative => {
            // Offset counts from the end of the 2-byte instruction
            let target = instr.address.wrapping_add(2).wrapping_add(byte as i8 as u16);
            format!("${:04X}", target)
        }
        SignedImmediate => format!("{:+}", byte as i8),
    };

    substitute(template, &value)
}

/// Replace the single `{...}` placeholder in `template` with `value`.
fn substitute(template: &str, value: &str) -> String {
    match (template.find('{'), template.find('}')) {
        (Some(start), Some(end)) if start < end => {
            format!("{}{}{}", &template[..start], value, &template[end + 1..])
        }
        _ => template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::decoder::decode_instruction;

    fn text(bytes: &[u8], address: u16) -> String {
        format_instruction(&decode_instruction(bytes, address).unwrap())
    }

    #[test]
    fn test_format_immediate() {
        assert_eq!(text(&[0x3E, 0x42], 0x0000), "LD A,$42");
        assert_eq!(text(&[0x36, 0x07], 0x0000), "LD (HL),$07");
        assert_eq!(text(&[0xFE, 0x90], 0x0000), "CP $90");
    }

    #[test]
    fn test_format_absolute() {
        assert_eq!(text(&[0x21, 0x00, 0xC0], 0x0000), "LD HL,$C000");
        assert_eq!(text(&[0xEA, 0x00, 0x80], 0x0000), "LD ($8000),A");
        assert_eq!(text(&[0x08, 0x10, 0xD0], 0x0000), "LD ($D010),SP");
        assert_eq!(text(&[0xDC, 0x50, 0x01], 0x0000), "CALL C,$0150");
    }

    #[test]
    fn test_format_high_page() {
        assert_eq!(text(&[0xE0, 0x44], 0x0000), "LDH ($FF44),A");
        assert_eq!(text(&[0xF0, 0x80], 0x0000), "LDH A,($FF80)");
    }

    #[test]
    fn test_format_relative() {
        assert_eq!(text(&[0x18, 0x02], 0x0100), "JR $0104");
        assert_eq!(text(&[0x20, 0xFE], 0x0100), "JR NZ,$0100");
    }

    #[test]
    fn test_format_signed_immediate() {
        assert_eq!(text(&[0xE8, 0x04], 0x0000), "ADD SP,+4");
        assert_eq!(text(&[0xF8, 0xF8], 0x0000), "LD HL,SP-8");
    }

    #[test]
    fn test_format_implied() {
        assert_eq!(text(&[0x00], 0x0000), "NOP");
        assert_eq!(text(&[0x78], 0x0000), "LD A,B");
        assert_eq!(text(&[0xC5], 0x0000), "PUSH BC");
        assert_eq!(text(&[0xFF], 0x0000), "RST 38h");
    }

    #[test]
    fn test_format_stop_hides_padding() {
        assert_eq!(text(&[0x10, 0x00], 0x0000), "STOP");
    }

    #[test]
    fn test_format_cb() {
        assert_eq!(text(&[0xCB, 0x37], 0x0000), "SWAP A");
        assert_eq!(text(&[0xCB, 0xC6], 0x0000), "SET 0,(HL)");
    }

    #[test]
    fn test_format_data_byte() {
        let instr = Instruction::data_byte(0x2000, 0xED);
        assert_eq!(format_instruction(&instr), ".byte $ED");
    }
}
