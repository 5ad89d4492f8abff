//! Item formatting for the dump columns.

use super::layout::{DataKind, IntWidth};
use crate::disasm::Bitness;

/// Printed width of one item, in characters
pub fn item_width(kind: DataKind, bitness: Bitness) -> usize {
    match kind {
        DataKind::HexByte => 2,
        DataKind::AsciiByte | DataKind::UnicodeWord => 1,
        DataKind::SignedDec(width) => match width {
            IntWidth::Byte => 4,
            IntWidth::Word => 6,
            IntWidth::Dword => 11,
            IntWidth::Qword => 20,
        },
        DataKind::UnsignedDec(width) => match width {
            IntWidth::Byte => 3,
            IntWidth::Word => 5,
            IntWidth::Dword => 10,
            IntWidth::Qword => 20,
        },
        DataKind::Hex(width) => width.bytes() * 2,
        DataKind::Float32 => 14,
        DataKind::Float64 => 22,
        DataKind::Float80 => 24,
        DataKind::Pointer => usize::from(bitness.pointer_size()) * 2,
    }
}

/// Text for one item. `bytes` must hold exactly the item's size.
pub fn format_item(kind: DataKind, bytes: &[u8], bitness: Bitness) -> String {
    let width = item_width(kind, bitness);
    match kind {
        DataKind::HexByte => format!("{:02X}", bytes[0]),
        DataKind::AsciiByte => printable(char::from(bytes[0])).to_string(),
        DataKind::UnicodeWord => {
            let unit = u16::from_le_bytes([bytes[0], bytes[1]]);
            let c = char::from_u32(u32::from(unit)).unwrap_or('.');
            printable(c).to_string()
        }
        DataKind::SignedDec(_) => format!("{:>width$}", signed(bytes), width = width),
        DataKind::UnsignedDec(_) => format!("{:>width$}", unsigned(bytes), width = width),
        DataKind::Hex(_) | DataKind::Pointer => format!("{:0width$X}", unsigned(bytes), width = width),
        DataKind::Float32 => {
            let value = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            format!("{:>width$}", float_text(f64::from(value)), width = width)
        }
        DataKind::Float64 => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[..8]);
            format!("{:>width$}", float_text(f64::from_le_bytes(raw)), width = width)
        }
        DataKind::Float80 => {
            let mut raw = [0u8; 10];
            raw.copy_from_slice(&bytes[..10]);
            format!("{:>width$}", float_text(f80_to_f64(raw)), width = width)
        }
    }
}

/// Placeholder for an item whose bytes couldn't be read
pub fn unreadable_item(kind: DataKind, bitness: Bitness) -> String {
    "?".repeat(item_width(kind, bitness))
}

/// Printable ASCII (and, for UTF-16, any printable non-control character)
/// shows as itself, the rest as '.'
pub fn printable(c: char) -> char {
    if c == ' ' || c.is_ascii_graphic() || (!c.is_ascii() && !c.is_control()) {
        c
    } else {
        '.'
    }
}

fn unsigned(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .rev()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

fn signed(bytes: &[u8]) -> i64 {
    let bits = bytes.len() * 8;
    let value = unsigned(bytes);
    if bits >= 64 {
        value as i64
    } else {
        let shift = 64 - bits;
        ((value << shift) as i64) >> shift
    }
}

fn float_text(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf".into() } else { "inf".into() };
    }
    let magnitude = value.abs();
    if value == 0.0 || (1e-4..1e15).contains(&magnitude) {
        format!("{}", value)
    } else {
        format!("{:e}", value)
    }
}

/// Convert an x87 80-bit extended value (little endian) to `f64`.
///
/// Layout: 64-bit mantissa with an explicit integer bit, then 15 exponent
/// bits and the sign. Precision beyond 53 bits and exponents outside the
/// `f64` range are lost.
pub fn f80_to_f64(bytes: [u8; 10]) -> f64 {
    let mut mantissa_bytes = [0u8; 8];
    mantissa_bytes.copy_from_slice(&bytes[..8]);
    let mantissa = u64::from_le_bytes(mantissa_bytes);
    let sign_exponent = u16::from_le_bytes([bytes[8], bytes[9]]);
    let negative = sign_exponent & 0x8000 != 0;
    let exponent = i32::from(sign_exponent & 0x7FFF);

    let magnitude = if exponent == 0x7FFF {
        if mantissa << 1 == 0 {
            f64::INFINITY
        } else {
            return f64::NAN;
        }
    } else if exponent == 0 && mantissa == 0 {
        0.0
    } else {
        // value = mantissa * 2^(exponent - bias - 63), bias 16383
        let power = exponent - 16383 - 63;
        let half = power / 2;
        (mantissa as f64) * 2f64.powi(half) * 2f64.powi(power - half)
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B64: Bitness = Bitness::Bit64;

    #[test]
    fn test_bytes_and_chars() {
        assert_eq!(format_item(DataKind::HexByte, &[0x0a], B64), "0A");
        assert_eq!(format_item(DataKind::AsciiByte, b"A", B64), "A");
        assert_eq!(format_item(DataKind::AsciiByte, &[0x00], B64), ".");
        assert_eq!(format_item(DataKind::AsciiByte, &[0x7f], B64), ".");
        assert_eq!(format_item(DataKind::UnicodeWord, &[0x41, 0x00], B64), "A");
        assert_eq!(format_item(DataKind::UnicodeWord, &[0x16, 0x04], B64), "Ж");
        assert_eq!(format_item(DataKind::UnicodeWord, &[0x0d, 0x00], B64), ".");
        // lone surrogate
        assert_eq!(format_item(DataKind::UnicodeWord, &[0x00, 0xd8], B64), ".");
    }

    #[test]
    fn test_integers() {
        let kind = DataKind::SignedDec(IntWidth::Word);
        assert_eq!(format_item(kind, &[0xff, 0xff], B64), "    -1");
        assert_eq!(format_item(DataKind::UnsignedDec(IntWidth::Word), &[0xff, 0xff], B64), "65535");
        assert_eq!(format_item(DataKind::SignedDec(IntWidth::Byte), &[0x80], B64), "-128");
        assert_eq!(
            format_item(DataKind::SignedDec(IntWidth::Qword), &[0xff; 8], B64),
            format!("{:>20}", -1)
        );
        assert_eq!(format_item(DataKind::Hex(IntWidth::Dword), &[0x78, 0x56, 0x34, 0x12], B64), "12345678");
        assert_eq!(format_item(DataKind::Pointer, &[0x00, 0x10, 0x40, 0x00], Bitness::Bit32), "00401000");
    }

    #[test]
    fn test_floats() {
        assert_eq!(format_item(DataKind::Float32, &1.5f32.to_le_bytes(), B64).trim(), "1.5");
        assert_eq!(format_item(DataKind::Float64, &(-0.25f64).to_le_bytes(), B64).trim(), "-0.25");
        assert_eq!(format_item(DataKind::Float64, &f64::NAN.to_le_bytes(), B64).trim(), "nan");
        assert_eq!(format_item(DataKind::Float64, &1e300f64.to_le_bytes(), B64).trim(), "1e300");
    }

    #[test]
    fn test_f80_conversion() {
        // 1.0: exponent 0x3FFF, integer bit set
        let one = [0, 0, 0, 0, 0, 0, 0, 0x80, 0xff, 0x3f];
        assert_eq!(f80_to_f64(one), 1.0);

        // -2.5 = -1.25 * 2^1
        let minus = [0, 0, 0, 0, 0, 0, 0, 0xa0, 0x00, 0xc0];
        assert_eq!(f80_to_f64(minus), -2.5);

        assert_eq!(f80_to_f64([0; 10]), 0.0);

        let inf = [0, 0, 0, 0, 0, 0, 0, 0x80, 0xff, 0x7f];
        assert_eq!(f80_to_f64(inf), f64::INFINITY);
        let neg_inf = [0, 0, 0, 0, 0, 0, 0, 0x80, 0xff, 0xff];
        assert_eq!(f80_to_f64(neg_inf), f64::NEG_INFINITY);
        let nan = [0, 0, 0, 0, 0, 0, 0, 0xc0, 0xff, 0x7f];
        assert!(f80_to_f64(nan).is_nan());

        // far outside the f64 range
        let huge = [0, 0, 0, 0, 0, 0, 0, 0x80, 0xff, 0x7f - 1];
        assert_eq!(f80_to_f64(huge), f64::INFINITY);
    }

    #[test]
    fn test_unreadable_width() {
        assert_eq!(unreadable_item(DataKind::HexByte, B64), "??");
        assert_eq!(unreadable_item(DataKind::Pointer, B64), "?".repeat(16));
    }
}
