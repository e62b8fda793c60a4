//! Windows-1252 byte conversion.
//!
//! The save files predate Unicode support in the game; both the fixed-layout
//! and CSV forms are written in the cp1252 code page. Only the 0x80..=0x9F
//! range differs from Latin-1, so the table below covers exactly that window.

/// cp1252 0x80..=0x9F to Unicode. 0 marks the five unassigned slots, which
/// round-trip as their raw C1 code points.
const CP1252_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039,
    0x0152, 0, 0x017D, 0, 0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC,
    0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Decode cp1252 bytes into a String. Total: every byte maps to a char.
pub fn decode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        let c = match b {
            0x80..=0x9F => match CP1252_HIGH[(b - 0x80) as usize] {
                0 => b as u32,
                u => u as u32,
            },
            _ => b as u32,
        };
        // Every mapped value is a valid scalar below 0x10000.
        out.push(char::from_u32(c).unwrap_or('\u{FFFD}'));
    }
    out
}

/// Encode a String as cp1252 bytes. Characters outside the code page become
/// `?`, matching how the game itself degrades foreign names.
pub fn encode(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let u = c as u32;
        let b = match u {
            0x00..=0x7F => u as u8,
            0xA0..=0xFF => u as u8,
            _ => match CP1252_HIGH.iter().position(|&h| h as u32 == u && h != 0) {
                Some(i) => 0x80 + i as u8,
                None if (0x80..=0x9F).contains(&u) => u as u8,
                None => b'?',
            },
        };
        out.push(b);
    }
    out
}
