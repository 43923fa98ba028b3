//! Deterministic namespace colors

use colored::Color;

/// Basic ANSI palette, in selection order
pub const PALETTE: [u8; 6] = [6, 2, 3, 4, 5, 1];

/// Pick a palette entry from a 32-bit string hash of `namespace`.
///
/// The hash runs over UTF-16 code units so a namespace keeps the same color
/// it gets from other `DEBUG`-style tools.
pub fn select_color(namespace: &str) -> u8 {
    let hash = namespace
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });

    let idx = (i64::from(hash).unsigned_abs() % PALETTE.len() as u64) as usize;
    PALETTE[idx]
}

/// Terminal color for an ANSI code from [`PALETTE`]
pub fn ansi_color(code: u8) -> Color {
    match code {
        1 => Color::Red,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Blue,
        5 => Color::Magenta,
        6 => Color::Cyan,
        _ => Color::White,
    }
}
