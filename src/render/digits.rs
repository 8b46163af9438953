//! Tiny bitmap digits for grid labels.

/// Glyph width in font pixels.
pub const GLYPH_WIDTH: u32 = 3;

/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: u32 = 5;

/// 3x5 glyphs for 0-9, one row per byte, high bit on the left.
const GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b010, 0b010, 0b010], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

/// Width in font pixels of `text`, with one pixel between glyphs.
pub fn text_width(text: &str) -> u32 {
    let n = text.chars().filter(|c| c.is_ascii_digit()).count() as u32;
    if n == 0 {
        0
    } else {
        n * GLYPH_WIDTH + (n - 1)
    }
}

/// Lit font pixels of `text` as (x, y) offsets from its top-left corner.
///
/// Non-digit characters are skipped.
pub fn lit_pixels(text: &str) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    let digits = text.chars().filter_map(|c| c.to_digit(10));

    for (i, digit) in digits.enumerate() {
        let origin = i as u32 * (GLYPH_WIDTH + 1);
        for (y, bits) in GLYPHS[digit as usize].iter().enumerate() {
            for x in 0..GLYPH_WIDTH {
                if bits & (0b100 >> x) != 0 {
                    out.push((origin + x, y as u32));
                }
            }
        }
    }

    out
}
