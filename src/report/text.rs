//! Helvetica text metrics and line wrapping.
//!
//! Widths come from the Adobe core-font metrics (units per 1000 em) for the
//! printable ASCII range. Latin-1 letters with diacritics measure as their base
//! letter, which matches the AFM tables for every accented glyph in WinAnsi.

use crate::report::document::FontStyle;

/// Points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Fallback for characters with no metric entry.
const DEFAULT_WIDTH: u16 = 556;

/// Letter a Latin-1 accented character is measured as.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(base)
}

/// Glyph width in 1/1000 em.
pub fn char_width(ch: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };

    if let Some(base) = base_letter(ch) {
        return char_width(base, style);
    }

    match ch {
        ' '..='~' => table[ch as usize - 0x20],
        '\u{00A0}' => 278,
        '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}' => 0,
        'Æ' => 1000,
        'æ' => 889,
        'ß' => 611,
        '×' | '÷' | '±' | '¬' => 584,
        '©' | '®' => 737,
        '°' => 400,
        '¡' | '¹' | '²' | '³' | '¨' | '¯' | '´' | '¸' | '\u{00AD}' => 333,
        '¦' => 280,
        '¼' | '½' | '¾' => 834,
        'ª' => 370,
        'º' => 365,
        '¶' => 537,
        '·' => 278,
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, size: f32, style: FontStyle) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, style))).sum();
    units as f32 / 1000.0 * size / PT_PER_MM
}

/// Break `text` into lines no wider than `max_width` millimetres.
///
/// Words are kept whole where possible; a word wider than the limit on its own
/// is broken between characters. Explicit newlines start a new line. Empty
/// input yields a single empty line.
pub fn split_text_to_size(text: &str, max_width: f32, size: f32) -> Vec<String> {
    let style = FontStyle::Regular;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };

            if text_width_mm(&candidate, size, style) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width_mm(word, size, style) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, max_width, size);
                // the tail of a broken word may still take following words
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    lines
}

fn break_word(word: &str, max_width: f32, size: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().count() > 1 && text_width_mm(&piece, size, FontStyle::Regular) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(ch);
        }
    }
    pieces.push(piece);
    pieces
}
