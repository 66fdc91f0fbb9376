//! 5x7 bitmap font for chart labels.
//!
//! Labels on the chart are short: numbers with three decimals and upper-cased
//! metric names. A bitmap font keeps the rasterizer free of font files and makes
//! the output byte-for-byte reproducible across machines.

pub const GLYPH_ROWS: usize = 7;
pub const GLYPH_COLS: usize = 5;
/// Horizontal advance per character, in glyph cells (one column of spacing)
pub const ADVANCE_COLS: usize = GLYPH_COLS + 1;

/// Size of one glyph cell for a font of `px` pixels.
pub fn cell_size(px: f32) -> f32 {
    px / GLYPH_ROWS as f32
}

/// Rendered width of `text` at `px` pixels, without trailing spacing.
pub fn text_width(text: &str, px: f32) -> f32 {
    let count = text.chars().count();
    if count == 0 {
        return 0.0;
    }
    let cell = cell_size(px);
    (count * ADVANCE_COLS - 1) as f32 * cell
}

/// Accented Latin-1 capitals share the glyph of their base letter.
fn base_capital(ch: char) -> char {
    match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' => 'Y',
        other => other,
    }
}

/// Bitmap rows for `ch`, or `None` when the character is rendered as a blank.
pub fn glyph_rows(ch: char) -> Option<&'static [&'static str; GLYPH_ROWS]> {
    let rows: &'static [&'static str; GLYPH_ROWS] = match base_capital(ch) {
        'A' => &["  #  ", " # # ", "#   #", "#####", "#   #", "#   #", "#   #"],
        'B' => &["#### ", "#   #", "#   #", "#### ", "#   #", "#   #", "#### "],
        'C' => &[" ### ", "#   #", "#    ", "#    ", "#    ", "#   #", " ### "],
        'D' => &["#### ", "#   #", "#   #", "#   #", "#   #", "#   #", "#### "],
        'E' => &["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#####"],
        'F' => &["#####", "#    ", "#    ", "#### ", "#    ", "#    ", "#    "],
        'G' => &[" ### ", "#   #", "#    ", "# ###", "#   #", "#   #", " ### "],
        'H' => &["#   #", "#   #", "#   #", "#####", "#   #", "#   #", "#   #"],
        'I' => &[" ### ", "  #  ", "  #  ", "  #  ", "  #  ", "  #  ", " ### "],
        'J' => &["  ###", "   # ", "   # ", "   # ", "#  # ", "#  # ", " ##  "],
        'K' => &["#   #", "#  # ", "# #  ", "##   ", "# #  ", "#  # ", "#   #"],
        'L' => &["#    ", "#    ", "#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => &["#   #", "## ##", "# # #", "# # #", "#   #", "#   #", "#   #"],
        'N' => &["#   #", "##  #", "# # #", "#  ##", "#   #", "#   #", "#   #"],
        'O' => &[" ### ", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'P' => &["#### ", "#   #", "#   #", "#### ", "#    ", "#    ", "#    "],
        'Q' => &[" ### ", "#   #", "#   #", "#   #", "# # #", "#  # ", " ## #"],
        'R' => &["#### ", "#   #", "#   #", "#### ", "# #  ", "#  # ", "#   #"],
        'S' => &[" ####", "#    ", "#    ", " ### ", "    #", "    #", "#### "],
        'T' => &["#####", "  #  ", "  #  ", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => &["#   #", "#   #", "#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => &["#   #", "#   #", "#   #", "#   #", " # # ", " # # ", "  #  "],
        'W' => &["#   #", "#   #", "#   #", "# # #", "# # #", "## ##", "#   #"],
        'X' => &["#   #", "#   #", " # # ", "  #  ", " # # ", "#   #", "#   #"],
        'Y' => &["#   #", "#   #", " # # ", "  #  ", "  #  ", "  #  ", "  #  "],
        'Z' => &["#####", "    #", "   # ", "  #  ", " #   ", "#    ", "#####"],
        '0' => &[" ### ", "#   #", "#  ##", "# # #", "##  #", "#   #", " ### "],
        '1' => &["  #  ", " ##  ", "# #  ", "  #  ", "  #  ", "  #  ", "#####"],
        '2' => &[" ### ", "#   #", "    #", "   # ", "  #  ", " #   ", "#####"],
        '3' => &[" ### ", "#   #", "    #", " ### ", "    #", "#   #", " ### "],
        '4' => &["   # ", "  ## ", " # # ", "#  # ", "#####", "   # ", "   # "],
        '5' => &["#####", "#    ", "#    ", "#### ", "    #", "#   #", " ### "],
        '6' => &[" ### ", "#   #", "#    ", "#### ", "#   #", "#   #", " ### "],
        '7' => &["#####", "    #", "   # ", "  #  ", "  #  ", "  #  ", "  #  "],
        '8' => &[" ### ", "#   #", "#   #", " ### ", "#   #", "#   #", " ### "],
        '9' => &[" ### ", "#   #", "#   #", " ####", "    #", "#   #", " ### "],
        '-' => &["     ", "     ", "     ", " ### ", "     ", "     ", "     "],
        '+' => &["     ", "  #  ", "  #  ", "#####", "  #  ", "  #  ", "     "],
        '.' => &["     ", "     ", "     ", "     ", "     ", " ##  ", " ##  "],
        ',' => &["     ", "     ", "     ", "     ", " ##  ", "  #  ", " #   "],
        '_' => &["     ", "     ", "     ", "     ", "     ", "     ", "#####"],
        '/' => &["    #", "   # ", "   # ", "  #  ", " #   ", "#    ", "#    "],
        ':' => &["     ", "  ## ", "  ## ", "     ", "  ## ", "  ## ", "     "],
        '%' => &["##  #", "##  #", "   # ", "  #  ", " #   ", "#  ##", "#  ##"],
        '(' => &["   # ", "  #  ", " #   ", " #   ", " #   ", "  #  ", "   # "],
        ')' => &[" #   ", "  #  ", "   # ", "   # ", "   # ", "  #  ", " #   "],
        '<' => &["    #", "   # ", "  #  ", " #   ", "  #  ", "   # ", "    #"],
        '>' => &["#    ", " #   ", "  #  ", "   # ", "  #  ", " #   ", "#    "],
        _ => return None,
    };
    Some(rows)
}
