use std::collections::HashMap;

use once_cell::sync::Lazy;

pub const FONT_HEIGHT: usize = 5;
const GLYPH_SPACING: usize = 1;
const PIXEL: &str = "██";
const BLANK: &str = "  ";

type Glyph = [&'static str; FONT_HEIGHT];

static GLYPHS: Lazy<HashMap<char, Glyph>> = Lazy::new(|| {
    HashMap::from([
        ('A', [" ### ", "#   #", "#####", "#   #", "#   #"]),
        ('B', ["#### ", "#   #", "#### ", "#   #", "#### "]),
        ('C', [" ####", "#    ", "#    ", "#    ", " ####"]),
        ('D', ["#### ", "#   #", "#   #", "#   #", "#### "]),
        ('E', ["#####", "#    ", "#### ", "#    ", "#####"]),
        ('F', ["#####", "#    ", "#### ", "#    ", "#    "]),
        ('G', [" ####", "#    ", "#  ##", "#   #", " ### "]),
        ('H', ["#   #", "#   #", "#####", "#   #", "#   #"]),
        ('I', ["#####", "  #  ", "  #  ", "  #  ", "#####"]),
        ('J', ["  ###", "   # ", "   # ", "#  # ", " ##  "]),
        ('K', ["#   #", "#  # ", "###  ", "#  # ", "#   #"]),
        ('L', ["#    ", "#    ", "#    ", "#    ", "#####"]),
        ('M', ["#   #", "## ##", "# # #", "#   #", "#   #"]),
        ('N', ["#   #", "##  #", "# # #", "#  ##", "#   #"]),
        ('O', [" ### ", "#   #", "#   #", "#   #", " ### "]),
        ('P', ["#### ", "#   #", "#### ", "#    ", "#    "]),
        ('Q', [" ### ", "#   #", "# # #", "#  # ", " ## #"]),
        ('R', ["#### ", "#   #", "#### ", "#  # ", "#   #"]),
        ('S', [" ####", "#    ", " ### ", "    #", "#### "]),
        ('T', ["#####", "  #  ", "  #  ", "  #  ", "  #  "]),
        ('U', ["#   #", "#   #", "#   #", "#   #", " ### "]),
        ('V', ["#   #", "#   #", "#   #", " # # ", "  #  "]),
        ('W', ["#   #", "#   #", "# # #", "## ##", "#   #"]),
        ('X', ["#   #", " # # ", "  #  ", " # # ", "#   #"]),
        ('Y', ["#   #", " # # ", "  #  ", "  #  ", "  #  "]),
        ('Z', ["#####", "   # ", "  #  ", " #   ", "#####"]),
        (' ', ["     ", "     ", "     ", "     ", "     "]),
        ('?', [" ### ", "#   #", "  ## ", "     ", "  #  "]),
    ])
});

/// Render `text` as rows of double-width block glyphs.
///
/// Letters are upper-cased; characters without a glyph render as `?`.
pub fn render(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); FONT_HEIGHT];
    for (index, ch) in text.chars().map(|c| c.to_ascii_uppercase()).enumerate() {
        let Some(glyph) = GLYPHS.get(&ch).or_else(|| GLYPHS.get(&'?')) else {
            continue;
        };
        for (row, pattern) in rows.iter_mut().zip(glyph.iter()) {
            if index > 0 {
                row.push_str(&BLANK.repeat(GLYPH_SPACING));
            }
            for symbol in pattern.chars() {
                row.push_str(if symbol == '#' { PIXEL } else { BLANK });
            }
        }
    }
    rows.into_iter()
        .map(|row| row.trim_end().to_string())
        .collect()
}

/// Display width of the rendered text in terminal columns.
pub fn width(text: &str) -> usize {
    let count = text.chars().count();
    if count == 0 {
        return 0;
    }
    count * 5 * BLANK.len() + (count - 1) * GLYPH_SPACING * BLANK.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fixed_height() {
        let rows = render("GameHub");
        assert_eq!(rows.len(), FONT_HEIGHT);
        assert!(rows.iter().all(|row| !row.is_empty()));
        assert!(rows[0].starts_with("  ████████"));
    }

    #[test]
    fn empty_text_renders_blank_rows() {
        assert_eq!(render(""), vec![String::new(); FONT_HEIGHT]);
        assert_eq!(width(""), 0);
    }

    #[test]
    fn unknown_characters_fall_back() {
        assert_eq!(render("!"), render("?"));
    }

    #[test]
    fn width_matches_widest_row() {
        // H has a solid middle row reaching the final column.
        let rows = render("HH");
        assert_eq!(rows[2].chars().count(), width("HH"));
    }
}
