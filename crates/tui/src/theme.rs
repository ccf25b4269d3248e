use gamehub_core::config::ThemeConfig;
use ratatui::style::Color;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight: Color,
    pub warning: Color,
    pub success: Color,
    pub on_accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            highlight: Color::DarkGray,
            warning: Color::Yellow,
            success: Color::Green,
            on_accent: Color::Black,
        }
    }
}

impl Theme {
    /// Apply configured colour overrides, returning the names of keys that were applied.
    pub fn from_config(config: &ThemeConfig) -> (Self, Vec<&'static str>) {
        let mut theme = Self::default();
        let mut applied = Vec::new();

        let overrides: [(&'static str, &Option<String>, &mut Color); 4] = [
            ("accent", &config.accent, &mut theme.accent),
            ("muted", &config.muted, &mut theme.muted),
            ("highlight", &config.highlight, &mut theme.highlight),
            ("warning", &config.warning, &mut theme.warning),
        ];
        for (name, raw, slot) in overrides {
            let Some(raw) = raw.as_deref() else {
                continue;
            };
            match parse_hex_color(raw) {
                Some(color) => {
                    *slot = color;
                    applied.push(name);
                }
                None => warn!(key = name, value = raw, "Ignoring invalid theme colour"),
            }
        }

        theme.on_accent = text_on(theme.accent);
        (theme, applied)
    }
}

pub fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Text colour readable on top of `background`: black on light RGB, white on dark RGB.
/// Named colours keep the default black, which suits every built-in accent.
fn text_on(background: Color) -> Color {
    let Color::Rgb(r, g, b) = background else {
        return Color::Black;
    };
    // Rec. 601 luma in integer thousandths
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 186_000 {
        Color::Black
    } else {
        Color::White
    }
}
