//! Palette presets and hex color parsing.

/// Built-in color palettes for placed words.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ColorScheme {
    #[default]
    Ocean,
    Sunset,
    Forest,
    Berry,
    Monochrome,
    Rainbow,
}

impl ColorScheme {
    pub fn colors(&self) -> Vec<&'static str> {
        match self {
            ColorScheme::Ocean => vec!["#264653", "#287271", "#2a9d8f", "#8ab17d", "#e9c46a"],
            ColorScheme::Sunset => vec!["#f94144", "#f3722c", "#f8961e", "#f9844a", "#f9c74f"],
            ColorScheme::Forest => vec!["#2d6a4f", "#40916c", "#52b788", "#74c69d", "#95d5b2"],
            ColorScheme::Berry => vec!["#7b2cbf", "#9d4edd", "#c77dff", "#e0aaff", "#ff6d00"],
            ColorScheme::Monochrome => vec!["#212529", "#495057", "#6c757d", "#adb5bd", "#ced4da"],
            ColorScheme::Rainbow => {
                vec![
                    "#e63946", "#f4a261", "#e9c46a", "#2a9d8f", "#457b9d", "#7b2cbf",
                ]
            }
        }
    }
}

pub(crate) fn parse_hex_color(hex: &str) -> Option<tiny_skia::Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        let c = parse_hex_color("#2a9d8f").unwrap();
        let c = c.to_color_u8();
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0x2a, 0x9d, 0x8f, 255));
    }

    #[test]
    fn rejects_short_and_garbage_hex() {
        assert!(parse_hex_color("#fff").is_none());
        assert!(parse_hex_color("#zzzzzz").is_none());
        assert!(parse_hex_color("").is_none());
    }

    #[test]
    fn every_scheme_has_parseable_colors() {
        for scheme in [
            ColorScheme::Ocean,
            ColorScheme::Sunset,
            ColorScheme::Forest,
            ColorScheme::Berry,
            ColorScheme::Monochrome,
            ColorScheme::Rainbow,
        ] {
            for hex in scheme.colors() {
                assert!(parse_hex_color(hex).is_some(), "bad palette entry {hex}");
            }
        }
    }
}
