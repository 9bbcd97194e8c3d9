use crossterm::style::Color;

/// Validates a color given on the command line.
///
/// Accepts crossterm color names (`red`, `dark_green`, ...) and six digit hex
/// values with or without a leading `#`, which are normalized to `#rrggbb`.
pub(super) fn parse_color(value: &str) -> Result<String, String> {
    let value = value.trim().to_ascii_lowercase();
    let hex = value.strip_prefix('#').unwrap_or(&value);
    if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Ok(format!("#{}", hex));
    }
    match Color::try_from(value.as_str()) {
        Ok(_) => Ok(value),
        Err(_) => Err(format!(
            "unknown color \"{}\", expected a name like \"red\" or a hex value like \"#ff8800\"",
            value
        )),
    }
}

/// Maps a validated palette entry to a terminal color, falling back to white.
pub(super) fn terminal_color(name: &str) -> Color {
    if let Some(rgb) = name
        .strip_prefix('#')
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
    {
        return Color::Rgb {
            r: (rgb >> 16) as u8,
            g: (rgb >> 8) as u8,
            b: rgb as u8,
        };
    }
    Color::try_from(name).unwrap_or(Color::White)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("Red").unwrap(), "red");
        assert_eq!(parse_color("dark_green").unwrap(), "dark_green");
        assert_eq!(parse_color("FF8800").unwrap(), "#ff8800");
        assert_eq!(parse_color("#00aa11").unwrap(), "#00aa11");
        assert!(parse_color("sparkly").is_err());
        assert!(parse_color("#12345").is_err());
    }

    #[test]
    fn test_terminal_color() {
        assert_eq!(terminal_color("#ff8800"), Color::Rgb { r: 255, g: 136, b: 0 });
        assert_eq!(terminal_color("blue"), Color::Blue);
        assert_eq!(terminal_color("sparkly"), Color::White);
    }
}
