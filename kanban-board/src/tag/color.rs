//! Tag colors: caller-supplied colors are normalized to `#rrggbb`, and tags
//! created without one get a stable color derived from their name.

use crate::error::{KanbanError, Result};

const PALETTE: &[&str] = &[
    "#d73a4a", "#e36209", "#f9c513", "#0e8a16", "#006b75", "#1d76db", "#5319e7", "#b60205",
    "#d876e3", "#0075ca", "#7057ff", "#008672",
];

/// The palette color for a tag name. Case-insensitive.
pub fn palette_color(name: &str) -> &'static str {
    // FNV-1a over the lowercased name
    let hash = name.trim().to_lowercase().bytes().fold(0x811c_9dc5_u32, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    });
    PALETTE[hash as usize % PALETTE.len()]
}

/// Accept `rrggbb` or `#rrggbb` in any case and return `#rrggbb`
pub fn normalize_color(color: &str) -> Result<String> {
    let digits = color.trim().trim_start_matches('#');
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == 3 => Ok(format!("#{}", hex::encode(bytes))),
        _ => Err(KanbanError::validation(
            "color",
            format!("'{color}' is not a #rrggbb color"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_color_is_stable() {
        assert_eq!(palette_color("bug"), palette_color("BUG "));
        assert!(PALETTE.contains(&palette_color("feature")));
    }

    #[test]
    fn test_normalize_color() {
        assert_eq!(normalize_color("#FFAA00").unwrap(), "#ffaa00");
        assert_eq!(normalize_color("0e8a16").unwrap(), "#0e8a16");
        assert!(normalize_color("red").is_err());
        assert!(normalize_color("#fff").is_err());
        assert!(normalize_color("#ffaa0011").is_err());
    }
}
