use crate::utils::error::{MoonError, Result};
use regex::Regex;
use std::sync::OnceLock;

/// Straight (non-premultiplied) RGBA, each channel in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Colour {
    pub const WHITE: Colour = Colour::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Colour = Colour::rgba(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Colour = Colour::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a CSS-style colour: a handful of named colours, `#rgb`,
    /// `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.trim().to_ascii_lowercase();

        if let Some(named) = named_colour(&value) {
            return Ok(named);
        }
        if let Some(hex) = value.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid(input));
        }

        let caps = functional_pattern().captures(&value).ok_or_else(|| invalid(input))?;
        let has_alpha = caps.get(1).is_some();
        let channel = |i: usize| -> Result<f64> {
            caps[i]
                .parse::<f64>()
                .map(|v| (v / 255.0).clamp(0.0, 1.0))
                .map_err(|_| invalid(input))
        };
        let (r, g, b) = (channel(2)?, channel(3)?, channel(4)?);

        let a = match (has_alpha, caps.get(5)) {
            (true, Some(alpha)) => alpha
                .as_str()
                .parse::<f64>()
                .map_err(|_| invalid(input))?
                .clamp(0.0, 1.0),
            (false, None) => 1.0,
            _ => return Err(invalid(input)),
        };

        Ok(Colour::rgba(r, g, b, a))
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

fn invalid(input: &str) -> MoonError {
    MoonError::InvalidColour {
        value: input.to_string(),
    }
}

fn functional_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^rgb(a)?\(\s*([0-9.]+)\s*,\s*([0-9.]+)\s*,\s*([0-9.]+)\s*(?:,\s*([0-9.]+)\s*)?\)$",
        )
        .unwrap()
    })
}

fn named_colour(name: &str) -> Option<Colour> {
    let colour = match name {
        "white" => Colour::WHITE,
        "black" => Colour::BLACK,
        "transparent" => Colour::TRANSPARENT,
        "gray" | "grey" => Colour::rgba(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0, 1.0),
        "silver" => Colour::rgba(192.0 / 255.0, 192.0 / 255.0, 192.0 / 255.0, 1.0),
        "red" => Colour::rgba(1.0, 0.0, 0.0, 1.0),
        "yellow" => Colour::rgba(1.0, 1.0, 0.0, 1.0),
        "navy" => Colour::rgba(0.0, 0.0, 128.0 / 255.0, 1.0),
        _ => return None,
    };
    Some(colour)
}

fn parse_hex(hex: &str) -> Option<Colour> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| f64::from(v) / 255.0);
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| {
                let doubled = format!("{c}{c}");
                byte(&doubled)
            });
            Some(Colour::rgba(
                channels.next()??,
                channels.next()??,
                channels.next()??,
                1.0,
            ))
        }
        6 | 8 => Some(Colour::rgba(
            byte(&hex[0..2])?,
            byte(&hex[2..4])?,
            byte(&hex[4..6])?,
            if hex.len() == 8 { byte(&hex[6..8])? } else { 1.0 },
        )),
        _ => None,
    }
}
