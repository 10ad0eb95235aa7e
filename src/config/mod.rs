#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIGHT_COLOR: &str = "white";
pub const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.8)";
pub const DEFAULT_DIAMETER: f64 = 500.0;
pub const DEFAULT_EARTHSHINE: f64 = 0.0;
pub const DEFAULT_BLUR: f64 = 40.0;

/// Drawing options as supplied by a caller; anything left unset falls back to
/// its default in [`DrawOptions::apply_defaults`]. Unknown keys are ignored
/// when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawOptions {
    #[serde(default, alias = "lightColor", alias = "light_colour")]
    pub light_color: Option<String>,
    #[serde(default, alias = "shadowColor", alias = "shadow_colour")]
    pub shadow_color: Option<String>,
    #[serde(default)]
    pub diameter: Option<f64>,
    #[serde(default)]
    pub earthshine: Option<f64>,
    #[serde(default, alias = "blur_radius", alias = "blurRadius")]
    pub blur: Option<f64>,
}

/// Fully populated drawing configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawConfig {
    pub light_color: String,
    pub shadow_color: String,
    pub diameter: f64,
    /// Light falling on the shaded part, 0 = none, 1 = fully lit.
    pub earthshine: f64,
    pub blur: f64,
}

impl Default for DrawConfig {
    fn default() -> Self {
        DrawOptions::default().apply_defaults()
    }
}

impl DrawOptions {
    /// Fill every unset field with its default.
    ///
    /// Out-of-range values are clamped rather than rejected: earthshine to
    /// [0, 1], blur to >= 0, and a diameter that is not a positive finite
    /// number is replaced by the default.
    pub fn apply_defaults(&self) -> DrawConfig {
        let diameter = match self.diameter {
            Some(d) if d.is_finite() && d > 0.0 => d,
            _ => DEFAULT_DIAMETER,
        };
        let earthshine = match self.earthshine {
            Some(e) if e.is_nan() => DEFAULT_EARTHSHINE,
            Some(e) => e.clamp(0.0, 1.0),
            None => DEFAULT_EARTHSHINE,
        };
        let blur = match self.blur {
            Some(b) if b.is_finite() => b.max(0.0),
            _ => DEFAULT_BLUR,
        };

        DrawConfig {
            light_color: self
                .light_color
                .clone()
                .unwrap_or_else(|| DEFAULT_LIGHT_COLOR.to_string()),
            shadow_color: self
                .shadow_color
                .clone()
                .unwrap_or_else(|| DEFAULT_SHADOW_COLOR.to_string()),
            diameter,
            earthshine,
            blur,
        }
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merged_with(&self, overrides: &DrawOptions) -> DrawOptions {
        DrawOptions {
            light_color: overrides
                .light_color
                .clone()
                .or_else(|| self.light_color.clone()),
            shadow_color: overrides
                .shadow_color
                .clone()
                .or_else(|| self.shadow_color.clone()),
            diameter: overrides.diameter.or(self.diameter),
            earthshine: overrides.earthshine.or(self.earthshine),
            blur: overrides.blur.or(self.blur),
        }
    }
}

impl Validate for DrawOptions {
    fn validate(&self) -> Result<()> {
        if let Some(diameter) = self.diameter {
            validation::validate_positive("disc.diameter", diameter)?;
        }
        if let Some(earthshine) = self.earthshine {
            validation::validate_range("disc.earthshine", earthshine, 0.0, 1.0)?;
        }
        if let Some(blur) = self.blur {
            validation::validate_range("disc.blur", blur, 0.0, f64::MAX)?;
        }
        if let Some(colour) = &self.light_color {
            validation::validate_colour("disc.light_color", colour)?;
        }
        if let Some(colour) = &self.shadow_color {
            validation::validate_colour("disc.shadow_color", colour)?;
        }
        Ok(())
    }
}
