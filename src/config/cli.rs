use crate::config::toml_config::OutputFormat;
use crate::config::DrawOptions;
use crate::domain::model::Moment;
use crate::utils::error::{MoonError, Result};
use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "moonphase")]
#[command(about = "Render the current phase of the moon")]
pub struct CliConfig {
    /// Moment to render, as RFC 3339 or Unix seconds (default: now)
    #[arg(long, allow_hyphen_values = true)]
    pub at: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Outer disc diameter
    #[arg(long)]
    pub diameter: Option<f64>,

    /// Colour of the lit part of the disc
    #[arg(long)]
    pub light_color: Option<String>,

    /// Colour of the shaded part of the disc
    #[arg(long)]
    pub shadow_color: Option<String>,

    /// Light on the shaded part, between 0 and 1
    #[arg(long)]
    pub earthshine: Option<f64>,

    /// Width of the soft terminator edge, 0 for a hard edge
    #[arg(long)]
    pub blur: Option<f64>,

    /// Backdrop colour for PNG output
    #[arg(long)]
    pub background: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file; SVG and JSON go to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliConfig {
    /// Drawing options given on the command line.
    pub fn draw_overrides(&self) -> DrawOptions {
        DrawOptions {
            light_color: self.light_color.clone(),
            shadow_color: self.shadow_color.clone(),
            diameter: self.diameter,
            earthshine: self.earthshine,
            blur: self.blur,
        }
    }

    pub fn moment(&self) -> Result<Option<Moment>> {
        self.at.as_deref().map(parse_moment).transpose()
    }
}

/// Parse an instant given as Unix seconds or as an RFC 3339 timestamp.
pub fn parse_moment(value: &str) -> Result<Moment> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<i64>() {
        return Ok(Moment::from_unix_seconds(seconds));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|datetime| Moment::from(datetime.with_timezone(&Utc)))
        .map_err(|e| MoonError::InvalidArgument {
            argument: "at",
            value: value.to_string(),
            reason: format!("expected Unix seconds or RFC 3339: {}", e),
        })
}
