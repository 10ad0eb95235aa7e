pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::clock::{FixedClock, SystemClock};
pub use crate::adapters::raster::RasterRenderer;
pub use crate::adapters::storage::LocalStorage;
pub use crate::adapters::svg::SvgRenderer;
pub use crate::config::toml_config::{MoonToml, OutputFormat};
pub use crate::config::{DrawConfig, DrawOptions};
pub use crate::core::compose::compose_discs;
pub use crate::core::engine::{MoonEngine, Rendering};
pub use crate::core::geometry::{compute_inner_disc, derive_disc_layout};
pub use crate::core::phase::{classify_phase, compute_phase_fraction};
pub use crate::domain::model::{Moment, MoonPhase, Orientation, PhaseName};
pub use crate::utils::error::{MoonError, Result};
