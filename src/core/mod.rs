pub mod compose;
pub mod engine;
pub mod geometry;
pub mod phase;

pub use crate::domain::model::{DiscLayout, InnerDiscGeometry, MoonPhase, PhaseName};
pub use crate::domain::ports::{Clock, Renderer};
pub use crate::utils::error::Result;
