use crate::domain::model::{DiscHandle, DiscSpec, Moment};
use crate::utils::error::Result;

/// Source of the current instant. The core never reads the wall clock itself.
pub trait Clock {
    fn now(&self) -> Moment;
}

/// A drawing surface for layered discs.
///
/// Discs are drawn in call order; a disc whose `parent` is set is clipped to
/// that parent. `finish` consumes the accumulated drawing and produces the
/// surface's output (markup, pixels, ...).
pub trait Renderer {
    type Output;

    fn draw_disc(&mut self, spec: &DiscSpec) -> Result<DiscHandle>;

    fn finish(&mut self) -> Result<Self::Output>;
}
