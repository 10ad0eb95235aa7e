use crate::config::DrawConfig;
use crate::core::compose::{compose_discs, draw_discs};
use crate::core::geometry::derive_disc_layout;
use crate::domain::model::{DiscLayout, Moment, MoonPhase};
use crate::domain::ports::{Clock, Renderer};
use crate::utils::error::Result;
use serde::Serialize;
use serde_json::{json, Value};

/// Result of one draw: the phase it depicts, the geometry used and whatever
/// the renderer produced.
#[derive(Debug, Clone, Serialize)]
pub struct Rendering<T> {
    pub phase: MoonPhase,
    pub layout: DiscLayout,
    #[serde(skip)]
    pub output: T,
}

impl<T> Rendering<T> {
    /// Label for display next to the image.
    pub fn label(&self) -> &'static str {
        self.phase.name.label()
    }
}

/// Clock → phase → disc layout → renderer.
pub struct MoonEngine<C: Clock> {
    clock: C,
    config: DrawConfig,
}

impl<C: Clock> MoonEngine<C> {
    pub fn new(clock: C, config: DrawConfig) -> Self {
        Self { clock, config }
    }

    pub fn config(&self) -> &DrawConfig {
        &self.config
    }

    /// Phase at the clock's current moment.
    pub fn current_phase(&self) -> MoonPhase {
        MoonPhase::at(self.clock.now())
    }

    pub fn layout_for(&self, phase: &MoonPhase) -> DiscLayout {
        derive_disc_layout(phase.illumination, phase.orientation, &self.config)
    }

    /// Phase, layout and effective settings at the clock's moment, as JSON.
    pub fn report(&self) -> Value {
        let phase = self.current_phase();
        let layout = self.layout_for(&phase);
        json!({
            "label": phase.name.label(),
            "phase": phase,
            "layout": layout,
            "config": self.config,
        })
    }

    /// Draw the moon as it is now.
    pub fn run<R: Renderer>(&self, renderer: &mut R) -> Result<Rendering<R::Output>> {
        self.render_at(self.clock.now(), renderer)
    }

    /// Draw the moon at `moment`.
    pub fn render_at<R: Renderer>(
        &self,
        moment: Moment,
        renderer: &mut R,
    ) -> Result<Rendering<R::Output>> {
        let phase = MoonPhase::at(moment);
        tracing::info!(
            "{} at {} ({:.1}% illuminated, {:.1} days old)",
            phase.name,
            moment,
            phase.illumination * 100.0,
            phase.age_days
        );

        // Geometry, then hand the discs to the renderer
        let layout = self.layout_for(&phase);
        let pair = compose_discs(&layout, self.config.blur);
        draw_discs(renderer, &pair)?;
        let output = renderer.finish()?;

        Ok(Rendering {
            phase,
            layout,
            output,
        })
    }
}
