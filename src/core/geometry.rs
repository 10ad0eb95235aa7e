//! Inner-disc geometry.
//!
//! The visible lune is treated as the region between two circular arcs. The
//! inner circle is sized so that its arc passes through the top and bottom of
//! the outer disc and crosses the horizontal diameter at the terminator. This
//! is a calibrated approximation, not an exact lune-area solve.

use crate::config::DrawConfig;
use crate::domain::model::{DiscLayout, InnerDisc, InnerDiscGeometry, Orientation, OuterDisc};

/// Lower bound on the terminator's distance from the limb, so a fully lit or
/// fully dark disc still yields a finite inner circle.
pub const MIN_TERMINATOR_DEPTH: f64 = 0.01;

/// Size and horizontal offset of the inner disc for a signed `semi_phase` in
/// [-1, 1]. The sign picks the side the inner disc leans towards and the
/// magnitude how far the terminator sits from the centre.
pub fn compute_inner_disc(outer_diameter: f64, semi_phase: f64) -> InnerDiscGeometry {
    let abs_phase = semi_phase.abs();
    let n = ((1.0 - abs_phase) * outer_diameter / 2.0).max(MIN_TERMINATOR_DEPTH);

    let inner_radius = n / 2.0 + outer_diameter * outer_diameter / (8.0 * n);

    let offset = if semi_phase > 0.0 {
        outer_diameter / 2.0 - n
    } else {
        -2.0 * inner_radius + outer_diameter / 2.0 + n
    };

    InnerDiscGeometry {
        diameter: inner_radius * 2.0,
        offset,
    }
}

/// Colours and geometry of both discs for a lit share of `illumination`.
///
/// Below half illumination the outer disc is lit and the inner disc casts the
/// shadow; from half upwards the roles swap and the inner disc carries the
/// light.
pub fn derive_disc_layout(
    illumination: f64,
    orientation: Orientation,
    config: &DrawConfig,
) -> DiscLayout {
    let waxing = orientation.is_waxing();
    let mut phase = illumination;

    let (outer_colour, inner_colour) = if phase < 0.5 {
        if waxing {
            phase = -phase;
        }
        (&config.light_color, &config.shadow_color)
    } else {
        phase = 1.0 - phase;
        if !waxing {
            phase = -phase;
        }
        (&config.shadow_color, &config.light_color)
    };

    let inner = compute_inner_disc(config.diameter, phase * 2.0);
    tracing::debug!(
        "Disc layout: illumination {:.4} ({:?}) -> inner diameter {:.2}, offset {:.2}",
        illumination,
        orientation,
        inner.diameter,
        inner.offset
    );

    DiscLayout {
        outer: OuterDisc {
            diameter: config.diameter,
            colour: outer_colour.clone(),
        },
        inner: InnerDisc {
            diameter: inner.diameter,
            offset: inner.offset,
            colour: inner_colour.clone(),
            opacity: 1.0 - config.earthshine,
        },
    }
}
