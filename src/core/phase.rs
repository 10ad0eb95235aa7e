use crate::domain::model::{Moment, MoonPhase, Orientation, PhaseName};
use crate::utils::error::{MoonError, Result};

/// A new moon at 2000-01-06 18:14 UTC.
pub const REFERENCE_NEW_MOON: Moment = Moment::from_unix_seconds(947_182_440);

/// Mean synodic month, in days.
pub const SYNODIC_MONTH_DAYS: f64 = 29.530588861;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Exclusive upper bounds of each named window, in cycle order. Anything at or
/// past the last bound is a new moon again.
const PHASE_BOUNDARIES: [(f64, PhaseName); 8] = [
    (0.033863193308711, PhaseName::NewMoon),
    (0.216136806691289, PhaseName::WaxingCrescent),
    (0.283863193308711, PhaseName::FirstQuarter),
    (0.466136806691289, PhaseName::WaxingGibbous),
    (0.533863193308711, PhaseName::Full),
    (0.716136806691289, PhaseName::WaningGibbous),
    (0.783863193308711, PhaseName::LastQuarter),
    (0.966136806691289, PhaseName::WaningCrescent),
];

/// Position of `moment` within the synodic cycle, in [0, 1).
///
/// 0 is new moon and 0.5 full moon. Works for moments before the reference
/// epoch as well as after it.
pub fn compute_phase_fraction(moment: Moment) -> f64 {
    // i128 keeps the subtraction exact across the whole i64 range.
    let elapsed =
        i128::from(moment.unix_seconds()) - i128::from(REFERENCE_NEW_MOON.unix_seconds());
    let elapsed_days = elapsed as f64 / SECONDS_PER_DAY;
    let phase_days = elapsed_days.rem_euclid(SYNODIC_MONTH_DAYS);
    let fraction = phase_days / SYNODIC_MONTH_DAYS;

    // rem_euclid may round up to the divisor for tiny negative inputs.
    if fraction >= 1.0 {
        0.0
    } else {
        fraction
    }
}

/// Name of the phase window containing `fraction`.
pub fn classify_phase(fraction: f64) -> Result<PhaseName> {
    if !(0.0..1.0).contains(&fraction) {
        return Err(MoonError::InvalidArgument {
            argument: "fraction",
            value: fraction.to_string(),
            reason: "phase fraction must lie in [0, 1)".to_string(),
        });
    }

    let name = PHASE_BOUNDARIES
        .iter()
        .find(|(upper, _)| fraction < *upper)
        .map(|(_, name)| *name)
        .unwrap_or(PhaseName::NewMoon);
    Ok(name)
}

/// Share of the disc that is lit: 0 at new moon, 1 at full.
pub fn illumination(fraction: f64) -> f64 {
    1.0 - 2.0 * (fraction - 0.5).abs()
}

pub fn orientation(fraction: f64) -> Orientation {
    if fraction < 0.5 {
        Orientation::Waxing
    } else {
        Orientation::Waning
    }
}

/// Days elapsed since the last new moon.
pub fn age_days(fraction: f64) -> f64 {
    fraction * SYNODIC_MONTH_DAYS
}

impl MoonPhase {
    pub fn at(moment: Moment) -> Self {
        let fraction = compute_phase_fraction(moment);
        // compute_phase_fraction never leaves [0, 1).
        let name = classify_phase(fraction).unwrap_or(PhaseName::NewMoon);
        let phase = Self {
            moment,
            fraction,
            age_days: age_days(fraction),
            illumination: illumination(fraction),
            orientation: orientation(fraction),
            name,
        };
        tracing::debug!(
            "Moon at {}: fraction {:.6}, illumination {:.4}, {}",
            moment,
            phase.fraction,
            phase.illumination,
            phase.name
        );
        phase
    }
}
