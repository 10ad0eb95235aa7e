use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An instant as whole seconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Moment(i64);

impl Moment {
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    pub const fn unix_seconds(self) -> i64 {
        self.0
    }

    /// Shift by a signed number of seconds, saturating at the i64 range.
    pub fn offset_by(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }
}

impl From<DateTime<Utc>> for Moment {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp())
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::<Utc>::from_timestamp(self.0, 0) {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}s", self.0),
        }
    }
}

/// Which side of the disc the shadow falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Waxing,
    Waning,
}

impl Orientation {
    pub fn is_waxing(self) -> bool {
        matches!(self, Orientation::Waxing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseName {
    #[serde(rename = "New Moon")]
    NewMoon,
    #[serde(rename = "Waxing Crescent")]
    WaxingCrescent,
    #[serde(rename = "First Quarter")]
    FirstQuarter,
    #[serde(rename = "Waxing Gibbous")]
    WaxingGibbous,
    #[serde(rename = "Full")]
    Full,
    #[serde(rename = "Waning Gibbous")]
    WaningGibbous,
    #[serde(rename = "Last Quarter")]
    LastQuarter,
    #[serde(rename = "Waning Crescent")]
    WaningCrescent,
}

impl PhaseName {
    pub const ALL: [PhaseName; 8] = [
        PhaseName::NewMoon,
        PhaseName::WaxingCrescent,
        PhaseName::FirstQuarter,
        PhaseName::WaxingGibbous,
        PhaseName::Full,
        PhaseName::WaningGibbous,
        PhaseName::LastQuarter,
        PhaseName::WaningCrescent,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PhaseName::NewMoon => "New Moon",
            PhaseName::WaxingCrescent => "Waxing Crescent",
            PhaseName::FirstQuarter => "First Quarter",
            PhaseName::WaxingGibbous => "Waxing Gibbous",
            PhaseName::Full => "Full",
            PhaseName::WaningGibbous => "Waning Gibbous",
            PhaseName::LastQuarter => "Last Quarter",
            PhaseName::WaningCrescent => "Waning Crescent",
        }
    }
}

impl fmt::Display for PhaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the calculator knows about one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoonPhase {
    pub moment: Moment,
    pub fraction: f64,
    pub age_days: f64,
    pub illumination: f64,
    pub orientation: Orientation,
    pub name: PhaseName,
}

/// Size and horizontal placement of the inner disc, relative to the outer
/// disc's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InnerDiscGeometry {
    pub diameter: f64,
    pub offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OuterDisc {
    pub diameter: f64,
    pub colour: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerDisc {
    pub diameter: f64,
    pub offset: f64,
    pub colour: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscLayout {
    pub outer: OuterDisc,
    pub inner: InnerDisc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Multiply,
}

/// Opaque reference to a disc already handed to a renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiscHandle(pub(crate) usize);

impl DiscHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single drawable disc. `left`/`top` locate the disc's bounding box inside
/// its parent's box; a disc without a parent is the root of the drawing and
/// clips its children.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscSpec {
    pub parent: Option<DiscHandle>,
    pub diameter: f64,
    pub left: f64,
    pub top: f64,
    pub colour: String,
    pub opacity: f64,
    /// Width of the soft edge. 0 draws a hard edge.
    pub blur: f64,
    pub blend: BlendMode,
}

impl DiscSpec {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn centre(&self) -> (f64, f64) {
        (self.left + self.radius(), self.top + self.radius())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_moment_from_datetime() {
        let datetime = Utc.with_ymd_and_hms(2000, 1, 6, 18, 14, 0).unwrap();
        assert_eq!(Moment::from(datetime).unix_seconds(), 947_182_440);
    }

    #[test]
    fn test_moment_display_is_rfc3339() {
        let moment = Moment::from_unix_seconds(947_182_440);
        assert_eq!(moment.to_string(), "2000-01-06T18:14:00+00:00");
    }

    #[test]
    fn test_moment_offset_saturates() {
        let moment = Moment::from_unix_seconds(i64::MAX - 1);
        assert_eq!(moment.offset_by(10).unix_seconds(), i64::MAX);
    }

    #[test]
    fn test_phase_name_serializes_as_label() {
        for name in PhaseName::ALL {
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, format!("\"{}\"", name.label()));
        }
    }

    #[test]
    fn test_disc_spec_centre() {
        let spec = DiscSpec {
            parent: None,
            diameter: 10.0,
            left: 2.0,
            top: 4.0,
            colour: "white".to_string(),
            opacity: 1.0,
            blur: 0.0,
            blend: BlendMode::Normal,
        };
        assert_eq!(spec.centre(), (7.0, 9.0));
    }
}
