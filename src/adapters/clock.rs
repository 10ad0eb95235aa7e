use crate::domain::model::Moment;
use crate::domain::ports::Clock;
use chrono::Utc;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Moment {
        Moment::from(Utc::now())
    }
}

/// Always reports the same moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    moment: Moment,
}

impl FixedClock {
    pub fn new(moment: Moment) -> Self {
        Self { moment }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Moment {
        self.moment
    }
}
