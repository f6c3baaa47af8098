//! Source of "today" for overdue checks.

use std::sync::Once;

use time::{Date, OffsetDateTime};

/// Supplies the current calendar date.
pub trait Clock {
    /// Today's date in the user's calendar.
    fn today(&self) -> Date;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

static LOCAL_OFFSET_WARNING: Once = Once::new();

impl Clock for SystemClock {
    fn today(&self) -> Date {
        OffsetDateTime::now_local().map_or_else(
            |err| {
                LOCAL_OFFSET_WARNING.call_once(|| {
                    tracing::warn!(%err, "local UTC offset unavailable; using UTC for overdue checks");
                });
                OffsetDateTime::now_utc().date()
            },
            OffsetDateTime::date,
        )
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Date {
        (**self).today()
    }
}
