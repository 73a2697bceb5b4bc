use chrono::{DateTime, Duration, Months, Utc};

// lookback selector for the analytics page
// anything we don't recognise quietly becomes `Week`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Day,
    #[default]
    Week,
    Month,
}

impl TimeRange {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Nominal length of the window, used as the divisor for the daily average.
    /// A month always counts as 30 days here even though the window itself is
    /// one calendar month.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::Week => 7,
            Self::Month => 30,
        }
    }

    /// `date_trunc` unit for the error series.
    #[must_use]
    pub const fn bucket(self) -> &'static str {
        match self {
            Self::Day => "hour",
            Self::Week | Self::Month => "day",
        }
    }

    #[must_use]
    pub fn window(self) -> Window {
        self.window_ending_at(Utc::now())
    }

    #[must_use]
    pub fn window_ending_at(self, now: DateTime<Utc>) -> Window {
        let start = match self {
            Self::Day => now - Duration::days(1),
            Self::Week => now - Duration::days(7),
            // only fails at the edge of chrono's representable range
            Self::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| now - Duration::days(30)),
        };
        Window { start, end: now }
    }
}

impl From<&str> for TimeRange {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "day" => Self::Day,
            "month" => Self::Month,
            _ => Self::Week,
        }
    }
}

impl From<Option<&str>> for TimeRange {
    fn from(s: Option<&str>) -> Self {
        match s {
            Some(s) => Self::from(s),
            None => Self::default(),
        }
    }
}

// inclusive [start, end] bounds shared by every query of one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
