use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

mod geo;

pub use geo::Coordinate;

/// Gym where members can check in
///
/// Gyms are registered elsewhere; they are read-only for check-ins.
#[derive(Clone, Debug, PartialEq)]
pub struct Gym {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub phone: Option<String>,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Gym {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Record of a user being present at a gym
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckIn {
    /// Unique identifier, generated on creation
    pub id: String,
    pub user_id: String,
    pub gym_id: String,
    pub created_at: DateTime<Utc>,
    /// When the check-in was validated, if ever
    pub validated_at: Option<DateTime<Utc>>,
}

/// Data needed to create a new [`CheckIn`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCheckIn {
    pub user_id: String,
    pub gym_id: String,
    /// Creation time
    ///
    /// If `None`, the adapter uses its own current time.
    pub created_at: Option<DateTime<Utc>>,
}

/// Calendar date of an instant, as seen from a reference UTC offset
///
/// Two instants belong to the same `CalendarDay` when their local dates match, regardless of
/// how many hours separate them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    date: NaiveDate,
    offset: FixedOffset,
}

impl CalendarDay {
    pub fn of(instant: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            date: instant.with_timezone(&offset).date_naive(),
            offset,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// First instant of the day, in UTC
    ///
    /// Saturates at the bounds of the representable range.
    pub fn start(&self) -> DateTime<Utc> {
        let local_midnight = self.date.and_time(Default::default());
        local_midnight
            .checked_sub_signed(Duration::seconds(self.offset.local_minus_utc() as i64))
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or(if self.offset.local_minus_utc() > 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            })
    }

    /// First instant of the following day, in UTC (exclusive bound)
    ///
    /// Saturates at the bounds of the representable range.
    pub fn end(&self) -> DateTime<Utc> {
        self.start()
            .checked_add_signed(Duration::days(1))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        Self::of(instant, self.offset).date == self.date
    }
}
