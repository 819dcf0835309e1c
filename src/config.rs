use chrono::FixedOffset;
use std::str::FromStr;

const MAX_DISTANCE_METERS: &str = "GYM_CHECK_IN_MAX_DISTANCE_METERS";
const UTC_OFFSET_MINUTES: &str = "GYM_CHECK_IN_UTC_OFFSET_MINUTES";
const PAGE_SIZE: &str = "GYM_CHECK_IN_PAGE_SIZE";

/// Check-in policy
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Maximum distance between a user and a gym to check in, in meters
    pub max_distance_meters: f64,
    /// Reference offset used to compute calendar days
    pub utc_offset: FixedOffset,
    /// Number of check-ins per history page
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_distance_meters: 100.0,
            utc_offset: chrono::Offset::fix(&chrono::Utc),
            page_size: 20,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Read configuration values using the provided function
    ///
    /// Missing keys fall back to the defaults.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, Error>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(max_distance_meters) = parse::<f64, _>(&mut get, MAX_DISTANCE_METERS)? {
            if !max_distance_meters.is_finite() || max_distance_meters < 0.0 {
                return Err(Error::invalid(MAX_DISTANCE_METERS, max_distance_meters));
            }
            config.max_distance_meters = max_distance_meters;
        }

        if let Some(minutes) = parse::<i32, _>(&mut get, UTC_OFFSET_MINUTES)? {
            config.utc_offset = minutes
                .checked_mul(60)
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| Error::invalid(UTC_OFFSET_MINUTES, minutes))?;
        }

        if let Some(page_size) = parse::<u32, _>(&mut get, PAGE_SIZE)? {
            if page_size == 0 {
                return Err(Error::invalid(PAGE_SIZE, page_size));
            }
            config.page_size = page_size;
        }

        Ok(config)
    }
}

fn parse<T, F>(get: &mut F, key: &'static str) -> Result<Option<T>, Error>
where
    T: FromStr,
    F: FnMut(&str) -> Option<String>,
{
    get(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| Error::Invalid { key, value })
        })
        .transpose()
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

impl Error {
    fn invalid(key: &'static str, value: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.to_string(),
        }
    }
}
