use crate::{
    domain::{CalendarDay, CheckIn, Gym, NewCheckIn},
    ports::{
        check_ins::{self, CheckInsPort},
        gyms::{self, GymsPort},
    },
};
use chrono::Utc;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    gyms: Arc<Mutex<HashMap<String, Gym>>>,
    /// Check-ins in insertion order
    check_ins: Arc<Mutex<Vec<CheckIn>>>,
}

impl MemoryDatabase {
    /// Register a gym
    ///
    /// Gym registration is not part of the check-in flow, but tests need a way to seed gyms.
    pub fn insert_gym(&self, gym: Gym) -> Result<Gym, gyms::Error> {
        self.gyms.lock()?.insert(gym.id.clone(), gym.clone());
        Ok(gym)
    }
}

#[async_trait::async_trait]
impl GymsPort for MemoryDatabase {
    async fn find_by_id(&self, gym_id: &str) -> Result<Option<Gym>, gyms::Error> {
        let gym = self.gyms.lock()?.get(gym_id).cloned();

        Ok(gym)
    }
}

#[async_trait::async_trait]
impl CheckInsPort for MemoryDatabase {
    async fn find_by_user_id_on_date(
        &self,
        user_id: &str,
        day: CalendarDay,
    ) -> Result<Option<CheckIn>, check_ins::Error> {
        let check_in = self
            .check_ins
            .lock()?
            .iter()
            .find(|check_in| check_in.user_id == user_id && day.contains(check_in.created_at))
            .cloned();

        Ok(check_in)
    }

    async fn find_many_by_user_id(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<CheckIn>, check_ins::Error> {
        let mut check_ins: Vec<CheckIn> = self
            .check_ins
            .lock()?
            .iter()
            .filter(|check_in| check_in.user_id == user_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps
        check_ins.sort_by_key(|check_in| check_in.created_at);

        // u32 * u32 always fits in u64
        let skip = u64::from(page.saturating_sub(1)) * u64::from(page_size);
        let skip = usize::try_from(skip).unwrap_or(usize::MAX);
        Ok(check_ins
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect())
    }

    async fn create(&self, new_check_in: NewCheckIn) -> Result<CheckIn, check_ins::Error> {
        let check_in = CheckIn {
            id: Uuid::new_v4().to_string(),
            user_id: new_check_in.user_id,
            gym_id: new_check_in.gym_id,
            created_at: new_check_in.created_at.unwrap_or_else(Utc::now),
            validated_at: None,
        };

        self.check_ins.lock()?.push(check_in.clone());

        Ok(check_in)
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self {
            gyms: Arc::new(Mutex::new(HashMap::new())),
            check_ins: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for gyms::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

impl<T> From<PoisonError<T>> for check_ins::Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
