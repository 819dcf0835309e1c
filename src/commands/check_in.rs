use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{CalendarDay, CheckIn, Coordinate, NewCheckIn},
    ports::{check_ins::CheckInsPort, clock::ClockPort, gyms::GymsPort},
};
use tower::Service;
use tracing::{debug, info, Instrument};

use super::{DomainLogic, Error};

pub struct CheckInRequest {
    pub user_id: String,
    pub gym_id: String,
    /// Current latitude of the user, in decimal degrees
    pub user_latitude: f64,
    /// Current longitude of the user, in decimal degrees
    pub user_longitude: f64,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CheckInResponse {
    pub check_in: CheckIn,
}

impl<G, C, K> Service<CheckInRequest> for DomainLogic<G, C, K>
where
    G: GymsPort + Send + Sync + 'static,
    C: CheckInsPort + Send + Sync + 'static,
    K: ClockPort + Send + Sync + 'static,
{
    type Response = CheckInResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CheckInRequest) -> Self::Future {
        let gyms = self.gyms.clone();
        let check_ins = self.check_ins.clone();
        let clock = self.clock.clone();
        let config = self.config.clone();
        let span = tracing::info_span!("check_in", user_id = %req.user_id, gym_id = %req.gym_id);

        Box::pin(
            async move {
                // The gym must exist
                let gym = match gyms.find_by_id(&req.gym_id).await? {
                    Some(gym) => gym,
                    None => {
                        debug!("gym not found");
                        return Err(Error::ResourceNotFound(format!("gym {}", req.gym_id)));
                    }
                };

                // The user must be close enough to the gym
                let distance_meters = Coordinate::new(req.user_latitude, req.user_longitude)
                    .distance_to(&gym.coordinate());
                if distance_meters > config.max_distance_meters {
                    debug!(distance_meters, "user too far from gym");
                    return Err(Error::MaxDistance {
                        distance_meters,
                        max_distance_meters: config.max_distance_meters,
                    });
                }

                // At most one check-in per calendar day
                let now = clock.now();
                let day = CalendarDay::of(now, config.utc_offset);
                if let Some(existing) = check_ins
                    .find_by_user_id_on_date(&req.user_id, day)
                    .await?
                {
                    debug!(existing_id = %existing.id, date = %day.date(), "already checked in");
                    return Err(Error::MaxNumberOfCheckIns);
                }

                let check_in = check_ins
                    .create(NewCheckIn {
                        user_id: req.user_id,
                        gym_id: req.gym_id,
                        created_at: Some(now),
                    })
                    .await?;
                info!(check_in_id = %check_in.id, distance_meters, "check-in created");

                Ok(CheckInResponse { check_in })
            }
            .instrument(span),
        )
    }
}
