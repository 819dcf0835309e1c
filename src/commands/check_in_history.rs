use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{domain::CheckIn, ports::check_ins::CheckInsPort};
use tower::Service;
use tracing::{debug, Instrument};

use super::{DomainLogic, Error};

pub struct CheckInHistoryRequest {
    pub user_id: String,
    /// Page number, starting at 1
    pub page: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct CheckInHistoryResponse {
    pub page: u32,
    /// Check-ins of the page, oldest first
    pub check_ins: Vec<CheckIn>,
}

impl<G, C, K> Service<CheckInHistoryRequest> for DomainLogic<G, C, K>
where
    G: 'static,
    C: CheckInsPort + Send + Sync + 'static,
    K: 'static,
{
    type Response = CheckInHistoryResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: CheckInHistoryRequest) -> Self::Future {
        let check_ins = self.check_ins.clone();
        let page_size = self.config.page_size;
        let span = tracing::info_span!("check_in_history", user_id = %req.user_id, page = req.page);

        Box::pin(
            async move {
                if req.page == 0 {
                    return Err(Error::InvalidRequest("pages start at 1".into()));
                }

                let check_ins = check_ins
                    .find_many_by_user_id(&req.user_id, req.page, page_size)
                    .await?;
                debug!(count = check_ins.len(), "fetched check-in history");

                Ok(CheckInHistoryResponse {
                    page: req.page,
                    check_ins,
                })
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::{clock::SystemClock, database::memory::MemoryDatabase},
        config::Config,
        domain::NewCheckIn,
        ports::{check_ins::MockCheckInsPort, gyms::MockGymsPort},
    };
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 12, 17, 0, 0).unwrap()
    }

    async fn history<G, C, K>(
        domain: &mut DomainLogic<G, C, K>,
        page: u32,
    ) -> Result<CheckInHistoryResponse, Error>
    where
        G: 'static,
        C: CheckInsPort + Send + Sync + 'static,
        K: 'static,
    {
        ServiceExt::<CheckInHistoryRequest>::ready(domain)
            .await?
            .call(CheckInHistoryRequest {
                user_id: "user-01".to_string(),
                page,
            })
            .await
    }

    #[rstest]
    #[case(1, 3)]
    #[case(2, 2)]
    #[case(3, 0)]
    #[tokio::test]
    async fn test_history_pages(
        now: DateTime<Utc>,
        #[case] page: u32,
        #[case] expected_len: usize,
    ) -> Result<(), BoxError> {
        // GIVEN five check-ins on consecutive days and a page size of 3
        let database = MemoryDatabase::default();
        for day in 0..5 {
            database
                .create(NewCheckIn {
                    user_id: "user-01".to_string(),
                    gym_id: "gym-01".to_string(),
                    created_at: Some(now + Duration::days(day)),
                })
                .await?;
        }
        let mut domain = DomainLogic::new(
            Arc::new(database.clone()),
            Arc::new(database),
            Arc::new(SystemClock),
            Config {
                page_size: 3,
                ..Config::default()
            },
        );

        // WHEN fetching a page
        let res = history(&mut domain, page).await;

        // THEN it contains the expected number of check-ins, oldest first
        assert_that!(res).is_ok().matches(|res| {
            res.page == page
                && res.check_ins.len() == expected_len
                && res
                    .check_ins
                    .windows(2)
                    .all(|pair| pair[0].created_at < pair[1].created_at)
        });

        Ok(())
    }

    #[tokio::test]
    async fn test_history_page_zero() -> Result<(), BoxError> {
        // GIVEN a check-ins port that must not be called
        let mut check_ins = MockCheckInsPort::new();
        check_ins.expect_find_many_by_user_id().times(0);
        let mut domain = DomainLogic::new(
            Arc::new(MockGymsPort::new()),
            Arc::new(check_ins),
            Arc::new(SystemClock),
            Config::default(),
        );

        // WHEN asking for page 0
        let res = history(&mut domain, 0).await;

        // THEN the request is rejected
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::InvalidRequest(_)));

        Ok(())
    }

    #[tokio::test]
    async fn test_history_uses_configured_page_size() -> Result<(), BoxError> {
        let mut check_ins = MockCheckInsPort::new();
        check_ins
            .expect_find_many_by_user_id()
            .times(1)
            .withf(|user_id, page, page_size| user_id == "user-01" && *page == 2 && *page_size == 20)
            .returning(|_, _, _| Ok(Vec::new()));
        let mut domain = DomainLogic::new(
            Arc::new(MockGymsPort::new()),
            Arc::new(check_ins),
            Arc::new(SystemClock),
            Config::default(),
        );

        let res = history(&mut domain, 2).await;

        assert_that!(res).is_ok().is_equal_to(CheckInHistoryResponse {
            page: 2,
            check_ins: Vec::new(),
        });
        Arc::into_inner(domain.check_ins).unwrap().checkpoint();

        Ok(())
    }
}
