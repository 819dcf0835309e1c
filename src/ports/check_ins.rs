use crate::domain::{CalendarDay, CheckIn, NewCheckIn};

#[mockall::automock]
#[async_trait::async_trait]
pub trait CheckInsPort {
    /// Find the check-in of a user created during the given calendar day
    async fn find_by_user_id_on_date(
        &self,
        user_id: &str,
        day: CalendarDay,
    ) -> Result<Option<CheckIn>, Error>;

    /// List the check-ins of a user, oldest first
    ///
    /// `page` starts at 1. Pages past the end are empty.
    async fn find_many_by_user_id(
        &self,
        user_id: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<CheckIn>, Error>;

    /// Store a new check-in and assign its identifier
    async fn create(&self, check_in: NewCheckIn) -> Result<CheckIn, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
