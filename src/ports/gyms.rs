use crate::domain::Gym;

#[mockall::automock]
#[async_trait::async_trait]
pub trait GymsPort {
    /// Find a gym by its identifier
    ///
    /// Returns `Ok(None)` if no gym matches.
    async fn find_by_id(&self, gym_id: &str) -> Result<Option<Gym>, Error>;
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
