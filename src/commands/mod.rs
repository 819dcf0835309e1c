use std::{borrow::Cow, sync::Arc};

use crate::config::Config;

pub mod check_in;
pub mod check_in_history;

pub struct DomainLogic<G, C, K> {
    gyms: Arc<G>,
    check_ins: Arc<C>,
    clock: Arc<K>,
    config: Arc<Config>,
}

impl<G, C, K> DomainLogic<G, C, K> {
    pub fn new(gyms: Arc<G>, check_ins: Arc<C>, clock: Arc<K>, config: Config) -> Self {
        Self {
            gyms,
            check_ins,
            clock,
            config: Arc::new(config),
        }
    }
}

impl<G, C, K> Clone for DomainLogic<G, C, K> {
    fn clone(&self) -> Self {
        Self {
            gyms: self.gyms.clone(),
            check_ins: self.check_ins.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("gyms port error: {0:?}")]
    Gyms(#[from] crate::ports::gyms::Error),
    #[error("check-ins port error: {0:?}")]
    CheckIns(#[from] crate::ports::check_ins::Error),

    /// The referenced gym does not exist
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    /// The user is too far away from the gym
    #[error("max distance reached: {distance_meters:.1}m away, at most {max_distance_meters:.1}m allowed")]
    MaxDistance {
        distance_meters: f64,
        max_distance_meters: f64,
    },
    /// The user already checked in during this calendar day
    #[error("max number of check-ins reached")]
    MaxNumberOfCheckIns,

    #[error("invalid request: {0}")]
    InvalidRequest(Cow<'static, str>),
}
