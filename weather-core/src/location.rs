//! "Use my location" support.

use async_trait::async_trait;
use thiserror::Error;

use crate::{error::UiError, model::Coordinates};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("location access denied")]
    Denied,

    #[error("location is not available on this system")]
    Unsupported,
}

impl From<LocateError> for UiError {
    fn from(err: LocateError) -> Self {
        match err {
            LocateError::Denied => UiError::GeolocationDenied,
            LocateError::Unsupported => UiError::GeolocationUnsupported,
        }
    }
}

/// One-shot source of the user's current position.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn locate(&self) -> Result<Coordinates, LocateError>;
}

/// Reports the home coordinates from the config file.
#[derive(Debug, Clone, Default)]
pub struct HomeLocator {
    home: Option<Coordinates>,
}

impl HomeLocator {
    pub fn new(home: Option<Coordinates>) -> Self {
        Self { home }
    }
}

#[async_trait]
impl Locator for HomeLocator {
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        self.home.ok_or(LocateError::Unsupported)
    }
}
