use async_trait::async_trait;
use inquire::Confirm;
use weather_core::{Coordinates, LocateError, Locator};

/// Asks before handing out the wrapped locator's position.
pub struct ConsentLocator<L, F = fn() -> bool> {
    inner: L,
    ask: F,
}

impl<L> ConsentLocator<L> {
    pub fn new(inner: L) -> Self {
        Self::with_prompt(inner, ask_user)
    }
}

impl<L, F> ConsentLocator<L, F> {
    /// `ask` returns whether the user allows access.
    pub fn with_prompt(inner: L, ask: F) -> Self {
        Self { inner, ask }
    }
}

fn ask_user() -> bool {
    // A prompt that cannot be shown counts as a refusal.
    Confirm::new("Allow weather to use your saved location?")
        .with_default(true)
        .prompt()
        .unwrap_or(false)
}

#[async_trait]
impl<L, F> Locator for ConsentLocator<L, F>
where
    L: Locator,
    F: Fn() -> bool + Send + Sync,
{
    async fn locate(&self) -> Result<Coordinates, LocateError> {
        let coords = self.inner.locate().await?;

        if (self.ask)() {
            Ok(coords)
        } else {
            Err(LocateError::Denied)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use weather_core::{HomeLocator, UiError};

    fn home() -> HomeLocator {
        HomeLocator::new(Some(Coordinates::new(59.33, 18.07).unwrap()))
    }

    #[tokio::test]
    async fn refusal_is_reported_as_denied() {
        let locator = ConsentLocator::with_prompt(home(), || false);

        let err = locator.locate().await.unwrap_err();
        assert_eq!(err, LocateError::Denied);

        let shown = UiError::from(err);
        assert_eq!(shown, UiError::GeolocationDenied);
        assert_eq!(shown.to_string(), "Location access denied.");
    }

    #[tokio::test]
    async fn consent_hands_out_home() {
        let locator = ConsentLocator::with_prompt(home(), || true);

        let coords = locator.locate().await.unwrap();
        assert_eq!(coords, Coordinates::new(59.33, 18.07).unwrap());
    }

    #[tokio::test]
    async fn no_home_is_unsupported_without_asking() {
        let asked = AtomicBool::new(false);
        let locator = ConsentLocator::with_prompt(HomeLocator::default(), || {
            asked.store(true, Ordering::SeqCst);
            true
        });

        let err = locator.locate().await.unwrap_err();
        assert_eq!(UiError::from(err), UiError::GeolocationUnsupported);
        assert!(!asked.load(Ordering::SeqCst));
    }
}
