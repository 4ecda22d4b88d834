use thiserror::Error;

/// A request parameter that failed validation before anything was sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("parameter '{0}' must be a number")]
    NotANumber(&'static str),

    #[error("parameter '{name}' must be between {min} and {max}")]
    OutOfRange {
        name: &'static str,
        min: i16,
        max: i16,
    },

    #[error("unknown unit system '{0}', expected 'metric' or 'imperial'")]
    UnknownUnits(String),
}

/// Which search path a user-facing error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchKind {
    City,
    Coords,
}

impl SearchKind {
    pub fn invalid_input_message(&self) -> &'static str {
        match self {
            SearchKind::City => "Please enter a city name.",
            SearchKind::Coords => "Please enter valid coordinates.",
        }
    }

    pub fn upstream_failure_message(&self) -> &'static str {
        match self {
            SearchKind::City => "Could not fetch weather data for that city.",
            SearchKind::Coords => "Could not fetch weather for your location.",
        }
    }
}

/// Errors shown to the person using the client.
///
/// Messages are fixed strings: whatever went wrong between the proxy and the
/// provider is never part of what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UiError {
    #[error("{}", .0.invalid_input_message())]
    InvalidInput(SearchKind),

    #[error("{}", .0.upstream_failure_message())]
    UpstreamFailure(SearchKind),

    #[error("Location access denied.")]
    GeolocationDenied,

    #[error("Geolocation not supported on this system.")]
    GeolocationUnsupported,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_messages_match_search_kind() {
        assert_eq!(
            UiError::InvalidInput(SearchKind::City).to_string(),
            "Please enter a city name."
        );
        assert_eq!(
            UiError::UpstreamFailure(SearchKind::City).to_string(),
            "Could not fetch weather data for that city."
        );
        assert_eq!(
            UiError::UpstreamFailure(SearchKind::Coords).to_string(),
            "Could not fetch weather for your location."
        );
    }

    #[test]
    fn geolocation_errors_have_distinct_messages() {
        assert_ne!(
            UiError::GeolocationDenied.to_string(),
            UiError::GeolocationUnsupported.to_string()
        );
    }
}
