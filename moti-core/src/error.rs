use reqwest::StatusCode;
use thiserror::Error;

/// Failures of a single weather API call.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("City name must not be empty")]
    InvalidInput,

    #[error("API key was rejected by the weather service")]
    Unauthorized,

    #[error("City not found: {0}")]
    NotFound(String),

    #[error("Too many requests to the weather service")]
    RateLimited,

    #[error("Weather service responded with status {status}")]
    ServerError { status: StatusCode },

    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid weather service response: {0}")]
    MalformedResponse(String),
}

impl WeatherError {
    /// Map a non-success HTTP status for a request about `city`.
    pub fn from_status(status: StatusCode, city: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::NOT_FOUND => Self::NotFound(city.to_string()),
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            status => Self::ServerError { status },
        }
    }

    /// Message shown to the user when a single-city lookup fails (Albanian).
    pub fn alert_message(&self) -> String {
        match self {
            Self::InvalidInput => "Ju lutem shkruani emrin e qytetit".to_string(),
            Self::Unauthorized => {
                "Çelësi API është i pavlefshëm. Ju lutem përditësoni çelësin me `moti configure`."
                    .to_string()
            }
            Self::NotFound(city) => format!("Qyteti \"{city}\" nuk u gjet"),
            Self::RateLimited => "Shumë kërkesa. Ju lutem prisni një moment.".to_string(),
            Self::ServerError { status } => format!(
                "Dështoi marrja e të dhënave të motit (Gabim {})",
                status.as_u16()
            ),
            Self::Transport(_) => {
                "Nuk u arrit lidhja me shërbimin e motit. Kontrolloni internetin.".to_string()
            }
            Self::MalformedResponse(_) => {
                "Shërbimi i motit ktheu të dhëna të pavlefshme.".to_string()
            }
        }
    }
}
