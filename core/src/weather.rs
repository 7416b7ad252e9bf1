//! Weather integration seam.
//!
//! The core never fetches weather itself; the embedding app supplies a
//! provider and the session keeps the last snapshot cached for offline use.

use thiserror::Error;

use crate::models::WeatherData;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    #[error("no network connection")]
    Offline,
    #[error("weather service unavailable")]
    ServiceUnavailable,
    #[error("weather service returned malformed data")]
    MalformedResponse,
}

pub trait WeatherProvider {
    /// Fetch a fresh snapshot stamped with `now_ms`.
    fn fetch(&mut self, now_ms: i64) -> Result<WeatherData, WeatherError>;
}
