use crate::models::{PressureTrend, WeatherData};
use crate::weather::{WeatherError, WeatherProvider};

/// Canned provider used by host tests and the offline app build.
#[derive(Clone, Debug, Default)]
pub struct MockWeatherProvider {
    pub snapshot: Option<WeatherData>,
    pub fail_with: Option<WeatherError>,
}

impl MockWeatherProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_data() -> Self {
        Self {
            snapshot: Some(WeatherData {
                temperature: 18.0,
                humidity: 65.0,
                wind_speed: 12.0,
                pressure: 1013.0,
                pressure_trend: PressureTrend::Stable,
                description: "Partly Cloudy".to_string(),
                last_updated: 0,
                is_offline: false,
            }),
            fail_with: None,
        }
    }

    pub fn failing(err: WeatherError) -> Self {
        Self {
            snapshot: None,
            fail_with: Some(err),
        }
    }
}

impl WeatherProvider for MockWeatherProvider {
    fn fetch(&mut self, now_ms: i64) -> Result<WeatherData, WeatherError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        match &self.snapshot {
            Some(snapshot) => Ok(WeatherData {
                last_updated: now_ms,
                ..snapshot.clone()
            }),
            None => Err(WeatherError::ServiceUnavailable),
        }
    }
}
