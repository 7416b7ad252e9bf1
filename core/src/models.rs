use serde::{Deserialize, Serialize};

// Serde renames keep every type byte-compatible with the blobs the app
// already has on disk (camelCase keys, dashed enum literals).

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[serde(rename = "lb/oz")]
    LbOz,
    #[serde(rename = "kg/g")]
    KgG,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMode {
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "repeat")]
    Repeat,
    #[serde(rename = "duration-pattern")]
    DurationPattern,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureTrend {
    Rising,
    Falling,
    Stable,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub name: String,
    pub duration_minutes: i32,
    pub peg_number: String,
    pub number_of_nets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_capacity: Option<f64>,
    pub unit: WeightUnit,
    pub keep_screen_on: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub id: String,
    pub config: MatchConfig,
    /// Epoch millis; remaining time is always recomputed from this.
    pub start_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    pub nets: Vec<Net>,
    pub is_active: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: String,
    pub mode: AlarmMode,
    /// Absolute trigger instant (one-time) or repeat anchor, epoch millis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_minutes: Option<i32>,
    /// Advisory "how long to act" duration shown by the UI; never a firing
    /// condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_minutes: Option<i32>,
    pub sound_enabled: bool,
    pub vibration_enabled: bool,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub unit: WeightUnit,
    pub haptics: bool,
    pub sound: bool,
    pub display_name: String,
    pub avatar_preset: i32,
    pub onboarding_complete: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            unit: WeightUnit::LbOz,
            haptics: true,
            sound: true,
            display_name: "Angler".to_string(),
            avatar_preset: 0,
            onboarding_complete: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub pressure: f64,
    pub pressure_trend: PressureTrend,
    pub description: String,
    pub last_updated: i64,
    #[serde(default)]
    pub is_offline: bool,
}
