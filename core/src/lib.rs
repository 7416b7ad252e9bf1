pub mod alarm;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod models;
pub mod session;
pub mod storage;
pub mod summary;
pub mod units;
pub mod weather;
pub mod weather_mock;

uniffi::include_scaffolding!("pegpro");

pub use alarm::{due_alarms, mark_fired, FiredMap, FIRE_DEBOUNCE_MS};
pub use clock::{
    elapsed_seconds, format_clock, format_duration, in_closing_stage, remaining_seconds,
    CLOSING_STAGE_SECS,
};
pub use error::CoreError;
pub use ledger::{
    fill_percentage, increment_net, set_net_weight, status_band, tap_step_grams, total_weight,
    StatusBand,
};
pub use models::{
    Alarm, AlarmMode, AppSettings, MatchConfig, MatchState, Net, PressureTrend, WeatherData,
    WeightUnit,
};
pub use session::{AppCore, TickOutcome};
pub use storage::{BlobStore, MemoryBlobStore, StoreError, HISTORY_CAP};
pub use summary::{share_text, summarize_match, MatchSummary, NetSummary};
pub use units::{
    display_to_grams, format_weight, parse_weight, split_weight, WeightParts, GRAMS_PER_OUNCE,
    GRAMS_PER_POUND, MAX_INPUT_POUNDS, MAX_OUNCES,
};
pub use weather::{WeatherError, WeatherProvider};
pub use weather_mock::MockWeatherProvider;
