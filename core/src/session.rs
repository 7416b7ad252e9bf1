//! Match session lifecycle.
//!
//! [`AppCore`] owns the process-wide slots the app works against: settings,
//! the active match, the last completed match, the alarm list and the
//! cached weather snapshot. Every mutation is write-through persisted via
//! the injected [`BlobStore`], so a crash or restart resumes an active
//! match from disk.
//!
//! All mutation happens on the host's single sequential execution context:
//! the 1 Hz [`tick`](AppCore::tick) plus direct user actions. The tick
//! marks due alarms fired *before* returning them, so a re-entrant tick can
//! never double-fire an alarm while the caller is still dispatching sound
//! or haptics.

use log::{info, warn};

use crate::alarm::{due_alarms, mark_fired, FiredMap};
use crate::clock::remaining_seconds;
use crate::error::CoreError;
use crate::ledger;
use crate::models::{Alarm, AppSettings, MatchConfig, MatchState, Net, WeatherData, WeightUnit};
use crate::storage::{self, BlobStore};
use crate::units::GRAMS_PER_OUNCE;
use crate::weather::WeatherProvider;

/// What one 1 Hz tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub remaining_seconds: i64,
    /// Set on the tick that crossed the countdown's zero edge; the match is
    /// already ended and archived when the caller sees this.
    pub match_ended: bool,
    /// Alarms to present, already marked fired.
    pub fired: Vec<Alarm>,
}

pub struct AppCore<S: BlobStore> {
    store: S,
    settings: AppSettings,
    current_match: Option<MatchState>,
    last_completed: Option<MatchState>,
    alarms: Vec<Alarm>,
    weather: Option<WeatherData>,
    fired: FiredMap,
    id_seq: u32,
}

impl<S: BlobStore> AppCore<S> {
    /// Populate every slot from storage; missing or unreadable blobs fall
    /// back to their defaults.
    pub fn load(store: S) -> Self {
        let settings = storage::load_settings(&store);
        let current_match = storage::load_current_match(&store);
        let alarms = storage::load_alarms(&store);
        let weather = storage::load_weather(&store);
        Self {
            store,
            settings,
            current_match,
            last_completed: None,
            alarms,
            weather,
            fired: FiredMap::new(),
            id_seq: 0,
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn current_match(&self) -> Option<&MatchState> {
        self.current_match.as_ref()
    }

    pub fn last_completed(&self) -> Option<&MatchState> {
        self.last_completed.as_ref()
    }

    pub fn alarms(&self) -> &[Alarm] {
        &self.alarms
    }

    pub fn weather(&self) -> Option<&WeatherData> {
        self.weather.as_ref()
    }

    pub fn history(&self) -> Vec<MatchState> {
        storage::load_history(&self.store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Hand the underlying store back, e.g. to simulate an app restart.
    pub fn into_store(self) -> S {
        self.store
    }

    pub fn update_settings(&mut self, apply: impl FnOnce(&mut AppSettings)) {
        apply(&mut self.settings);
        storage::save_settings(&mut self.store, &self.settings);
    }

    /// Begin a match: Idle → Active.
    ///
    /// Allocates `number_of_nets` empty nets sharing the configured
    /// capacity, stamps the start instant, clears alarm firing history and
    /// persists immediately.
    pub fn start_match(&mut self, config: MatchConfig, now_ms: i64) -> Result<&MatchState, CoreError> {
        if self.current_match.is_some() {
            return Err(CoreError::MatchAlreadyActive);
        }
        if config.duration_minutes < 1 {
            return Err(CoreError::InvalidDuration);
        }
        if config.number_of_nets < 1 {
            return Err(CoreError::InvalidNetCount);
        }

        let nets = (0..config.number_of_nets)
            .map(|_| Net {
                weight: 0.0,
                capacity: config.net_capacity,
            })
            .collect();
        let state = MatchState {
            id: self.generate_id(now_ms),
            config,
            start_time: now_ms,
            end_time: None,
            nets,
            is_active: true,
        };
        info!("match {} started", state.id);

        self.fired.clear();
        storage::save_current_match(&mut self.store, Some(&state));
        Ok(self.current_match.insert(state))
    }

    /// End the active match: Active → Ended.
    ///
    /// Stamps the end instant, archives a copy into history (newest first,
    /// capped) and clears the active slot.
    pub fn end_match(&mut self, now_ms: i64) -> Result<MatchState, CoreError> {
        let mut state = self.current_match.take().ok_or(CoreError::NoActiveMatch)?;
        state.end_time = Some(now_ms);
        state.is_active = false;
        info!("match {} ended", state.id);

        storage::push_history(&mut self.store, state.clone());
        storage::save_current_match(&mut self.store, None);
        self.fired.clear();
        self.last_completed = Some(state.clone());
        Ok(state)
    }

    /// Add `delta_grams` (tap steppers pass negative values too) to one net.
    pub fn update_net_weight(&mut self, index: u32, delta_grams: f64) -> Result<(), CoreError> {
        self.mutate_nets(index, |nets| ledger::increment_net(nets, index, delta_grams))
    }

    /// Overwrite one net's weight from the manual edit keypad.
    pub fn set_net_weight(&mut self, index: u32, grams: f64) -> Result<(), CoreError> {
        self.mutate_nets(index, |nets| ledger::set_net_weight(nets, index, grams))
    }

    fn mutate_nets(
        &mut self,
        index: u32,
        op: impl FnOnce(Vec<Net>) -> Vec<Net>,
    ) -> Result<(), CoreError> {
        let state = self.current_match.as_mut().ok_or(CoreError::NoActiveMatch)?;
        let count = state.nets.len() as u32;
        if index >= count {
            return Err(CoreError::NetIndexOutOfRange { index, count });
        }
        state.nets = op(std::mem::take(&mut state.nets));
        storage::save_current_match(&mut self.store, self.current_match.as_ref());
        Ok(())
    }

    /// Switch the live match's display unit, converting stored magnitudes by
    /// the one conversion constant. Same-unit calls are a strict no-op, so a
    /// repeated toggle can never double-convert.
    pub fn update_match_unit(&mut self, unit: WeightUnit) -> Result<(), CoreError> {
        let state = self.current_match.as_mut().ok_or(CoreError::NoActiveMatch)?;
        if state.config.unit == unit {
            return Ok(());
        }
        let factor = match state.config.unit {
            WeightUnit::KgG => 1.0 / GRAMS_PER_OUNCE,
            WeightUnit::LbOz => GRAMS_PER_OUNCE,
        };
        for net in &mut state.nets {
            net.weight = round2(net.weight * factor);
            net.capacity = net.capacity.map(|c| round2(c * factor));
        }
        state.config.net_capacity = state.config.net_capacity.map(|c| round2(c * factor));
        state.config.unit = unit;
        storage::save_current_match(&mut self.store, self.current_match.as_ref());
        Ok(())
    }

    /// Store a new alarm, assigning its id (and the default tone when none
    /// was picked). Alarms live independent of the match lifecycle.
    pub fn add_alarm(&mut self, mut alarm: Alarm, now_ms: i64) -> String {
        alarm.id = self.generate_id(now_ms);
        if alarm.tone.is_none() {
            alarm.tone = Some("default".to_string());
        }
        let id = alarm.id.clone();
        self.alarms.push(alarm);
        storage::save_alarms(&mut self.store, &self.alarms);
        id
    }

    pub fn update_alarm(
        &mut self,
        id: &str,
        apply: impl FnOnce(&mut Alarm),
    ) -> Result<(), CoreError> {
        let alarm = self
            .alarms
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CoreError::AlarmNotFound(id.to_string()))?;
        apply(alarm);
        storage::save_alarms(&mut self.store, &self.alarms);
        Ok(())
    }

    pub fn delete_alarm(&mut self, id: &str) -> Result<(), CoreError> {
        let before = self.alarms.len();
        self.alarms.retain(|a| a.id != id);
        if self.alarms.len() == before {
            return Err(CoreError::AlarmNotFound(id.to_string()));
        }
        storage::save_alarms(&mut self.store, &self.alarms);
        Ok(())
    }

    /// One 1 Hz tick. `None` while no match is active: no countdown and no
    /// alarm evaluation.
    ///
    /// The tick that reaches a remaining time of zero ends the match itself;
    /// the slot is cleared in the same call, so a late tick after teardown
    /// is inert rather than evaluating alarms against a stale match.
    pub fn tick(&mut self, now_ms: i64) -> Option<TickOutcome> {
        let (start, duration) = match &self.current_match {
            Some(state) => (state.start_time, state.config.duration_minutes),
            None => return None,
        };

        let remaining = remaining_seconds(start, duration, now_ms);
        if remaining == 0 {
            let ended = self.end_match(now_ms).is_ok();
            return Some(TickOutcome {
                remaining_seconds: 0,
                match_ended: ended,
                fired: Vec::new(),
            });
        }

        let due = due_alarms(self.alarms.clone(), start, now_ms, self.fired.clone());
        for alarm in &due {
            self.fired = mark_fired(std::mem::take(&mut self.fired), alarm.id.clone(), now_ms);
        }
        Some(TickOutcome {
            remaining_seconds: remaining,
            match_ended: false,
            fired: due,
        })
    }

    /// Pull a fresh weather snapshot. On failure the cached snapshot is kept
    /// and flagged offline; no error reaches the caller.
    pub fn refresh_weather(
        &mut self,
        provider: &mut dyn WeatherProvider,
        now_ms: i64,
    ) -> Option<&WeatherData> {
        match provider.fetch(now_ms) {
            Ok(weather) => {
                storage::save_weather(&mut self.store, &weather);
                self.weather = Some(weather);
            }
            Err(err) => {
                warn!("weather refresh failed: {err}");
                if let Some(weather) = &mut self.weather {
                    weather.is_offline = true;
                }
            }
        }
        self.weather.as_ref()
    }

    /// Wipe every stored blob and reset in-memory slots to their defaults.
    pub fn clear_all_data(&mut self) {
        storage::clear_all(&mut self.store);
        self.settings = AppSettings::default();
        self.current_match = None;
        self.last_completed = None;
        self.alarms.clear();
        self.weather = None;
        self.fired.clear();
    }

    fn generate_id(&mut self, now_ms: i64) -> String {
        self.id_seq = self.id_seq.wrapping_add(1);
        format!("{now_ms}-{:04x}", self.id_seq)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
