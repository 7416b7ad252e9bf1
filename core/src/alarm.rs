//! Alarm scheduling.
//!
//! Evaluation is a pure function of (alarms, match start, now, fired map).
//! The fired map (alarm id to last-fired epoch millis) is owned by the
//! caller and passed explicitly, so every firing decision is reproducible in
//! a test without a timer. It starts empty at each match start and is never
//! persisted.
//!
//! The caller must record a fire with [`mark_fired`] before dispatching any
//! side effect (sound, haptics, banner); marking afterwards leaves a window
//! where a re-entrant tick sees the alarm still unfired and fires it twice.

use std::collections::HashMap;

use crate::models::{Alarm, AlarmMode};

/// Re-fire suppression window. Collapses the tick clusters a host timer can
/// deliver around the same instant into a single fire.
pub const FIRE_DEBOUNCE_MS: i64 = 2_000;

/// Alarm id → last-fired instant, epoch millis.
pub type FiredMap = HashMap<String, i64>;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Every enabled alarm that should fire at `now_ms`.
///
/// - `one-time`: the trigger instant has passed and the alarm has not fired
///   within the debounce window.
/// - `repeat`: the anchor instant has passed and at least the configured
///   interval has elapsed since the last fire.
/// - `duration-pattern`: anchor-independent; fires every `pattern_minutes`
///   counted from the later of match start and the last fire. Its
///   `duration_seconds` is advisory display data only.
///
/// An alarm missing the field its mode requires is never due.
pub fn due_alarms(
    alarms: Vec<Alarm>,
    match_start_ms: i64,
    now_ms: i64,
    fired: HashMap<String, i64>,
) -> Vec<Alarm> {
    alarms
        .into_iter()
        .filter(|alarm| is_due(alarm, match_start_ms, now_ms, &fired))
        .collect()
}

/// Record that `alarm_id` fired at `now_ms`. Call once per dispatched alarm.
pub fn mark_fired(
    mut fired: HashMap<String, i64>,
    alarm_id: String,
    now_ms: i64,
) -> HashMap<String, i64> {
    fired.insert(alarm_id, now_ms);
    fired
}

fn is_due(alarm: &Alarm, match_start_ms: i64, now_ms: i64, fired: &FiredMap) -> bool {
    if !alarm.enabled {
        return false;
    }
    let last_fired = fired.get(&alarm.id).copied();
    match alarm.mode {
        AlarmMode::OneTime => match alarm.time {
            Some(at) => {
                now_ms >= at && last_fired.map_or(true, |t| now_ms - t > FIRE_DEBOUNCE_MS)
            }
            None => false,
        },
        AlarmMode::Repeat => match (alarm.time, alarm.interval_minutes) {
            (Some(anchor), Some(interval)) if interval > 0 => {
                now_ms >= anchor
                    && last_fired
                        .map_or(true, |t| now_ms - t >= i64::from(interval) * MILLIS_PER_MINUTE)
            }
            _ => false,
        },
        AlarmMode::DurationPattern => match alarm.pattern_minutes {
            Some(period) if period > 0 => {
                let reference = last_fired.unwrap_or(match_start_ms);
                now_ms - reference >= i64::from(period) * MILLIS_PER_MINUTE
            }
            _ => false,
        },
    }
}
