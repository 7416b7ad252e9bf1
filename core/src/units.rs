//! Weight conversion between canonical grams and the two display units.
//!
//! All stored weights are grams. Display splits into pounds/ounces or
//! kilograms/grams only at the edge. A single constant set is used for every
//! conversion in the crate, including the mid-match unit change.

use crate::models::WeightUnit;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per avoirdupois ounce.
pub const GRAMS_PER_OUNCE: f64 = 28.3495;

/// Ounces per pound.
pub const OUNCES_PER_POUND: f64 = 16.0;

/// Grams per pound (28.3495 × 16).
pub const GRAMS_PER_POUND: f64 = GRAMS_PER_OUNCE * OUNCES_PER_POUND;

/// Practical ceiling for the pounds field on manual entry.
pub const MAX_INPUT_POUNDS: i64 = 100;

/// Largest ounce value the ounce field accepts or displays.
pub const MAX_OUNCES: i64 = 15;

const GRAMS_PER_KILOGRAM: f64 = 1000.0;

/// A weight split into its two display fields: pounds + ounces, or
/// kilograms + grams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeightParts {
    pub major: i64,
    pub minor: i64,
}

/// Split a gram weight into whole display fields.
///
/// The minor field is rounded to the nearest unit; a minor value that rounds
/// up to a full major unit carries over, so ounces stay in 0..=15 and the
/// gram remainder stays in 0..=999.
pub fn split_weight(grams: f64, unit: WeightUnit) -> WeightParts {
    let grams = grams.max(0.0);
    match unit {
        WeightUnit::KgG => {
            let mut major = (grams / GRAMS_PER_KILOGRAM).floor() as i64;
            let mut minor = (grams % GRAMS_PER_KILOGRAM).round() as i64;
            if minor >= GRAMS_PER_KILOGRAM as i64 {
                major += 1;
                minor = 0;
            }
            WeightParts { major, minor }
        }
        WeightUnit::LbOz => {
            let total_ounces = grams / GRAMS_PER_OUNCE;
            let mut major = (total_ounces / OUNCES_PER_POUND).floor() as i64;
            let mut minor = (total_ounces % OUNCES_PER_POUND).round() as i64;
            if minor > MAX_OUNCES {
                major += 1;
                minor = 0;
            }
            WeightParts { major, minor }
        }
    }
}

/// Combine display fields back into grams. Inverse of [`split_weight`].
///
/// Fields are clamped to the entry widget's range: no negatives, ounces in
/// 0..=15, pounds capped at [`MAX_INPUT_POUNDS`], gram remainder in 0..=999.
pub fn display_to_grams(major: i64, minor: i64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::KgG => {
            let kg = major.max(0);
            let g = minor.clamp(0, 999);
            kg as f64 * GRAMS_PER_KILOGRAM + g as f64
        }
        WeightUnit::LbOz => {
            let lb = major.clamp(0, MAX_INPUT_POUNDS);
            let oz = minor.clamp(0, MAX_OUNCES);
            (lb as f64 * OUNCES_PER_POUND + oz as f64) * GRAMS_PER_OUNCE
        }
    }
}

/// Format a gram weight the way the net tiles show it.
///
/// Metric: `"450g"` below one kilogram, `"1kg"` on the whole kilogram,
/// otherwise one tenth-of-kilogram digit (`"1.2kg"`). Imperial: `"12oz"`,
/// `"3lb"`, `"3lb 4oz"`.
pub fn format_weight(grams: f64, unit: WeightUnit) -> String {
    let grams = grams.max(0.0);
    match unit {
        WeightUnit::KgG => {
            if grams >= GRAMS_PER_KILOGRAM {
                let mut kg = (grams / GRAMS_PER_KILOGRAM).floor() as i64;
                let mut g = (grams % GRAMS_PER_KILOGRAM).round() as i64;
                if g >= GRAMS_PER_KILOGRAM as i64 {
                    kg += 1;
                    g = 0;
                }
                if g > 0 {
                    format!("{kg}.{}kg", g / 100)
                } else {
                    format!("{kg}kg")
                }
            } else {
                format!("{}g", grams.round() as i64)
            }
        }
        WeightUnit::LbOz => {
            let parts = split_weight(grams, WeightUnit::LbOz);
            if parts.major > 0 {
                if parts.minor > 0 {
                    format!("{}lb {}oz", parts.major, parts.minor)
                } else {
                    format!("{}lb", parts.major)
                }
            } else {
                format!("{}oz", parts.minor)
            }
        }
    }
}

/// Interpret free-text numeric entry from the manual weight keypad.
///
/// Metric entry is grams; imperial entry is decimal pounds. Text that does
/// not parse as a number counts as zero, and negatives clamp to zero.
pub fn parse_weight(text: String, unit: WeightUnit) -> f64 {
    let value: f64 = text.trim().parse().unwrap_or(0.0);
    let value = value.max(0.0);
    match unit {
        WeightUnit::KgG => value,
        WeightUnit::LbOz => value * GRAMS_PER_POUND,
    }
}
