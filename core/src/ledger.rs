//! Net weight ledger.
//!
//! Pure operations over the per-net weight collection. All inputs and
//! outputs are plain data; mutation means returning a new collection. Net
//! weights are canonical grams and can never go negative.

use crate::models::{Net, WeightUnit};
use crate::units::GRAMS_PER_OUNCE;

/// Fill-level classification for a net's progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBand {
    /// Below 80% of capacity.
    Success,
    /// 80% up to and including 100%.
    Warning,
    /// Over capacity.
    Error,
}

impl StatusBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 80.0 {
            StatusBand::Success
        } else if percentage <= 100.0 {
            StatusBand::Warning
        } else {
            StatusBand::Error
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusBand::Success => "Filling",
            StatusBand::Warning => "Near Limit",
            StatusBand::Error => "Over Limit",
        }
    }
}

/// Free-function form of [`StatusBand::from_percentage`].
pub fn status_band(percentage: f64) -> StatusBand {
    StatusBand::from_percentage(percentage)
}

/// Add `delta_grams` (may be negative) to one net, clamping the result at
/// zero. An out-of-range index returns the collection unchanged.
pub fn increment_net(mut nets: Vec<Net>, index: u32, delta_grams: f64) -> Vec<Net> {
    if let Some(net) = nets.get_mut(index as usize) {
        net.weight = (net.weight + delta_grams).max(0.0);
    }
    nets
}

/// Overwrite one net's weight, clamping at zero. An out-of-range index
/// returns the collection unchanged.
pub fn set_net_weight(mut nets: Vec<Net>, index: u32, absolute_grams: f64) -> Vec<Net> {
    if let Some(net) = nets.get_mut(index as usize) {
        net.weight = absolute_grams.max(0.0);
    }
    nets
}

/// Sum of all net weights in grams.
pub fn total_weight(nets: Vec<Net>) -> f64 {
    nets.iter().map(|n| n.weight).sum()
}

/// Percentage of capacity used, 0..100 and beyond when over-filled.
///
/// A net with no capacity (or zero capacity) reports 0, meaning "no
/// progress bar" rather than "empty"; callers must not render a bar for it.
pub fn fill_percentage(net: Net) -> f64 {
    match net.capacity {
        Some(capacity) if capacity > 0.0 => (net.weight / capacity) * 100.0,
        _ => 0.0,
    }
}

/// Grams added or removed by one tap of the +/- stepper.
pub fn tap_step_grams(unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::KgG => 100.0,
        WeightUnit::LbOz => GRAMS_PER_OUNCE,
    }
}
