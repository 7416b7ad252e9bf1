//! Post-match statistics.
//!
//! Pure computation over an ended (or still-running) match state, with no
//! storage or session dependencies, so the end-of-match screen can be fed
//! straight from a history entry.

use crate::clock::{elapsed_seconds, format_duration};
use crate::ledger::{fill_percentage, status_band, StatusBand};
use crate::models::MatchState;
use crate::units::format_weight;

#[derive(Debug, Clone, PartialEq)]
pub struct NetSummary {
    pub index: u32,
    pub weight: f64,
    /// `None` when the net has no capacity: nothing to fill against.
    pub fill_percentage: Option<f64>,
    pub band: Option<StatusBand>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchSummary {
    pub total_weight: f64,
    pub average_net_weight: f64,
    pub net_count: u32,
    /// Index of the heaviest net; `None` when every net is empty.
    pub best_net: Option<u32>,
    pub duration_minutes: i32,
    /// Wall time actually spent, start to end (or start to now for a match
    /// summarized mid-run).
    pub elapsed_seconds: i64,
    pub nets: Vec<NetSummary>,
}

/// Compute the end-of-match figures from a match state.
pub fn summarize_match(state: MatchState) -> MatchSummary {
    let total_weight: f64 = state.nets.iter().map(|n| n.weight).sum();
    let net_count = state.nets.len() as u32;
    let average_net_weight = if net_count > 0 {
        total_weight / f64::from(net_count)
    } else {
        0.0
    };

    let best_net = state
        .nets
        .iter()
        .enumerate()
        .filter(|(_, net)| net.weight > 0.0)
        .max_by(|(_, a), (_, b)| a.weight.total_cmp(&b.weight))
        .map(|(i, _)| i as u32);

    let elapsed = state
        .end_time
        .map(|end| elapsed_seconds(state.start_time, end))
        .unwrap_or(0);

    let nets = state
        .nets
        .iter()
        .enumerate()
        .map(|(i, net)| {
            let pct = net
                .capacity
                .filter(|c| *c > 0.0)
                .map(|_| fill_percentage(net.clone()));
            NetSummary {
                index: i as u32,
                weight: net.weight,
                fill_percentage: pct,
                band: pct.map(status_band),
            }
        })
        .collect();

    MatchSummary {
        total_weight,
        average_net_weight,
        net_count,
        best_net,
        duration_minutes: state.config.duration_minutes,
        elapsed_seconds: elapsed,
        nets,
    }
}

/// The shareable plain-text summary block.
pub fn share_text(state: MatchState) -> String {
    let total_weight: f64 = state.nets.iter().map(|n| n.weight).sum();
    let mut text = format!(
        "PegPro Match Summary\n\nMatch: {}\nPeg: {}\nDuration: {}\nTotal Weight: {}\n\n",
        state.config.name,
        state.config.peg_number,
        format_duration(i64::from(state.config.duration_minutes)),
        format_weight(total_weight, state.config.unit),
    );
    let lines: Vec<String> = state
        .nets
        .iter()
        .enumerate()
        .map(|(i, net)| format!("Net {}: {}", i + 1, format_weight(net.weight, state.config.unit)))
        .collect();
    text.push_str(&lines.join("\n"));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchConfig, Net, WeightUnit};

    fn ended_match() -> MatchState {
        MatchState {
            id: "m1".to_string(),
            config: MatchConfig {
                name: "Evening Club".to_string(),
                duration_minutes: 150,
                peg_number: "7".to_string(),
                number_of_nets: 3,
                net_capacity: Some(20_000.0),
                unit: WeightUnit::KgG,
                keep_screen_on: false,
            },
            start_time: 1_700_000_000_000,
            end_time: Some(1_700_000_000_000 + 9_000_000),
            nets: vec![
                Net { weight: 12_500.0, capacity: Some(20_000.0) },
                Net { weight: 21_000.0, capacity: Some(20_000.0) },
                Net { weight: 0.0, capacity: Some(20_000.0) },
            ],
            is_active: false,
        }
    }

    #[test]
    fn test_summary_totals_and_best_net() {
        let summary = summarize_match(ended_match());
        assert_eq!(summary.total_weight, 33_500.0);
        assert_eq!(summary.net_count, 3);
        assert_eq!(summary.best_net, Some(1));
        assert_eq!(summary.elapsed_seconds, 9_000);
        assert_eq!(summary.duration_minutes, 150);
        assert!((summary.average_net_weight - 33_500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_bands_per_net() {
        let summary = summarize_match(ended_match());
        assert_eq!(summary.nets[0].band, Some(StatusBand::Success));
        assert_eq!(summary.nets[1].band, Some(StatusBand::Error));
        assert_eq!(summary.nets[2].band, Some(StatusBand::Success));
    }

    #[test]
    fn test_summary_without_capacity_has_no_bands() {
        let mut state = ended_match();
        for net in &mut state.nets {
            net.capacity = None;
        }
        let summary = summarize_match(state);
        assert!(summary.nets.iter().all(|n| n.fill_percentage.is_none()));
        assert!(summary.nets.iter().all(|n| n.band.is_none()));
    }

    #[test]
    fn test_all_empty_nets_have_no_best() {
        let mut state = ended_match();
        for net in &mut state.nets {
            net.weight = 0.0;
        }
        let summary = summarize_match(state);
        assert_eq!(summary.best_net, None);
        assert_eq!(summary.total_weight, 0.0);
    }

    #[test]
    fn test_share_text_lists_every_net() {
        let text = share_text(ended_match());
        assert!(text.starts_with("PegPro Match Summary"));
        assert!(text.contains("Match: Evening Club"));
        assert!(text.contains("Peg: 7"));
        assert!(text.contains("Duration: 2h 30m"));
        assert!(text.contains("Total Weight: 33.5kg"));
        assert!(text.contains("Net 1: 12.5kg"));
        assert!(text.contains("Net 3: 0g"));
    }
}
