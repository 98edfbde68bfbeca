//! Circular score indicators shown under the critique.

use std::f64::consts::PI;

use plancritic_core::Scores;

/// Radius of the indicator ring in view-box units.
pub const RING_RADIUS: f64 = 16.0;

/// Labels in display order, matching [`Scores::as_array`].
pub const INDICATOR_LABELS: [&str; 4] = ["نمره مباحث", "نمره کلی", "استانداردها", "سازه-معماری"];

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreIndicator {
    pub label: &'static str,
    /// Rounded percentage in `0..=100`.
    pub value: u8,
    /// Stroke dash array filling `value` percent of the ring.
    pub dash_array: String,
}

impl ScoreIndicator {
    pub fn new(label: &'static str, value: u8) -> Self {
        let value = value.min(100);
        Self {
            label,
            value,
            dash_array: dash_array(value),
        }
    }

    pub fn percent_text(&self) -> String {
        format!("{}%", self.value)
    }
}

fn circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// `"<filled> <circumference>"` for a ring `value` percent full.
pub fn dash_array(value: u8) -> String {
    let c = circumference();
    let filled = f64::from(value.min(100)) / 100.0 * c;
    format!("{:.2} {:.2}", filled, c)
}

pub fn score_indicators(scores: &Scores) -> [ScoreIndicator; 4] {
    let values = scores.as_array();
    std::array::from_fn(|i| ScoreIndicator::new(INDICATOR_LABELS[i], values[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_show_relay_values() {
        let indicators = score_indicators(&Scores::clamped(80, 75, 40, 60));

        let shown: Vec<_> = indicators.iter().map(|i| (i.label, i.percent_text())).collect();
        assert_eq!(
            shown,
            vec![
                ("نمره مباحث", "80%".to_string()),
                ("نمره کلی", "75%".to_string()),
                ("استانداردها", "40%".to_string()),
                ("سازه-معماری", "60%".to_string()),
            ]
        );
    }

    #[test]
    fn test_dash_array_bounds() {
        assert_eq!(dash_array(0), "0.00 100.53");
        assert_eq!(dash_array(100), "100.53 100.53");
        assert_eq!(dash_array(50), "50.27 100.53");
    }
}
