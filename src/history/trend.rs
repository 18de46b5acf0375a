//! Trend view model: history table rows, chart series and point selection

use rand::Rng;

use crate::commentary::{self, FIRST_MEASUREMENT, Trend};
use crate::domain::Measurement;

/// Shown instead of the table when nothing has been measured
pub const EMPTY_HISTORY: &str = "No measurements yet.";

/// One row of the history table
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub time: String,
    pub height: String,
}

/// Snapshot of the history, rebuilt whenever the history changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendView {
    rows: Vec<TrendRow>,
    heights: Vec<f64>,
}

/// Outcome of selecting a point on the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointSelection {
    /// Click did not land near any point
    Nothing,
    /// The oldest point has no predecessor
    First,
    /// Point `index` compared with the one before it
    Compared {
        index: usize,
        previous_cm: f64,
        current_cm: f64,
        trend: Trend,
    },
}

impl TrendView {
    pub fn from_history(history: &[Measurement]) -> Self {
        Self {
            rows: history
                .iter()
                .map(|m| TrendRow {
                    time: m.time.clone(),
                    height: m.height_label(),
                })
                .collect(),
            heights: history.iter().map(|m| m.height_cm).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn rows(&self) -> &[TrendRow] {
        &self.rows
    }

    /// Chart series, one value per measurement in history order
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    /// Select the point at `index`, comparing it with its predecessor
    pub fn select(&self, index: Option<usize>) -> PointSelection {
        match index {
            None => PointSelection::Nothing,
            Some(i) if i >= self.heights.len() => PointSelection::Nothing,
            Some(0) => PointSelection::First,
            Some(i) => {
                let previous_cm = self.heights[i - 1];
                let current_cm = self.heights[i];
                PointSelection::Compared {
                    index: i,
                    previous_cm,
                    current_cm,
                    trend: Trend::between(previous_cm, current_cm),
                }
            }
        }
    }
}

impl PointSelection {
    /// Text shown under the chart for this selection
    pub fn message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            PointSelection::Nothing => String::new(),
            PointSelection::First => FIRST_MEASUREMENT.to_string(),
            PointSelection::Compared {
                previous_cm,
                current_cm,
                ..
            } => commentary::trend_comment(*previous_cm, *current_cm, rng).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn history(heights: &[f64]) -> Vec<Measurement> {
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| Measurement::new(*h, format!("t{i}")))
            .collect()
    }

    #[test]
    fn test_rows_follow_history_order() {
        let view = TrendView::from_history(&history(&[10.0, 22.456]));
        assert_eq!(
            view.rows(),
            &[
                TrendRow {
                    time: "t0".into(),
                    height: "10.00".into()
                },
                TrendRow {
                    time: "t1".into(),
                    height: "22.46".into()
                },
            ]
        );
        assert_eq!(view.heights(), &[10.0, 22.456]);
    }

    #[test]
    fn test_first_point_has_no_comparison() {
        let mut rng = StdRng::seed_from_u64(1);
        for heights in [&[5.0][..], &[5.0, 90.0], &[90.0, 5.0, 40.0]] {
            let view = TrendView::from_history(&history(heights));
            let selection = view.select(Some(0));
            assert_eq!(selection, PointSelection::First);
            assert_eq!(selection.message(&mut rng), FIRST_MEASUREMENT);
        }
    }

    #[test]
    fn test_compares_with_previous_point() {
        let view = TrendView::from_history(&history(&[50.0, 44.0, 50.0, 46.0]));
        assert_eq!(
            view.select(Some(1)),
            PointSelection::Compared {
                index: 1,
                previous_cm: 50.0,
                current_cm: 44.0,
                trend: Trend::Improvement
            }
        );
        assert!(matches!(
            view.select(Some(2)),
            PointSelection::Compared {
                trend: Trend::Increase,
                ..
            }
        ));
        assert!(matches!(
            view.select(Some(3)),
            PointSelection::Compared {
                trend: Trend::NoChange,
                ..
            }
        ));
    }

    #[test]
    fn test_compared_message_uses_trend_pool() {
        let mut rng = StdRng::seed_from_u64(9);
        let view = TrendView::from_history(&history(&[44.0, 50.0]));
        let message = view.select(Some(1)).message(&mut rng);
        assert!(Trend::Increase.pool().contains(&message.as_str()));
    }

    #[test]
    fn test_out_of_range_or_missing_selects_nothing() {
        let mut rng = StdRng::seed_from_u64(2);
        let view = TrendView::from_history(&history(&[1.0, 2.0]));
        assert_eq!(view.select(Some(2)), PointSelection::Nothing);
        assert_eq!(view.select(None), PointSelection::Nothing);
        assert_eq!(view.select(None).message(&mut rng), "");
    }

    #[test]
    fn test_empty_history() {
        let view = TrendView::from_history(&[]);
        assert!(view.is_empty());
        assert_eq!(view.select(Some(0)), PointSelection::Nothing);
    }
}
