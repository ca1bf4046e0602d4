//! Reduces an outcome sequence to display statistics and a frequency table.
//!
//! Non-finite outcomes (from dividing by zero) are counted but otherwise excluded: they do not
//! contribute to the extrema, the mean, or any bin.

use crate::common::{Float, Int};
use std::collections::BTreeMap;
use std::fmt;

/// Tables spanning more integers than this only list the values that occurred.
pub const MAX_DENSE_BINS: u64 = 1 << 16;

/// How the entries of an outcome sequence are weighted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Weighting {
    /// Independent samples; bins hold raw occurrence counts.
    Sampled,
    /// A full enumeration; bins hold each value's share of all outcomes.
    EqualWeight,
}

impl Weighting {
    /// The unit of a bin's weight, for axis labels.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sampled => "Frequency",
            Self::EqualWeight => "Probability",
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bin {
    pub value: Int,
    pub weight: Float,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub weighting: Weighting,
    /// Length of the summarized sequence, non-finite values included.
    pub total: usize,
    pub non_finite: usize,
    pub min: Float,
    pub max: Float,
    pub mean: Float,
    pub std_dev: Float,
    /// Ascending by value. Every integer in `[round(min), round(max)]` has a bin unless the
    /// range is wider than [MAX_DENSE_BINS].
    pub bins: Vec<Bin>,
}

impl Summary {
    fn empty(weighting: Weighting, total: usize) -> Self {
        Self {
            weighting,
            total,
            non_finite: total,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            std_dev: 0.0,
            bins: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The chance of an outcome that rounds to `value` or more.
    pub fn probability_at_least(&self, value: Int) -> Float {
        if self.total == 0 {
            return 0.0;
        }
        let mass: Float = self
            .bins
            .iter()
            .filter(|bin| bin.value >= value)
            .map(|bin| bin.weight)
            .sum();
        match self.weighting {
            Weighting::Sampled => mass / self.total as Float,
            Weighting::EqualWeight => mass,
        }
    }

    pub fn max_weight(&self) -> Float {
        self.bins.iter().map(|bin| bin.weight).fold(0.0, Float::max)
    }
}

pub fn summarize(outcomes: &[Float], weighting: Weighting) -> Summary {
    let total = outcomes.len();
    let finite: Vec<Float> = outcomes.iter().copied().filter(|x| x.is_finite()).collect();
    if finite.is_empty() {
        return Summary::empty(weighting, total);
    }

    let n = finite.len() as Float;
    let (min, max) = finite
        .iter()
        .fold((Float::INFINITY, Float::NEG_INFINITY), |(lo, hi), &x| (lo.min(x), hi.max(x)));
    let mean = finite.iter().sum::<Float>() / n;
    let variance = finite.iter().map(|x| (x - mean).powi(2)).sum::<Float>() / n;

    let mut counts: BTreeMap<Int, usize> = BTreeMap::new();
    for x in &finite {
        *counts.entry(x.round() as Int).or_default() += 1;
    }

    let weight = |count: usize| match weighting {
        Weighting::Sampled => count as Float,
        Weighting::EqualWeight => count as Float / total as Float,
    };

    let (lo, hi) = (min.round() as Int, max.round() as Int);
    let bins = if hi.abs_diff(lo) < MAX_DENSE_BINS {
        (lo..=hi)
            .map(|value| Bin {
                value,
                weight: weight(counts.get(&value).copied().unwrap_or(0)),
            })
            .collect()
    } else {
        counts
            .into_iter()
            .map(|(value, count)| Bin {
                value,
                weight: weight(count),
            })
            .collect()
    };

    log::debug!(
        "summarized {} outcomes ({} non-finite): min {}, max {}, mean {:.3}",
        total,
        total - finite.len(),
        min,
        max,
        mean
    );

    Summary {
        weighting,
        total,
        non_finite: total - finite.len(),
        min,
        max,
        mean,
        std_dev: variance.sqrt(),
        bins,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::evaluate_exact;
    use crate::parse::parse;

    fn weight_of(summary: &Summary, value: Int) -> Float {
        summary
            .bins
            .iter()
            .find(|bin| bin.value == value)
            .map_or(0.0, |bin| bin.weight)
    }

    fn close(a: Float, b: Float) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summarize_empty() {
        for weighting in [Weighting::Sampled, Weighting::EqualWeight] {
            let summary = summarize(&[], weighting);
            assert_eq!(summary.min, 0.0);
            assert_eq!(summary.max, 0.0);
            assert_eq!(summary.mean, 0.0);
            assert!(summary.is_empty());
            assert_eq!(summary.probability_at_least(0), 0.0);
        }
    }

    #[test]
    fn test_summarize_two_dice() {
        let outcomes = evaluate_exact(&parse("1d6+1d6").unwrap(), None).unwrap();
        let summary = summarize(&outcomes, Weighting::EqualWeight);

        assert_eq!(summary.total, 36);
        assert_eq!((summary.min, summary.max), (2.0, 12.0));
        assert!(close(summary.mean, 7.0));
        assert_eq!(summary.bins.len(), 11);
        assert!(close(weight_of(&summary, 7), 6.0 / 36.0));
        assert!(close(weight_of(&summary, 2), 1.0 / 36.0));
        assert!(close(weight_of(&summary, 12), 1.0 / 36.0));
        assert!(close(summary.bins.iter().map(|b| b.weight).sum(), 1.0));
        assert!(close(summary.probability_at_least(12), 1.0 / 36.0));
        assert!(close(summary.std_dev, (35.0_f64 / 6.0).sqrt()));
    }

    #[test]
    fn test_summarize_sampled_counts() {
        let summary = summarize(&[1.0, 3.0, 3.0, 3.0, 5.0], Weighting::Sampled);
        let weights: Vec<_> = summary.bins.iter().map(|b| (b.value, b.weight)).collect();
        assert_eq!(weights, vec![(1, 1.0), (2, 0.0), (3, 3.0), (4, 0.0), (5, 1.0)]);
        assert!(close(summary.probability_at_least(3), 0.8));
        assert_eq!(summary.max_weight(), 3.0);
        assert_eq!(summary.weighting.label(), "Frequency");
    }

    #[test]
    fn test_summarize_excludes_non_finite() {
        let outcomes = [Float::INFINITY, 1.0, Float::NAN, 3.0];
        let summary = summarize(&outcomes, Weighting::EqualWeight);
        assert_eq!(summary.non_finite, 2);
        assert_eq!((summary.min, summary.max), (1.0, 3.0));
        assert_eq!(summary.mean, 2.0);
        assert_eq!(weight_of(&summary, 1), 0.25);

        let summary = summarize(&[Float::NEG_INFINITY], Weighting::Sampled);
        assert_eq!(summary.non_finite, 1);
        assert_eq!(summary.mean, 0.0);
        assert!(summary.is_empty());
    }

    #[test]
    fn test_summarize_rounds_fractions() {
        let summary = summarize(&[0.5, 1.0, 1.4, 2.6], Weighting::Sampled);
        assert_eq!(summary.min, 0.5);
        let weights: Vec<_> = summary.bins.iter().map(|b| (b.value, b.weight)).collect();
        assert_eq!(weights, vec![(1, 3.0), (2, 0.0), (3, 1.0)]);
    }

    #[test]
    fn test_summarize_wide_range_is_sparse() {
        let summary = summarize(&[1.0, 1e9, 1e9], Weighting::Sampled);
        let weights: Vec<_> = summary.bins.iter().map(|b| (b.value, b.weight)).collect();
        assert_eq!(weights, vec![(1, 1.0), (1_000_000_000, 2.0)]);
    }
}
