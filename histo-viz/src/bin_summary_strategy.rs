#[allow(unused_imports)]
use micromath::F32Ext;

/// How the FFT magnitudes inside one bin's frequency range collapse to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinSummaryStrategy {
    #[default]
    Average,         // Mean magnitude of the range
    Sum,             // Total magnitude of the range
    WeightedAverage, // Later (higher) frequencies weigh more
    Max,             // Loudest component in the range
    Rms,             // Root mean square of the range
}

impl BinSummaryStrategy {
    pub fn calculate(&self, bin_slice: &[f32]) -> f32 {
        if bin_slice.is_empty() {
            return 0.0;
        }
        let num_elements = bin_slice.len() as f32;

        match *self {
            BinSummaryStrategy::Average => bin_slice.iter().sum::<f32>() / num_elements,
            BinSummaryStrategy::Sum => bin_slice.iter().sum::<f32>(),
            BinSummaryStrategy::Max => bin_slice
                .iter()
                .cloned()
                .fold(f32::NEG_INFINITY, f32::max)
                .max(0.0),
            BinSummaryStrategy::Rms => {
                let sum_of_squares: f32 = bin_slice.iter().map(|&x| x * x).sum();
                (sum_of_squares / num_elements).sqrt()
            }
            BinSummaryStrategy::WeightedAverage => {
                let mut weighted_sum: f32 = 0.0;
                let mut total_weight: f32 = 0.0;
                for (i, &x) in bin_slice.iter().enumerate() {
                    let weight = i as f32 + 1.0;
                    weighted_sum += x * weight;
                    total_weight += weight;
                }
                weighted_sum / total_weight
            }
        }
    }

    pub(crate) fn to_bits(self) -> u32 {
        match self {
            BinSummaryStrategy::Average => 0,
            BinSummaryStrategy::Sum => 1,
            BinSummaryStrategy::WeightedAverage => 2,
            BinSummaryStrategy::Max => 3,
            BinSummaryStrategy::Rms => 4,
        }
    }

    pub(crate) fn from_bits(bits: u32) -> Self {
        match bits {
            1 => BinSummaryStrategy::Sum,
            2 => BinSummaryStrategy::WeightedAverage,
            3 => BinSummaryStrategy::Max,
            4 => BinSummaryStrategy::Rms,
            _ => BinSummaryStrategy::Average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bin_summary_strategy() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];

        assert_eq!(BinSummaryStrategy::Average.calculate(&data), 3.0);
        assert_eq!(BinSummaryStrategy::Sum.calculate(&data), 15.0);
        assert_eq!(BinSummaryStrategy::Max.calculate(&data), 5.0);
        let left = BinSummaryStrategy::Rms.calculate(&data);
        let right = (55.0f32 / 5.0).sqrt();
        assert_abs_diff_eq!(left, right, epsilon = 0.06);
        assert_abs_diff_eq!(
            BinSummaryStrategy::WeightedAverage.calculate(&data),
            3.6666667,
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_empty_slice_summarises_to_zero() {
        for strategy in [
            BinSummaryStrategy::Average,
            BinSummaryStrategy::Sum,
            BinSummaryStrategy::WeightedAverage,
            BinSummaryStrategy::Max,
            BinSummaryStrategy::Rms,
        ] {
            assert_eq!(strategy.calculate(&[]), 0.0);
            assert_eq!(BinSummaryStrategy::from_bits(strategy.to_bits()), strategy);
        }
    }
}
