use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::ticks::{TickValues, tick_step, tick_values};
use crate::error::{ChartError, ChartResult};

/// Continuous linear mapping from a data domain onto a pixel range.
///
/// Either end of the domain may be the larger one; an inverted domain is how
/// the y axis places large values at the top of the plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        let (range_start, range_end) = range;
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    /// Maps a domain value to a pixel.
    ///
    /// Non-finite values yield `NaN` so malformed samples turn into
    /// degenerate geometry instead of aborting a whole chart.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        if !value.is_finite() {
            return f64::NAN;
        }
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        if !pixel.is_finite() || self.range_start == self.range_end {
            return f64::NAN;
        }
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Round tick values inside the domain, in domain order.
    #[must_use]
    pub fn ticks(self, count: usize) -> TickValues {
        tick_values(self.domain_start, self.domain_end, count)
    }

    /// Spacing between the values returned by [`LinearScale::ticks`].
    #[must_use]
    pub fn tick_step(self, count: usize) -> f64 {
        tick_step(self.domain_start, self.domain_end, count)
    }

    /// `(value, pixel)` pairs for each tick.
    #[must_use]
    pub fn tick_positions(self, count: usize) -> SmallVec<[(f64, f64); 16]> {
        self.ticks(count)
            .into_iter()
            .map(|value| (value, self.map(value)))
            .collect()
    }
}

/// Square-root scale used for area-proportional mark sizes.
///
/// Values are transformed with a sign-preserving square root and then mapped
/// linearly. A single-valued domain maps everything to the middle of the
/// range; a non-finite domain maps everything to `NaN`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl SqrtScale {
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let start = signed_sqrt(self.domain.0);
        let end = signed_sqrt(self.domain.1);
        let span = end - start;
        let normalized = if span.is_nan() {
            f64::NAN
        } else if span == 0.0 {
            0.5
        } else {
            (signed_sqrt(value) - start) / span
        };
        self.range.0 + normalized * (self.range.1 - self.range.0)
    }
}

fn signed_sqrt(value: f64) -> f64 {
    if value < 0.0 {
        -(-value).sqrt()
    } else {
        value.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::{LinearScale, SqrtScale};

    #[test]
    fn inverted_domain_maps_large_values_to_small_pixels() {
        let scale = LinearScale::new((90.0, 30.0), (50.0, 750.0)).expect("valid scale");
        assert_eq!(scale.map(90.0), 50.0);
        assert_eq!(scale.map(30.0), 750.0);
        assert!(scale.map(80.0) < scale.map(40.0));
    }

    #[test]
    fn non_finite_values_map_to_nan() {
        let scale = LinearScale::new((0.0, 1.0), (0.0, 100.0)).expect("valid scale");
        assert!(scale.map(f64::NAN).is_nan());
        assert!(scale.map(f64::INFINITY).is_nan());
    }

    #[test]
    fn zero_span_domain_is_rejected() {
        assert!(LinearScale::new((3.0, 3.0), (0.0, 1.0)).is_err());
        assert!(LinearScale::new((f64::NAN, 3.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn sqrt_scale_hits_range_ends() {
        let scale = SqrtScale::new((4.0, 100.0), (3.0, 50.0));
        assert!((scale.map(4.0) - 3.0).abs() <= 1e-12);
        assert!((scale.map(100.0) - 50.0).abs() <= 1e-12);
        // sqrt(25) sits 3/8 of the way between sqrt(4) and sqrt(100).
        assert!((scale.map(25.0) - (3.0 + 47.0 * 3.0 / 8.0)).abs() <= 1e-12);
    }

    #[test]
    fn sqrt_scale_with_single_value_domain_uses_range_midpoint() {
        let scale = SqrtScale::new((9.0, 9.0), (3.0, 50.0));
        assert_eq!(scale.map(9.0), 26.5);
    }
}
