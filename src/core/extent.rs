use serde::{Deserialize, Serialize};

/// Minimum and maximum of one numeric series.
///
/// `NaN` samples are skipped. A series without any number yields `NaN` on
/// both ends; callers must not expect a usable domain from empty input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: f64,
    pub max: f64,
}

impl Extent {
    #[must_use]
    pub fn of<I>(values: I) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::NAN;
        let mut max = f64::NAN;
        for value in values {
            if value.is_nan() {
                continue;
            }
            if min.is_nan() || value < min {
                min = value;
            }
            if max.is_nan() || value > max {
                max = value;
            }
        }
        Self { min, max }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Domain limits for an x/y pair of axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxesLimits {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AxesLimits {
    #[must_use]
    pub fn x(self) -> Extent {
        Extent {
            min: self.x_min,
            max: self.x_max,
        }
    }

    #[must_use]
    pub fn y(self) -> Extent {
        Extent {
            min: self.y_min,
            max: self.y_max,
        }
    }
}

/// Computes the limits of both series independently.
///
/// The two slices are expected to be parallel, but no length check happens
/// here; each series is reduced on its own.
#[must_use]
pub fn find_min_max(xs: &[f64], ys: &[f64]) -> AxesLimits {
    let x = Extent::of(xs.iter().copied());
    let y = Extent::of(ys.iter().copied());
    AxesLimits {
        x_min: x.min,
        x_max: x.max,
        y_min: y.min,
        y_max: y.max,
    }
}

#[cfg(test)]
mod tests {
    use super::{Extent, find_min_max};

    #[test]
    fn nan_samples_are_skipped() {
        let extent = Extent::of([f64::NAN, 3.0, -1.0, f64::NAN, 7.5]);
        assert_eq!(extent.min, -1.0);
        assert_eq!(extent.max, 7.5);
    }

    #[test]
    fn empty_series_leaves_limits_undefined() {
        let limits = find_min_max(&[], &[]);
        assert!(limits.x_min.is_nan());
        assert!(limits.x_max.is_nan());
        assert!(limits.y_min.is_nan());
        assert!(limits.y_max.is_nan());
    }
}
