//! Scales turning data values into classes, colors and positions.
//!
//! - [`ThresholdScale`]: partition of the observed range in `K`
//!   classes of equal width.
//! - [`ThresholdColorScale`]: a threshold scale bound to a palette.
//! - [`LinearScale`]: affine map used to lay out the legend axis.

use rgb::RGB8;
use tracing::debug;
use crate::error::ScaleError;

/// Partition of `[min, max]` into `K` contiguous classes of equal
/// width.  Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    min: f64,
    max: f64,
    boundaries: Vec<f64>, // K - 1 cut points, ascending
}

impl ThresholdScale {
    /// Build a scale with `classes` buckets spanning the range of
    /// `values`.  Cut point `i` (for `i` in `1 .. classes`) is
    /// `min + i·(max - min)/classes`.
    ///
    /// # Example
    ///
    /// ```
    /// use choropleth::ThresholdScale;
    /// let s = ThresholdScale::build([10., 20., 30., 40.], 4).unwrap();
    /// assert_eq!(s.boundaries(), &[17.5, 25., 32.5]);
    /// assert_eq!(s.lookup(32.5), 3);
    /// ```
    pub fn build<I>(values: I, classes: usize) -> Result<Self, ScaleError>
    where I: IntoIterator<Item = f64> {
        if classes == 0 { return Err(ScaleError::NoClasses) }
        let mut range: Option<(f64, f64)> = None;
        for (index, value) in values.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(ScaleError::NonFinite { index, value })
            }
            range = Some(match range {
                None => (value, value),
                Some((lo, hi)) => (lo.min(value), hi.max(value)),
            });
        }
        let (min, max) = range.ok_or(ScaleError::Empty)?;
        let k = classes as f64;
        let step = (max - min) / k;
        let boundaries: Vec<f64> = if step.is_finite() {
            (1 .. classes).map(|i| min + i as f64 * step).collect()
        } else {
            // `max - min` overflowed: interpolate the bounds instead.
            (1 .. classes).map(|i| { let t = i as f64 / k;
                                     (1. - t) * min + t * max })
                .collect()
        };
        debug!(min, max, classes, ?boundaries, "threshold scale built");
        Ok(ThresholdScale { min, max, boundaries })
    }

    /// Smallest observed value.
    pub fn min(&self) -> f64 { self.min }

    /// Largest observed value.
    pub fn max(&self) -> f64 { self.max }

    /// The `K - 1` ascending cut points.
    pub fn boundaries(&self) -> &[f64] { &self.boundaries }

    /// Number of classes `K`.
    pub fn classes(&self) -> usize { self.boundaries.len() + 1 }

    /// Whether all observations shared the same value.
    pub fn is_degenerate(&self) -> bool { self.min == self.max }

    /// Return the class of `value`, in `0 .. K`: the number of cut
    /// points `≤ value`.  A value equal to a cut point belongs to the
    /// class it starts.  Values outside `[min, max]` land in the
    /// first or last class; NaN lands in class 0.  A degenerate scale
    /// maps everything to class 0.
    ///
    /// ```
    /// use choropleth::ThresholdScale;
    /// let s = ThresholdScale::build([0., 9.], 3).unwrap();
    /// assert_eq!(s.lookup(-100.), 0);
    /// assert_eq!(s.lookup(3.), 1);
    /// assert_eq!(s.lookup(100.), 2);
    /// ```
    pub fn lookup(&self, value: f64) -> usize {
        if self.is_degenerate() || value <= self.min { return 0 }
        // Cut points of a range a few ulps wide may round onto the
        // bounds; the extremes still belong to the end classes.
        if value >= self.max { return self.boundaries.len() }
        self.boundaries.partition_point(|&b| b <= value)
    }

    /// Values at which to draw axis ticks: `min`, the cut points, and
    /// finally `max` so that the top of the range is labelled.
    pub fn tick_values(&self) -> Vec<f64> {
        let mut ticks = Vec::with_capacity(self.boundaries.len() + 2);
        ticks.push(self.min);
        ticks.extend_from_slice(&self.boundaries);
        ticks.push(self.max);
        ticks
    }
}

/// A [`ThresholdScale`] whose classes are the colors of a palette.
#[derive(Debug, Clone)]
pub struct ThresholdColorScale {
    scale: ThresholdScale,
    colors: Vec<RGB8>,
}

impl ThresholdColorScale {
    /// Partition the range of `values` in as many classes as there
    /// are `colors`.
    pub fn new<I>(values: I, colors: Vec<RGB8>) -> Result<Self, ScaleError>
    where I: IntoIterator<Item = f64> {
        let scale = ThresholdScale::build(values, colors.len())?;
        Ok(Self { scale, colors })
    }

    #[inline]
    pub fn scale(&self) -> &ThresholdScale { &self.scale }

    #[inline]
    pub fn colors(&self) -> &[RGB8] { &self.colors }

    /// Color of the class of `value`.
    pub fn color(&self, value: f64) -> RGB8 {
        self.colors[self.scale.lookup(value)]
    }

    /// Color used for entities without an observation (class 0).
    pub fn fallback(&self) -> RGB8 { self.colors[0] }

    /// Color of `value`, or the fallback if there is none.
    pub fn color_or_fallback(&self, value: Option<f64>) -> RGB8 {
        match value {
            Some(v) => self.color(v),
            None => self.fallback(),
        }
    }
}

/// Affine map from a domain `[d0, d1]` onto a range `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Position of `x`.  Not clamped.  An empty domain maps every
    /// value to the start of the range.
    pub fn apply(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if d0 == d1 { return r0 }
        r0 + (x - d0) / (d1 - d0) * (r1 - r0)
    }

    pub fn range(&self) -> (f64, f64) { self.range }
}
