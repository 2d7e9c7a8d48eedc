//! Continuous linear scale with "nice" tick generation

use serde::{Deserialize, Serialize};

/// Default number of ticks a linear scale aims for
pub const DEFAULT_TICK_COUNT: usize = 10;

/// Upper bound on the power-of-ten multiplier used to turn a fractional
/// tick step into an integer one.
const MAX_INTEGER_SCALE: f64 = 1e15;

/// A linear mapping from a numeric domain onto a numeric range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
    clamp: bool,
    tick_count: usize,
}

impl LinearScale {
    /// Identity scale over `[0, 1]`
    pub fn new() -> Self {
        Self {
            domain: [0.0, 1.0],
            range: [0.0, 1.0],
            clamp: false,
            tick_count: DEFAULT_TICK_COUNT,
        }
    }

    pub fn with_domain(mut self, domain: [f64; 2]) -> Self {
        self.domain = domain;
        self
    }

    pub fn with_range(mut self, range: [f64; 2]) -> Self {
        self.range = range;
        self
    }

    /// Clamp mapped values to the range extent
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Approximate number of ticks to generate
    pub fn with_tick_count(mut self, count: usize) -> Self {
        self.tick_count = count;
        self
    }

    pub fn set_domain(&mut self, domain: [f64; 2]) {
        self.domain = domain;
    }

    pub fn set_range(&mut self, range: [f64; 2]) {
        self.range = range;
    }

    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    pub fn tick_count(&self) -> usize {
        self.tick_count
    }

    pub fn is_clamped(&self) -> bool {
        self.clamp
    }

    /// Map a domain value into the range
    pub fn apply(&self, value: f64) -> f64 {
        let t = normalize(self.domain, value, self.clamp);
        self.range[0] + t * (self.range[1] - self.range[0])
    }

    /// Map a range value back into the domain
    pub fn invert(&self, value: f64) -> f64 {
        let t = normalize(self.range, value, self.clamp);
        self.domain[0] + t * (self.domain[1] - self.domain[0])
    }

    /// Tick values spanning the domain, on a 1/2/5 multiple of a power of ten.
    ///
    /// A degenerate (zero-width or non-finite) domain yields no ticks.
    pub fn ticks(&self) -> Vec<f64> {
        let Some((start, stop, step)) = tick_range(self.domain, self.tick_count) else {
            return Vec::new();
        };

        let k = integer_scale(step);
        let (start, stop, step) = (start * k, stop * k, step * k);

        let mut ticks = Vec::new();
        let mut i = 0usize;
        loop {
            let j = start + step * i as f64;
            if j >= stop {
                break;
            }
            ticks.push(j / k);
            i += 1;
        }
        ticks
    }

    /// Distance between two generated ticks, in domain units
    pub fn tick_step(&self) -> Option<f64> {
        tick_range(self.domain, self.tick_count).map(|(_, _, step)| step)
    }

    /// Extend the domain outward so both ends fall on a tick
    pub fn nice(mut self) -> Self {
        // A second pass settles domains whose first rounding changed the step.
        for _ in 0..2 {
            let Some(step) = self.tick_step() else {
                break;
            };
            let (lo, hi) = if self.domain[1] < self.domain[0] { (1, 0) } else { (0, 1) };
            self.domain[lo] = (self.domain[lo] / step).floor() * step;
            self.domain[hi] = (self.domain[hi] / step).ceil() * step;
        }
        self
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        Self::new()
    }
}

/// Position of `value` within `extent` as a fraction. A zero-width extent
/// puts everything at its start.
fn normalize(extent: [f64; 2], value: f64, clamp: bool) -> f64 {
    let width = extent[1] - extent[0];
    let t = if width == 0.0 { 0.0 } else { (value - extent[0]) / width };
    if clamp {
        t.clamp(0.0, 1.0)
    } else {
        t
    }
}

/// Start, exclusive stop and step of the tick sequence for `domain`
fn tick_range(domain: [f64; 2], count: usize) -> Option<(f64, f64, f64)> {
    let (lo, hi) = if domain[0] <= domain[1] {
        (domain[0], domain[1])
    } else {
        (domain[1], domain[0])
    };
    let span = hi - lo;
    if count == 0 || !span.is_finite() || span <= 0.0 {
        return None;
    }

    let m = count as f64;
    let mut step = 10f64.powf((span / m).log10().floor());
    let err = m / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }

    let start = (lo / step).ceil() * step;
    let stop = (hi / step).floor() * step + step * 0.5;
    Some((start, stop, step))
}

/// Smallest power of ten that makes `step` integral
fn integer_scale(step: f64) -> f64 {
    let mut k = 1.0;
    while (step * k) % 1.0 != 0.0 && k < MAX_INTEGER_SCALE {
        k *= 10.0;
    }
    k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_apply_and_invert() {
        let scale = LinearScale::new().with_domain([0.0, 10.0]).with_range([0.0, 100.0]);
        assert_relative_eq!(scale.apply(2.5), 25.0);
        assert_relative_eq!(scale.invert(75.0), 7.5);
        // Unclamped scales extrapolate
        assert_relative_eq!(scale.apply(20.0), 200.0);
    }

    #[test]
    fn test_clamp() {
        let scale = LinearScale::new()
            .with_domain([0.0, 10.0])
            .with_range([0.0, 100.0])
            .with_clamp(true);
        assert_relative_eq!(scale.apply(20.0), 100.0);
        assert_relative_eq!(scale.apply(-5.0), 0.0);
    }

    #[test]
    fn test_zero_width_domain_maps_to_range_start() {
        let scale = LinearScale::new().with_domain([3.0, 3.0]).with_range([10.0, 20.0]);
        assert_eq!(scale.apply(3.0), 10.0);
        assert!(scale.ticks().is_empty());
    }

    #[test]
    fn test_unit_domain_ticks() {
        let ticks = LinearScale::new().ticks();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(ticks[3], 0.3);
        assert_eq!(ticks[10], 1.0);
    }

    #[test]
    fn test_ticks_pick_step_multiple() {
        // span 2 over 10 ticks -> step 0.2
        let ticks = LinearScale::new().with_domain([0.0, 2.0]).ticks();
        assert_eq!(ticks.len(), 11);
        assert_eq!(ticks[1], 0.2);

        // span 100 over 5 ticks -> step 20
        let ticks = LinearScale::new()
            .with_domain([0.0, 100.0])
            .with_tick_count(5)
            .ticks();
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_ticks_inside_unaligned_domain() {
        let ticks = LinearScale::new().with_domain([0.13, 0.97]).ticks();
        assert_eq!(ticks.first().copied(), Some(0.2));
        assert_eq!(ticks.last().copied(), Some(0.9));
    }

    #[test]
    fn test_reversed_domain_ticks_ascend() {
        let ticks = LinearScale::new().with_domain([1.0, 0.0]).ticks();
        assert_eq!(ticks.len(), 11);
        assert!(ticks.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_nice_rounds_domain_outward() {
        let scale = LinearScale::new().with_domain([0.13, 0.97]).nice();
        assert_relative_eq!(scale.domain()[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(scale.domain()[1], 1.0, epsilon = 1e-12);
    }
}
