//! Cubic Bézier easing curves
//!
//! A curve runs from `(0, 0)` to `(1, 1)` through two control points, like CSS
//! `cubic-bezier()`. Evaluating it at progress `x` means solving `x(t) = x` for
//! the curve parameter `t` and returning `y(t)`. The solver starts from a
//! precomputed sample table, refines with Newton-Raphson where the slope allows,
//! and falls back to bisection on flat stretches.

const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 0.000_000_1;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;

const SPLINE_TABLE_SIZE: usize = 11;
const SAMPLE_STEP: f64 = 1.0 / (SPLINE_TABLE_SIZE - 1) as f64;

/// Polynomial coefficients of one axis: `((a*t + b)*t + c)*t`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Axis {
    a: f64,
    b: f64,
    c: f64,
}

impl Axis {
    fn new(p1: f64, p2: f64) -> Self {
        Self {
            a: 1.0 - 3.0 * p2 + 3.0 * p1,
            b: 3.0 * p2 - 6.0 * p1,
            c: 3.0 * p1,
        }
    }

    #[inline]
    fn at(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        3.0 * self.a * t * t + 2.0 * self.b * t + self.c
    }
}

/// A cubic Bézier timing curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    x: Axis,
    y: Axis,
    linear: bool,
    samples: [f64; SPLINE_TABLE_SIZE],
}

impl CubicBezier {
    /// Curve with control points `(x1, y1)` and `(x2, y2)`.
    ///
    /// Panics if either x coordinate is outside `[0, 1]`, since the curve would
    /// stop being a function of x.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "bezier x values must be in [0, 1] (got {}, {})",
            x1,
            x2
        );

        let x = Axis::new(x1, x2);
        let mut samples = [0.0; SPLINE_TABLE_SIZE];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = x.at(i as f64 * SAMPLE_STEP);
        }

        Self {
            x,
            y: Axis::new(y1, y2),
            linear: x1 == y1 && x2 == y2,
            samples,
        }
    }

    /// The curve shared by every animation stage: fast start, long settle.
    pub fn ease_out() -> Self {
        Self::new(1.0, 1.0, 0.5, 1.0)
    }

    /// Eased value for `progress`, saturating to 0 below the range and 1 above.
    pub fn ease(&self, progress: f32) -> f32 {
        // Written this way round so NaN lands on 0.
        if !(progress > 0.0) {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        if self.linear {
            return progress;
        }
        let t = self.t_for_x(progress as f64);
        self.y.at(t).clamp(0.0, 1.0) as f32
    }

    fn t_for_x(&self, x: f64) -> f64 {
        let last = SPLINE_TABLE_SIZE - 1;
        let mut interval_start = 0.0;
        let mut current = 1;
        while current != last && self.samples[current] <= x {
            interval_start += SAMPLE_STEP;
            current += 1;
        }
        current -= 1;

        // Linear interpolation inside the sample interval gives the first guess.
        let span = self.samples[current + 1] - self.samples[current];
        let dist = (x - self.samples[current]) / span;
        let guess = interval_start + dist * SAMPLE_STEP;

        let slope = self.x.slope(guess);
        if slope >= NEWTON_MIN_SLOPE {
            self.newton_raphson(x, guess)
        } else if slope == 0.0 {
            guess
        } else {
            self.binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP)
        }
    }

    fn newton_raphson(&self, x: f64, mut t: f64) -> f64 {
        for _ in 0..NEWTON_ITERATIONS {
            let slope = self.x.slope(t);
            if slope == 0.0 {
                return t;
            }
            t -= (self.x.at(t) - x) / slope;
        }
        t
    }

    fn binary_subdivide(&self, x: f64, mut lo: f64, mut hi: f64) -> f64 {
        let mut t = lo;
        for _ in 0..SUBDIVISION_MAX_ITERATIONS {
            t = lo + (hi - lo) / 2.0;
            let err = self.x.at(t) - x;
            if err.abs() <= SUBDIVISION_PRECISION {
                break;
            }
            if err > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
        }
        t
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::ease_out()
    }
}
