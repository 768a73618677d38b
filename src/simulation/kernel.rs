//! Smoothing kernel and its derivative
//!
//! `kernel(d) = (2/h) * max(0, (h - d)/h)^3` is compactly supported on `[0, h)`.
//! `derivative(d) = -6 (h - d)^2 / h^4` is *not* cut off at `h` unless
//! `truncate` is set, so particles beyond the support radius still push on
//! each other through the pressure term.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingKernel {
    pub h: f64, // support radius
    pub truncate: bool, // derivative = 0 for d >= h
}

impl SmoothingKernel {
    pub fn new(h: f64) -> Self {
        Self { h, truncate: false }
    }

    pub fn truncated(h: f64) -> Self {
        Self { h, truncate: true }
    }

    #[inline]
    pub fn kernel(&self, d: f64) -> f64 {
        let q = ((self.h - d) / self.h).max(0.0);
        q * q * q * (2.0 / self.h)
    }

    #[inline]
    pub fn derivative(&self, d: f64) -> f64 {
        if self.truncate && d >= self.h {
            return 0.0;
        }
        let diff = self.h - d;
        -6.0 * diff * diff / self.h.powi(4)
    }
}
