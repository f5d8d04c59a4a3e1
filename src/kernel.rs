//! Smoothing (influence) kernels. Each maps a scalar distance and a smoothing
//! length `h` to an influence weight; the derivative feeds the pressure-gradient
//! force.
//!
//! The cubic and linear kernels have compact support of radius `h`: both the
//! weight and its slope vanish at `x = h`. The gaussian never reaches exactly
//! zero, but decays fast enough that distant particles contribute negligibly.

use std::f64::consts::PI;

use bincode::{Decode, Encode};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Encode, Decode)]
pub enum Kernel {
    Gaussian,
    #[default]
    Cubic,
    Linear,
}

impl Kernel {
    /// The influence of a particle at distance `x`, in 1/m. `h` is the
    /// smoothing length; both inputs in meters.
    pub fn influence(&self, x: f64, h: f64) -> f64 {
        match self {
            // W(x, h) = (1 / (h √π)) e^(-x² / h²)
            Self::Gaussian => 1. / (h * PI.sqrt()) * (-(x * x) / (h * h)).exp(),
            // W(x, h) = (h² - x²)³ / (π h⁸ / 4), clamped to 0 past the support radius.
            Self::Cubic => {
                let volume = PI * h.powi(8) / 4.;
                let value = (h * h - x * x).max(0.);
                value * value * value / volume
            }
            // W(x, h) = (h - x)² / (π h⁴ / 6)
            Self::Linear => {
                if x >= h {
                    return 0.;
                }
                let volume = PI * h.powi(4) / 6.;
                (h - x) * (h - x) / volume
            }
        }
    }

    /// Slope of the influence function at distance `x`, in 1/m².
    pub fn influence_derivative(&self, x: f64, h: f64) -> f64 {
        match self {
            // dW(x, h) = (-2x / h²) W(x, h)
            Self::Gaussian => (-2. * x) / (h * h) * self.influence(x, h),
            Self::Cubic => {
                if x > h {
                    return 0.;
                }
                let f = h * h - x * x;
                let scale = -24. / (PI * h.powi(8));
                scale * x * f * f
            }
            // Note: positive slope; the force sum's direction handling absorbs
            // the sign.
            Self::Linear => {
                if x >= h {
                    return 0.;
                }
                let scale = 12. / (PI * h.powi(4));
                (h - x) * scale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KERNELS: [Kernel; 3] = [Kernel::Gaussian, Kernel::Cubic, Kernel::Linear];

    #[test]
    fn influence_is_nonnegative() {
        let h = 0.7;
        for kernel in KERNELS {
            for i in 0..200 {
                let x = i as f64 * 0.02;
                assert!(
                    kernel.influence(x, h) >= 0.,
                    "{kernel:?} negative at x = {x}"
                );
            }
        }
    }

    #[test]
    fn compact_support_vanishes_past_h() {
        let h = 1.3;
        for kernel in [Kernel::Cubic, Kernel::Linear] {
            assert_eq!(kernel.influence(h, h), 0.);
            assert_eq!(kernel.influence(h * 1.5, h), 0.);
            assert_eq!(kernel.influence_derivative(h * 1.5, h), 0.);

            // Continuity at the support radius: the limit from below is 0.
            let just_inside = kernel.influence(h - 1e-9, h);
            assert!(just_inside.abs() < 1e-6, "{kernel:?}: {just_inside}");
        }
    }

    #[test]
    fn gaussian_decreases_with_distance() {
        let h = 1.;
        let w0 = Kernel::Gaussian.influence(0., h);
        let w1 = Kernel::Gaussian.influence(0.5, h);
        let w2 = Kernel::Gaussian.influence(2., h);
        assert!(w0 > w1 && w1 > w2);
        assert!(w2 > 0.); // Non-compact: never exactly zero.
    }

    /// Central finite differences of `influence` should match
    /// `influence_derivative`. The linear kernel's slope is positive by
    /// convention, so only its magnitude is compared.
    #[test]
    fn derivative_matches_finite_difference() {
        let h = 0.9;
        let eps = 1e-6;

        for kernel in KERNELS {
            for frac in [0.2, 0.45, 0.7, 0.9] {
                let x = frac * h;
                let numeric =
                    (kernel.influence(x + eps, h) - kernel.influence(x - eps, h)) / (2. * eps);
                let analytic = kernel.influence_derivative(x, h);

                let (numeric, analytic) = match kernel {
                    Kernel::Linear => (numeric.abs(), analytic.abs()),
                    _ => (numeric, analytic),
                };

                let rel = (numeric - analytic).abs() / analytic.abs().max(1e-12);
                assert!(
                    rel < 1e-3,
                    "{kernel:?} at x = {x}: numeric {numeric}, analytic {analytic}"
                );
            }
        }
    }

    /// Midpoint-rule integral of W over the 2d plane, in polar coordinates.
    fn integrate_polar(kernel: Kernel, h: f64, r_max: f64) -> f64 {
        let n = 20_000;
        let dr = r_max / n as f64;
        let mut total = 0.;
        for i in 0..n {
            let r = (i as f64 + 0.5) * dr;
            total += kernel.influence(r, h) * std::f64::consts::TAU * r * dr;
        }
        total
    }

    #[test]
    fn compact_kernels_normalize_over_the_plane() {
        let h = 0.8;
        for kernel in [Kernel::Cubic, Kernel::Linear] {
            let integral = integrate_polar(kernel, h, h);
            assert!(
                (integral - 1.).abs() < 1e-3,
                "{kernel:?} integrates to {integral}"
            );
        }
    }

    /// The gaussian carries a 1d normalization constant; its line integral is 1.
    #[test]
    fn gaussian_normalizes_along_a_line() {
        let h = 0.8;
        let n = 20_000;
        let x_max = 8. * h;
        let dx = 2. * x_max / n as f64;
        let mut total = 0.;
        for i in 0..n {
            let x = -x_max + (i as f64 + 0.5) * dx;
            total += Kernel::Gaussian.influence(x.abs(), h) * dx;
        }
        assert!((total - 1.).abs() < 1e-3, "line integral {total}");
    }
}
