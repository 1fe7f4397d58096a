//! Curves, that shape a tempo change.
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`: the proportion of the elapsed
//! duration into the proportion of the tempo change.

use std::f64::consts::PI;

use derivative::Derivative;

use super::{EasingError, EasingResult};

#[derive(Debug, Clone, Copy, PartialEq, Derivative)]
#[derivative(Default)]
pub enum Easing {
    #[derivative(Default)]
    Linear,
    /// `x^e`, exponent should be positive.
    PowerIn { exponent: f64 },
    /// Accelerating half of `x^e`, mirrored into decelerating second half.
    /// Exponent should be at least 1.
    PowerInOut { exponent: f64 },
    /// `(b^x - 1) / (b - 1)`, base should be positive and not 1.
    ExponentialIn { base: f64 },
    /// `(1 - cos(πx)) / 2`
    SineInOut,
    /// Interior control points of cubic Bézier curve from (0, 0) to (1, 1).
    ///
    /// Can be stored, but not evaluated yet.
    Custom { control_points: [(f64, f64); 2] },
}
impl Easing {
    /// Check parameters of the curve.
    pub fn validate(&self) -> EasingResult<()> {
        match *self {
            Self::PowerIn { exponent } if !(exponent > 0.0) => {
                Err(EasingError::InvalidParameter {
                    easing: "power in",
                    value: exponent,
                    expected: "exponent > 0",
                })
            }
            Self::PowerInOut { exponent } if !(exponent >= 1.0) => {
                Err(EasingError::InvalidParameter {
                    easing: "power in-out",
                    value: exponent,
                    expected: "exponent >= 1",
                })
            }
            Self::ExponentialIn { base } if !(base > 0.0) || base == 1.0 => {
                Err(EasingError::InvalidParameter {
                    easing: "exponential in",
                    value: base,
                    expected: "base > 0 and base != 1",
                })
            }
            _ => Ok(()),
        }
    }

    /// Value of the curve at x.
    ///
    /// # Example
    /// ```
    /// # use metrical::tempo::{Easing, EasingError};
    /// let easing = Easing::PowerIn { exponent: 2.0 };
    /// assert_eq!(easing.evaluate(0.5), Ok(0.25));
    /// assert_eq!(
    ///     easing.evaluate(1.5),
    ///     Err(EasingError::InputOutOfRange(1.5))
    /// );
    /// ```
    ///
    /// # Panics
    /// For [`Easing::Custom`], which is not supported yet.
    pub fn evaluate(&self, x: f64) -> EasingResult<f64> {
        self.validate()?;
        let x = check_input(x)?;
        Ok(match *self {
            Self::Linear => x,
            Self::PowerIn { exponent } => x.powf(exponent),
            Self::PowerInOut { exponent } => {
                let scale = 2f64.powf(exponent - 1.0);
                match x < 0.5 {
                    true => scale * x.powf(exponent),
                    false => 1.0 - scale * (1.0 - x).powf(exponent),
                }
            }
            Self::ExponentialIn { base } => (base.powf(x) - 1.0) / (base - 1.0),
            Self::SineInOut => (1.0 - (PI * x).cos()) / 2.0,
            Self::Custom { .. } => {
                unimplemented!(
                    "evaluation of custom Bézier easing is not supported"
                )
            }
        })
    }

    /// Area under the curve from 0 to x.
    ///
    /// # Panics
    /// For [`Easing::Custom`], which is not supported yet.
    pub fn integrate(&self, x: f64) -> EasingResult<f64> {
        self.validate()?;
        let x = check_input(x)?;
        Ok(match *self {
            Self::Linear => x * x / 2.0,
            Self::PowerIn { exponent } => {
                x.powf(exponent + 1.0) / (exponent + 1.0)
            }
            Self::PowerInOut { exponent } => {
                let scale = 2f64.powf(exponent - 1.0) / (exponent + 1.0);
                match x <= 0.5 {
                    true => scale * x.powf(exponent + 1.0),
                    false => {
                        let half = scale * 0.5f64.powf(exponent + 1.0);
                        half + (x - 0.5)
                            + scale
                                * ((1.0 - x).powf(exponent + 1.0)
                                    - 0.5f64.powf(exponent + 1.0))
                    }
                }
            }
            Self::ExponentialIn { base } => {
                ((base.powf(x) - 1.0) / base.ln() - x) / (base - 1.0)
            }
            Self::SineInOut => x / 2.0 - (PI * x).sin() / (2.0 * PI),
            Self::Custom { .. } => {
                unimplemented!(
                    "integration of custom Bézier easing is not supported"
                )
            }
        })
    }
}

fn check_input(x: f64) -> EasingResult<f64> {
    match (0.0..=1.0).contains(&x) {
        true => Ok(x),
        false => Err(EasingError::InputOutOfRange(x)),
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;
    use crate::tempo::EasingError;

    const EPSILON: f64 = 1e-9;

    fn supported() -> Vec<Easing> {
        vec![
            Easing::Linear,
            Easing::PowerIn { exponent: 0.5 },
            Easing::PowerIn { exponent: 3.0 },
            Easing::PowerInOut { exponent: 1.0 },
            Easing::PowerInOut { exponent: 2.5 },
            Easing::ExponentialIn { base: 0.25 },
            Easing::ExponentialIn { base: 10.0 },
            Easing::SineInOut,
        ]
    }

    /// Midpoint rule, good enough for smooth curves.
    fn numeric_integral(easing: &Easing, x: f64) -> f64 {
        let steps = 20_000;
        let step = x / steps as f64;
        (0..steps)
            .map(|idx| {
                easing.evaluate((idx as f64 + 0.5) * step).unwrap() * step
            })
            .sum()
    }

    #[test]
    fn test_bounds() {
        for easing in supported() {
            let (start, end) =
                (easing.evaluate(0.0).unwrap(), easing.evaluate(1.0).unwrap());
            assert!(start.abs() < EPSILON, "{:?}", easing);
            assert!((end - 1.0).abs() < EPSILON, "{:?}", easing);
            assert_eq!(
                easing.evaluate(-0.1),
                Err(EasingError::InputOutOfRange(-0.1))
            );
            assert_eq!(
                easing.integrate(1.1),
                Err(EasingError::InputOutOfRange(1.1))
            );
            assert!(easing.integrate(0.0).unwrap().abs() < EPSILON);
        }
    }

    #[test]
    fn test_integrals() {
        for easing in supported() {
            for x in [0.25, 0.5, 0.8, 1.0] {
                let expected = numeric_integral(&easing, x);
                let found = easing.integrate(x).unwrap();
                assert!(
                    (expected - found).abs() < 1e-6,
                    "{:?} at {}: expected {}, found {}",
                    easing,
                    x,
                    expected,
                    found
                );
            }
        }
    }

    #[test]
    fn test_power_in_out_is_symmetric() {
        let easing = Easing::PowerInOut { exponent: 3.0 };
        assert!((easing.evaluate(0.5).unwrap() - 0.5).abs() < EPSILON);
        let (a, b) =
            (easing.evaluate(0.2).unwrap(), easing.evaluate(0.8).unwrap());
        assert!((a + b - 1.0).abs() < EPSILON);
        assert!((easing.integrate(1.0).unwrap() - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_invalid_parameters() {
        for easing in [
            Easing::PowerIn { exponent: 0.0 },
            Easing::PowerInOut { exponent: 0.5 },
            Easing::ExponentialIn { base: 1.0 },
            Easing::ExponentialIn { base: -2.0 },
        ] {
            assert!(matches!(
                easing.evaluate(0.5),
                Err(EasingError::InvalidParameter { .. })
            ));
            assert!(easing.validate().is_err());
        }
        let error = Easing::PowerIn { exponent: -1.0 }
            .integrate(0.5)
            .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid parameter of power in easing: -1, expected exponent > 0"
        );
    }

    #[test]
    #[should_panic]
    fn test_custom_is_not_supported() {
        let easing = Easing::Custom {
            control_points: [(0.25, 0.1), (0.25, 1.0)],
        };
        assert!(easing.validate().is_ok());
        let _ = easing.evaluate(0.5);
    }
}
