//! Tools for treating fractions as musical lengths.

use std::collections::VecDeque;

use fraction::Fraction;

/// Fraction of zero length.
pub fn zero() -> Fraction {
    Fraction::new(0u64, 1u64)
}

/// Greatest common divisor. `gcd(0, n) == n`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple. Zero, if any of arguments is zero.
pub fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}

/// Greatest common divisor of all values, or zero for an empty input.
pub fn gcd_all(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(0, gcd)
}

/// Least common multiple of all values, or one for an empty input.
pub fn lcm_all(values: impl IntoIterator<Item = u64>) -> u64 {
    values.into_iter().fold(1, lcm)
}

/// The biggest `coefficient * 2^n` (`n >= 0`), that still fits in `target`.
///
/// # Returns
/// None if coefficient is zero or is already bigger than target.
///
/// # Example
/// ```
/// # use metrical::primitives::closest_power_of_two;
/// assert_eq!(closest_power_of_two(1, 6), Some(4));
/// assert_eq!(closest_power_of_two(3, 13), Some(12));
/// assert_eq!(closest_power_of_two(5, 5), Some(5));
/// assert_eq!(closest_power_of_two(5, 4), None);
/// ```
pub fn closest_power_of_two(coefficient: u64, target: u64) -> Option<u64> {
    if coefficient == 0 || coefficient > target {
        return None;
    }
    let mut result = coefficient;
    while result * 2 <= target {
        result *= 2;
    }
    Some(result)
}

/// Biggest power of two, that is not bigger than num.
fn previous_power_of_two(num: u64) -> u64 {
    match num {
        0 => 0,
        _ => 1 << (u64::BITS - 1 - num.leading_zeros()),
    }
}

/// Lossy conversion to float. NaN and infinite fractions become NaN.
///
/// # Example
/// ```
/// # use fraction::Fraction;
/// # use metrical::primitives::fraction_to_f64;
/// assert_eq!(fraction_to_f64(Fraction::new(3u64, 8u64)), 0.375);
/// assert_eq!(fraction_to_f64(-Fraction::new(1u64, 2u64)), -0.5);
/// ```
pub fn fraction_to_f64(frac: Fraction) -> f64 {
    match (frac.numer(), frac.denom()) {
        (Some(num), Some(den)) => {
            let value = *num as f64 / *den as f64;
            match frac.is_sign_negative() {
                true => -value,
                false => value,
            }
        }
        _ => f64::NAN,
    }
}

/// Integer part of non-negative fraction.
pub(crate) fn whole_part(frac: Fraction) -> u64 {
    match (frac.numer(), frac.denom()) {
        (Some(num), Some(den)) if !frac.is_sign_negative() => num / den,
        _ => 0,
    }
}

/// Split complex fraction by simple fractions, that could be interpreted as
/// musical lengths: plain (numerator 1) or dotted (numerator 3).
///
/// # Returns
///
/// Fractions, started with the smallest, up to the largest.
///
/// # Example
///
/// ```
/// # use fraction::Fraction;
/// # use metrical::primitives::normalize_fraction;
/// assert_eq!(
///     normalize_fraction(Fraction::new(13u64, 16u64)),
///         vec![
///             Fraction::new(1u64, 16u64),
///             Fraction::new(1u64, 4u64),
///             Fraction::new(1u64, 2u64)
///         ]
/// );
/// ```
pub fn normalize_fraction(frac: Fraction) -> VecDeque<Fraction> {
    let mut head = VecDeque::new();
    let (mut num, den) = match (frac.numer(), frac.denom()) {
        (Some(num), Some(den)) => (*num, *den),
        _ => return head,
    };
    if den == 1 {
        if num != 0 {
            head.push_back(frac);
        }
        return head;
    }
    while num != 0 {
        let part = Fraction::new(num, den);
        if *part.numer().unwrap_or(&0) <= 3 {
            head.push_front(part);
            break;
        }
        let whole = previous_power_of_two(num);
        head.push_front(Fraction::new(whole, den));
        num -= whole;
    }
    head
}

#[cfg(test)]
mod tests {
    use fraction::Fraction;

    use super::{
        closest_power_of_two, gcd, gcd_all, lcm, lcm_all, normalize_fraction,
        previous_power_of_two, whole_part,
    };

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(0, 6), 0);
        assert_eq!(gcd_all([4, 8, 12]), 4);
        assert_eq!(gcd_all([1, 2, 3]), 1);
        assert_eq!(gcd_all([]), 0);
        assert_eq!(lcm_all([4, 16, 8]), 16);
        assert_eq!(lcm_all([]), 1);
    }

    #[test]
    fn test_powers_of_two() {
        assert_eq!(previous_power_of_two(1), 1);
        assert_eq!(previous_power_of_two(7), 4);
        assert_eq!(previous_power_of_two(8), 8);
        assert_eq!(closest_power_of_two(2, 3), Some(2));
        assert_eq!(closest_power_of_two(1, 5), Some(4));
        assert_eq!(closest_power_of_two(0, 5), None);
    }

    #[test]
    fn test_whole_part() {
        assert_eq!(whole_part(Fraction::new(17u64, 4u64)), 4);
        assert_eq!(whole_part(Fraction::new(3u64, 4u64)), 0);
        assert_eq!(whole_part(-Fraction::new(5u64, 4u64)), 0);
    }

    #[test]
    fn test_normalize_fraction() {
        assert_eq!(
            normalize_fraction(Fraction::new(5u64, 8u64)),
            vec![Fraction::new(1u64, 8u64), Fraction::new(1u64, 2u64)]
        );
        assert_eq!(
            normalize_fraction(Fraction::new(7u64, 16u64)),
            vec![Fraction::new(3u64, 16u64), Fraction::new(1u64, 4u64)]
        );
        assert_eq!(
            normalize_fraction(Fraction::new(3u64, 8u64)),
            vec![Fraction::new(3u64, 8u64)]
        );
        assert!(normalize_fraction(Fraction::new(0u64, 8u64)).is_empty());
    }
}
