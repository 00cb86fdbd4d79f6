//! Numeric helpers over `f64` sequences

use rand::Rng;

/// Additive fold; `0.0` for an empty slice
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean; `0.0` for an empty slice rather than NaN
pub fn avg(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Largest value, `None` when empty. Any NaN makes the result NaN.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(|a, b| {
        if a.is_nan() || b.is_nan() {
            f64::NAN
        } else {
            a.max(b)
        }
    })
}

/// Smallest value, `None` when empty. Any NaN makes the result NaN.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(|a, b| {
        if a.is_nan() || b.is_nan() {
            f64::NAN
        } else {
            a.min(b)
        }
    })
}

/// Uniform float in `[min, max)`
pub fn rand(min: f64, max: f64) -> f64 {
    rand::thread_rng().gen::<f64>() * (max - min) + min
}

/// Uniform float in `[0, 1)`
pub fn rand_unit() -> f64 {
    rand(0.0, 1.0)
}

/// Uniform integer in `[min, max]`; reversed bounds are swapped
pub fn randint(min: i64, max: i64) -> i64 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    rand::thread_rng().gen_range(lo..=hi)
}

/// Round to `decimals` places, halves rounding towards positive infinity
/// (`round(-2.5, 0) == -2.0`, `round(2.5, 0) == 3.0`).
pub fn round(num: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = num * factor;
    let floor = scaled.floor();
    // `scaled - floor` is exact; `scaled + 0.5` is not near 2^52
    let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded / factor
}

/// Constrain `value` to `[min, max]`; when `min > max`, `max` wins.
/// A NaN in any argument gives NaN.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() || min.is_nan() || max.is_nan() {
        return f64::NAN;
    }
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_and_avg() {
        assert_eq!(sum(&[]), 0.0);
        assert_eq!(avg(&[]), 0.0);
        assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
        assert_eq!(avg(&[2.0, 4.0, 6.0]), 4.0);

        let values = [1.5, -3.0, 10.0, 0.25];
        assert!((sum(&values) - avg(&values) * values.len() as f64).abs() < 1e-12);
    }

    #[test]
    fn test_max_min() {
        assert_eq!(max(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[3.0, -1.0, 7.5]), Some(7.5));
        assert_eq!(min(&[3.0, -1.0, 7.5]), Some(-1.0));
        assert!(max(&[1.0, f64::NAN]).unwrap().is_nan());
    }

    #[test]
    fn test_random_ranges() {
        for _ in 0..1000 {
            let f = rand(2.0, 5.0);
            assert!((2.0..5.0).contains(&f));
            assert!((0.0..1.0).contains(&rand_unit()));

            let i = randint(1, 6);
            assert!((1..=6).contains(&i));
            assert!((1..=6).contains(&randint(6, 1)));
        }
        assert_eq!(randint(4, 4), 4);
    }

    #[test]
    fn test_round() {
        assert_eq!(round(1.005, 0), 1.0);
        assert_eq!(round(3.14159, 2), 3.14);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(-2.5, 0), -2.0);
        assert_eq!(round(-0.4, 0), 0.0);
    }

    #[test]
    fn test_round_at_float_limits() {
        assert_eq!(round(4503599627370497.0, 0), 4503599627370497.0);
        assert_eq!(round(0.49999999999999994, 0), 0.0);
        assert_eq!(round(9007199254740991.0, 0), 9007199254740991.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(5.0, 10.0, 0.0), 0.0);
    }

    #[test]
    fn test_clamp_propagates_nan() {
        assert!(clamp(f64::NAN, 0.0, 10.0).is_nan());
        assert!(clamp(5.0, f64::NAN, 10.0).is_nan());
        assert!(clamp(5.0, 0.0, f64::NAN).is_nan());
    }
}
