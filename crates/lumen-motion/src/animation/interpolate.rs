//! Interpolation for animatable values.
//!
//! The `Interpolate` trait is the core mechanism that creates smooth
//! transitions between two reveal states.

use super::types::StyleValues;

/// Types that can be interpolated between two values.
///
/// When t = 0.0 the result is `self`, when t = 1.0 it is `to`. Values
/// outside that range extrapolate, which overshooting easings rely on.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp_f64(from: f64, to: f64, t: f32) -> f64 {
    from + (to - from) * t as f64
}

#[inline]
fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f64(*self, *to, t)
    }
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f32(*self, *to, t)
    }
}

impl Interpolate for StyleValues {
    /// Per-property interpolation over the union of both property sets.
    ///
    /// A property present on one side only follows `interpolate_option`.
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        let mut out = StyleValues::new();
        let props = self.iter().map(|(p, _)| p).chain(to.iter().map(|(p, _)| p));
        for property in props {
            if out.get(property).is_some() {
                continue;
            }
            if let Some(value) = interpolate_option(&self.get(property), &to.get(property), t) {
                out.set(property, value);
            }
        }
        out
    }
}

/// Interpolate between two optional values.
///
/// - If both are Some, interpolate between them.
/// - If only `from` is Some, hold it until the end (t >= 1.0).
/// - If only `to` is Some, it appears as soon as t > 0.0.
/// - If both are None, returns None.
pub fn interpolate_option<T: Interpolate + Clone>(
    from: &Option<T>,
    to: &Option<T>,
    t: f32,
) -> Option<T> {
    match (from, to) {
        (Some(f), Some(t_val)) => Some(f.interpolate(t_val, t)),
        (Some(f), None) => {
            if t < 1.0 {
                Some(f.clone())
            } else {
                None
            }
        }
        (None, Some(t_val)) => {
            if t > 0.0 {
                Some(t_val.clone())
            } else {
                None
            }
        }
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::StyleProperty;

    const EPSILON: f64 = 0.0001;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_f64_interpolation() {
        let from = 0.0_f64;
        let to = 100.0_f64;
        assert!(approx_eq(from.interpolate(&to, 0.0), 0.0));
        assert!(approx_eq(from.interpolate(&to, 0.25), 25.0));
        assert!(approx_eq(from.interpolate(&to, 1.0), 100.0));
    }

    #[test]
    fn test_extrapolation() {
        let from = 0.0_f64;
        let to = 100.0_f64;
        assert!(approx_eq(from.interpolate(&to, 1.1), 110.0));
        assert!(approx_eq(from.interpolate(&to, -0.5), -50.0));
    }

    #[test]
    fn test_style_interpolation() {
        let from = StyleValues::new().opacity(0.0).y(50.0).blur(10.0);
        let to = StyleValues::new().opacity(1.0).y(0.0).blur(0.0);

        let mid = from.interpolate(&to, 0.5);
        assert!(approx_eq(mid.resolved(StyleProperty::Opacity), 0.5));
        assert!(approx_eq(mid.resolved(StyleProperty::TranslateY), 25.0));
        assert!(approx_eq(mid.resolved(StyleProperty::Blur), 5.0));
        assert_eq!(from.interpolate(&to, 1.0), to);
        assert_eq!(from.interpolate(&to, 0.0), from);
    }

    #[test]
    fn test_style_one_sided_properties() {
        let from = StyleValues::new().opacity(0.0).scale(0.9);
        let to = StyleValues::new().opacity(1.0).x(10.0);

        let start = from.interpolate(&to, 0.0);
        assert_eq!(start.get(StyleProperty::Scale), Some(0.9));
        assert_eq!(start.get(StyleProperty::TranslateX), None);

        let mid = from.interpolate(&to, 0.5);
        assert_eq!(mid.get(StyleProperty::Scale), Some(0.9));
        assert_eq!(mid.get(StyleProperty::TranslateX), Some(10.0));

        let end = from.interpolate(&to, 1.0);
        assert_eq!(end.get(StyleProperty::Scale), None);
    }

    #[test]
    fn test_interpolate_option() {
        assert_eq!(interpolate_option(&Some(0.0_f64), &Some(100.0), 0.5), Some(50.0));
        assert_eq!(interpolate_option(&Some(100.0_f64), &None, 0.5), Some(100.0));
        assert_eq!(interpolate_option(&Some(100.0_f64), &None, 1.0), None);
        assert_eq!(interpolate_option(&None, &Some(100.0_f64), 0.0), None);
        assert_eq!(interpolate_option::<f64>(&None, &None, 0.5), None);
    }
}
