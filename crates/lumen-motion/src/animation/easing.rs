//! Easing functions for animation timing.
//!
//! This module implements the timing curves used by reveals and the smooth
//! scroll engine:
//! - Linear
//! - Ease, EaseIn, EaseOut, EaseInOut (standard CSS curves)
//! - CubicBezier (custom bezier curves)
//! - Steps (stepped animations)
//! - Power (the `power1`..`power4` family, in/out/in-out)
//! - BackOut (overshooting ease-out)
//! - ExpoOut (the smooth scroll default)
//!
//! # Usage
//!
//! ```
//! use lumen_motion::animation::easing::{EasingFunction, PowerMode};
//!
//! let ease = EasingFunction::power(3, PowerMode::Out);
//! let progress = ease.evaluate(0.5);
//! assert!(progress > 0.5);
//!
//! let parsed = EasingFunction::from_name("back.out(1.7)").unwrap();
//! assert_eq!(parsed, EasingFunction::BackOut { overshoot: 1.7 });
//! ```

use serde::{Deserialize, Serialize};

/// Position for stepped animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPosition {
    /// Jump at the start of each interval (CSS `jump-start` / `start`).
    Start,
    /// Jump at the end of each interval (CSS `jump-end` / `end`).
    End,
}

impl Default for StepPosition {
    fn default() -> Self {
        Self::End
    }
}

/// Which end of a power curve is slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerMode {
    In,
    Out,
    InOut,
}

/// Easing function for animation timing.
///
/// Easing functions map a linear progress value (0.0 to 1.0) to an eased
/// output value, controlling the rate of change over time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,

    /// CSS `ease`, equivalent to `cubic-bezier(0.25, 0.1, 0.25, 1.0)`.
    Ease,

    /// CSS `ease-in`, equivalent to `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,

    /// CSS `ease-out`, equivalent to `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,

    /// CSS `ease-in-out`, equivalent to `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,

    /// Custom cubic bezier curve with control points (x1, y1) and (x2, y2).
    /// x values must be in [0, 1], y values can be any float.
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },

    /// Stepped animation with discrete jumps.
    Steps { count: u32, position: StepPosition },

    /// Polynomial curve of degree `power + 1` (`power1` is quadratic,
    /// `power4` quintic).
    Power { power: u8, mode: PowerMode },

    /// Ease-out that overshoots the target before settling.
    BackOut { overshoot: f32 },

    /// Exponential ease-out, `min(1, 1.001 - 2^(-10t))`.
    ExpoOut,
}

impl Default for EasingFunction {
    fn default() -> Self {
        Self::Ease
    }
}

impl EasingFunction {
    /// Evaluate the easing function at the given progress.
    ///
    /// The input is clamped to [0, 1]. The output may leave that range for
    /// overshooting curves (`BackOut`, some bezier curves).
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(*x1, *y1, *x2, *y2, t),
            Self::Steps { count, position } => stepped(*count, *position, t),
            Self::Power { power, mode } => power_curve(*power, *mode, t),
            Self::BackOut { overshoot } => back_out(*overshoot, t),
            Self::ExpoOut => (1.001 - 2f32.powf(-10.0 * t)).min(1.0),
        }
    }

    /// Create a custom cubic bezier easing function.
    ///
    /// # Panics
    /// Panics if x1 or x2 are outside [0, 1].
    pub fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        assert!(
            (0.0..=1.0).contains(&x1) && (0.0..=1.0).contains(&x2),
            "Bezier x values must be in [0, 1]"
        );
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Create a stepped easing function.
    ///
    /// # Panics
    /// Panics if steps is 0.
    pub fn steps(steps: u32, position: StepPosition) -> Self {
        assert!(steps >= 1, "Steps must be at least 1");
        Self::Steps {
            count: steps,
            position,
        }
    }

    /// Create a power curve (`power1`..`power4`).
    ///
    /// # Panics
    /// Panics if power is outside 1..=4.
    pub fn power(power: u8, mode: PowerMode) -> Self {
        assert!((1..=4).contains(&power), "Power must be between 1 and 4");
        Self::Power { power, mode }
    }

    /// Parse an easing name.
    ///
    /// Accepts CSS keywords (`ease-out`, `cubic-bezier(...)`), power curve
    /// names (`power2.out`, `power3.inOut`, bare `power1` meaning `.out`),
    /// `back.out` with an optional overshoot (`back.out(1.7)`), and
    /// `expo_out` / `expo.out`. Returns `None` for anything else.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let lower = name.to_ascii_lowercase();

        match lower.as_str() {
            "linear" | "none" => return Some(Self::Linear),
            "ease" => return Some(Self::Ease),
            "ease-in" | "ease_in" => return Some(Self::EaseIn),
            "ease-out" | "ease_out" => return Some(Self::EaseOut),
            "ease-in-out" | "ease_in_out" => return Some(Self::EaseInOut),
            "expo_out" | "expo.out" | "expo-out" => return Some(Self::ExpoOut),
            "back.out" | "back_out" => return Some(Self::BackOut { overshoot: 1.70158 }),
            _ => {}
        }

        if let Some(args) = call_args(&lower, "back.out") {
            let overshoot = args.first()?.parse::<f32>().ok()?;
            return Some(Self::BackOut { overshoot });
        }

        if let Some(args) = call_args(&lower, "cubic-bezier") {
            if args.len() != 4 {
                return None;
            }
            let mut pts = [0.0f32; 4];
            for (slot, arg) in pts.iter_mut().zip(&args) {
                *slot = arg.parse().ok()?;
            }
            if !(0.0..=1.0).contains(&pts[0]) || !(0.0..=1.0).contains(&pts[2]) {
                return None;
            }
            return Some(Self::CubicBezier {
                x1: pts[0],
                y1: pts[1],
                x2: pts[2],
                y2: pts[3],
            });
        }

        let rest = lower.strip_prefix("power")?;
        let (digit, mode) = match rest.split_once(['.', '_']) {
            Some((digit, mode)) => (digit, mode),
            None => (rest, "out"),
        };
        let power = digit.parse::<u8>().ok().filter(|p| (1..=4).contains(p))?;
        let mode = match mode {
            "in" => PowerMode::In,
            "out" => PowerMode::Out,
            "inout" | "in_out" | "in-out" => PowerMode::InOut,
            _ => return None,
        };
        Some(Self::Power { power, mode })
    }
}

/// Split `name(a, b, ...)` into its arguments when `name` matches.
fn call_args<'a>(input: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let inner = input.strip_prefix(name)?.strip_prefix('(')?.strip_suffix(')')?;
    Some(inner.split(',').map(str::trim).collect())
}

/// Evaluate a cubic bezier curve at time t.
///
/// Uses Newton-Raphson iteration to find the curve parameter for the input
/// progress, then evaluates the y coordinate at that point.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, progress: f32) -> f32 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_y(y1, y2, t)
}

fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = bezier_x(x1, x2, t) - target_x;
        if x.abs() < 1e-6 {
            break;
        }

        let dx = bezier_x_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }

        t -= x / dx;
        t = t.clamp(0.0, 1.0);
    }

    t
}

/// x(t) = 3(1-t)²t·x1 + 3(1-t)t²·x2 + t³
#[inline]
fn bezier_x(x1: f32, x2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let mt = 1.0 - t;
    3.0 * mt * mt * t * x1 + 3.0 * mt * t2 * x2 + t2 * t
}

#[inline]
fn bezier_y(y1: f32, y2: f32, t: f32) -> f32 {
    let t2 = t * t;
    let mt = 1.0 - t;
    3.0 * mt * mt * t * y1 + 3.0 * mt * t2 * y2 + t2 * t
}

/// dx/dt = 3(1-t)²·x1 + 6(1-t)t·(x2-x1) + 3t²·(1-x2)
#[inline]
fn bezier_x_derivative(x1: f32, x2: f32, t: f32) -> f32 {
    let mt = 1.0 - t;
    3.0 * mt * mt * x1 + 6.0 * mt * t * (x2 - x1) + 3.0 * t * t * (1.0 - x2)
}

fn stepped(steps: u32, position: StepPosition, t: f32) -> f32 {
    if steps == 0 {
        return t;
    }

    let steps_f = steps as f32;
    match position {
        StepPosition::Start => (t * steps_f).ceil() / steps_f,
        StepPosition::End => (t * steps_f).floor() / steps_f,
    }
}

fn power_curve(power: u8, mode: PowerMode, t: f32) -> f32 {
    let exp = power as i32 + 1;
    match mode {
        PowerMode::In => t.powi(exp),
        PowerMode::Out => 1.0 - (1.0 - t).powi(exp),
        PowerMode::InOut => {
            if t < 0.5 {
                2f32.powi(exp - 1) * t.powi(exp)
            } else {
                1.0 - (-2.0 * t + 2.0).powi(exp) / 2.0
            }
        }
    }
}

fn back_out(overshoot: f32, t: f32) -> f32 {
    let c3 = overshoot + 1.0;
    let u = t - 1.0;
    1.0 + c3 * u * u * u + overshoot * u * u
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_linear() {
        let ease = EasingFunction::Linear;
        for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert!(approx_eq(ease.evaluate(t), t));
        }
    }

    #[test]
    fn test_ease_is_monotonic() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(0.0), 0.0));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));

        let early = ease.evaluate(0.25);
        let mid = ease.evaluate(0.5);
        let late = ease.evaluate(0.75);
        assert!(early < mid && mid < late);
        assert!(mid > 0.7 && mid < 0.9, "CSS ease mid-point should be ~0.8, got {}", mid);
    }

    #[test]
    fn test_ease_in_out_symmetry() {
        let ease = EasingFunction::EaseInOut;
        assert!(approx_eq(ease.evaluate(0.5), 0.5));
        assert!(approx_eq(ease.evaluate(0.25) + ease.evaluate(0.75), 1.0));
    }

    #[test]
    fn test_power_out_curves() {
        // power2.out is cubic: 1 - (1-t)^3
        let p2 = EasingFunction::power(2, PowerMode::Out);
        assert!(approx_eq(p2.evaluate(0.5), 0.875));
        // power3.out is quartic
        let p3 = EasingFunction::power(3, PowerMode::Out);
        assert!(approx_eq(p3.evaluate(0.5), 0.9375));
        assert!(approx_eq(p3.evaluate(1.0), 1.0));
        assert!(approx_eq(p3.evaluate(0.0), 0.0));
    }

    #[test]
    fn test_power_in_and_in_out() {
        let p1_in = EasingFunction::power(1, PowerMode::In);
        assert!(approx_eq(p1_in.evaluate(0.5), 0.25));

        let p3_io = EasingFunction::power(3, PowerMode::InOut);
        assert!(approx_eq(p3_io.evaluate(0.5), 0.5));
        assert!(approx_eq(p3_io.evaluate(0.25) + p3_io.evaluate(0.75), 1.0));
        assert!(approx_eq(p3_io.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_back_out_overshoots() {
        let back = EasingFunction::BackOut { overshoot: 1.7 };
        assert!(approx_eq(back.evaluate(0.0), 0.0));
        assert!(approx_eq(back.evaluate(1.0), 1.0));
        let peak = (1..100)
            .map(|i| back.evaluate(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.0, "back.out should overshoot, peak {}", peak);
    }

    #[test]
    fn test_expo_out_reaches_one() {
        let expo = EasingFunction::ExpoOut;
        assert!(expo.evaluate(0.0) < 0.01);
        assert!(expo.evaluate(0.5) > 0.95);
        assert_eq!(expo.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_steps_end() {
        let ease = EasingFunction::steps(4, StepPosition::End);
        assert!(approx_eq(ease.evaluate(0.24), 0.0));
        assert!(approx_eq(ease.evaluate(0.25), 0.25));
        assert!(approx_eq(ease.evaluate(0.99), 0.75));
        assert!(approx_eq(ease.evaluate(1.0), 1.0));
    }

    #[test]
    fn test_clamping() {
        let ease = EasingFunction::Ease;
        assert!(approx_eq(ease.evaluate(-0.5), 0.0));
        assert!(approx_eq(ease.evaluate(1.5), 1.0));
    }

    #[test]
    fn test_from_name() {
        assert_eq!(EasingFunction::from_name("linear"), Some(EasingFunction::Linear));
        assert_eq!(EasingFunction::from_name("ease-in-out"), Some(EasingFunction::EaseInOut));
        assert_eq!(EasingFunction::from_name("expo_out"), Some(EasingFunction::ExpoOut));
        assert_eq!(
            EasingFunction::from_name("power3.out"),
            Some(EasingFunction::Power { power: 3, mode: PowerMode::Out })
        );
        assert_eq!(
            EasingFunction::from_name("power1.inOut"),
            Some(EasingFunction::Power { power: 1, mode: PowerMode::InOut })
        );
        assert_eq!(
            EasingFunction::from_name("power2"),
            Some(EasingFunction::Power { power: 2, mode: PowerMode::Out })
        );
        assert_eq!(
            EasingFunction::from_name("back.out(1.7)"),
            Some(EasingFunction::BackOut { overshoot: 1.7 })
        );
        assert_eq!(
            EasingFunction::from_name("cubic-bezier(0.4, 0, 0.2, 1)"),
            Some(EasingFunction::CubicBezier { x1: 0.4, y1: 0.0, x2: 0.2, y2: 1.0 })
        );
    }

    #[test]
    fn test_from_name_rejects_garbage() {
        assert_eq!(EasingFunction::from_name("bounce"), None);
        assert_eq!(EasingFunction::from_name("power9.out"), None);
        assert_eq!(EasingFunction::from_name("power2.sideways"), None);
        assert_eq!(EasingFunction::from_name("cubic-bezier(2, 0, 0.2, 1)"), None);
        assert_eq!(EasingFunction::from_name("back.out(abc)"), None);
    }

    #[test]
    fn test_default() {
        assert_eq!(EasingFunction::default(), EasingFunction::Ease);
        assert_eq!(StepPosition::default(), StepPosition::End);
    }

    #[test]
    #[should_panic(expected = "Bezier x values must be in [0, 1]")]
    fn test_invalid_bezier_x1() {
        EasingFunction::cubic_bezier(-0.1, 0.0, 0.5, 1.0);
    }

    #[test]
    #[should_panic(expected = "Steps must be at least 1")]
    fn test_invalid_steps() {
        EasingFunction::steps(0, StepPosition::End);
    }

    #[test]
    #[should_panic(expected = "Power must be between 1 and 4")]
    fn test_invalid_power() {
        EasingFunction::power(0, PowerMode::Out);
    }
}
