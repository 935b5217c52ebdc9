use crate::foundation::error::{ReelError, ReelResult};

/// Zero-based position in the rendered frame sequence (after stride is applied).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Keyframe(pub usize);

impl Keyframe {
    /// Index along the animation dimension that this keyframe selects.
    pub fn source_index(self, stride: usize) -> usize {
        self.0 * stride
    }
}

/// Playback rate as a rational number of frames per second.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build an [`Fps`], rejecting zero numerator or denominator and rates so slow that one
    /// frame's duration in milliseconds does not fit a `u32` ratio.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        let (ms, _) = reduce_u64(1000 * u64::from(den), u64::from(num));
        if ms > u64::from(u32::MAX) {
            return Err(ReelError::validation(format!(
                "fps {num}/{den} is too slow: frame duration exceeds {} ms",
                u32::MAX
            )));
        }
        Ok(Self { num, den })
    }

    /// Approximate a positive decimal rate with millihertz precision.
    pub fn from_f64(fps: f64) -> ReelResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ReelError::validation(format!(
                "fps must be a positive finite number, got {fps}"
            )));
        }
        if fps.fract() == 0.0 && fps <= f64::from(u32::MAX) {
            return Self::new(fps as u32, 1);
        }
        let milli = (fps * 1000.0).round();
        if milli < 1.0 || milli > f64::from(u32::MAX) {
            return Err(ReelError::validation(format!("fps {fps} is out of range")));
        }
        let (num, den) = reduce(milli as u32, 1000);
        Self::new(num, den)
    }

    /// Rate as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Display time of one frame in milliseconds (`1000 / fps`).
    pub fn frame_duration_ms(self) -> f64 {
        1000.0 * f64::from(self.den) / f64::from(self.num)
    }

    /// Frame duration as an exact `(numerator, denominator)` pair in milliseconds.
    ///
    /// Exact for every rate accepted by [`Fps::new`]. Struct literals outside that range have
    /// both terms scaled down together, saturating at `u32::MAX / 1`.
    pub fn frame_duration_ms_ratio(self) -> (u32, u32) {
        let (num, den) = reduce_u64(1000 * u64::from(self.den), u64::from(self.num));
        if num <= u64::from(u32::MAX) {
            return (num as u32, den as u32);
        }
        let scaled = (u128::from(den) * u128::from(u32::MAX) / u128::from(num)).max(1);
        (u32::MAX, scaled as u32)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 10, den: 1 }
    }
}

/// Number of decimal digits needed to print `n` (`0` and `1..=9` take one digit).
pub fn decimal_digits(n: usize) -> usize {
    let mut digits = 1;
    let mut rest = n / 10;
    while rest > 0 {
        digits += 1;
        rest /= 10;
    }
    digits
}

fn reduce(a: u32, b: u32) -> (u32, u32) {
    let (a, b) = reduce_u64(u64::from(a), u64::from(b));
    (a as u32, b as u32)
}

fn reduce_u64(a: u64, b: u64) -> (u64, u64) {
    let g = gcd(a, b).max(1);
    (a / g, b / g)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
