//! Currency values that keep growing past `f64` range.
//!
//! A [`Num`] holds ordinary magnitudes as a plain `f64`, so prices and scores
//! stay exactly what the same arithmetic on doubles would give. Once a value
//! reaches `1e300` it switches to a mantissa in `[1, 10)` plus a decimal
//! exponent, and keeps growing without collapsing to infinity.
//!
//! Values are never negative: subtraction saturates at zero, and any negative
//! or NaN input becomes zero.

use std::cmp::Ordering;
use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Decimal order of magnitude at which a value leaves the plain-`f64` form.
const SCIENTIFIC_FROM: i64 = 300;

/// When operands differ by more digits than this, the smaller one vanishes.
const MAX_DIGIT_GAP: i64 = 17;

/// Unit suffixes for thousand through nonillion.
const SUFFIXES: [&str; 10] = ["K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No"];

#[derive(Clone, Copy, Debug)]
pub struct Num {
    /// The plain value when `exponent == 0`, otherwise in `[1, 10)`.
    mantissa: f64,
    /// Zero for plain values, otherwise `>= SCIENTIFIC_FROM`.
    exponent: i64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid number: {0:?}")]
pub struct ParseNumError(String);

impl Num {
    pub const ZERO: Num = Num {
        mantissa: 0.0,
        exponent: 0,
    };
    pub const ONE: Num = Num {
        mantissa: 1.0,
        exponent: 0,
    };

    /// Wrap a double. Negative and NaN inputs clamp to zero; `+inf` clamps
    /// to `f64::MAX`.
    pub fn from_f64(value: f64) -> Self {
        Self::from_parts(value, 0)
    }

    /// Build `mantissa × 10^exponent` in canonical form.
    pub fn from_parts(mantissa: f64, exponent: i64) -> Self {
        if mantissa.is_nan() || mantissa <= 0.0 {
            return Self::ZERO;
        }
        let mantissa = if mantissa.is_infinite() {
            f64::MAX
        } else {
            mantissa
        };
        if exponent == 0 && mantissa < 1e300 {
            return Self {
                mantissa,
                exponent: 0,
            };
        }

        let (m, e) = scientific(mantissa);
        let magnitude = exponent.saturating_add(e);
        if magnitude >= SCIENTIFIC_FROM {
            Self {
                mantissa: m,
                exponent: magnitude,
            }
        } else if magnitude < -400 {
            Self::ZERO
        } else {
            Self::from_parts(m * pow10(magnitude), 0)
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    /// `floor(log10(self))`; zero reports 0.
    pub fn magnitude(&self) -> i64 {
        self.sci().1
    }

    /// Lossy conversion; values beyond `f64::MAX` become infinity.
    pub fn to_f64(&self) -> f64 {
        if self.exponent == 0 {
            self.mantissa
        } else if self.exponent > 308 {
            f64::INFINITY
        } else {
            self.mantissa * pow10(self.exponent)
        }
    }

    pub fn log10(&self) -> f64 {
        if self.is_zero() {
            f64::NEG_INFINITY
        } else if self.exponent == 0 {
            self.mantissa.log10()
        } else {
            self.exponent as f64 + self.mantissa.log10()
        }
    }

    /// Subtract, clamping the result at zero.
    pub fn saturating_sub(self, other: Num) -> Num {
        if self <= other {
            return Self::ZERO;
        }
        if self.exponent == 0 && other.exponent == 0 {
            return Self::from_f64(self.mantissa - other.mantissa);
        }
        let (hm, he) = self.sci();
        let (lm, le) = other.sci();
        let gap = he - le;
        if gap > MAX_DIGIT_GAP {
            return self;
        }
        Self::from_parts(hm - lm / pow10(gap), he)
    }

    /// `self^power`. Falls back to logarithms once the result leaves `f64`.
    pub fn pow(self, power: f64) -> Num {
        if power == 0.0 {
            return Self::ONE;
        }
        if self.is_zero() {
            return Self::ZERO;
        }
        if self.exponent == 0 {
            let direct = self.mantissa.powf(power);
            if direct.is_finite() && direct < 1e300 {
                return Self::from_f64(direct);
            }
        }
        let log = self.log10() * power;
        let whole = log.floor();
        Self::from_parts(10f64.powf(log - whole), whole as i64)
    }

    /// Round down to an integer. Values in scientific form have no
    /// representable fraction and are returned unchanged.
    pub fn floor(self) -> Num {
        if self.exponent == 0 {
            Self {
                mantissa: self.mantissa.floor(),
                exponent: 0,
            }
        } else {
            self
        }
    }

    /// Mantissa in `[1, 10)` and decimal exponent, whatever the storage form.
    fn sci(&self) -> (f64, i64) {
        if self.is_zero() {
            (0.0, 0)
        } else if self.exponent == 0 {
            scientific(self.mantissa)
        } else {
            (self.mantissa, self.exponent)
        }
    }

    /// Precision-preserving text used by the save format.
    fn encode(&self) -> String {
        if self.exponent == 0 {
            format!("{:e}", self.mantissa)
        } else {
            format!("{}e{}", self.mantissa, self.exponent)
        }
    }
}

/// Split a positive finite double into a mantissa in `[1, 10)` and exponent.
fn scientific(value: f64) -> (f64, i64) {
    let mut e = value.log10().floor() as i64;
    let mut m = value / pow10(e);
    if m >= 10.0 {
        m /= 10.0;
        e += 1;
    } else if m < 1.0 {
        m *= 10.0;
        e -= 1;
    }
    (m, e)
}

fn pow10(e: i64) -> f64 {
    10f64.powf(e.clamp(-400, 400) as f64)
}

impl Default for Num {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Num {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<u64> for Num {
    fn from(value: u64) -> Self {
        Self::from_f64(value as f64)
    }
}

impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Num {}

impl PartialOrd for Num {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Num {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.exponent, other.exponent) {
            (0, 0) => self.mantissa.total_cmp(&other.mantissa),
            (0, _) => Ordering::Less,
            (_, 0) => Ordering::Greater,
            (a, b) => a
                .cmp(&b)
                .then_with(|| self.mantissa.total_cmp(&other.mantissa)),
        }
    }
}

impl Add for Num {
    type Output = Num;

    fn add(self, other: Num) -> Num {
        if self.exponent == 0 && other.exponent == 0 {
            return Num::from_f64(self.mantissa + other.mantissa);
        }
        let (hi, lo) = if self >= other {
            (self, other)
        } else {
            (other, self)
        };
        if lo.is_zero() {
            return hi;
        }
        let (hm, he) = hi.sci();
        let (lm, le) = lo.sci();
        let gap = he - le;
        if gap > MAX_DIGIT_GAP {
            return hi;
        }
        Num::from_parts(hm + lm / pow10(gap), he)
    }
}

/// Saturating: never goes below zero.
impl Sub for Num {
    type Output = Num;

    fn sub(self, other: Num) -> Num {
        self.saturating_sub(other)
    }
}

impl Mul for Num {
    type Output = Num;

    fn mul(self, other: Num) -> Num {
        if self.is_zero() || other.is_zero() {
            return Num::ZERO;
        }
        if self.exponent == 0 && other.exponent == 0 {
            let product = self.mantissa * other.mantissa;
            if product.is_finite() {
                return Num::from_f64(product);
            }
        }
        let (am, ae) = self.sci();
        let (bm, be) = other.sci();
        Num::from_parts(am * bm, ae.saturating_add(be))
    }
}

/// Division by zero yields zero.
impl Div for Num {
    type Output = Num;

    fn div(self, other: Num) -> Num {
        if self.is_zero() || other.is_zero() {
            return Num::ZERO;
        }
        if self.exponent == 0 && other.exponent == 0 {
            let quotient = self.mantissa / other.mantissa;
            if quotient.is_finite() {
                return Num::from_f64(quotient);
            }
        }
        let (am, ae) = self.sci();
        let (bm, be) = other.sci();
        Num::from_parts(am / bm, ae.saturating_sub(be))
    }
}

impl AddAssign for Num {
    fn add_assign(&mut self, other: Num) {
        *self = *self + other;
    }
}

impl SubAssign for Num {
    fn sub_assign(&mut self, other: Num) {
        *self = *self - other;
    }
}

impl Sum for Num {
    fn sum<I: Iterator<Item = Num>>(iter: I) -> Num {
        iter.fold(Num::ZERO, |acc, n| acc + n)
    }
}

impl Product for Num {
    fn product<I: Iterator<Item = Num>>(iter: I) -> Num {
        iter.fold(Num::ONE, |acc, n| acc * n)
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_number(*self))
    }
}

/// Human-readable rendering:
/// - below 1,000: two decimals (`"12.50"`)
/// - thousand through nonillion: scaled with a suffix (`"1.50K"`, `"3.20Qa"`)
/// - beyond: exponential with a two-digit mantissa (`"1.23e45"`)
///
/// The unit is picked after rounding, so `999_996` reads `"1.00M"`.
pub fn format_number(n: Num) -> String {
    let mut group = (n.magnitude().max(0) / 3) as usize;
    if group <= SUFFIXES.len() {
        let mut scaled = n.to_f64() / pow10(group as i64 * 3);
        if round_cents(scaled) >= 1_000.0 {
            group += 1;
            scaled /= 1_000.0;
        }
        if group == 0 {
            return format!("{:.2}", scaled);
        }
        if group <= SUFFIXES.len() {
            return format!("{:.2}{}", scaled, SUFFIXES[group - 1]);
        }
    }

    let (m, e) = n.sci();
    let mut m = (m * 100.0).round() / 100.0;
    let mut e = e;
    if m >= 10.0 {
        m /= 10.0;
        e += 1;
    }
    format!("{:.2}e{}", m, e)
}

fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl FromStr for Num {
    type Err = ParseNumError;

    /// Accepts anything `f64` parses, plus `"<mantissa>e<exponent>"` with an
    /// exponent beyond `f64` range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() && v < 1e300 {
                return Ok(Num::from_f64(v));
            }
        }
        let (m, e) = s
            .split_once(|c: char| c == 'e' || c == 'E')
            .ok_or_else(|| ParseNumError(s.to_string()))?;
        let mantissa: f64 = m.parse().map_err(|_| ParseNumError(s.to_string()))?;
        let exponent: i64 = e.parse().map_err(|_| ParseNumError(s.to_string()))?;
        if !mantissa.is_finite() {
            return Err(ParseNumError(s.to_string()));
        }
        Ok(Num::from_parts(mantissa, exponent))
    }
}

impl Serialize for Num {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Num {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumVisitor)
    }
}

struct NumVisitor;

impl<'de> Visitor<'de> for NumVisitor {
    type Value = Num;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Num, E> {
        Ok(Num::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Num, E> {
        Ok(Num::from_f64(v as f64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Num, E> {
        Ok(Num::from_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Num, E> {
        v.parse().map_err(E::custom)
    }
}
