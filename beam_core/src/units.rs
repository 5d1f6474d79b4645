//! # Unit Types
//!
//! Type-safe wrappers for the SI units used by the solver and its reports.
//! They are plain `f64` newtypes that serialize as bare numbers.
//!
//! The solver itself works in base SI units throughout:
//! - Length: metres (m)
//! - Force: newtons (N)
//! - Moment: newton-metres (N·m)
//! - Distributed load: newtons per metre (N/m)
//! - Modulus: pascals (Pa)
//!
//! Reports usually want kilo-units, hence the conversions below.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::units::{Kilonewtons, Newtons};
//!
//! let reaction = Newtons(249_932.0);
//! let kn: Kilonewtons = reaction.into();
//! assert!((kn.0 - 249.932).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment
// ============================================================================

/// Moment in newton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMeters(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMeters(pub f64);

impl From<NewtonMeters> for KilonewtonMeters {
    fn from(nm: NewtonMeters) -> Self {
        KilonewtonMeters(nm.0 / 1000.0)
    }
}

impl From<KilonewtonMeters> for NewtonMeters {
    fn from(knm: KilonewtonMeters) -> Self {
        NewtonMeters(knm.0 * 1000.0)
    }
}

// ============================================================================
// Distributed Load
// ============================================================================

/// Distributed load in newtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonsPerMeter(pub f64);

/// Distributed load in kilonewtons per metre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonsPerMeter(pub f64);

impl From<NewtonsPerMeter> for KilonewtonsPerMeter {
    fn from(npm: NewtonsPerMeter) -> Self {
        KilonewtonsPerMeter(npm.0 / 1000.0)
    }
}

impl From<KilonewtonsPerMeter> for NewtonsPerMeter {
    fn from(knpm: KilonewtonsPerMeter) -> Self {
        NewtonsPerMeter(knpm.0 * 1000.0)
    }
}

// ============================================================================
// Modulus
// ============================================================================

/// Modulus or stress in pascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pascals(pub f64);

/// Modulus or stress in gigapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gigapascals(pub f64);

impl From<Gigapascals> for Pascals {
    fn from(gpa: Gigapascals) -> Self {
        Pascals(gpa.0 * 1.0e9)
    }
}

impl From<Pascals> for Gigapascals {
    fn from(pa: Pascals) -> Self {
        Gigapascals(pa.0 / 1.0e9)
    }
}

// ============================================================================
// Arithmetic and display
// ============================================================================

macro_rules! impl_unit {
    ($type:ty, $symbol:expr) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Unit symbol used in reports
            pub const SYMBOL: &'static str = $symbol;

            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match f.precision() {
                    Some(p) => write!(f, "{:.*} {}", p, self.0, $symbol),
                    None => write!(f, "{} {}", self.0, $symbol),
                }
            }
        }
    };
}

impl_unit!(Meters, "m");
impl_unit!(Millimeters, "mm");
impl_unit!(Newtons, "N");
impl_unit!(Kilonewtons, "kN");
impl_unit!(NewtonMeters, "N·m");
impl_unit!(KilonewtonMeters, "kN·m");
impl_unit!(NewtonsPerMeter, "N/m");
impl_unit!(KilonewtonsPerMeter, "kN/m");
impl_unit!(Pascals, "Pa");
impl_unit!(Gigapascals, "GPa");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_conversion() {
        let kn = Kilonewtons(2.5);
        let n: Newtons = kn.into();
        assert_eq!(n.0, 2500.0);
    }

    #[test]
    fn test_modulus_conversion() {
        let pa: Pascals = Gigapascals(30.0).into();
        assert_eq!(pa.0, 30.0e9);
    }

    #[test]
    fn test_arithmetic() {
        let a = Meters(20.0);
        let b = Meters(25.0);
        assert_eq!((a + b).0, 45.0);
        assert_eq!((b - a).0, 5.0);
        assert_eq!((a * 2.0).0, 40.0);
        assert_eq!((a / 4.0).0, 5.0);
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.1}", Kilonewtons(2375.04)), "2375.0 kN");
        assert_eq!(format!("{}", Meters(20.0)), "20 m");
    }

    #[test]
    fn test_serialization() {
        let w = NewtonsPerMeter(35000.0);
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(json, "35000.0");
        let roundtrip: NewtonsPerMeter = serde_json::from_str(&json).unwrap();
        assert_eq!(w, roundtrip);
    }
}
