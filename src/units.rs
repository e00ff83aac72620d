//! # Unit-tagged angles and lengths
//!
//! Every quantity crossing the public conversion boundary carries its unit. Transforms
//! normalize to radians (angles) or meters (lengths) before doing any arithmetic and convert
//! back to the caller's unit afterwards, so raw `f64` values never have an ambiguous meaning.
//!
//! Scalars ([`Angle`], [`Length`]) and batches ([`AngleArray`], [`LengthArray`]) share one
//! unit per value: a batch stores N numbers and a single unit tag.
//!
//! ```rust
//! use iact_frames::units::{Angle, AngleUnit};
//!
//! let alt = Angle::degrees(70.0);
//! assert!((alt.to_radians() - 70f64.to_radians()).abs() < 1e-15);
//! assert_eq!(alt.to_unit(AngleUnit::Degree).value, 70.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{Meter, Radian, CM_TO_M, MM_TO_M};

/// Unit of an angular quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AngleUnit {
    Radian,
    Degree,
}

impl AngleUnit {
    /// Convert a raw value expressed in `self` to radians.
    #[inline]
    pub fn to_radians(self, value: f64) -> Radian {
        match self {
            AngleUnit::Radian => value,
            AngleUnit::Degree => value.to_radians(),
        }
    }

    /// Convert a raw value in radians to `self`.
    #[inline]
    pub fn from_radians(self, value: Radian) -> f64 {
        match self {
            AngleUnit::Radian => value,
            AngleUnit::Degree => value.to_degrees(),
        }
    }
}

impl std::fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AngleUnit::Radian => write!(f, "rad"),
            AngleUnit::Degree => write!(f, "deg"),
        }
    }
}

/// A single angle with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub value: f64,
    pub unit: AngleUnit,
}

impl Angle {
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Angle { value, unit }
    }

    pub fn radians(value: f64) -> Self {
        Angle::new(value, AngleUnit::Radian)
    }

    pub fn degrees(value: f64) -> Self {
        Angle::new(value, AngleUnit::Degree)
    }

    pub fn to_radians(&self) -> Radian {
        self.unit.to_radians(self.value)
    }

    /// Same angle expressed in `unit`. Converting to the current unit is exact.
    pub fn to_unit(&self, unit: AngleUnit) -> Angle {
        if unit == self.unit {
            return *self;
        }
        Angle::new(unit.from_radians(self.to_radians()), unit)
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A batch of angles sharing one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AngleArray {
    pub values: Vec<f64>,
    pub unit: AngleUnit,
}

impl AngleArray {
    pub fn new(values: Vec<f64>, unit: AngleUnit) -> Self {
        AngleArray { values, unit }
    }

    pub fn radians(values: Vec<f64>) -> Self {
        AngleArray::new(values, AngleUnit::Radian)
    }

    pub fn degrees(values: Vec<f64>) -> Self {
        AngleArray::new(values, AngleUnit::Degree)
    }

    /// Build from raw radians, expressing the result in `unit`.
    pub fn from_radians(values: Vec<Radian>, unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Radian => AngleArray::radians(values),
            _ => AngleArray::new(values.into_iter().map(|v| unit.from_radians(v)).collect(), unit),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Element `index` as a scalar [`Angle`].
    pub fn get(&self, index: usize) -> Option<Angle> {
        self.values.get(index).map(|v| Angle::new(*v, self.unit))
    }

    pub fn to_radians(&self) -> Vec<Radian> {
        match self.unit {
            AngleUnit::Radian => self.values.clone(),
            unit => self.values.iter().map(|v| unit.to_radians(*v)).collect(),
        }
    }

    pub fn to_unit(&self, unit: AngleUnit) -> AngleArray {
        if unit == self.unit {
            return self.clone();
        }
        AngleArray::from_radians(self.to_radians(), unit)
    }
}

impl From<Angle> for AngleArray {
    fn from(angle: Angle) -> Self {
        AngleArray::new(vec![angle.value], angle.unit)
    }
}

/// Unit of a physical length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meter,
    Centimeter,
    Millimeter,
}

impl LengthUnit {
    /// Multiplicative factor turning a value in this unit into meters.
    pub fn to_meter_factor(self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => CM_TO_M,
            LengthUnit::Millimeter => MM_TO_M,
        }
    }

    #[inline]
    pub fn to_meters(self, value: f64) -> Meter {
        match self {
            LengthUnit::Meter => value,
            unit => value * unit.to_meter_factor(),
        }
    }

    #[inline]
    pub fn from_meters(self, value: Meter) -> f64 {
        match self {
            LengthUnit::Meter => value,
            unit => value / unit.to_meter_factor(),
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LengthUnit::Meter => write!(f, "m"),
            LengthUnit::Centimeter => write!(f, "cm"),
            LengthUnit::Millimeter => write!(f, "mm"),
        }
    }
}

/// A single length with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Length { value, unit }
    }

    pub fn meters(value: f64) -> Self {
        Length::new(value, LengthUnit::Meter)
    }

    pub fn to_meters(&self) -> Meter {
        self.unit.to_meters(self.value)
    }

    pub fn to_unit(&self, unit: LengthUnit) -> Length {
        if unit == self.unit {
            return *self;
        }
        Length::new(unit.from_meters(self.to_meters()), unit)
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A batch of lengths sharing one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthArray {
    pub values: Vec<f64>,
    pub unit: LengthUnit,
}

impl LengthArray {
    pub fn new(values: Vec<f64>, unit: LengthUnit) -> Self {
        LengthArray { values, unit }
    }

    pub fn meters(values: Vec<f64>) -> Self {
        LengthArray::new(values, LengthUnit::Meter)
    }

    /// `len` zeros in `unit`.
    pub fn zeros(len: usize, unit: LengthUnit) -> Self {
        LengthArray::new(vec![0.0; len], unit)
    }

    pub fn from_meters(values: Vec<Meter>, unit: LengthUnit) -> Self {
        match unit {
            LengthUnit::Meter => LengthArray::meters(values),
            _ => LengthArray::new(values.into_iter().map(|v| unit.from_meters(v)).collect(), unit),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Length> {
        self.values.get(index).map(|v| Length::new(*v, self.unit))
    }

    pub fn to_meters(&self) -> Vec<Meter> {
        match self.unit {
            LengthUnit::Meter => self.values.clone(),
            unit => self.values.iter().map(|v| unit.to_meters(*v)).collect(),
        }
    }

    pub fn to_unit(&self, unit: LengthUnit) -> LengthArray {
        if unit == self.unit {
            return self.clone();
        }
        LengthArray::from_meters(self.to_meters(), unit)
    }
}

impl From<Length> for LengthArray {
    fn from(length: Length) -> Self {
        LengthArray::new(vec![length.value], length.unit)
    }
}

#[cfg(test)]
mod units_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_angle_conversion() {
        let a = Angle::degrees(180.0);
        assert_relative_eq!(a.to_radians(), std::f64::consts::PI, epsilon = 1e-15);

        let back = Angle::radians(std::f64::consts::FRAC_PI_2).to_unit(AngleUnit::Degree);
        assert_relative_eq!(back.value, 90.0, epsilon = 1e-12);
        assert_eq!(back.unit, AngleUnit::Degree);

        // same unit is returned untouched
        let same = Angle::degrees(12.345678901234567).to_unit(AngleUnit::Degree);
        assert_eq!(same.value, 12.345678901234567);
    }

    #[test]
    fn test_angle_array_conversion() {
        let arr = AngleArray::degrees(vec![0.0, 90.0, -45.0]);
        let rad = arr.to_radians();
        assert_eq!(rad.len(), 3);
        assert_relative_eq!(rad[1], std::f64::consts::FRAC_PI_2, epsilon = 1e-15);
        assert_relative_eq!(rad[2], -std::f64::consts::FRAC_PI_4, epsilon = 1e-15);

        assert_eq!(arr.get(2), Some(Angle::degrees(-45.0)));
        assert_eq!(arr.get(3), None);
    }

    #[test]
    fn test_length_conversion() {
        let f = Length::new(2800.0, LengthUnit::Centimeter);
        assert_relative_eq!(f.to_meters(), 28.0, epsilon = 1e-12);

        let mm = LengthArray::meters(vec![0.05, -0.1]).to_unit(LengthUnit::Millimeter);
        assert_relative_eq!(mm.values[0], 50.0, epsilon = 1e-12);
        assert_relative_eq!(mm.values[1], -100.0, epsilon = 1e-12);

        let zeros = LengthArray::zeros(4, LengthUnit::Meter);
        assert_eq!(zeros.values, vec![0.0; 4]);
    }
}
