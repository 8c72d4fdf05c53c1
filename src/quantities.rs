//! Unit-tagged physical quantities
//!
//! A `Quantity<U>` wraps an `f64` together with a zero-sized unit marker.
//! Arithmetic is closed on a single unit; every cross-unit conversion is an
//! explicit, named method so that dimensional mistakes fail to compile.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Marker trait implemented by every unit tag.
pub trait Unit: Copy + Clone + PartialEq + fmt::Debug + 'static {
    /// Short unit name used by `Display`.
    const NAME: &'static str;
}

macro_rules! units {
    ($($(#[$meta:meta])* $id:ident => $name:literal),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $id;

            impl Unit for $id {
                const NAME: &'static str = $name;
            }
        )*
    };
}

units! {
    /// Dimensionless scalar
    Unitless => "",
    Gram => "g",
    Liter => "L",
    Mole => "mol",
    Second => "s",
    CubicMeter => "m3",
    Celsius => "C",
    Kelvin => "K",
    Fahrenheit => "F",
    Torr => "torr",
    Pascal => "Pa",
    Joule => "J",
    Watt => "W",
    MolePerSecond => "mol/s",
    GramPerMole => "g/mol",
    GramPerMilliliter => "g/mL",
    JoulePerMole => "J/mol",
    JoulePerMoleCelsius => "J/(mol*C)",
    JoulePerCelsius => "J/C",
    MoleRatio => "mol/mol",
    Degree => "deg",
    Radian => "rad",
}

/// An amount of a certain unit.
pub struct Quantity<U: Unit> {
    value: f64,
    unit: PhantomData<U>,
}

impl<U: Unit> Clone for Quantity<U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<U: Unit> Copy for Quantity<U> {}

impl<U: Unit> fmt::Debug for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, U::NAME)
    }
}

impl<U: Unit> fmt::Display for Quantity<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if U::NAME.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, U::NAME)
        }
    }
}

impl<U: Unit> Quantity<U> {
    pub const ZERO: Self = Self::new(0.0);

    /// Sentinel for a value that could not be determined. Compares unequal
    /// to every value including itself; test only with [`Self::is_unknown`].
    pub const UNKNOWN: Self = Self::new(f64::NAN);

    /// Sentinel for an unbounded amount, preserved across arithmetic.
    pub const INFINITY: Self = Self::new(f64::INFINITY);

    pub const fn new(value: f64) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// The raw value in the standard scale of the unit.
    pub const fn value(self) -> f64 {
        self.value
    }

    pub fn as_kilo(self) -> f64 {
        self.value / 1000.0
    }

    pub fn as_milli(self) -> f64 {
        self.value * 1000.0
    }

    pub fn is_unknown(self) -> bool {
        self.value.is_nan()
    }

    pub fn is_infinity(self) -> bool {
        self.value.is_infinite() && self.value > 0.0
    }

    /// Bounded relative comparison: `|a - b| <= eps * max(1, |a|, |b|)`.
    pub fn equals(self, other: Self, epsilon: f64) -> bool {
        (self.value - other.value).abs()
            <= epsilon * self.value.abs().max(other.value.abs()).max(1.0)
    }

    /// Whether `self + other` would overflow the storage: both operands
    /// finite but the sum no longer is.
    pub fn overflows_on_add(self, other: Self) -> bool {
        self.value.is_finite()
            && other.value.is_finite()
            && !(self.value + other.value).is_finite()
    }

    pub fn min(self, other: Self) -> Self {
        Self::new(self.value.min(other.value))
    }

    pub fn max(self, other: Self) -> Self {
        Self::new(self.value.max(other.value))
    }

    pub fn abs(self) -> Self {
        Self::new(self.value.abs())
    }
}

impl<U: Unit> Default for Quantity<U> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<U: Unit> From<f64> for Quantity<U> {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl<U: Unit> Add for Quantity<U> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.value + other.value)
    }
}

impl<U: Unit> Sub for Quantity<U> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.value - other.value)
    }
}

impl<U: Unit> Neg for Quantity<U> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<U: Unit> AddAssign for Quantity<U> {
    fn add_assign(&mut self, other: Self) {
        self.value += other.value;
    }
}

impl<U: Unit> SubAssign for Quantity<U> {
    fn sub_assign(&mut self, other: Self) {
        self.value -= other.value;
    }
}

impl<U: Unit> Mul<f64> for Quantity<U> {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.value * scalar)
    }
}

impl<U: Unit> Div<f64> for Quantity<U> {
    type Output = Self;

    fn div(self, divisor: f64) -> Self {
        Self::new(self.value / divisor)
    }
}

impl<U: Unit> PartialEq for Quantity<U> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(*other, f64::EPSILON)
    }
}

impl<U: Unit> PartialOrd for Quantity<U> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

// ----- The explicit cross-unit conversion kernel -----

impl Quantity<Mole> {
    /// mol * g/mol -> g
    pub fn to_mass(self, molar_mass: Quantity<GramPerMole>) -> Quantity<Gram> {
        Quantity::new(self.value * molar_mass.value)
    }

    /// mol / mol -> mole ratio
    pub fn to_ratio_of(self, total: Quantity<Mole>) -> Quantity<MoleRatio> {
        Quantity::new(self.value / total.value)
    }
}

impl Quantity<Gram> {
    /// g / (g/mol) -> mol
    pub fn to_moles(self, molar_mass: Quantity<GramPerMole>) -> Quantity<Mole> {
        Quantity::new(self.value / molar_mass.value)
    }

    /// g / (g/mL) -> L, via millilitre
    pub fn to_volume(self, density: Quantity<GramPerMilliliter>) -> Quantity<Liter> {
        Quantity::new(self.value / density.value / 1000.0)
    }
}

impl Quantity<Liter> {
    /// L * (g/mL) -> g, via millilitre
    pub fn to_mass(self, density: Quantity<GramPerMilliliter>) -> Quantity<Gram> {
        Quantity::new(self.value * 1000.0 * density.value)
    }

    /// 1 m3 = 1000 L
    pub fn to_cubic_meters(self) -> Quantity<CubicMeter> {
        Quantity::new(self.value / 1000.0)
    }
}

impl Quantity<CubicMeter> {
    pub fn to_liters(self) -> Quantity<Liter> {
        Quantity::new(self.value * 1000.0)
    }
}

impl Quantity<JoulePerMole> {
    /// (J/mol) * mol -> J
    pub fn to_energy(self, moles: Quantity<Mole>) -> Quantity<Joule> {
        Quantity::new(self.value * moles.value)
    }

    /// (J/mol) / C -> J/(mol*C)
    pub fn to_molar_heat_capacity(
        self,
        temperature: Quantity<Celsius>,
    ) -> Quantity<JoulePerMoleCelsius> {
        Quantity::new(self.value / temperature.value)
    }
}

impl Quantity<Joule> {
    /// J / (J/mol) -> mol
    pub fn to_moles(self, molar_heat: Quantity<JoulePerMole>) -> Quantity<Mole> {
        Quantity::new(self.value / molar_heat.value)
    }

    /// J / (J/C) -> C
    pub fn to_temperature_change(self, heat_capacity: Quantity<JoulePerCelsius>) -> Quantity<Celsius> {
        Quantity::new(self.value / heat_capacity.value)
    }

    /// J / ((J/(mol*C)) * mol) -> C
    pub fn to_molar_temperature_change(
        self,
        heat_capacity: Quantity<JoulePerMoleCelsius>,
        moles: Quantity<Mole>,
    ) -> Quantity<Celsius> {
        Quantity::new(self.value / (heat_capacity.value * moles.value))
    }
}

impl Quantity<JoulePerMoleCelsius> {
    /// (J/(mol*C)) * C -> J/mol
    pub fn to_molar_energy(self, temperature: Quantity<Celsius>) -> Quantity<JoulePerMole> {
        Quantity::new(self.value * temperature.value)
    }

    /// (J/(mol*C)) * mol -> J/C
    pub fn to_total(self, moles: Quantity<Mole>) -> Quantity<JoulePerCelsius> {
        Quantity::new(self.value * moles.value)
    }
}

impl Quantity<JoulePerCelsius> {
    /// (J/C) * C -> J
    pub fn to_energy(self, temperature_delta: Quantity<Celsius>) -> Quantity<Joule> {
        Quantity::new(self.value * temperature_delta.value)
    }
}

impl Quantity<MolePerSecond> {
    /// (mol/s) * s -> mol
    pub fn to_moles(self, timespan: Quantity<Second>) -> Quantity<Mole> {
        Quantity::new(self.value * timespan.value)
    }
}

impl Quantity<Watt> {
    /// W * s -> J
    pub fn to_energy(self, timespan: Quantity<Second>) -> Quantity<Joule> {
        Quantity::new(self.value * timespan.value)
    }
}

impl Quantity<Celsius> {
    /// K = C + 273.15
    pub fn to_kelvin(self) -> Quantity<Kelvin> {
        Quantity::new(self.value + 273.15)
    }

    /// F = 1.8 * C + 32
    pub fn to_fahrenheit(self) -> Quantity<Fahrenheit> {
        Quantity::new(self.value * 1.8 + 32.0)
    }
}

impl Quantity<Kelvin> {
    pub fn to_celsius(self) -> Quantity<Celsius> {
        Quantity::new(self.value - 273.15)
    }
}

impl Quantity<Fahrenheit> {
    pub fn to_celsius(self) -> Quantity<Celsius> {
        Quantity::new((self.value - 32.0) / 1.8)
    }
}

impl Quantity<Torr> {
    /// 1 torr = 133.322368 Pa
    pub fn to_pascals(self) -> Quantity<Pascal> {
        Quantity::new(self.value * 133.322368)
    }
}

impl Quantity<Pascal> {
    pub fn to_torr(self) -> Quantity<Torr> {
        Quantity::new(self.value / 133.322368)
    }
}
