//! Physical constants for the mixture simulation

use crate::quantities::{
    Celsius, GramPerMilliliter, GramPerMole, JoulePerMoleCelsius, Mole, Quantity, Torr, Watt,
};

/// Ideal gas constant R (J/(mol·K))
/// Used in ideal gas law: PV = nRT
pub const IDEAL_GAS_CONSTANT: f64 = 8.31446261815324;

/// Smallest mole amount considered to exist; anything below is negligible
pub const MOLAR_EXISTENCE_THRESHOLD: Quantity<Mole> = Quantity::new(1e-7);

/// Reference atmospheric pressure (torr)
pub const STANDARD_PRESSURE: Quantity<Torr> = Quantity::new(760.0);

/// Reference atmospheric temperature (°C)
pub const STANDARD_TEMPERATURE: Quantity<Celsius> = Quantity::new(1.0);

/// Relative inter-layer conductivity in the favoured direction
pub const FAVOURABLE_CONDUCTIVITY: Quantity<Watt> = Quantity::new(5e-6);

/// Relative inter-layer conductivity in the unfavoured direction
pub const UNFAVOURABLE_CONDUCTIVITY: Quantity<Watt> = Quantity::new(3e-6);

/// Products with more non-implied atoms than this are discarded by the
/// concrete-product generator (polymer guard).
pub const MAX_PRODUCT_ATOM_COUNT: usize = 100;

/// Ideal-gas density in g/mL: rho = M / ((T/P) * R * 1e6),
/// with T in Kelvin and P in Pascal.
pub fn ideal_gas_density(
    temperature: Quantity<Celsius>,
    pressure: Quantity<Torr>,
    molar_mass: Quantity<GramPerMole>,
) -> Quantity<GramPerMilliliter> {
    let t = temperature.to_kelvin().value();
    let p = pressure.to_pascals().value();
    Quantity::new(molar_mass.value() / ((t / p) * IDEAL_GAS_CONSTANT * 1e6))
}

/// Isobaric heat capacity of an ideal gas from its degrees of freedom:
/// Cp = (dof / 2 + 1) * R
pub fn isobaric_heat_capacity(degrees_of_freedom: u8) -> Quantity<JoulePerMoleCelsius> {
    Quantity::new((degrees_of_freedom as f64 / 2.0 + 1.0) * IDEAL_GAS_CONSTANT)
}
