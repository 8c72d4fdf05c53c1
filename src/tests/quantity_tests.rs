#[cfg(test)]
mod tests {
    use crate::constants::ideal_gas_density;
    use crate::quantities::{
        Celsius, Gram, GramPerMilliliter, GramPerMole, Joule, JoulePerCelsius, JoulePerMole,
        JoulePerMoleCelsius, Liter, Mole, MolePerSecond, Pascal, Quantity, Second, Torr, Watt,
    };

    #[test]
    fn test_mole_mass_conversions() {
        let moles: Quantity<Mole> = Quantity::new(3.0);
        let molar_mass: Quantity<GramPerMole> = Quantity::new(18.015);
        let mass = moles.to_mass(molar_mass);
        assert!((mass.value() - 54.045).abs() < 1e-9);
        let back = mass.to_moles(molar_mass);
        assert!((back.value() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mass_volume_conversions() {
        let mass: Quantity<Gram> = Quantity::new(54.045);
        let density: Quantity<GramPerMilliliter> = Quantity::new(1.0);
        let volume = mass.to_volume(density);
        // 54.045 g of unit-density liquid occupy 54.045 mL
        assert!((volume.value() - 0.054045).abs() < 1e-12);
        assert!((volume.to_mass(density).value() - 54.045).abs() < 1e-9);
    }

    #[test]
    fn test_energy_conversions() {
        let latent: Quantity<JoulePerMole> = Quantity::new(40650.0);
        let energy = latent.to_energy(Quantity::new(2.0));
        assert!((energy.value() - 81300.0).abs() < 1e-9);
        assert!((energy.to_moles(latent).value() - 2.0).abs() < 1e-12);

        let heat_capacity: Quantity<JoulePerMoleCelsius> = Quantity::new(75.3);
        let total: Quantity<JoulePerCelsius> = heat_capacity.to_total(Quantity::new(3.0));
        assert!((total.value() - 225.9).abs() < 1e-9);
        let change: Quantity<Celsius> = Quantity::<Joule>::new(225.9).to_temperature_change(total);
        assert!((change.value() - 1.0).abs() < 1e-12);
        let molar_change = Quantity::<Joule>::new(225.9)
            .to_molar_temperature_change(heat_capacity, Quantity::new(3.0));
        assert!((molar_change.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rate_conversions() {
        let speed: Quantity<MolePerSecond> = Quantity::new(0.25);
        assert!((speed.to_moles(Quantity::new(4.0)).value() - 1.0).abs() < 1e-12);

        let power: Quantity<Watt> = Quantity::new(5e-6);
        assert!((power.to_energy(Quantity::<Second>::new(2.0)).value() - 1e-5).abs() < 1e-18);
    }

    #[test]
    fn test_temperature_conversions() {
        let celsius: Quantity<Celsius> = Quantity::new(100.0);
        assert!((celsius.to_kelvin().value() - 373.15).abs() < 1e-9);
        assert!((celsius.to_fahrenheit().value() - 212.0).abs() < 1e-9);
        assert!((celsius.to_kelvin().to_celsius().value() - 100.0).abs() < 1e-9);
        assert!((celsius.to_fahrenheit().to_celsius().value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_pressure_and_volume_conversions() {
        let torr: Quantity<Torr> = Quantity::new(760.0);
        let pascal: Quantity<Pascal> = torr.to_pascals();
        assert!((pascal.value() - 101325.0).abs() < 1.0);
        assert!((pascal.to_torr().value() - 760.0).abs() < 1e-9);

        let liters: Quantity<Liter> = Quantity::new(2500.0);
        assert!((liters.to_cubic_meters().value() - 2.5).abs() < 1e-12);
        assert!((liters.to_cubic_meters().to_liters().value() - 2500.0).abs() < 1e-9);
    }

    #[test]
    fn test_ideal_gas_density() {
        // N2 at 1 °C and 760 torr: ~1.245 g/L
        let density = ideal_gas_density(
            Quantity::new(1.0),
            Quantity::new(760.0),
            Quantity::new(28.014),
        );
        assert!((density.value() - 0.0012453).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_sentinel() {
        let unknown = Quantity::<Mole>::UNKNOWN;
        assert!(unknown.is_unknown());
        assert!(unknown != unknown);
        assert!(unknown != Quantity::new(0.0));
        assert!(!(unknown == Quantity::new(1.0)));
        assert!(!Quantity::<Mole>::new(1.0).is_unknown());
    }

    #[test]
    fn test_infinity_sentinel_preserved() {
        let infinity = Quantity::<Liter>::INFINITY;
        assert!(infinity.is_infinity());
        assert!((infinity + Quantity::new(10.0)).is_infinity());
        assert!((infinity * 2.0).is_infinity());
        assert!(!Quantity::<Liter>::new(1e300).is_infinity());
    }

    #[test]
    fn test_bounded_relative_equality() {
        let a = Quantity::<Gram>::new(1_000_000.0);
        let b = Quantity::<Gram>::new(1_000_000.0 + 1e-7);
        assert!(a.equals(b, 1e-12));
        assert!(!a.equals(Quantity::new(1_000_001.0), 1e-12));

        // near zero the bound is absolute
        let c = Quantity::<Gram>::new(0.0);
        assert!(c.equals(Quantity::new(1e-13), 1e-12));
        assert!(!c.equals(Quantity::new(1e-6), 1e-12));
    }

    #[test]
    fn test_ordering_and_arithmetic() {
        let mut amount = Quantity::<Mole>::new(2.0);
        amount += Quantity::new(3.0);
        amount -= Quantity::new(1.0);
        assert!((amount.value() - 4.0).abs() < 1e-12);
        assert!(amount > Quantity::new(3.9));
        assert!(-amount < Quantity::new(0.0));
        assert!(((amount * 2.0).value() - 8.0).abs() < 1e-12);
        assert!(((amount / 2.0).value() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_overflow_detection() {
        let huge = Quantity::<Gram>::new(f64::MAX);
        assert!(huge.overflows_on_add(huge));
        assert!(!huge.overflows_on_add(Quantity::new(1.0)));
        assert!(!Quantity::<Gram>::new(1.0).overflows_on_add(Quantity::new(2.0)));
    }
}
