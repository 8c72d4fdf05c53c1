#[cfg(test)]
mod tests {
    use crate::constants::STANDARD_PRESSURE;
    use crate::mixtures::{Layer, LayerType, Reactant, ReactantSet};
    use crate::quantities::Quantity;
    use crate::tests::fixtures::{molecule, test_store};

    #[test]
    fn test_liquid_layer_nucleator_wiring() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));

        let mut layer = Layer::new(LayerType::Polar, Quantity::new(20.0));
        layer.set_if_nucleator(&water, STANDARD_PRESSURE);

        assert!(layer.has_low_nucleator());
        assert!(layer.has_high_nucleator());
        assert!((layer.min_allowed_temperature(STANDARD_PRESSURE).value() - 0.0).abs() < 1e-9);
        assert!((layer.max_allowed_temperature(STANDARD_PRESSURE).value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_gas_and_solid_layers_track_one_side() {
        let store = test_store();
        let vapor = Reactant::new(molecule(&store, "O"), LayerType::Gaseous, Quantity::new(1.0));
        let mut gas = Layer::new(LayerType::Gaseous, Quantity::new(120.0));
        gas.set_if_nucleator(&vapor, STANDARD_PRESSURE);
        assert!(gas.has_low_nucleator());
        assert!(!gas.has_high_nucleator());
        assert!(gas.max_allowed_temperature(STANDARD_PRESSURE).is_infinity());

        let ice = Reactant::new(molecule(&store, "O"), LayerType::Solid, Quantity::new(1.0));
        let mut solid = Layer::new(LayerType::Solid, Quantity::new(-20.0));
        solid.set_if_nucleator(&ice, STANDARD_PRESSURE);
        assert!(!solid.has_low_nucleator());
        assert!(solid.has_high_nucleator());
        assert!((-solid.min_allowed_temperature(STANDARD_PRESSURE)).is_infinity());
    }

    #[test]
    fn test_nucleator_ordering_over_species() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));
        let ethanol =
            Reactant::new(molecule(&store, "CCO"), LayerType::Polar, Quantity::new(2.0));

        let mut layer = Layer::new(LayerType::Polar, Quantity::new(20.0));
        layer.set_if_nucleator(&water, STANDARD_PRESSURE);
        layer.set_if_nucleator(&ethanol, STANDARD_PRESSURE);

        // lowest melting point guards the cold side, highest boiling the hot
        assert_eq!(
            layer.low_nucleator().reactant().unwrap().molecule,
            ethanol.molecule
        );
        assert_eq!(
            layer.high_nucleator().reactant().unwrap().molecule,
            water.molecule
        );
        assert!(
            (layer.min_allowed_temperature(STANDARD_PRESSURE).value() + 114.1).abs() < 1e-9
        );
        assert!((layer.max_allowed_temperature(STANDARD_PRESSURE).value() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_nucleator_rescan_after_unset() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));
        let ethanol =
            Reactant::new(molecule(&store, "CCO"), LayerType::Polar, Quantity::new(2.0));

        let mut content = ReactantSet::new();
        content.add(water.clone());
        content.add(ethanol.clone());

        let mut layer = Layer::new(LayerType::Polar, Quantity::new(20.0));
        layer.set_if_nucleator(&water, STANDARD_PRESSURE);
        layer.set_if_nucleator(&ethanol, STANDARD_PRESSURE);

        assert!(layer.unset_if_nucleator(&water));
        assert!(!layer.has_high_nucleator());

        layer.find_new_high_nucleator(&content, STANDARD_PRESSURE);
        assert_eq!(
            layer.high_nucleator().reactant().unwrap().molecule,
            water.molecule
        );

        // below the existence threshold the species is not considered
        content.add(water.with_amount(Quantity::new(-3.0 + 5e-8)));
        layer.find_new_high_nucleator(&content, STANDARD_PRESSURE);
        assert_eq!(
            layer.high_nucleator().reactant().unwrap().molecule,
            ethanol.molecule
        );
    }

    #[test]
    fn test_heat_capacity_single_species() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));
        let mut content = ReactantSet::new();
        content.add(water);

        let layer = Layer::new(LayerType::Polar, Quantity::new(20.0));
        let molar = layer.heat_capacity(&content, STANDARD_PRESSURE);
        assert!((molar.value() - 75.3).abs() < 1e-9);
        let total = layer.total_heat_capacity(&content, STANDARD_PRESSURE);
        assert!((total.value() - 225.9).abs() < 1e-9);

        let kinetic = layer.kinetic_energy(&content, STANDARD_PRESSURE);
        assert!((kinetic.value() - 75.3 * 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_heat_capacity_is_mass_weighted() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));
        let ethanol =
            Reactant::new(molecule(&store, "CCO"), LayerType::Polar, Quantity::new(2.0));
        let mut content = ReactantSet::new();
        content.add(water);
        content.add(ethanol);

        let layer = Layer::new(LayerType::Polar, Quantity::new(20.0));
        let molar = layer.heat_capacity(&content, STANDARD_PRESSURE).value();
        assert!(molar > 75.3 && molar < 112.0);
    }

    #[test]
    fn test_temporary_state_detection() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));

        let boiling_hot = Layer::new(LayerType::Polar, Quantity::new(120.0));
        assert!(boiling_hot.has_temporary_state(&water, STANDARD_PRESSURE));
        let freezing = Layer::new(LayerType::Polar, Quantity::new(-10.0));
        assert!(freezing.has_temporary_state(&water, STANDARD_PRESSURE));
        let stable = Layer::new(LayerType::Polar, Quantity::new(20.0));
        assert!(!stable.has_temporary_state(&water, STANDARD_PRESSURE));

        let vapor = water.with_layer(LayerType::Gaseous);
        let cold_gas = Layer::new(LayerType::Gaseous, Quantity::new(1.0));
        assert!(cold_gas.has_temporary_state(&vapor, STANDARD_PRESSURE));
        let hot_gas = Layer::new(LayerType::Gaseous, Quantity::new(120.0));
        assert!(!hot_gas.has_temporary_state(&vapor, STANDARD_PRESSURE));
    }

    #[test]
    fn test_least_energy_diff_plateau() {
        let store = test_store();
        let water = Reactant::new(molecule(&store, "O"), LayerType::Polar, Quantity::new(3.0));
        let mut content = ReactantSet::new();
        content.add(water.clone());

        // below the plateau the cost is plain sensible heat
        let mut layer = Layer::new(LayerType::Polar, Quantity::new(90.0));
        layer.set_if_nucleator(&water, STANDARD_PRESSURE);
        let diff = layer.least_energy_diff(Quantity::new(95.0), &content, STANDARD_PRESSURE);
        assert!((diff.value() - 225.9 * 5.0).abs() < 1e-6);

        // at the plateau the latent budget of the nucleator applies
        let mut plateau = Layer::new(LayerType::Polar, Quantity::new(100.0));
        plateau.set_if_nucleator(&water, STANDARD_PRESSURE);
        let diff = plateau.least_energy_diff(Quantity::new(110.0), &content, STANDARD_PRESSURE);
        assert!((diff.value() - 3.0 * 40650.0).abs() < 1e-6);
    }
}
