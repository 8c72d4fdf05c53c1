#[cfg(test)]
mod tests {
    use crate::mixtures::{
        Atmosphere, Container, ContainerRef, DumpContainer, LayerType, MultiLayerMixture,
        Reactant, ReactantId,
    };
    use crate::quantities::Quantity;
    use crate::tests::fixtures::{molecule, test_store};
    use crate::types::shared;

    #[test]
    fn test_default_atmosphere_is_scaled_to_capacity() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let atmosphere = atmosphere.borrow();

        assert!((atmosphere.temperature().value() - 1.0).abs() < 1e-9);
        assert!((atmosphere.pressure().value() - 760.0).abs() < 1e-9);
        assert!((atmosphere.total_volume().value() - 10_000.0).abs() < 0.5);

        // composition ratio survives the scaling
        let nitrogen = molecule(&store, "N#N");
        let oxygen = molecule(&store, "O=O");
        let n2 = atmosphere.amount_of(&ReactantId::new(nitrogen.id(), LayerType::Gaseous));
        let o2 = atmosphere.amount_of(&ReactantId::new(oxygen.id(), LayerType::Gaseous));
        assert!((n2.value() / o2.value() - 78.084 / 20.946).abs() < 1e-6);
    }

    #[test]
    fn test_subatmosphere_inherits_state() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let sub = Atmosphere::create_subatmosphere(&atmosphere, Quantity::new(500.0));
        let sub = sub.borrow();

        assert!((sub.temperature().value() - 1.0).abs() < 1e-9);
        assert!((sub.pressure().value() - 760.0).abs() < 1e-9);
        assert!((sub.total_volume().value() - 500.0).abs() < 0.1);
    }

    #[test]
    fn test_mixture_copies_atmosphere_content() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(20.0), None);

        assert!((mixture.total_volume().value() - 20.0).abs() < 1e-6);
        assert!(mixture.has_layer(LayerType::Gaseous));
        assert!((mixture.layer(LayerType::Gaseous).unwrap().temperature().value() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_layer_for_by_aggregation_and_polarity() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(1.0), None);

        let water = Reactant::new(molecule(&store, "O"), LayerType::None, Quantity::new(1.0));
        assert_eq!(mixture.find_layer_for(&water), LayerType::Polar);

        // nitrogen is far past its boiling point at 1 °C
        let nitrogen =
            Reactant::new(molecule(&store, "N#N"), LayerType::None, Quantity::new(1.0));
        assert_eq!(mixture.find_layer_for(&nitrogen), LayerType::Gaseous);

        // acetic acid is below its melting point at 1 °C
        let acid =
            Reactant::new(molecule(&store, "CC(=O)O"), LayerType::None, Quantity::new(1.0));
        assert_eq!(mixture.find_layer_for(&acid), LayerType::Solid);

        // the ester is liquid and lipophilic
        let ester = Reactant::new(
            molecule(&store, "CCOC(=O)C"),
            LayerType::None,
            Quantity::new(1.0),
        );
        assert_eq!(mixture.find_layer_for(&ester), LayerType::Nonpolar);
    }

    #[test]
    fn test_lazy_layer_inherits_closest_temperature() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mut mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(1.0), None);

        mixture.add_reactant(Reactant::new(
            molecule(&store, "O"),
            LayerType::None,
            Quantity::new(3.0),
        ));
        assert!(mixture.has_layer(LayerType::Polar));
        let polar = mixture.layer(LayerType::Polar).unwrap();
        assert!((polar.temperature().value() - 1.0).abs() < 1e-9);
        assert!((polar.moles().value() - 3.0).abs() < 1e-9);
        assert!((polar.mass().value() - 54.045).abs() < 1e-6);
        assert!((polar.volume().value() - 0.054045).abs() < 1e-6);
    }

    #[test]
    fn test_layer_walks() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mut mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(1.0), None);
        mixture.add_reactant(Reactant::new(
            molecule(&store, "O"),
            LayerType::None,
            Quantity::new(3.0),
        ));
        mixture.add_reactant(Reactant::new(
            molecule(&store, "CC(=O)O"),
            LayerType::None,
            Quantity::new(1.0),
        ));

        assert_eq!(mixture.top_layer(), Some(LayerType::Gaseous));
        assert_eq!(mixture.bottom_layer(), Some(LayerType::Solid));
        assert_eq!(mixture.layer_above(LayerType::Polar), Some(LayerType::Gaseous));
        assert_eq!(mixture.layer_below(LayerType::Polar), Some(LayerType::Solid));
        assert_eq!(mixture.layer_above(LayerType::Gaseous), None);
        assert_eq!(mixture.layer_below(LayerType::Solid), None);
        assert_eq!(mixture.closest_layer(LayerType::Nonpolar), Some(LayerType::Polar));
    }

    #[test]
    fn test_remove_negligibles() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mut mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(1.0), None);

        let water = molecule(&store, "O");
        let ethanol = molecule(&store, "CCO");
        mixture.add_reactant(Reactant::new(water.clone(), LayerType::None, Quantity::new(3.0)));
        mixture.add_reactant(Reactant::new(
            ethanol.clone(),
            LayerType::None,
            Quantity::new(1e-9),
        ));

        mixture.remove_negligibles();
        assert_eq!(
            mixture.amount_of(&ReactantId::new(ethanol.id(), LayerType::Polar)),
            Quantity::ZERO
        );
        assert!(
            (mixture
                .amount_of(&ReactantId::new(water.id(), LayerType::Polar))
                .value()
                - 3.0)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_move_content_transfers_proportionally() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let mut mixture = MultiLayerMixture::new(&atmosphere.borrow(), Quantity::new(1.0), None);

        mixture.add_reactant(Reactant::new(
            molecule(&store, "O"),
            LayerType::None,
            Quantity::new(3.0),
        ));
        let dump = shared(DumpContainer::new());
        let polar_volume = mixture.layer(LayerType::Polar).unwrap().volume();
        let mass_before = Container::total_mass(&mixture);

        let target = dump.clone() as ContainerRef;
        mixture.move_content_to(Some(&target), polar_volume / 2.0, LayerType::Polar);

        let polar = mixture.layer(LayerType::Polar).unwrap();
        assert!((polar.moles().value() - 1.5).abs() < 1e-9);
        assert!((dump.borrow().total_mass().value() - 27.0225).abs() < 1e-6);
        // mass only moved, never created
        let mass_after = Container::total_mass(&mixture) + dump.borrow().total_mass();
        assert!(mass_before.equals(mass_after, 1e-9));
    }

    #[test]
    fn test_overflow_spills_top_layer_first() {
        let store = test_store();
        let atmosphere = Atmosphere::create_default(&store).unwrap();
        let dump = shared(DumpContainer::new());
        let mut mixture = MultiLayerMixture::new(
            &atmosphere.borrow(),
            Quantity::new(1.0),
            Some(dump.clone() as ContainerRef),
        );

        mixture.add_reactant(Reactant::new(
            molecule(&store, "O"),
            LayerType::None,
            Quantity::new(3.0),
        ));
        assert!(mixture.total_volume() > mixture.max_volume());

        mixture.check_overflow();
        assert!((mixture.total_volume().value() - 1.0).abs() < 1e-6);
        // the displaced matter is gas, the water stays
        assert!((mixture.layer(LayerType::Polar).unwrap().moles().value() - 3.0).abs() < 1e-9);
        assert!(dump.borrow().total_mass().value() > 0.0);
    }
}
