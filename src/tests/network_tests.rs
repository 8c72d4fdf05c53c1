#[cfg(test)]
mod tests {
    use crate::mixtures::{LayerType, Reactant};
    use crate::molecules::{DataStore, Estimator, MolecularStructure};
    use crate::quantities::Quantity;
    use crate::reactions::ReactionData;
    use crate::tests::fixtures::{molecule, test_store};
    use crate::SimulationError;

    fn reaction_spec(
        name: &str,
        reactants: &[&str],
        products: &[&str],
    ) -> crate::molecules::ReactionSpec {
        crate::molecules::ReactionSpec {
            name: name.to_string(),
            reactants: reactants.iter().map(|s| (s.to_string(), 1)).collect(),
            products: products.iter().map(|s| (s.to_string(), 1)).collect(),
            catalysts: vec![],
            reaction_energy: 0.0,
            activation_energy: 0.0,
            temperature_speed: Estimator::Constant(0.01),
            concentration_speed: Estimator::Constant(1.0),
            is_cut: false,
            component_map: None,
        }
    }

    #[test]
    fn test_occurring_reaction_builds_concrete_products() {
        let store = test_store();
        let acid = Reactant::new(
            molecule(&store, "CC(=O)O"),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let ethanol = Reactant::new(
            molecule(&store, "CCO"),
            LayerType::Polar,
            Quantity::new(1.0),
        );

        let found = store
            .reactions()
            .get_occurring_reactions(&[acid.clone(), ethanol.clone()], &store);
        assert_eq!(found.len(), 1);

        let reaction = &found[0];
        let ester = molecule(&store, "CCOC(=O)C");
        let water = molecule(&store, "O");
        let product_ids: Vec<u32> = reaction
            .products()
            .iter()
            .map(|p| p.molecule.id())
            .collect();
        assert!(product_ids.contains(&ester.id()));
        assert!(product_ids.contains(&water.id()));
    }

    #[test]
    fn test_reactant_order_must_align_with_patterns() {
        let store = test_store();
        let acid = Reactant::new(
            molecule(&store, "CC(=O)O"),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let ethanol = Reactant::new(
            molecule(&store, "CCO"),
            LayerType::Polar,
            Quantity::new(1.0),
        );

        let found = store
            .reactions()
            .get_occurring_reactions(&[ethanol, acid], &store);
        assert!(found.is_empty());
    }

    #[test]
    fn test_specialization_relation() {
        let store = test_store();
        let general = store.reactions();
        assert_eq!(general.max_reactant_count(), 2);

        let make = |reactants: &[&str], products: &[&str]| -> ReactionData {
            let parse =
                |s: &str| MolecularStructure::from_smiles(s, store.atoms()).unwrap();
            ReactionData::new(
                99,
                "probe",
                reactants.iter().map(|s| parse(s)).collect(),
                products.iter().map(|s| parse(s)).collect(),
                vec![],
                Quantity::ZERO,
                Quantity::ZERO,
                Estimator::Constant(0.01),
                Estimator::Constant(1.0),
                false,
                None,
            )
            .unwrap()
        };

        let generic = make(&["[R]C(=O)O", "[R]O"], &["[R]C(=O)O[R]", "O"]);
        let ethanol_only = make(&["[R]C(=O)O", "CCO"], &["CCOC(=O)[R]", "O"]);

        assert!(ethanol_only.is_specialization_of(&generic));
        assert!(!generic.is_specialization_of(&ethanol_only));
        assert!(generic.is_equivalent_to(&generic));
        assert!(!generic.is_equivalent_to(&ethanol_only));
    }

    #[test]
    fn test_most_specialized_rule_wins() {
        let mut store = DataStore::new();
        store
            .register_reaction(&reaction_spec(
                "generic esterification",
                &["[R]C(=O)O", "[R]O"],
                &["[R]C(=O)O[R]", "O"],
            ))
            .unwrap();
        store
            .register_reaction(&reaction_spec(
                "ethanol esterification",
                &["[R]C(=O)O", "CCO"],
                &["CCOC(=O)[R]", "O"],
            ))
            .unwrap();

        let acid = Reactant::new(
            store.molecule_from_smiles("CC(=O)O").unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let ethanol = Reactant::new(
            store.molecule_from_smiles("CCO").unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let methanol = Reactant::new(
            store.molecule_from_smiles("CO").unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );

        let with_ethanol = store
            .reactions()
            .get_occurring_reactions(&[acid.clone(), ethanol], &store);
        assert_eq!(with_ethanol.len(), 1);
        assert_eq!(with_ethanol[0].data().name, "ethanol esterification");

        // methanol only satisfies the generic rule
        let with_methanol = store
            .reactions()
            .get_occurring_reactions(&[acid, methanol], &store);
        assert_eq!(with_methanol.len(), 1);
        assert_eq!(with_methanol[0].data().name, "generic esterification");
    }

    #[test]
    fn test_insertion_order_is_irrelevant() {
        let mut store = DataStore::new();
        store
            .register_reaction(&reaction_spec(
                "ethanol esterification",
                &["[R]C(=O)O", "CCO"],
                &["CCOC(=O)[R]", "O"],
            ))
            .unwrap();
        store
            .register_reaction(&reaction_spec(
                "generic esterification",
                &["[R]C(=O)O", "[R]O"],
                &["[R]C(=O)O[R]", "O"],
            ))
            .unwrap();

        let acid = Reactant::new(
            store.molecule_from_smiles("CC(=O)O").unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let ethanol = Reactant::new(
            store.molecule_from_smiles("CCO").unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );

        let found = store
            .reactions()
            .get_occurring_reactions(&[acid, ethanol], &store);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].data().name, "ethanol esterification");
    }

    #[test]
    fn test_duplicate_rule_is_rejected() {
        let mut store = DataStore::new();
        store
            .register_reaction(&reaction_spec(
                "esterification",
                &["[R]C(=O)O", "[R]O"],
                &["[R]C(=O)O[R]", "O"],
            ))
            .unwrap();
        let result = store.register_reaction(&reaction_spec(
            "esterification again",
            &["[R]C(=O)O", "[R]O"],
            &["[R]C(=O)O[R]", "O"],
        ));
        assert!(matches!(result, Err(SimulationError::DuplicateReaction(_))));
    }

    #[test]
    fn test_store_from_json_definitions() {
        let store = DataStore::from_json(
            r#"{
                "molecules": [
                    { "smiles": "O", "name": "water" },
                    { "smiles": "CCO", "name": "ethanol" }
                ],
                "reactions": [
                    {
                        "name": "esterification",
                        "reactants": [["[R]C(=O)O", 1], ["[R]O", 1]],
                        "products": [["[R]C(=O)O[R]", 1], ["O", 1]],
                        "temperature_speed": { "Constant": 0.01 },
                        "concentration_speed": { "Constant": 1.0 }
                    }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(store.molecule_count(), 2);
        assert_eq!(store.reactions().len(), 1);
        assert_eq!(store.reactions().max_reactant_count(), 2);
        // definitions with bad structures fail the load step
        assert!(DataStore::from_json(r#"{ "molecules": [{ "smiles": "Zz", "name": "x" }] }"#).is_err());
    }

    #[test]
    fn test_retrosynth_recovers_reactants() {
        let store = test_store();
        let target =
            MolecularStructure::from_smiles("CCOC(=O)C", store.atoms()).unwrap();

        let found = store.reactions().get_retrosynth_reactions(&target, &store);
        assert_eq!(found.len(), 1);

        let acid = MolecularStructure::from_smiles("CC(=O)O", store.atoms()).unwrap();
        let ethanol = MolecularStructure::from_smiles("CCO", store.atoms()).unwrap();
        let fingerprints: Vec<u64> = found[0]
            .reactants()
            .iter()
            .map(|s| s.fingerprint())
            .collect();
        assert!(fingerprints.contains(&acid.fingerprint()));
        assert!(fingerprints.contains(&ethanol.fingerprint()));
    }

    #[test]
    fn test_polymer_guard_filters_oversized_products() {
        let store = test_store();
        // a 100+ atom alkyl chain grafts into an oversized ester
        let mut long_chain = String::new();
        for _ in 0..105 {
            long_chain.push('C');
        }
        long_chain.push('O');
        let alcohol = Reactant::new(
            store.molecule_from_smiles(&long_chain).unwrap(),
            LayerType::Polar,
            Quantity::new(1.0),
        );
        let acid = Reactant::new(
            molecule(&store, "CC(=O)O"),
            LayerType::Polar,
            Quantity::new(1.0),
        );

        let found = store
            .reactions()
            .get_occurring_reactions(&[acid, alcohol], &store);
        // the ester is filtered, only water remains as a product
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].products().len(), 1);
    }
}
