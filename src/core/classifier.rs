//! FG-003: Variable classification — set algebra over parsed triples.
//!
//! Derives the function set and the dependent / independent / pure-independent
//! / intermediate variable sets. Pure, deterministic, order-independent.

use super::types::{Classification, OpTriple};

/// Classify every name appearing in the triple sequence.
///
/// `pure_independent = independent_all − dependent`,
/// `intermediate = independent_all ∩ dependent`.
pub fn classify(triples: &[OpTriple]) -> Classification {
    let mut cls = Classification::default();

    for triple in triples {
        cls.functions.insert(triple.function.clone());
        cls.dependent.insert(triple.output.clone());
        for input in &triple.inputs {
            cls.independent_all.insert(input.clone());
        }
    }

    cls.pure_independent = cls
        .independent_all
        .difference(&cls.dependent)
        .cloned()
        .collect();
    cls.intermediate = cls
        .independent_all
        .intersection(&cls.dependent)
        .cloned()
        .collect();

    cls
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn triple(output: &str, function: &str, inputs: &[&str]) -> OpTriple {
        OpTriple {
            output: output.to_string(),
            function: function.to_string(),
            inputs: inputs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_fg003_example_scenario() {
        // z = add(x, y); w = mul(z, x)
        let triples = vec![triple("z", "add", &["x", "y"]), triple("w", "mul", &["z", "x"])];
        let cls = classify(&triples);

        let set = |items: &[&str]| {
            items
                .iter()
                .map(|s| s.to_string())
                .collect::<std::collections::BTreeSet<_>>()
        };
        assert_eq!(cls.functions, set(&["add", "mul"]));
        assert_eq!(cls.dependent, set(&["z", "w"]));
        assert_eq!(cls.independent_all, set(&["x", "y", "z"]));
        assert_eq!(cls.pure_independent, set(&["x", "y"]));
        assert_eq!(cls.intermediate, set(&["z"]));
    }

    #[test]
    fn test_fg003_empty_input() {
        let cls = classify(&[]);
        assert!(cls.functions.is_empty());
        assert!(cls.pure_independent.is_empty());
        assert!(cls.intermediate.is_empty());
    }

    #[test]
    fn test_fg003_duplicate_inputs_collapse() {
        let cls = classify(&[triple("y", "square", &["x", "x"])]);
        assert_eq!(cls.independent_all.len(), 1);
        assert_eq!(cls.pure_independent.len(), 1);
    }

    #[test]
    fn test_fg003_self_reference_is_intermediate() {
        // a feeds its own producer: both input and output
        let cls = classify(&[triple("a", "step", &["a"])]);
        assert!(cls.intermediate.contains("a"));
        assert!(cls.pure_independent.is_empty());
    }

    #[test]
    fn test_fg003_order_independent() {
        let a = vec![triple("z", "add", &["x", "y"]), triple("w", "mul", &["z", "x"])];
        let b = vec![triple("w", "mul", &["z", "x"]), triple("z", "add", &["x", "y"])];
        assert_eq!(classify(&a), classify(&b));
    }

    fn arb_ident() -> impl Strategy<Value = String> {
        // Tiny alphabet so overlaps between inputs and outputs are common
        "[a-d][0-2]?"
    }

    fn arb_triples() -> impl Strategy<Value = Vec<OpTriple>> {
        prop::collection::vec(
            (arb_ident(), arb_ident(), prop::collection::vec(arb_ident(), 1..4)).prop_map(
                |(output, function, inputs)| OpTriple {
                    output,
                    function,
                    inputs,
                },
            ),
            0..8,
        )
    }

    proptest! {
        #[test]
        fn test_fg003_prop_pure_disjoint_from_dependent(triples in arb_triples()) {
            let cls = classify(&triples);
            prop_assert!(cls.pure_independent.intersection(&cls.dependent).next().is_none());
        }

        #[test]
        fn test_fg003_prop_pure_union_intermediate_is_all(triples in arb_triples()) {
            let cls = classify(&triples);
            let union: std::collections::BTreeSet<_> = cls
                .pure_independent
                .union(&cls.intermediate)
                .cloned()
                .collect();
            prop_assert_eq!(union, cls.independent_all);
        }

        #[test]
        fn test_fg003_prop_intermediate_subset_of_dependent(triples in arb_triples()) {
            let cls = classify(&triples);
            prop_assert!(cls.intermediate.is_subset(&cls.dependent));
        }
    }
}
