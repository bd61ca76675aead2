//! Merges a unit's [`ImplementationGeneratorSet`] into the global one (§4.8).

use autoserialize_core::ImplementationGeneratorSet;

/// Merge `unit` into `global`, appending a message to `conflicts` for every
/// `full_type_name` the two disagree on.
///
/// "First wins" for both maps: a conflicting key is reported but the value
/// already in `global` is kept, matching §4.8 ("a duplicate with a different
/// stored string-value is reported but the first wins").
pub fn merge_into(
    global: &mut ImplementationGeneratorSet,
    unit: ImplementationGeneratorSet,
    conflicts: &mut Vec<String>,
) {
    for (key, generator) in unit.generators {
        match global.generators.get(&key) {
            None => {
                global.generators.insert(key, generator);
            }
            Some(existing) if *existing == generator => {}
            Some(_) => {
                conflicts.push(format!("conflicting definitions of {key}"));
            }
        }
    }
    for name in unit.non_template_types {
        global.non_template_types.insert(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoserialize_core::ImplementationGenerator;

    fn generator(full_type_name: &str, body: &str) -> ImplementationGenerator {
        ImplementationGenerator {
            templates_header: String::new(),
            full_type_name: full_type_name.to_string(),
            serialize_fields_body: body.to_string(),
            deserialize_fields_body: body.to_string(),
        }
    }

    /// S5: identical definitions from two units produce no conflict.
    #[test]
    fn s5_identical_generators_merge_without_conflict() {
        let mut global = ImplementationGeneratorSet::new();
        global.insert(generator("N::X", "a"), true);

        let mut unit_b = ImplementationGeneratorSet::new();
        unit_b.insert(generator("N::X", "a"), true);

        let mut conflicts = Vec::new();
        merge_into(&mut global, unit_b, &mut conflicts);

        assert!(conflicts.is_empty());
        assert_eq!(global.generators.len(), 1);
    }

    /// S5: unit A has `{int a}`, unit B has `{int a; int b}` — one conflict,
    /// first-seen wins.
    #[test]
    fn s5_differing_generators_produce_exactly_one_conflict_first_wins() {
        let mut global = ImplementationGeneratorSet::new();
        global.insert(generator("N::X", "a"), true);

        let mut unit_b = ImplementationGeneratorSet::new();
        unit_b.insert(generator("N::X", "a; b"), true);

        let mut conflicts = Vec::new();
        merge_into(&mut global, unit_b, &mut conflicts);

        assert_eq!(conflicts.len(), 1);
        assert!(conflicts[0].contains("N::X"));
        assert_eq!(
            global.generators.get("N::X").unwrap().serialize_fields_body,
            "a"
        );
    }

    /// §8.6: a full type name appears in the global set iff at least one
    /// unit produced it.
    #[test]
    fn merge_soundness_absent_key_is_inserted_unconditionally() {
        let mut global = ImplementationGeneratorSet::new();
        let mut unit = ImplementationGeneratorSet::new();
        unit.insert(generator("Fresh", "body"), false);

        let mut conflicts = Vec::new();
        merge_into(&mut global, unit, &mut conflicts);

        assert!(global.generators.contains_key("Fresh"));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn non_template_types_are_unioned() {
        let mut global = ImplementationGeneratorSet::new();
        global.insert(generator("A", "a"), true);
        let mut unit = ImplementationGeneratorSet::new();
        unit.insert(generator("B", "b"), true);

        let mut conflicts = Vec::new();
        merge_into(&mut global, unit, &mut conflicts);

        assert!(global.non_template_types.contains("A"));
        assert!(global.non_template_types.contains("B"));
    }
}
