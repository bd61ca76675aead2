//! Dynamic-dispatch emitter: a tag-string-indexed branch table over a single
//! type-erased wrapper (§4.5).

use std::collections::BTreeSet;

/// Emit the four dynamic-dispatch functions over `non_template_types`.
///
/// Iteration is ascending by fully qualified name (free, since the caller
/// passes a `BTreeSet`), satisfying the determinism requirement in §4.5/§4.7
/// without an explicit sort.
pub fn render(non_template_types: &BTreeSet<String>) -> String {
    let mut out = String::new();
    out.push_str(&render_deserialize_fields(non_template_types));
    out.push_str(&render_serialize_fields(non_template_types));
    out.push_str(&render_wrappers());
    out
}

fn render_deserialize_fields(names: &BTreeSet<String>) -> String {
    let mut out = String::from(
        "void DeserializeFields(Deserializer& s, SubclassOfBase& v) {\n\
         \x20   if (s.GetCurrentScope() == nullptr) {\n\
         \x20       v.Reset();\n\
         \x20       return;\n\
         \x20   }\n\
         \x20   std::string type = s.AtChecked(\"Type\");\n",
    );
    for name in names {
        out.push_str(&format!(
            "    if (type == \"{name}\") {{\n\
             \x20       s.BeginObject(\"Value\");\n\
             \x20       {name} temp{{}};\n\
             \x20       DeserializeFields(s, temp);\n\
             \x20       v = SubclassOf<{name}>(temp);\n\
             \x20       s.EndObject();\n\
             \x20       return;\n\
             \x20   }}\n"
        ));
    }
    out.push_str("    throw UnknownType(type);\n}\n");
    out
}

fn render_serialize_fields(names: &BTreeSet<String>) -> String {
    let mut out = String::from(
        "void SerializeFields(Serializer& s, SubclassOfBase const& v) {\n\
         \x20   if (!v.GetAny().has_value()) {\n\
         \x20       s.WriteNull();\n\
         \x20       return;\n\
         \x20   }\n\
         \x20   auto const& tag = v.GetAny().type();\n",
    );
    for name in names {
        out.push_str(&format!(
            "    if (tag == typeid({name})) {{\n\
             \x20       s.Write(\"Type\", \"{name}\");\n\
             \x20       s.BeginObject(\"Value\");\n\
             \x20       SerializeFields(s, *std::any_cast<{name}>(&v.GetAny()));\n\
             \x20       s.EndObject();\n\
             \x20       return;\n\
             \x20   }}\n"
        ));
    }
    out.push_str("    throw UnsupportedType(tag);\n}\n");
    out
}

fn render_wrappers() -> String {
    concat!(
        "void Serialize(Serializer& s, char const* name, SubclassOfBase const& v) {\n",
        "    s.BeginObject(name);\n",
        "    SerializeFields(s, v);\n",
        "    s.EndObject();\n",
        "}\n",
        "void Deserialize(Deserializer& s, char const* name, SubclassOfBase& v) {\n",
        "    s.BeginObject(name);\n",
        "    DeserializeFields(s, v);\n",
        "    s.EndObject();\n",
        "}\n",
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// §8.7: every known name appears as a branch in each of the four
    /// functions.
    #[test]
    fn every_known_name_appears_in_each_function() {
        let mut names = BTreeSet::new();
        names.insert("A::Point".to_string());
        names.insert("Widget".to_string());

        let out = render(&names);
        for name in &names {
            assert!(
                out.matches(&format!("\"{name}\"")).count() >= 1,
                "missing Type branch for {name}"
            );
            assert!(
                out.contains(&format!("typeid({name})")),
                "missing tag branch for {name}"
            );
        }
    }

    #[test]
    fn ascending_order_is_free_from_btreeset_iteration() {
        let mut names = BTreeSet::new();
        names.insert("Zebra".to_string());
        names.insert("Apple".to_string());
        let out = render_deserialize_fields(&names);
        let apple_pos = out.find("Apple").unwrap();
        let zebra_pos = out.find("Zebra").unwrap();
        assert!(apple_pos < zebra_pos);
    }

    #[test]
    fn unknown_tag_raises_in_both_fields_functions() {
        let names = BTreeSet::new();
        assert!(render_deserialize_fields(&names).contains("throw UnknownType"));
        assert!(render_serialize_fields(&names).contains("throw UnsupportedType"));
    }
}
