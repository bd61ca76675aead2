//! Renders one reflected type's four function bodies as source text (§4.4).

use crate::model::ImplementationGenerator;

/// Which shape of source text to produce for a generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Declarations only, no bodies.
    ForwardDecl,
    /// Full definitions, `inline` only if the type is itself a template.
    Regular,
    /// Full definitions, always `inline` (used for per-unit headers).
    Inline,
}

struct Signature {
    name: &'static str,
    params_for: &'static str,
}

const SIGNATURES: &[Signature] = &[
    Signature {
        name: "Serialize",
        params_for: "(Serializer& Ser, char const* Name, {T} const& Val)",
    },
    Signature {
        name: "Deserialize",
        params_for: "(Deserializer& Ser, char const* Name, {T}& Val)",
    },
    Signature {
        name: "SerializeFields",
        params_for: "(Serializer& Ser, {T} const& Val)",
    },
    Signature {
        name: "DeserializeFields",
        params_for: "(Deserializer& Ser, {T}& Val)",
    },
];

fn qualifier(generator: &ImplementationGenerator, mode: GenMode) -> &'static str {
    if !generator.templates_header.is_empty() || mode == GenMode::Inline {
        "inline "
    } else {
        ""
    }
}

fn signature_line(sig: &Signature, full_type_name: &str) -> String {
    sig.params_for.replace("{T}", full_type_name)
}

fn body_for(sig: &Signature, generator: &ImplementationGenerator) -> String {
    match sig.name {
        "SerializeFields" => generator.serialize_fields_body.clone(),
        "DeserializeFields" => generator.deserialize_fields_body.clone(),
        "Serialize" => concat!(
            "    Ser.BeginObject(Name);\n",
            "    SerializeFields(Ser, Val);\n",
            "    Ser.EndObject();\n"
        )
        .to_string(),
        "Deserialize" => concat!(
            "    Ser.BeginObject(Name);\n",
            "    DeserializeFields(Ser, Val);\n",
            "    Ser.EndObject();\n"
        )
        .to_string(),
        _ => unreachable!("closed signature list"),
    }
}

/// Render the four functions for `generator` in `mode`. Does not wrap the
/// result in an include guard; see [`include_guard_macro`] for that.
pub fn render(generator: &ImplementationGenerator, mode: GenMode) -> String {
    let qual = qualifier(generator, mode);
    let mut out = String::new();

    for sig in SIGNATURES {
        if !generator.templates_header.is_empty() {
            out.push_str(&generator.templates_header);
            out.push('\n');
        }
        out.push_str(qual);
        out.push_str("void ");
        out.push_str(sig.name);
        out.push_str(&signature_line(sig, &generator.full_type_name));

        if mode == GenMode::ForwardDecl {
            out.push_str(";\n");
        } else {
            out.push_str(" {\n");
            out.push_str(&body_for(sig, generator));
            out.push_str("}\n");
        }
    }

    out
}

/// The include-guard macro name for a `Regular`-mode non-template type:
/// `full_type_name` with each of `:<>,` replaced by `_`, suffixed `_IMPL`.
pub fn include_guard_macro(full_type_name: &str) -> String {
    let mangled: String = full_type_name
        .chars()
        .map(|c| if matches!(c, ':' | '<' | '>' | ',') { '_' } else { c })
        .collect();
    format!("{mangled}_IMPL")
}

/// Wraps `body` in the include guard for a `Regular`-mode non-template type
/// (§4.4). Callers apply this only when the type is absent from templates
/// and `mode == Regular`.
pub fn wrap_include_guard(full_type_name: &str, body: &str) -> String {
    let guard = include_guard_macro(full_type_name);
    format!("#ifndef {guard}\n#define {guard}\n{body}#endif\n")
}
