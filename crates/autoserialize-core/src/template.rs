//! Template parameter lists and their two derived renderings (§3).

/// One template parameter, either a type/non-type parameter or a nested
/// template-template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateParam {
    KindOrType {
        kind_or_type_name: String,
        name: String,
    },
    TemplateTemplate {
        params: Vec<TemplateParam>,
        name: String,
    },
}

impl TemplateParam {
    fn name(&self) -> &str {
        match self {
            TemplateParam::KindOrType { name, .. } => name,
            TemplateParam::TemplateTemplate { name, .. } => name,
        }
    }
}

/// A template parameter list. An empty `params` means "no template", and
/// both renderings collapse to the empty string for that case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub params: Vec<TemplateParam>,
    pub name: String,
}

impl Template {
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `template<P1, P2, …>`, with a trailing ` typename name` when this
    /// template is itself nested as a template-template parameter
    /// (`outer == false`).
    pub fn render_header(&self, outer: bool) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = self.params.iter().map(render_param).collect();
        let mut out = format!("template<{}>", rendered.join(", "));
        if !outer {
            out.push_str(" typename");
            if !self.name.is_empty() {
                out.push(' ');
                out.push_str(&self.name);
            }
        }
        out
    }

    /// `<name1, name2, …>`, the suffix appended to a type name to name a
    /// concrete instantiation.
    pub fn render_names(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.params.iter().map(TemplateParam::name).collect();
        format!("<{}>", names.join(", "))
    }
}

fn render_param(param: &TemplateParam) -> String {
    match param {
        TemplateParam::KindOrType {
            kind_or_type_name,
            name,
        } => {
            if name.is_empty() {
                kind_or_type_name.clone()
            } else {
                format!("{kind_or_type_name} {name}")
            }
        }
        TemplateParam::TemplateTemplate { params, name } => {
            let nested = Template {
                params: params.clone(),
                name: name.clone(),
            };
            nested.render_header(false)
        }
    }
}

/// Concatenate the `params` of every `Template` on a stack, in order, into
/// one flattened `Template` (the `name` of the result is irrelevant and left
/// empty — only `full_type_name`'s own flattening cares about `params`).
pub fn flatten<'a>(stack: impl IntoIterator<Item = &'a Template>) -> Template {
    let mut flattened = Template::default();
    for t in stack {
        flattened.params.extend(t.params.iter().cloned());
    }
    flattened
}
