//! Type-level declarations: aliases, unions and interface fields.

use tsgen_codegen::builder::{CodeFragment, Renderable};

use super::property_key;

/// A property of an [`Interface`](super::Interface).
#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    /// Blank docs are dropped.
    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.filter(|d| !d.trim().is_empty()).map(str::to_string);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn optional_if(self, optional: bool) -> Self {
        if optional { self.optional() } else { self }
    }

    pub(crate) fn to_fragments(&self) -> Vec<CodeFragment> {
        let question = if self.optional { "?" } else { "" };
        let line = format!("{}{question}: {};", property_key(&self.name), self.ty);
        CodeFragment::docs(self.doc.as_deref())
            .into_iter()
            .chain([CodeFragment::Line(line)])
            .collect()
    }
}

/// `type Name = ...;`, exported unless made private.
fn type_statement(exported: bool, name: &str) -> String {
    match exported {
        true => format!("export type {name} ="),
        false => format!("type {name} ="),
    }
}

#[derive(Debug, Clone)]
pub struct TypeAlias {
    name: String,
    doc: Option<String>,
    ty: String,
    exported: bool,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            ty: ty.into(),
            exported: true,
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    /// Drop `export`, for members of a `declare namespace`.
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let statement = format!("{} {};", type_statement(self.exported, &self.name), self.ty);
        CodeFragment::docs(self.doc.as_deref())
            .into_iter()
            .chain([CodeFragment::Line(statement)])
            .collect()
    }
}

/// A union type. Up to three variants stay on one line; longer unions put
/// each variant on its own `|` line.
#[derive(Debug, Clone)]
pub struct Union {
    name: String,
    doc: Option<String>,
    variants: Vec<String>,
    exported: bool,
}

impl Union {
    const MAX_INLINE_VARIANTS: usize = 3;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            variants: Vec::new(),
            exported: true,
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn variants(mut self, variants: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

impl Renderable for Union {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let head = type_statement(self.exported, &self.name);
        let declaration = match self.variants.as_slice() {
            [] => CodeFragment::Line(format!("{head} never;")),
            short if short.len() <= Self::MAX_INLINE_VARIANTS => {
                CodeFragment::Line(format!("{head} {};", short.join(" | ")))
            }
            [rest @ .., last] => {
                let body = rest
                    .iter()
                    .map(|v| CodeFragment::Line(format!("| {v}")))
                    .chain([CodeFragment::Line(format!("| {last};"))])
                    .collect();
                CodeFragment::block(head, body, None)
            }
        };

        CodeFragment::docs(self.doc.as_deref())
            .into_iter()
            .chain([declaration])
            .collect()
    }
}
