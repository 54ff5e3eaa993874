use tsgen_codegen::builder::{CodeFragment, Renderable};

use super::Field;

/// Builder for TypeScript interfaces.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    extends: Vec<String>,
    fields: Vec<Field>,
    /// Members that are not plain properties (method signatures)
    members: Vec<String>,
    exported: bool,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            extends: Vec::new(),
            fields: Vec::new(),
            members: Vec::new(),
            exported: true,
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends.push(parent.into());
        self
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.fields.push(Field::new(name, ty));
        self
    }

    /// Add a field with full configuration.
    pub fn field_with(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Add a member line such as a method signature, without the trailing `;`.
    pub fn member(mut self, signature: impl Into<String>) -> Self {
        self.members.push(signature.into());
        self
    }

    /// Make this interface private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    fn header(&self) -> String {
        let export = if self.exported { "export " } else { "" };
        if self.extends.is_empty() {
            format!("{export}interface {}", self.name)
        } else {
            format!(
                "{export}interface {} extends {}",
                self.name,
                self.extends.join(", ")
            )
        }
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            CodeFragment::docs(self.doc.as_deref()).into_iter().collect();

        if self.fields.is_empty() && self.members.is_empty() {
            fragments.push(CodeFragment::Line(format!("{} {{}}", self.header())));
            return fragments;
        }

        let body = self
            .fields
            .iter()
            .flat_map(Field::to_fragments)
            .chain(
                self.members
                    .iter()
                    .map(|member| CodeFragment::Line(format!("{member};"))),
            )
            .collect();
        fragments.push(CodeFragment::Block {
            header: format!("{} {{", self.header()),
            body,
            close: Some("}".to_string()),
        });
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::render;

    #[test]
    fn test_empty_interface() {
        assert_eq!(render(&Interface::new("Empty")), "export interface Empty {}\n");
    }

    #[test]
    fn test_interface_with_fields() {
        let i = Interface::new("Movie")
            .doc(Some("A movie"))
            .extends("Acme.Base")
            .field("id", "Acme.MovieId")
            .field_with(Field::new("rating", "number").optional().doc(Some("Out of 10")));
        insta::assert_snapshot!(render(&i), @r"
        /** A movie */
        export interface Movie extends Acme.Base {
          id: Acme.MovieId;
          /** Out of 10 */
          rating?: number;
        }
        ");
    }

    #[test]
    fn test_private_interface_with_member() {
        let i = Interface::new("Lion")
            .private()
            .field("type", "\"lion\"")
            .member("_visit: <_Result>(visitor: Animal._Visitor<_Result>) => _Result");
        assert_eq!(
            render(&i),
            concat!(
                "interface Lion {\n  type: \"lion\";\n  _visit: <_Result>(visitor: ",
                "Animal._Visitor<_Result>) => _Result;\n}\n",
            )
        );
    }
}
