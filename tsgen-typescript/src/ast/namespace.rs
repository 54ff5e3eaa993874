//! `declare namespace` builder.

use tsgen_codegen::builder::{CodeFragment, Renderable};

/// Builder for `export declare namespace Name { ... }` blocks, which hold the
/// types that belong to a declaration of the same name.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    name: String,
    members: Vec<Vec<CodeFragment>>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn member<R: Renderable>(mut self, node: R) -> Self {
        self.members.push(node.to_fragments());
        self
    }

    pub fn push<R: Renderable>(&mut self, node: R) {
        self.members.push(node.to_fragments());
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl Renderable for Namespace {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.iter().cloned());
        }
        vec![CodeFragment::Block {
            header: format!("export declare namespace {} {{", self.name),
            body,
            close: Some("}".to_string()),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::render;
    use crate::ast::{Interface, TypeAlias};

    #[test]
    fn test_namespace_members() {
        let ns = Namespace::new("Movie")
            .member(TypeAlias::new("Raw", "string").private())
            .member(Interface::new("Extra").private());
        insta::assert_snapshot!(render(&ns), @r"
        export declare namespace Movie {
          type Raw = string;

          interface Extra {}
        }
        ");
    }
}
