use tsgen_codegen::{
    builder::{CodeFragment, Renderable},
    generation::ExportDeclaration,
};

/// A re-export statement, as written in barrels.
#[derive(Debug, Clone, Default)]
pub struct Export {
    from: Option<String>,
    namespace: Option<String>,
    /// `(local, exported)`
    named: Vec<(String, String)>,
}

impl Export {
    pub fn new() -> Self {
        Self::default()
    }

    /// The barrel statement for `module`: `export *` or `export * as X`.
    pub fn declaration(module: impl Into<String>, declaration: &ExportDeclaration) -> Self {
        let export = Self::new().from(module);
        match declaration {
            ExportDeclaration::All => export,
            ExportDeclaration::Namespace(name) => export.namespace(name.clone()),
        }
    }

    pub fn from(mut self, module: impl Into<String>) -> Self {
        self.from = Some(module.into());
        self
    }

    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    /// `{ name as exported }`
    pub fn named_as(mut self, name: impl Into<String>, exported: impl Into<String>) -> Self {
        self.named.push((name.into(), exported.into()));
        self
    }

    fn statement(&self) -> Option<String> {
        let named = || {
            self.named
                .iter()
                .map(|(local, exported)| match local == exported {
                    true => local.clone(),
                    false => format!("{local} as {exported}"),
                })
                .collect::<Vec<_>>()
                .join(", ")
        };

        match (&self.from, &self.namespace, self.named.is_empty()) {
            (Some(from), None, true) => Some(format!("export * from \"{from}\";")),
            (Some(from), Some(ns), true) => Some(format!("export * as {ns} from \"{from}\";")),
            (Some(from), None, false) => Some(format!("export {{ {} }} from \"{from}\";", named())),
            (None, None, false) => Some(format!("export {{ {} }};", named())),
            // a namespace needs a source module and excludes named exports
            _ => None,
        }
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.statement().map(CodeFragment::Line).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::render;

    #[test]
    fn test_local_export() {
        let export = Export::new().named_as("foo", "foo").named_as("bar", "baz");
        assert_eq!(render(&export), "export { foo, bar as baz };\n");
    }

    #[test]
    fn test_barrel_statements() {
        assert_eq!(
            render(&Export::declaration("./types", &ExportDeclaration::All)),
            "export * from \"./types\";\n"
        );
        assert_eq!(
            render(&Export::declaration("./api", &ExportDeclaration::Namespace("Acme".into()))),
            "export * as Acme from \"./api\";\n"
        );
    }

    #[test]
    fn test_default_re_export() {
        let export = Export::new().from("./Client").named_as("AcmeClient", "default");
        assert_eq!(render(&export), "export { AcmeClient as default } from \"./Client\";\n");
    }

    #[test]
    fn test_namespace_without_module_renders_nothing() {
        assert_eq!(render(&Export::new().namespace("Acme")), "");
    }
}
