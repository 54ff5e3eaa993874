use tsgen_codegen::{
    builder::{CodeFragment, Renderable},
    generation::ModuleImports,
};

/// One `import` statement.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    namespace: Option<String>,
    /// `(imported, local)`
    named: Vec<(String, String)>,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            namespace: None,
            named: Vec::new(),
        }
    }

    /// The statements importing what a file needs from `from`.
    ///
    /// `import * as X` cannot be combined with named bindings, so a module
    /// may need two statements.
    pub fn for_module(from: &str, imports: &ModuleImports) -> Vec<Import> {
        let mut statements = Vec::new();
        if let Some(namespace) = imports.namespace() {
            statements.push(Import::new(from).namespace(namespace));
        }
        let named = imports
            .named()
            .fold(Import::new(from), |import, (imported, local)| {
                import.named_as(imported, local)
            });
        if !named.named.is_empty() {
            statements.push(named);
        }
        statements
    }

    pub fn namespace(mut self, name: impl Into<String>) -> Self {
        self.namespace = Some(name.into());
        self
    }

    pub fn named_as(mut self, name: impl Into<String>, local: impl Into<String>) -> Self {
        self.named.push((name.into(), local.into()));
        self
    }

    fn bindings(&self) -> Option<String> {
        let named = (!self.named.is_empty()).then(|| {
            let list: Vec<String> = self
                .named
                .iter()
                .map(|(name, local)| match name == local {
                    true => name.clone(),
                    false => format!("{name} as {local}"),
                })
                .collect();
            format!("{{ {} }}", list.join(", "))
        });
        self.namespace
            .as_ref()
            .map(|ns| format!("* as {ns}"))
            .or(named)
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let statement = match self.bindings() {
            Some(bindings) => format!("import {bindings} from \"{}\";", self.from),
            None => format!("import \"{}\";", self.from),
        };
        vec![CodeFragment::Line(statement)]
    }
}
