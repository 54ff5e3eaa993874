use tsgen_codegen::builder::{CodeFragment, Renderable};

/// A method of a [`Class`].
#[derive(Debug, Clone)]
pub struct Method {
    name: String,
    doc: Option<String>,
    params: Vec<String>,
    return_type: Option<String>,
    is_async: bool,
    body: Vec<CodeFragment>,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            return_type: None,
            is_async: false,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    /// Add a parameter; `optional` renders `name?: ty`.
    pub fn param(mut self, name: &str, ty: &str, optional: bool) -> Self {
        let question = if optional { "?" } else { "" };
        self.params.push(format!("{name}{question}: {ty}"));
        self
    }

    /// Add a parameter with a default value.
    pub fn param_with_default(mut self, name: &str, ty: &str, default: &str) -> Self {
        self.params.push(format!("{name}: {ty} = {default}"));
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn asynchronous(mut self) -> Self {
        self.is_async = true;
        self
    }

    pub fn body(mut self, body: Vec<CodeFragment>) -> Self {
        self.body = body;
        self
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        let prefix = if self.is_async { "public async " } else { "public " };
        let returns = self
            .return_type
            .as_ref()
            .map(|ty| format!(": {ty}"))
            .unwrap_or_default();
        let mut fragments: Vec<CodeFragment> =
            CodeFragment::docs(self.doc.as_deref()).into_iter().collect();
        fragments.push(CodeFragment::Block {
            header: format!(
                "{prefix}{}({}){returns} {{",
                self.name,
                self.params.join(", ")
            ),
            body: self.body.clone(),
            close: Some("}".to_string()),
        });
        fragments
    }
}

/// A `get` accessor of a [`Class`].
#[derive(Debug, Clone)]
pub struct Getter {
    name: String,
    ty: String,
    body: Vec<CodeFragment>,
}

impl Getter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            body: Vec::new(),
        }
    }

    pub fn body(mut self, body: Vec<CodeFragment>) -> Self {
        self.body = body;
        self
    }

    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Block {
            header: format!("public get {}(): {} {{", self.name, self.ty),
            body: self.body.clone(),
            close: Some("}".to_string()),
        }]
    }
}

/// Builder for exported TypeScript classes.
///
/// Members are rendered in insertion order with a blank line between them.
#[derive(Debug, Clone)]
pub struct Class {
    name: String,
    doc: Option<String>,
    is_abstract: bool,
    extends: Option<String>,
    members: Vec<Vec<CodeFragment>>,
}

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            is_abstract: false,
            extends: None,
            members: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Add a constructor with the given parameter list and body.
    pub fn constructor(mut self, params: &str, body: Vec<CodeFragment>) -> Self {
        let fragment = if body.is_empty() {
            CodeFragment::Line(format!("constructor({params}) {{}}"))
        } else {
            CodeFragment::Block {
                header: format!("constructor({params}) {{"),
                body,
                close: Some("}".to_string()),
            }
        };
        self.members.push(vec![fragment]);
        self
    }

    /// Add a field declaration line, e.g. `private _imdb: ImdbClient | undefined;`.
    pub fn field(mut self, declaration: impl Into<String>) -> Self {
        self.members.push(vec![CodeFragment::Line(declaration.into())]);
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        self.members.push(method.to_fragments());
        self
    }

    pub fn getter(mut self, getter: Getter) -> Self {
        self.members.push(getter.to_fragments());
        self
    }
}

impl Renderable for Class {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            CodeFragment::docs(self.doc.as_deref()).into_iter().collect();
        let keyword = if self.is_abstract { "abstract class" } else { "class" };
        let header = match &self.extends {
            Some(parent) => format!("export {keyword} {} extends {parent} {{", self.name),
            None => format!("export {keyword} {} {{", self.name),
        };
        if self.members.is_empty() {
            fragments.push(CodeFragment::Line(format!("{header}}}")));
            return fragments;
        }

        let mut body = Vec::new();
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                body.push(CodeFragment::Blank);
            }
            body.extend(member.iter().cloned());
        }
        fragments.push(CodeFragment::Block {
            header,
            body,
            close: Some("}".to_string()),
        });
        fragments
    }
}
