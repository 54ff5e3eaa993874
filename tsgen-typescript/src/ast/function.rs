use tsgen_codegen::builder::{CodeFragment, Renderable};

/// `export function name(params): ty { body }`
///
/// Several parameters go one per line. A parameter type spanning lines
/// keeps its own indentation relative to the parameter.
#[derive(Debug, Clone)]
pub struct Function {
    name: String,
    doc: Option<String>,
    params: Vec<String>,
    return_type: String,
    body: Vec<CodeFragment>,
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            return_type: "void".to_string(),
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn param(mut self, name: &str, ty: &str) -> Self {
        self.params.push(format!("{name}: {ty}"));
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = ty.into();
        self
    }

    pub fn body(mut self, body: Vec<CodeFragment>) -> Self {
        self.body = body;
        self
    }

    fn header(&self) -> String {
        let params = match self.params.as_slice() {
            [] => String::new(),
            [single] => single.clone(),
            several => {
                let mut out = String::from("\n");
                for param in several {
                    out.push_str("  ");
                    out.push_str(&param.replace('\n', "\n  "));
                    out.push_str(",\n");
                }
                out
            }
        };
        format!(
            "export function {}({params}): {} {{",
            self.name, self.return_type
        )
    }
}

impl Renderable for Function {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments: Vec<CodeFragment> =
            CodeFragment::docs(self.doc.as_deref()).into_iter().collect();
        fragments.push(CodeFragment::Block {
            header: self.header(),
            body: self.body.clone(),
            close: Some("}".to_string()),
        });
        fragments
    }
}
