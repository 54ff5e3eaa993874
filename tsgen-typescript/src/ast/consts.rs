use tsgen_codegen::builder::{CodeFragment, Renderable};

/// `export const name: ty = value;`
///
/// A multi-line value keeps its own indentation; the `;` goes after the
/// last line.
#[derive(Debug, Clone)]
pub struct Const {
    name: String,
    value: String,
    ty: Option<String>,
}

impl Const {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            ty: None,
        }
    }

    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = Some(ty.into());
        self
    }
}

impl Renderable for Const {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let annotation = self.ty.as_ref().map(|ty| format!(": {ty}")).unwrap_or_default();
        let first = format!("export const {}{annotation} = ", self.name);

        let mut lines: Vec<String> = self.value.lines().map(str::to_string).collect();
        match lines.first_mut() {
            Some(head) => head.insert_str(0, &first),
            None => lines.push(first.trim_end().to_string()),
        }
        if let Some(last) = lines.last_mut() {
            last.push(';');
        }
        lines.into_iter().map(CodeFragment::Line).collect()
    }
}
