//! Indented text buffer that [`CodeFragment`] trees are flattened into.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates generated source text at a current indentation level.
///
/// ```
/// use tsgen_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::typescript();
/// builder
///     .push_line("export interface Movie {")
///     .push_indent()
///     .push_line("title: string;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "export interface Movie {\n  title: string;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// 2-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    /// Add a line at the current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        for _ in 0..self.level {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Add a JSDoc comment. Single-line text stays on one line; `*/` inside
    /// the text is escaped so it cannot close the comment early.
    pub fn push_jsdoc(&mut self, text: &str) -> &mut Self {
        let lines: Vec<String> = text
            .trim_end()
            .lines()
            .map(|line| line.replace("*/", "*\\/"))
            .collect();
        if let [single] = lines.as_slice() {
            return self.push_line(&format!("/** {single} */"));
        }

        self.push_line("/**");
        for line in &lines {
            if line.is_empty() {
                self.push_line(" *");
            } else {
                self.push_line(&format!(" * {line}"));
            }
        }
        self.push_line(" */")
    }

    /// Flatten a node into the buffer.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header).push_indent();
                body.into_iter().for_each(|f| self.apply_fragment(f));
                self.push_dedent();
                if let Some(close) = close {
                    self.push_line(&close);
                }
            }
            CodeFragment::JsDoc(text) => {
                self.push_jsdoc(&text);
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::typescript()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indentation_and_blank_lines() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_line("import * as core from \"../core\";")
            .push_blank()
            .push_line("function foo() {")
            .push_indent()
            .push_line("return 1;")
            .push_dedent()
            .push_line("}");

        assert_eq!(
            builder.build(),
            "import * as core from \"../core\";\n\nfunction foo() {\n  return 1;\n}\n"
        );
    }

    #[test]
    fn test_single_line_jsdoc() {
        let mut builder = CodeBuilder::typescript();
        builder.push_jsdoc("A movie\n").push_line("export interface Movie {}");
        assert_eq!(builder.build(), "/** A movie */\nexport interface Movie {}\n");
    }

    #[test]
    fn test_multi_line_jsdoc() {
        let mut builder = CodeBuilder::typescript();
        builder.push_indent().push_jsdoc("First line\n\nSecond */ line");

        assert_eq!(
            builder.build(),
            "  /**\n   * First line\n   *\n   * Second *\\/ line\n   */\n"
        );
    }

    #[test]
    fn test_emit_nested_fragments() {
        struct Greeter;
        impl Renderable for Greeter {
            fn to_fragments(&self) -> Vec<CodeFragment> {
                vec![
                    CodeFragment::jsdoc("Greets"),
                    CodeFragment::block(
                        "export function greet(): void {",
                        vec![CodeFragment::block(
                            "if (ready) {",
                            vec![CodeFragment::line("console.log(\"hi\");")],
                            Some("}".to_string()),
                        )],
                        Some("}".to_string()),
                    ),
                ]
            }
        }

        let mut builder = CodeBuilder::typescript();
        builder.emit(&Greeter);
        assert_eq!(
            builder.build(),
            concat!(
                "/** Greets */\nexport function greet(): void {\n",
                "  if (ready) {\n    console.log(\"hi\");\n  }\n}\n",
            )
        );
    }
}
