//! Generate command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from SDK generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// npm package name of the generated SDK.
    pub package_name: String,

    /// Warning messages from validation.
    pub warnings: Vec<String>,

    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
    /// Validation errors; nothing was generated.
    Invalid(Vec<String>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Number of files written.
    pub files: usize,
    /// Files dropped because they had no content.
    pub skipped: Vec<String>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl GenerateReport {
    /// Whether generation ran.
    pub fn is_success(&self) -> bool {
        !matches!(self.result, GenerationResult::Invalid(_))
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => render_preview(out, files),
            GenerationResult::Invalid(errors) => {
                for error in errors {
                    out.error(error);
                }
                out.newline();
                out.preformatted(&format!(
                    "{} not generated: {} error(s)",
                    self.package_name,
                    errors.len()
                ));
            }
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value("Package", &self.package_name);
        out.key_value(
            "Generated",
            &format!("{} files in {}", written.files, written.output_dir.display()),
        );

        if !written.skipped.is_empty() {
            out.newline();
            out.section("Skipped (no content)");
            for path in &written.skipped {
                out.removed_item(path);
            }
        }
    }
}

fn render_preview(out: &mut dyn Output, files: &[PreviewFile]) {
    for file in files {
        out.divider(&file.path);
        out.preformatted(&file.content);
    }

    out.divider("Summary");
    out.preformatted(&format!("{} files would be generated", files.len()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::output::RecordingOutput;

    #[test]
    fn test_written_lists_skipped_files() {
        let report = GenerateReport {
            package_name: "@acme/sdk".to_string(),
            warnings: vec!["example does not match".to_string()],
            result: GenerationResult::Written(WrittenResult {
                output_dir: PathBuf::from("sdk"),
                files: 12,
                skipped: vec!["serialization/imdb/errors/NotFound.ts".to_string()],
            }),
        };

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines,
            vec![
                "warning: example does not match",
                "Package: @acme/sdk",
                "Generated: 12 files in sdk",
                "",
                "Skipped (no content):",
                "  - serialization/imdb/errors/NotFound.ts",
            ]
        );
    }

    #[test]
    fn test_invalid() {
        let report = GenerateReport {
            package_name: "@acme/sdk".to_string(),
            warnings: Vec::new(),
            result: GenerationResult::Invalid(vec!["unknown type".to_string()]),
        };
        assert!(!report.is_success());

        let mut out = RecordingOutput::default();
        report.render(&mut out);
        assert_eq!(
            out.lines.last().map(String::as_str),
            Some("@acme/sdk not generated: 1 error(s)")
        );
    }
}
