use std::path::PathBuf;

use tsgen_ir::IntermediateRepresentation;

use super::output::{Output, Report};

/// Declaration counts shown after a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrSummary {
    pub api_name: String,
    pub types: usize,
    pub errors: usize,
    pub endpoints: usize,
}

impl IrSummary {
    pub fn of(ir: &IntermediateRepresentation) -> Self {
        Self {
            api_name: ir.api_name.original_name.clone(),
            types: ir.types.len(),
            errors: ir.errors.len(),
            endpoints: ir.services.iter().map(|s| s.endpoints.len()).sum(),
        }
    }
}

/// Outcome of `tsgen check`: lint findings for one IR document.
#[derive(Debug)]
pub struct CheckReport {
    pub ir_path: PathBuf,
    pub summary: IrSummary,
    /// Rendered error diagnostics; any entry fails the check.
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        self.errors.iter().for_each(|e| out.error(e));
        self.warnings.iter().for_each(|w| out.warning(w));

        if !self.is_valid() {
            out.newline();
            out.preformatted(&format!(
                "{} is invalid: {} error(s)",
                self.ir_path.display(),
                self.errors.len()
            ));
            return;
        }

        if !self.warnings.is_empty() {
            out.newline();
        }
        let IrSummary {
            api_name,
            types,
            errors,
            endpoints,
        } = &self.summary;
        out.preformatted(&format!("✓ {} is valid", self.ir_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {api_name}: {types} types, {errors} errors, {endpoints} endpoints"
        ));
    }
}
