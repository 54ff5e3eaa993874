//! `environments.ts`: the named base URLs a client can target.

use tsgen_codegen::{GenerationError, builder::Renderable};
use tsgen_ir::EnvironmentsConfig;

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Const, Union, property_key, string_literal},
    context::FileContext,
    zurg,
};

pub struct EnvironmentsFile<'a> {
    name: String,
    config: Option<&'a EnvironmentsConfig>,
}

impl<'a> EnvironmentsFile<'a> {
    pub fn new(name: String, config: Option<&'a EnvironmentsConfig>) -> Self {
        Self { name, config }
    }
}

impl DeclarationFile for EnvironmentsFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        let Some(config) = self.config.filter(|config| !config.environments.is_empty()) else {
            return Ok(CodeFile::new());
        };
        ctx.reserve(&self.name);

        let entries: Vec<String> = config
            .environments
            .iter()
            .map(|env| {
                format!(
                    "{}: {}",
                    property_key(&env.name.pascal_case),
                    string_literal(&env.url)
                )
            })
            .collect();
        let variants = config
            .environments
            .iter()
            .map(|env| format!("typeof {}.{}", self.name, env.name.pascal_case));

        let body: Vec<Box<dyn Renderable>> = vec![
            Box::new(Const::new(
                self.name.as_str(),
                format!("{} as const", zurg::block("{", &entries, "}")),
            )),
            Box::new(Union::new(self.name.as_str()).variants(variants)),
        ];
        Ok(ctx.code_file().add_all(body))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{Environment, IntermediateRepresentation};

    use super::*;
    use crate::declaration_referencer::Referencers;

    #[test]
    fn test_environments() {
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let ir = IntermediateRepresentation::new("acme");
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let resolvers = Resolvers::new(Arc::new(ir));
        let config = EnvironmentsConfig {
            default_environment: Some("production".to_string()),
            environments: vec![
                Environment::new("production", "https://api.acme.com"),
                Environment::new("staging", "https://staging.acme.com"),
            ],
        };

        let mut ctx = FileContext::new("environments.ts", &referencers, &resolvers, &options);
        let code = EnvironmentsFile::new("AcmeEnvironment".to_string(), Some(&config))
            .generate(&mut ctx)
            .unwrap()
            .render();
        insta::assert_snapshot!(code, @r#"
        // This file was auto-generated by tsgen. Do not edit.

        export const AcmeEnvironment = {
          Production: "https://api.acme.com",
          Staging: "https://staging.acme.com",
        } as const;

        export type AcmeEnvironment = typeof AcmeEnvironment.Production | typeof AcmeEnvironment.Staging;
        "#);

        let mut ctx = FileContext::new("environments.ts", &referencers, &resolvers, &options);
        let empty = EnvironmentsFile::new("AcmeEnvironment".to_string(), None)
            .generate(&mut ctx)
            .unwrap();
        assert!(empty.is_empty());
    }
}
