//! TypeScript SDK generator.

use std::{path::Path, sync::Arc};

use eyre::Result;
use serde_json::json;
use tsgen_codegen::{
    GeneratorOptions, Target,
    generation::{
        DependencyCollector, DependencySpec, ExportedFilePath, ExportsManager, FileCategory,
        FileEntry, FileRegistry,
    },
    language::{GenerateResult, LanguageCodegen, PreviewFile},
    pipeline::CompilationContext,
    resolvers::Resolvers,
};
use tsgen_ir::{IntermediateRepresentation, PackagePath};

use crate::{
    CodeFile,
    ast::Export,
    context::{EXPRESS_IMPORT, FileContext},
    declaration_referencer::{EndpointName, Referencer, Referencers, WrapperName},
    generators::{
        ApiErrorFile, ClientSettings, DeclarationFile, EndpointErrorFile, EndpointErrorSchemaFile,
        EnvironmentsFile, ErrorFile, ErrorSchemaFile, ExpressErrorFile, ExpressServiceFile,
        RegisterFile, RootClientFile, ServiceClientFile, TypeFile, TypeSchemaFile,
        WrapperClientFile,
    },
};

/// Version range of the runtime library the generated code is written against.
pub const CORE_RUNTIME_VERSION: &str = "^0.1.0";

/// Compiler the package is built with.
const TYPESCRIPT_VERSION: &str = "~5.4.0";

const EXPRESS_VERSION: &str = "^4.18.2";
const EXPRESS_TYPES_VERSION: &str = "^4.17.17";

/// Generates a TypeScript SDK package from an IR document.
pub struct Generator {
    ir: Arc<IntermediateRepresentation>,
    options: GeneratorOptions,
    resolvers: Resolvers,
    referencers: Referencers,
}

/// Output accumulated during one run.
#[derive(Default)]
struct Output {
    registry: FileRegistry,
    exports: ExportsManager,
    dependencies: DependencyCollector,
    skipped: Vec<String>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn file_extension(&self) -> &'static str {
        "ts"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let (registry, _) = self.build()?;
        Ok(registry
            .entries()
            .map(|entry| PreviewFile {
                path: entry.path.clone(),
                content: entry.content.clone(),
            })
            .collect())
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let (registry, skipped) = self.build()?;
        let stats = registry.write_all(output_dir)?;
        tracing::info!(
            kind = ?self.options.target,
            written = stats.written,
            skipped = skipped.len(),
            output = %output_dir.display(),
            "Generated TypeScript package"
        );
        Ok(GenerateResult {
            files: registry.entries().map(|entry| entry.path.clone()).collect(),
            skipped,
        })
    }
}

impl Generator {
    pub fn new(ir: impl Into<Arc<IntermediateRepresentation>>, options: GeneratorOptions) -> Self {
        let ir = ir.into();
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        Self {
            resolvers: Resolvers::new(ir.clone()),
            ir,
            options,
            referencers,
        }
    }

    /// Reuse the IR, options and resolvers of a pipeline run.
    pub fn from_context(ctx: &CompilationContext) -> Result<Self> {
        let resolvers = ctx.resolvers()?.clone();
        Ok(Self {
            referencers: Referencers::new(&ctx.ir.api_name, &ctx.options.namespace_export),
            ir: ctx.ir.clone(),
            options: ctx.options.clone(),
            resolvers,
        })
    }

    /// Render every file of the package in memory.
    ///
    /// Returns the registry and the paths of declarations whose file came out
    /// empty.
    fn build(&self) -> Result<(FileRegistry, Vec<String>)> {
        let mut out = Output::default();
        out.dependencies
            .add("typescript", DependencySpec::new(TYPESCRIPT_VERSION).dev());
        let referencers = &self.referencers;

        for declaration in &self.ir.types {
            let name = &declaration.name;
            self.emit(
                &mut out,
                referencers.types.exported_filepath(name),
                FileCategory::Declaration,
                &TypeFile::new(declaration),
            )?;
            self.emit(
                &mut out,
                referencers.type_schemas.exported_filepath(name),
                FileCategory::Schema,
                &TypeSchemaFile::new(declaration),
            )?;
        }

        for declaration in &self.ir.errors {
            let name = &declaration.name;
            let path = referencers.errors.exported_filepath(name);
            match self.options.target {
                Target::Sdk => self.emit(
                    &mut out,
                    path,
                    FileCategory::Declaration,
                    &ErrorFile::new(declaration),
                )?,
                Target::Express => self.emit(
                    &mut out,
                    path,
                    FileCategory::Declaration,
                    &ExpressErrorFile::new(declaration),
                )?,
            }
            self.emit(
                &mut out,
                referencers.error_schemas.exported_filepath(name),
                FileCategory::Schema,
                &ErrorSchemaFile::new(declaration),
            )?;
        }

        let default_export = match self.options.target {
            Target::Sdk => Some(self.emit_clients(&mut out)?),
            Target::Express => {
                self.emit_server(&mut out)?;
                None
            }
        };

        for barrel in out.exports.finalize()? {
            let mut file = CodeFile::new().exports(
                barrel
                    .exports
                    .iter()
                    .map(|(module, declaration)| Export::declaration(module.as_str(), declaration)),
            );
            if let (true, Some(root_client)) = (barrel.directory.is_empty(), &default_export) {
                file = file.export(
                    Export::new()
                        .from("./Client")
                        .named_as(root_client.as_str(), "default"),
                );
            }
            tracing::trace!(path = %barrel.path(), "Generating barrel");
            out.registry
                .register(FileEntry::barrel(barrel.path(), file.render()))?;
        }

        out.registry
            .register(FileEntry::root("package.json", self.package_json(&out.dependencies)?))?;

        Ok((out.registry, out.skipped))
    }

    /// Endpoint error unions, clients and environments. Returns the name of
    /// the root client, the package's default export.
    fn emit_clients(&self, out: &mut Output) -> Result<String> {
        let settings = ClientSettings::from_ir(&self.ir);
        let referencers = &self.referencers;

        for service in &self.ir.services {
            for endpoint in &service.endpoints {
                let name = EndpointName::new(&service.name, endpoint);
                self.emit(
                    out,
                    referencers.endpoint_errors.exported_filepath(&name),
                    FileCategory::Declaration,
                    &EndpointErrorFile::new(endpoint),
                )?;
                self.emit(
                    out,
                    referencers.endpoint_error_schemas.exported_filepath(&name),
                    FileCategory::Schema,
                    &EndpointErrorSchemaFile::new(&name, endpoint),
                )?;
            }
            // Root endpoints live on the root client.
            if !service.name.package.is_root() {
                self.emit(
                    out,
                    referencers.services.exported_filepath(&service.name),
                    FileCategory::Declaration,
                    &ServiceClientFile::new(service, settings),
                )?;
            }
        }

        for package in self.wrapper_packages() {
            let wrapper = WrapperName::new(package.clone());
            let class = referencers.wrappers.exported_name(&wrapper);
            self.emit(
                out,
                referencers.wrappers.exported_filepath(&wrapper),
                FileCategory::Declaration,
                &WrapperClientFile::new(package, class, settings),
            )?;
        }

        let root_client = referencers.root_client.exported_name(&());
        self.emit(
            out,
            referencers.root_client.exported_filepath(&()),
            FileCategory::Root,
            &RootClientFile::new(root_client.clone(), self.ir.api_docs.as_deref(), settings),
        )?;
        self.emit(
            out,
            referencers.environments.exported_filepath(&()),
            FileCategory::Root,
            &EnvironmentsFile::new(
                referencers.environments.exported_name(&()),
                self.ir.environments.as_ref(),
            ),
        )?;
        Ok(root_client)
    }

    /// The error base class, one router per service and `register`.
    fn emit_server(&self, out: &mut Output) -> Result<()> {
        let referencers = &self.referencers;
        self.emit(
            out,
            referencers.api_error.exported_filepath(&()),
            FileCategory::Root,
            &ApiErrorFile::new(referencers.api_error.exported_name(&())),
        )?;
        for service in &self.ir.services {
            self.emit(
                out,
                referencers.express_services.exported_filepath(&service.name),
                FileCategory::Declaration,
                &ExpressServiceFile::new(
                    service,
                    referencers.express_services.exported_name(&service.name),
                ),
            )?;
        }
        self.emit(
            out,
            referencers.register.exported_filepath(&()),
            FileCategory::Root,
            &RegisterFile::new(referencers.register.exported_name(&())),
        )
    }

    /// Generate one declaration's file and record its exports.
    fn emit(
        &self,
        out: &mut Output,
        path: ExportedFilePath,
        category: FileCategory,
        file: &dyn DeclarationFile,
    ) -> Result<()> {
        let relative = path.path();
        tracing::debug!(path = %relative, "Generating");
        let mut ctx = FileContext::new(
            relative.as_str(),
            &self.referencers,
            &self.resolvers,
            &self.options,
        );
        let code = file.generate(&mut ctx)?;
        if code.is_empty() {
            tracing::debug!(path = %relative, "Skipping (no content)");
            out.skipped.push(relative);
            return Ok(());
        }
        if ctx.uses_core() {
            out.dependencies.add(
                self.options.core_package.as_str(),
                DependencySpec::new(CORE_RUNTIME_VERSION),
            );
        }
        if ctx.uses_express() {
            out.dependencies
                .add(EXPRESS_IMPORT, DependencySpec::new(EXPRESS_VERSION));
            out.dependencies
                .add("@types/express", DependencySpec::new(EXPRESS_TYPES_VERSION).dev());
        }
        out.registry.register(FileEntry::new(relative, code.render(), category))?;
        out.exports.add_exports_for_filepath(&path)?;
        Ok(())
    }

    fn package_json(&self, dependencies: &DependencyCollector) -> Result<String> {
        let (dev, runtime): (Vec<_>, Vec<_>) =
            dependencies.sorted().into_iter().partition(|(_, spec)| spec.dev);
        let to_map = |deps: Vec<(&str, &DependencySpec)>| {
            deps.into_iter()
                .map(|(name, spec)| (name.to_string(), json!(spec.version)))
                .collect::<serde_json::Map<_, _>>()
        };
        let manifest = json!({
            "name": self.options.package_name,
            "version": "0.0.0",
            "main": "./index.js",
            "types": "./index.d.ts",
            "dependencies": to_map(runtime),
            "devDependencies": to_map(dev),
        });
        Ok(format!("{}\n", serde_json::to_string_pretty(&manifest)?))
    }

    /// Packages that get a wrapper client.
    pub fn wrapper_packages(&self) -> Vec<&PackagePath> {
        self.resolvers
            .services
            .packages()
            .iter()
            .filter(|package| {
                !package.is_root() && !self.resolvers.services.subpackages_of(package).is_empty()
            })
            .collect()
    }
}
