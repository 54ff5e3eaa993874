//! Import and dependency collection.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

/// What a local identifier in a file is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    Named { module: String, name: String },
    Namespace { module: String },
    Reserved,
}

/// Imports from a single module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleImports {
    namespace: Option<String>,
    /// Imported name -> local binding (sorted for deterministic output)
    named: BTreeMap<String, String>,
}

impl ModuleImports {
    /// Local name of `import * as x`.
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// `(imported, local)` pairs; they differ when the import is aliased.
    pub fn named(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Tracks the imports of one generated file.
///
/// Every import returns the local identifier to use at the reference site.
/// The first module to claim an identifier keeps it; later claims from a
/// different module get a numeric suffix (`Foo`, `Foo2`, `Foo3`, ...).
/// Modules are kept in first-use order.
///
/// # Example
///
/// ```
/// use tsgen_codegen::generation::ImportsManager;
///
/// let mut imports = ImportsManager::new();
/// assert_eq!(imports.add_named("./types/Movie", "Movie"), "Movie");
/// assert_eq!(imports.add_named("../other/Movie", "Movie"), "Movie2");
/// assert_eq!(imports.add_named("./types/Movie", "Movie"), "Movie");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImportsManager {
    modules: IndexMap<String, ModuleImports>,
    bindings: HashMap<String, Binding>,
}

impl ImportsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim an identifier declared by the file itself so no import binds it.
    pub fn reserve(&mut self, local: &str) {
        self.bindings.entry(local.to_string()).or_insert(Binding::Reserved);
    }

    /// `import { name } from "module"`; returns the local binding.
    pub fn add_named(&mut self, module: &str, name: &str) -> String {
        self.add_named_as(module, name, name)
    }

    /// Like [`Self::add_named`], preferring `alias` as the local binding.
    pub fn add_named_as(&mut self, module: &str, name: &str, alias: &str) -> String {
        if let Some(local) = self
            .modules
            .get(module)
            .and_then(|imports| imports.named.get(name))
        {
            return local.clone();
        }
        let local = self.bind(
            alias,
            Binding::Named {
                module: module.to_string(),
                name: name.to_string(),
            },
        );
        self.modules
            .entry(module.to_string())
            .or_default()
            .named
            .insert(name.to_string(), local.clone());
        local
    }

    /// `import * as alias from "module"`; returns the local binding.
    pub fn add_namespace(&mut self, module: &str, alias: &str) -> String {
        if let Some(local) = self.modules.get(module).and_then(|m| m.namespace.clone()) {
            return local;
        }
        let local = self.bind(
            alias,
            Binding::Namespace {
                module: module.to_string(),
            },
        );
        self.modules.entry(module.to_string()).or_default().namespace = Some(local.clone());
        local
    }

    fn bind(&mut self, preferred: &str, binding: Binding) -> String {
        let mut candidate = preferred.to_string();
        let mut suffix = 2;
        loop {
            match self.bindings.get(&candidate) {
                Some(existing) if *existing == binding => return candidate,
                Some(_) => {
                    candidate = format!("{preferred}{suffix}");
                    suffix += 1;
                }
                None => {
                    self.bindings.insert(candidate.clone(), binding);
                    return candidate;
                }
            }
        }
    }

    /// Iterate over modules in first-use order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleImports)> {
        self.modules.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn has_module(&self, module: &str) -> bool {
        self.modules.contains_key(module)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }
}

/// Version requirement for an npm dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySpec {
    /// Version range (e.g., "^1.0.0")
    pub version: String,
    pub dev: bool,
}

impl DependencySpec {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            dev: false,
        }
    }

    pub fn dev(mut self) -> Self {
        self.dev = true;
        self
    }
}

/// Tracks npm packages required by generated code.
///
/// # Example
///
/// ```
/// use tsgen_codegen::generation::{DependencyCollector, DependencySpec};
///
/// let mut deps = DependencyCollector::new();
/// deps.add("@tsgen/core", DependencySpec::new("^0.1.0"));
/// deps.add("typescript", DependencySpec::new("^5.0.0").dev());
///
/// for (name, spec) in deps.sorted() {
///     println!("\"{}\": \"{}\"", name, spec.version);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct DependencyCollector {
    deps: HashMap<String, DependencySpec>,
}

impl DependencyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency. If it already exists, this is a no-op.
    pub fn add(&mut self, name: impl Into<String>, spec: DependencySpec) {
        self.deps.entry(name.into()).or_insert(spec);
    }

    pub fn get(&self, name: &str) -> Option<&DependencySpec> {
        self.deps.get(name)
    }

    /// Dependencies sorted by name for deterministic output.
    pub fn sorted(&self) -> Vec<(&str, &DependencySpec)> {
        let mut deps: Vec<_> = self.deps.iter().map(|(k, v)| (k.as_str(), v)).collect();
        deps.sort_by_key(|(name, _)| *name);
        deps
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_symbol_from_two_modules_is_aliased() {
        let mut imports = ImportsManager::new();
        let first = imports.add_named("./types/Movie", "Movie");
        let second = imports.add_named("../../other/types/Movie", "Movie");
        let third = imports.add_named("./third/Movie", "Movie");

        assert_eq!(first, "Movie");
        assert_eq!(second, "Movie2");
        assert_eq!(third, "Movie3");

        let other = imports
            .iter()
            .find(|(module, _)| *module == "../../other/types/Movie")
            .unwrap()
            .1;
        assert_eq!(other.named().collect::<Vec<_>>(), vec![("Movie", "Movie2")]);
    }

    #[test]
    fn test_duplicate_imports_are_merged() {
        let mut imports = ImportsManager::new();
        imports.add_named("./a", "Foo");
        imports.add_named("./a", "Bar");
        imports.add_named("./a", "Foo");

        assert_eq!(imports.len(), 1);
        let (_, module) = imports.iter().next().unwrap();
        assert_eq!(
            module.named().collect::<Vec<_>>(),
            vec![("Bar", "Bar"), ("Foo", "Foo")]
        );
    }

    #[test]
    fn test_reserved_names_are_never_bound() {
        let mut imports = ImportsManager::new();
        imports.reserve("Movie");
        assert_eq!(imports.add_named("./Movie", "Movie"), "Movie2");
    }

    #[test]
    fn test_namespace_and_named_collide() {
        let mut imports = ImportsManager::new();
        assert_eq!(imports.add_namespace("../core", "core"), "core");
        assert_eq!(imports.add_namespace("../core", "core"), "core");
        assert_eq!(imports.add_named("./utils", "core"), "core2");
        assert_eq!(imports.add_named_as("./lib", "Core", "core"), "core3");
    }

    #[test]
    fn test_modules_keep_first_use_order() {
        let mut imports = ImportsManager::new();
        imports.add_named("./z", "Z");
        imports.add_namespace("../core", "core");
        imports.add_named("./a", "A");

        let order: Vec<_> = imports.iter().map(|(m, _)| m).collect();
        assert_eq!(order, vec!["./z", "../core", "./a"]);
    }

    #[test]
    fn test_dependency_collector() {
        let mut deps = DependencyCollector::new();
        deps.add("zod", DependencySpec::new("^3.0.0"));
        deps.add("@tsgen/core", DependencySpec::new("^0.1.0"));
        deps.add("@tsgen/core", DependencySpec::new("^9.9.9"));

        assert_eq!(deps.len(), 2);
        assert_eq!(deps.get("@tsgen/core").unwrap().version, "^0.1.0");
        let names: Vec<_> = deps.sorted().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["@tsgen/core", "zod"]);
    }
}
