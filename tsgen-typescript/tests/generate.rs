//! Whole-package generation over a small movie database API.

use std::{collections::BTreeMap, fs};

use tempfile::TempDir;
use tsgen_codegen::{GeneratorOptions, Target, pipeline::Pipeline};
use tsgen_ir::{
    DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, EnumValue, Environment,
    EnvironmentsConfig, ErrorDeclaration, HttpEndpoint, HttpMethod, HttpService,
    IntermediateRepresentation, NameAndWireValue, ObjectProperty, SingleUnionType,
    SingleUnionTypeProperties, SingleUnionTypeProperty, TypeDeclaration, TypeReference,
    TypeShape,
};
use tsgen_typescript::{DuplicateFilePathLint, Generator, LanguageCodegen};

fn movie() -> DeclaredTypeName {
    DeclaredTypeName::new(&["imdb"], "Movie")
}

fn movie_id() -> DeclaredTypeName {
    DeclaredTypeName::new(&["imdb"], "MovieId")
}

fn expr() -> DeclaredTypeName {
    DeclaredTypeName::new(&["calc"], "Expr")
}

fn api() -> IntermediateRepresentation {
    let mut ir = IntermediateRepresentation::new("acme");
    ir.types.push(TypeDeclaration::new(
        movie_id(),
        TypeShape::Alias {
            alias_of: TypeReference::string(),
        },
    ));
    ir.types.push(TypeDeclaration::new(
        DeclaredTypeName::new(&["imdb"], "Genre"),
        TypeShape::Enum {
            values: vec![EnumValue::new("drama"), EnumValue::new("comedy")],
        },
    ));
    ir.types.push(TypeDeclaration::new(
        movie(),
        TypeShape::Object {
            extends: Vec::new(),
            properties: vec![
                ObjectProperty::new(NameAndWireValue::new("id"), TypeReference::named(movie_id())),
                ObjectProperty::new(
                    NameAndWireValue::renamed("release_year", "releaseYear"),
                    TypeReference::optional(TypeReference::primitive(
                        tsgen_ir::PrimitiveType::Integer,
                    )),
                ),
            ],
        },
    ));
    ir.types.push(TypeDeclaration::new(
        expr(),
        TypeShape::Union {
            discriminant: NameAndWireValue::new("type"),
            extends: Vec::new(),
            base_properties: Vec::new(),
            types: vec![
                SingleUnionType::new(
                    "negate",
                    SingleUnionTypeProperties::SingleProperty(SingleUnionTypeProperty {
                        name: NameAndWireValue::new("operand"),
                        type_: TypeReference::named(expr()),
                    }),
                ),
                SingleUnionType::new("zero", SingleUnionTypeProperties::NoProperties),
            ],
        },
    ));

    let not_found = DeclaredErrorName::new(&["imdb"], "MovieNotFound");
    let conflict = DeclaredErrorName::new(&["imdb"], "Conflict");
    ir.errors.push(
        ErrorDeclaration::new(not_found.clone(), 404).with_body(TypeReference::named(movie_id())),
    );
    ir.errors.push(
        ErrorDeclaration::new(conflict.clone(), 409)
            .with_body(TypeReference::list(TypeReference::string())),
    );

    ir.environments = Some(EnvironmentsConfig {
        default_environment: Some("Production".to_string()),
        environments: vec![Environment::new("Production", "https://api.acme.com")],
    });

    ir.services.push(
        HttpService::new(DeclaredServiceName::new(&[]))
            .endpoint(HttpEndpoint::new("health", HttpMethod::Get, "/health")),
    );
    ir.services.push(
        HttpService::new(DeclaredServiceName::new(&["imdb"]))
            .endpoint(
                HttpEndpoint::new("getMovie", HttpMethod::Get, "/movies")
                    .with_response(TypeReference::named(movie()))
                    .with_error(not_found),
            )
            .endpoint(
                HttpEndpoint::new("createMovie", HttpMethod::Post, "/movies")
                    .with_request(TypeReference::named(movie()))
                    .with_error(conflict),
            ),
    );
    ir.services.push(
        HttpService::new(DeclaredServiceName::new(&["imdb", "v2"]))
            .endpoint(HttpEndpoint::new("list", HttpMethod::Get, "/movies")),
    );
    ir.services.push(
        HttpService::new(DeclaredServiceName::new(&["calc"])).endpoint(
            HttpEndpoint::new("evaluate", HttpMethod::Post, "/eval")
                .with_request(TypeReference::named(expr())),
        ),
    );
    ir
}

fn options() -> GeneratorOptions {
    GeneratorOptions::new("@acme/sdk", "Acme")
}

fn preview() -> BTreeMap<String, String> {
    preview_of(api())
}

fn preview_of(ir: IntermediateRepresentation) -> BTreeMap<String, String> {
    preview_with(ir, options())
}

fn preview_with(
    ir: IntermediateRepresentation,
    options: GeneratorOptions,
) -> BTreeMap<String, String> {
    Generator::new(ir, options)
        .preview()
        .unwrap()
        .into_iter()
        .map(|file| (file.path, file.content))
        .collect()
}

#[test]
fn test_tree_shape() {
    let files = preview();
    let paths: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "Client.ts",
            "api/calc/client/Client.ts",
            "api/calc/client/evaluate.ts",
            "api/calc/client/index.ts",
            "api/calc/index.ts",
            "api/calc/types/Expr.ts",
            "api/calc/types/index.ts",
            "api/client/health.ts",
            "api/client/index.ts",
            "api/imdb/ImdbClient.ts",
            "api/imdb/client/Client.ts",
            "api/imdb/client/createMovie.ts",
            "api/imdb/client/getMovie.ts",
            "api/imdb/client/index.ts",
            "api/imdb/errors/Conflict.ts",
            "api/imdb/errors/MovieNotFound.ts",
            "api/imdb/errors/index.ts",
            "api/imdb/index.ts",
            "api/imdb/types/Genre.ts",
            "api/imdb/types/Movie.ts",
            "api/imdb/types/MovieId.ts",
            "api/imdb/types/index.ts",
            "api/imdb/v2/client/Client.ts",
            "api/imdb/v2/client/index.ts",
            "api/imdb/v2/client/list.ts",
            "api/imdb/v2/index.ts",
            "api/index.ts",
            "environments.ts",
            "index.ts",
            "package.json",
            "serialization/calc/index.ts",
            "serialization/calc/types/Expr.ts",
            "serialization/calc/types/index.ts",
            "serialization/imdb/client/createMovie.ts",
            "serialization/imdb/client/getMovie.ts",
            "serialization/imdb/client/index.ts",
            "serialization/imdb/errors/Conflict.ts",
            "serialization/imdb/errors/index.ts",
            "serialization/imdb/index.ts",
            "serialization/imdb/types/Genre.ts",
            "serialization/imdb/types/Movie.ts",
            "serialization/imdb/types/MovieId.ts",
            "serialization/imdb/types/index.ts",
            "serialization/index.ts",
        ]
    );
}

fn express() -> BTreeMap<String, String> {
    let mut options = GeneratorOptions::new("@acme/server", "Acme");
    options.target = Target::Express;
    preview_with(api(), options)
}

#[test]
fn test_every_file_is_reachable_from_the_root_barrel() {
    assert_reachable(&preview());
    assert_reachable(&express());
}

fn assert_reachable(files: &BTreeMap<String, String>) {
    for path in files.keys() {
        if !path.ends_with(".ts") || path == "index.ts" {
            continue;
        }
        // Walk up: each file must be re-exported by the barrel next to it,
        // and each directory by its parent's barrel.
        let mut current = path.trim_end_matches(".ts").to_string();
        if current.ends_with("/index") {
            current.truncate(current.len() - "/index".len());
        }
        loop {
            let (directory, name) = match current.rsplit_once('/') {
                Some((directory, name)) => (directory.to_string(), name.to_string()),
                None => (String::new(), current.clone()),
            };
            let barrel_path = if directory.is_empty() {
                "index.ts".to_string()
            } else {
                format!("{directory}/index.ts")
            };
            let barrel = files
                .get(&barrel_path)
                .unwrap_or_else(|| panic!("missing barrel {barrel_path} for {path}"));
            assert!(
                barrel.contains(&format!("from \"./{name}\";")),
                "{barrel_path} does not re-export ./{name} (needed by {path})"
            );
            if directory.is_empty() {
                break;
            }
            current = directory;
        }
    }
}

#[test]
fn test_root_barrel() {
    let files = preview();
    insta::assert_snapshot!(files["index.ts"], @r#"
    // This file was auto-generated by tsgen. Do not edit.

    export * from "./Client";
    export * as Acme from "./api";
    export * from "./environments";
    export * as serialization from "./serialization";
    export { AcmeClient as default } from "./Client";
    "#);
}

#[test]
fn test_express_tree_shape() {
    let files = express();
    let paths: Vec<&str> = files.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "AcmeError.ts",
            "api/calc/index.ts",
            "api/calc/service/CalcService.ts",
            "api/calc/service/index.ts",
            "api/calc/types/Expr.ts",
            "api/calc/types/index.ts",
            "api/imdb/errors/Conflict.ts",
            "api/imdb/errors/MovieNotFound.ts",
            "api/imdb/errors/index.ts",
            "api/imdb/index.ts",
            "api/imdb/service/ImdbService.ts",
            "api/imdb/service/index.ts",
            "api/imdb/types/Genre.ts",
            "api/imdb/types/Movie.ts",
            "api/imdb/types/MovieId.ts",
            "api/imdb/types/index.ts",
            "api/imdb/v2/index.ts",
            "api/imdb/v2/service/ImdbV2Service.ts",
            "api/imdb/v2/service/index.ts",
            "api/index.ts",
            "api/service/RootService.ts",
            "api/service/index.ts",
            "index.ts",
            "package.json",
            "register.ts",
            "serialization/calc/index.ts",
            "serialization/calc/types/Expr.ts",
            "serialization/calc/types/index.ts",
            "serialization/imdb/errors/Conflict.ts",
            "serialization/imdb/errors/index.ts",
            "serialization/imdb/index.ts",
            "serialization/imdb/types/Genre.ts",
            "serialization/imdb/types/Movie.ts",
            "serialization/imdb/types/MovieId.ts",
            "serialization/imdb/types/index.ts",
            "serialization/index.ts",
        ]
    );

    insta::assert_snapshot!(files["index.ts"], @r#"
    // This file was auto-generated by tsgen. Do not edit.

    export * from "./AcmeError";
    export * as Acme from "./api";
    export * from "./register";
    export * as serialization from "./serialization";
    "#);
}

#[test]
fn test_express_routers_serialize_through_the_shared_trees() {
    let files = express();

    let service = &files["api/imdb/service/ImdbService.ts"];
    assert!(service.contains("import * as Acme from \"../..\";\n"));
    assert!(service.contains("import * as serializers from \"../../../serialization\";\n"));
    assert!(service.contains("import { AcmeError } from \"../../../AcmeError\";\n"));
    assert!(service.contains("    this.router.post(\"/movies\", async (req, res, next) => {\n"));
    assert!(service.contains("      const request = serializers.imdb.Movie.parse(req.body, "));
    assert!(service.contains("if (!(error instanceof Acme.imdb.MovieNotFound)) {\n"));
    assert!(service.contains("if (!(error instanceof Acme.imdb.Conflict)) {\n"));

    let not_found = &files["api/imdb/errors/MovieNotFound.ts"];
    assert!(not_found.contains("export class MovieNotFound extends AcmeError {\n"));
    assert!(not_found.contains("serializers.imdb.MovieId.jsonOrThrow(this.body, "));
    let conflict = &files["api/imdb/errors/Conflict.ts"];
    assert!(conflict.contains("serializers.imdb.Conflict.jsonOrThrow(this.body, "));

    let register = &files["register.ts"];
    for mount in ["_root", "imdb._root", "imdb.v2", "calc"] {
        assert!(
            register.contains(&format!("(expressApp as any).use(services.{mount}.toRouter());\n")),
            "register.ts does not mount {mount}"
        );
    }

    let manifest = &files["package.json"];
    assert!(manifest.contains("\"express\": \"^4.18.2\""));
    assert!(manifest.contains("\"@types/express\": \"^4.17.17\""));
    assert!(!files.contains_key("Client.ts"));
    assert!(!files.contains_key("environments.ts"));
}

#[test]
fn test_namespaced_package_barrels() {
    let files = preview();
    let imdb = &files["api/imdb/index.ts"];
    assert!(imdb.contains("export * from \"./ImdbClient\";\n"));
    assert!(imdb.contains("export * from \"./client\";\n"));
    assert!(imdb.contains("export * from \"./errors\";\n"));
    assert!(imdb.contains("export * from \"./types\";\n"));
    assert!(imdb.contains("export * as v2 from \"./v2\";\n"));

    let client = &files["api/imdb/client/index.ts"];
    assert!(client.contains("export * from \"./Client\";\n"));
    assert!(client.contains("export * as getMovie from \"./getMovie\";\n"));
}

#[test]
fn test_clients_are_composed_through_aliases() {
    let files = preview();
    let root = &files["Client.ts"];
    assert!(root.contains("import { ImdbClient } from \"./api/imdb/ImdbClient\";\n"));
    assert!(root.contains("import { Client as CalcClient } from \"./api/calc/client/Client\";\n"));
    assert!(root.contains(
        "  public async health(): Promise<core.APIResponse<void, Acme.health.Error>> {\n"
    ));
    assert!(root.contains("  public get calc(): CalcClient {\n"));

    let wrapper = &files["api/imdb/ImdbClient.ts"];
    assert!(wrapper.contains("export class ImdbClient extends ImdbService {\n"));
    assert!(wrapper.contains("  public get v2(): ImdbV2Client {\n"));
}

#[test]
fn test_recursive_union_schema_is_lazy() {
    let files = preview();
    let schema = &files["serialization/calc/types/Expr.ts"];
    assert!(schema.contains("core.serialization.lazy(() => Expr)"));

    let client = &files["api/calc/client/Client.ts"];
    assert!(client.contains("body: serializers.calc.Expr.jsonOrThrow(request, "));
}

fn object(
    name: &DeclaredTypeName,
    extends: Vec<DeclaredTypeName>,
    fields: Vec<(&str, TypeReference)>,
) -> TypeDeclaration {
    TypeDeclaration::new(
        name.clone(),
        TypeShape::Object {
            extends,
            properties: fields
                .into_iter()
                .map(|(key, ty)| ObjectProperty::new(NameAndWireValue::new(key), ty))
                .collect(),
        },
    )
}

/// `Keeper` extends `Pet` without a cycle; `Owner` and `Dog` refer to each
/// other across packages.
fn zoo() -> IntermediateRepresentation {
    let pet = DeclaredTypeName::new(&["zoo"], "Pet");
    let owner = DeclaredTypeName::new(&["zoo"], "Owner");
    let dog = DeclaredTypeName::new(&["farm"], "Dog");

    let mut ir = IntermediateRepresentation::new("acme");
    ir.types.push(object(
        &DeclaredTypeName::new(&["zoo"], "Keeper"),
        vec![pet.clone()],
        vec![("pet", TypeReference::named(pet.clone()))],
    ));
    ir.types.push(object(&pet, Vec::new(), vec![("name", TypeReference::string())]));
    ir.types.push(object(&owner, Vec::new(), vec![("dog", TypeReference::named(dog.clone()))]));
    ir.types.push(object(
        &dog,
        Vec::new(),
        vec![("owner", TypeReference::optional(TypeReference::named(owner)))],
    ));
    ir
}

#[test]
fn test_schema_files_import_their_dependencies_directly() {
    let files = preview_of(zoo());

    let keeper = &files["serialization/zoo/types/Keeper.ts"];
    assert!(keeper.contains("import { Pet } from \"./Pet\";\n"));
    assert!(keeper.contains("  pet: Pet,\n"));
    assert!(keeper.contains("}).extend(Pet);\n"));
    assert!(keeper.contains("interface Raw extends Pet.Raw {\n"));

    let owner = &files["serialization/zoo/types/Owner.ts"];
    assert!(owner.contains("import { Dog } from \"../../farm/types/Dog\";\n"));
    assert!(owner.contains("  dog: core.serialization.lazyObject(() => Dog),\n"));
    let dog = &files["serialization/farm/types/Dog.ts"];
    assert!(dog.contains("  owner: core.serialization.lazyObject(() => Owner).optional(),\n"));

    for (path, content) in &files {
        if path.starts_with("serialization/") && !path.ends_with("index.ts") {
            assert!(!content.contains("serializers"), "{path} imports the serialization barrel");
        }
    }
}

#[test]
fn test_error_without_own_schema_is_skipped() {
    let dir = TempDir::new().unwrap();
    let result = Generator::new(api(), options()).generate(dir.path()).unwrap();

    assert!(
        result
            .skipped
            .contains(&"serialization/imdb/errors/MovieNotFound.ts".to_string())
    );
    assert!(
        result
            .skipped
            .contains(&"serialization/imdb/v2/client/list.ts".to_string())
    );
    assert!(!dir.path().join("serialization/imdb/errors/MovieNotFound.ts").exists());

    let errors_barrel =
        fs::read_to_string(dir.path().join("serialization/imdb/errors/index.ts")).unwrap();
    assert!(!errors_barrel.contains("MovieNotFound"));
    assert!(errors_barrel.contains("export * from \"./Conflict\";\n"));
}

#[test]
fn test_generate_writes_package() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sdk");
    let result = Generator::new(api(), options()).generate(&output).unwrap();

    for file in &result.files {
        assert!(output.join(file).is_file(), "{file} was not written");
    }
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(output.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "@acme/sdk");
    assert_eq!(manifest["dependencies"]["@tsgen/core"], "^0.1.0");
    assert_eq!(manifest["devDependencies"]["typescript"], "~5.4.0");
}

#[test]
fn test_regenerating_replaces_stale_files() {
    let dir = TempDir::new().unwrap();
    let stale = dir.path().join("api/old/types/Gone.ts");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "stale").unwrap();

    Generator::new(api(), options()).generate(dir.path()).unwrap();
    assert!(!stale.exists());
    assert!(dir.path().join("index.ts").is_file());
}

#[test]
fn test_pipeline_rejects_colliding_files() {
    let mut ir = api();
    ir.types.push(TypeDeclaration::new(
        DeclaredTypeName::new(&["imdb"], "movie"),
        TypeShape::Alias {
            alias_of: TypeReference::string(),
        },
    ));

    let err = Pipeline::new()
        .lint(DuplicateFilePathLint::new("Acme"))
        .run(ir, options())
        .unwrap_err();
    assert_eq!(err.to_string(), "Validation failed with 1 error(s)");
}

#[test]
fn test_generator_from_pipeline_context() {
    let ctx = Pipeline::new()
        .lint(DuplicateFilePathLint::new("Acme"))
        .run(api(), options())
        .unwrap();
    let generator = Generator::from_context(&ctx).unwrap();
    assert_eq!(generator.language(), "typescript");
    assert_eq!(generator.preview().unwrap().len(), preview().len());
}
