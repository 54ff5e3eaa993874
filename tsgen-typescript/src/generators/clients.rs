//! Client classes.
//!
//! - [`ServiceClientFile`]: `api/<package>/client/Client.ts`, one method per
//!   endpoint of the package's service.
//! - [`WrapperClientFile`]: `api/<package>/<Package>Client.ts` for packages
//!   with sub-packages. It extends the package's own service (if any) and
//!   exposes a getter per sub-package client.
//! - [`RootClientFile`]: `Client.ts` in the package root, holding the root
//!   service's endpoints and the top-level package clients.
//!
//! Every client takes the same `Options` object and hands it down to the
//! clients it creates.

use tsgen_codegen::{
    GenerationError,
    builder::{CodeFragment, Renderable},
};
use tsgen_core::to_camel_case;
use tsgen_ir::{
    ApiAuth, AuthRequirement, AuthScheme, EnvironmentsConfig, HttpEndpoint, HttpHeader, HttpPath,
    HttpService, IntermediateRepresentation, PackagePath, TypeReference,
};

use super::DeclarationFile;
use crate::{
    CodeFile,
    ast::{Class, Field, Getter, Interface, Method, Namespace, property_key, string_literal},
    context::{FileContext, SchemaReferencing, ServiceReferencing},
    declaration_referencer::EndpointName,
    naming::safe_name,
    type_reference::{parsed_property, parsed_type, stringify_query_value},
    zurg,
};

const OPTIONS: &str = "Options";
const REQUEST: &str = "request";

/// Settings shared by every client of an API.
#[derive(Debug, Clone, Copy)]
pub struct ClientSettings<'a> {
    pub environments: Option<&'a EnvironmentsConfig>,
    pub auth: &'a ApiAuth,
    pub headers: &'a [HttpHeader],
}

impl<'a> ClientSettings<'a> {
    pub fn from_ir(ir: &'a IntermediateRepresentation) -> Self {
        Self {
            environments: ir
                .environments
                .as_ref()
                .filter(|config| !config.environments.is_empty()),
            auth: &ir.auth,
            headers: &ir.headers,
        }
    }

    fn auth_optional(&self) -> bool {
        self.auth.requirement == AuthRequirement::Any
    }

    /// `declare namespace <class> { interface Options { ... } }`
    fn options_namespace(&self, ctx: &mut FileContext<'_>, class: &str) -> Namespace {
        let mut options = Interface::new(OPTIONS).private();
        match self.environments {
            Some(config) => {
                let environment = ctx.reference_to_environments();
                options = options.field_with(
                    Field::new("environment", format!("{environment} | string"))
                        .optional_if(config.default_environment.is_some()),
                );
            }
            None => options = options.field("environment", "string"),
        }

        let optional = self.auth_optional();
        for scheme in &self.auth.schemes {
            match scheme {
                AuthScheme::Bearer { token } => {
                    options = options
                        .field_with(Field::new(&token.camel_case, "string").optional_if(optional));
                }
                AuthScheme::Basic { username, password } => {
                    for name in [username, password] {
                        options = options.field_with(
                            Field::new(&name.camel_case, "string").optional_if(optional),
                        );
                    }
                }
                AuthScheme::Header {
                    name, value_type, ..
                } => {
                    let ty = parsed_type(ctx, value_type);
                    options = options
                        .field_with(Field::new(&name.name.camel_case, ty).optional_if(optional));
                }
            }
        }
        for header in self.headers {
            let (ty, optional) = parsed_property(ctx, &header.value_type);
            options = options.field_with(
                Field::new(&header.name.name.camel_case, ty)
                    .optional_if(optional)
                    .doc(header.docs.as_deref()),
            );
        }
        Namespace::new(class).member(options)
    }

    /// Base URL expression used by every request.
    fn environment(&self, ctx: &mut FileContext<'_>) -> String {
        let default = self.environments.and_then(|config| {
            let id = config.default_environment.as_deref()?;
            config.environments.iter().find(|env| env.id == id)
        });
        match default {
            Some(env) => {
                let environment = ctx.reference_to_environments();
                format!(
                    "this.options.environment ?? {environment}.{}",
                    env.name.pascal_case
                )
            }
            None => "this.options.environment".to_string(),
        }
    }

    /// Header entries every request carries: authorization and API-wide
    /// headers.
    fn header_entries(&self, ctx: &mut FileContext<'_>) -> Result<Vec<String>, GenerationError> {
        let optional = self.auth_optional();
        let mut authorization = Vec::new();
        let mut entries = Vec::new();
        for scheme in &self.auth.schemes {
            match scheme {
                AuthScheme::Bearer { token } => {
                    let value = format!("this.options.{}", token.camel_case);
                    let bearer = format!("`Bearer ${{{value}}}`");
                    authorization.push(if optional {
                        format!("{value} != null ? {bearer} : undefined")
                    } else {
                        bearer
                    });
                }
                AuthScheme::Basic { username, password } => {
                    let core = ctx.core();
                    authorization.push(format!(
                        "{core}.BasicAuth.toAuthorizationHeader({{ username: this.options.{}, password: this.options.{} }})",
                        username.camel_case, password.camel_case
                    ));
                }
                AuthScheme::Header {
                    name,
                    value_type,
                    prefix,
                } => {
                    let value = stringify_query_value(
                        &*ctx,
                        value_type,
                        &format!("this.options.{}", name.name.camel_case),
                    )?;
                    let value = match prefix {
                        Some(prefix) => format!("`{prefix} ${{{}}}`", value.expression),
                        None => value.expression,
                    };
                    entries.push(format!("{}: {value}", string_literal(&name.wire_value)));
                }
            }
        }
        match authorization.as_slice() {
            [] => {}
            [single] => entries.insert(0, format!("Authorization: {single}")),
            several => {
                let chained: Vec<String> = several.iter().map(|a| format!("({a})")).collect();
                entries.insert(0, format!("Authorization: {}", chained.join(" ?? ")));
            }
        }
        for header in self.headers {
            let value = stringify_query_value(
                &*ctx,
                &header.value_type,
                &format!("this.options.{}", header.name.name.camel_case),
            )?;
            entries.push(format!(
                "{}: {}",
                string_literal(&header.name.wire_value),
                value.expression
            ));
        }
        Ok(entries)
    }
}

/// `api/<package>/client/Client.ts`
pub struct ServiceClientFile<'a> {
    service: &'a HttpService,
    settings: ClientSettings<'a>,
}

impl<'a> ServiceClientFile<'a> {
    pub const CLASS: &'static str = "Client";

    pub fn new(service: &'a HttpService, settings: ClientSettings<'a>) -> Self {
        Self { service, settings }
    }
}

impl DeclarationFile for ServiceClientFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(Self::CLASS);
        let namespace = self.settings.options_namespace(ctx, Self::CLASS);
        let mut class = Class::new(Self::CLASS)
            .doc(self.service.docs.as_deref())
            .constructor(&options_param(Self::CLASS), Vec::new());
        for endpoint in &self.service.endpoints {
            class = class.method(endpoint_method(ctx, &self.settings, self.service, endpoint)?);
        }
        Ok(ctx.code_file().add(namespace).add(class))
    }
}

/// `api/<package>/<Package>Client.ts`
pub struct WrapperClientFile<'a> {
    package: &'a PackagePath,
    class: String,
    settings: ClientSettings<'a>,
}

impl<'a> WrapperClientFile<'a> {
    pub fn new(package: &'a PackagePath, class: String, settings: ClientSettings<'a>) -> Self {
        Self {
            package,
            class,
            settings,
        }
    }
}

impl DeclarationFile for WrapperClientFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(&self.class);
        let resolvers = ctx.resolvers();
        let mut file_body: Vec<Box<dyn Renderable>> = Vec::new();

        let mut class = Class::new(self.class.as_str());
        if resolvers.services.service_in(self.package).is_some() {
            let alias = format!("{}Service", self.class.trim_end_matches("Client"));
            let service = ctx.reference_to_service_as(self.package, &alias);
            class = class.extends(service.expression);
        } else {
            file_body.push(Box::new(self.settings.options_namespace(ctx, &self.class)));
            class = class.constructor(&options_param(&self.class), Vec::new());
        }
        for child in resolvers.services.subpackages_of(self.package) {
            class = subpackage_getter(ctx, class, child);
        }
        file_body.push(Box::new(class));
        Ok(ctx.code_file().add_all(file_body))
    }
}

/// `Client.ts`
pub struct RootClientFile<'a> {
    class: String,
    docs: Option<&'a str>,
    settings: ClientSettings<'a>,
}

impl<'a> RootClientFile<'a> {
    pub fn new(class: String, docs: Option<&'a str>, settings: ClientSettings<'a>) -> Self {
        Self {
            class,
            docs,
            settings,
        }
    }
}

impl DeclarationFile for RootClientFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(&self.class);
        let resolvers = ctx.resolvers();
        let root = PackagePath::root();

        let namespace = self.settings.options_namespace(ctx, &self.class);
        let mut class = Class::new(self.class.as_str())
            .doc(self.docs)
            .constructor(&options_param(&self.class), Vec::new());
        if let Some(service) = resolvers.services.service_in(&root) {
            for endpoint in &service.endpoints {
                class = class.method(endpoint_method(ctx, &self.settings, service, endpoint)?);
            }
        }
        for child in resolvers.services.subpackages_of(&root) {
            class = subpackage_getter(ctx, class, child);
        }
        Ok(ctx.code_file().add(namespace).add(class))
    }
}

fn options_param(class: &str) -> String {
    format!("protected readonly options: {class}.{OPTIONS}")
}

/// A lazily created client for `child`, cached on first access.
fn subpackage_getter(ctx: &mut FileContext<'_>, class: Class, child: &PackagePath) -> Class {
    let Some(segment) = child.segments().last() else {
        return class;
    };
    let client = ctx.reference_to_client(child);
    let property = &segment.camel_case;
    class
        .field(format!("protected _{property}: {client} | undefined;"))
        .getter(
            Getter::new(property.as_str(), client.expression.as_str()).body(vec![
                CodeFragment::line(format!(
                    "return (this._{property} ??= new {client}(this.options));"
                )),
            ]),
        )
}

/// A property of the inline request object.
struct RequestField {
    key: String,
    ty: String,
    optional: bool,
}

fn endpoint_method(
    ctx: &mut FileContext<'_>,
    settings: &ClientSettings<'_>,
    service: &HttpService,
    endpoint: &HttpEndpoint,
) -> Result<Method, GenerationError> {
    let schema_options = ctx.options().schema;
    let mut method = Method::new(endpoint.name.camel_case.as_str())
        .doc(endpoint.docs.as_deref())
        .asynchronous();
    for parameter in &endpoint.path_parameters {
        let ty = parsed_type(ctx, &parameter.value_type);
        method = method.param(&safe_name(&parameter.name.camel_case), &ty, false);
    }

    // Query parameters and request headers travel in an inline request
    // object next to the body; without them the body is the request.
    let request_headers: Vec<&HttpHeader> =
        service.headers.iter().chain(&endpoint.headers).collect();
    let mut fields = Vec::new();
    for query in &endpoint.query_parameters {
        let (ty, optional) = parsed_property(ctx, &query.value_type);
        let ty = if query.allow_multiple {
            format!("{ty} | {}", array_type(&ty))
        } else {
            ty
        };
        fields.push(RequestField {
            key: query.name.name.camel_case.clone(),
            ty,
            optional,
        });
    }
    for header in &request_headers {
        let (ty, optional) = parsed_property(ctx, &header.value_type);
        fields.push(RequestField {
            key: header.name.name.camel_case.clone(),
            ty,
            optional,
        });
    }
    let body = endpoint
        .request_body
        .as_ref()
        .map(|body| &body.request_body_type);
    let body_access = match (fields.is_empty(), body) {
        (true, None) => None,
        (true, Some(body)) => {
            let ty = parsed_type(ctx, body);
            method = method.param(REQUEST, &ty, false);
            Some(REQUEST.to_string())
        }
        (false, body) => {
            let mut members: Vec<String> = fields
                .iter()
                .map(|field| {
                    let optional = if field.optional { "?" } else { "" };
                    format!("{}{optional}: {}", property_key(&field.key), field.ty)
                })
                .collect();
            if let Some(body) = body {
                members.push(format!("body: {}", parsed_type(ctx, body)));
            }
            let ty = format!("{{ {} }}", members.join("; "));
            if body.is_none() && fields.iter().all(|field| field.optional) {
                method = method.param_with_default(REQUEST, &ty, "{}");
            } else {
                method = method.param(REQUEST, &ty, false);
            }
            body.map(|_| format!("{REQUEST}.body"))
        }
    };

    let mut statements = Vec::new();
    if !endpoint.query_parameters.is_empty() {
        statements.push(CodeFragment::line("const _queryParams = new URLSearchParams();"));
        for query in &endpoint.query_parameters {
            statements.extend(append_query_parameter(
                ctx,
                &query.name.wire_value,
                &format!("{REQUEST}.{}", query.name.name.camel_case),
                &query.value_type,
                query.allow_multiple,
            )?);
        }
        statements.push(CodeFragment::Blank);
    }

    let mut headers = settings.header_entries(ctx)?;
    for header in &request_headers {
        let value = stringify_query_value(
            &*ctx,
            &header.value_type,
            &format!("{REQUEST}.{}", header.name.name.camel_case),
        )?;
        headers.push(format!(
            "{}: {}",
            string_literal(&header.name.wire_value),
            value.expression
        ));
    }

    let core = ctx.core();
    let environment = settings.environment(ctx);
    let mut call = vec![
        format!(
            "url: {core}.urlJoin({environment}, {})",
            path_expression(&service.base_path, endpoint)
        ),
        format!("method: {}", string_literal(endpoint.method.as_str())),
    ];
    if !headers.is_empty() {
        call.push(zurg::block("headers: {", &headers, "}"));
    }
    if !endpoint.query_parameters.is_empty() {
        call.push("queryParameters: _queryParams".to_string());
    }
    if let (Some(body), Some(access)) = (body, body_access) {
        let json = match body {
            TypeReference::Unknown => access,
            _ => format!(
                "{}.jsonOrThrow({access}, {})",
                schema_expression(ctx, body)?,
                zurg::json_options(&schema_options)
            ),
        };
        call.push(format!("body: {json}"));
    }
    statements.extend(lines(&zurg::block(
        &format!("const _response = await {core}.fetcher({{"),
        &call,
        "});",
    )));

    let response_body = endpoint.response.as_ref().map(|r| &r.response_body_type);
    let (response_type, parsed_body) = match response_body {
        None => ("void".to_string(), "undefined".to_string()),
        Some(TypeReference::Unknown) => ("unknown".to_string(), "_response.body".to_string()),
        Some(response) => (
            parsed_type(ctx, response),
            format!(
                "{}.parseOrThrow(_response.body, {})",
                schema_expression(ctx, response)?,
                zurg::parse_options(&schema_options)
            ),
        ),
    };
    statements.push(CodeFragment::block(
        "if (_response.ok) {",
        lines(&zurg::block(
            "return {",
            &["ok: true".to_string(), format!("body: {parsed_body}")],
            "};",
        )),
        Some("}".to_string()),
    ));
    statements.push(CodeFragment::Blank);

    let name = EndpointName::new(&service.name, endpoint);
    let error = ctx.reference_to_endpoint_error(&name);
    if !endpoint.errors.is_empty() {
        let schema = ctx.reference_to_endpoint_error_schema(&name);
        statements.push(CodeFragment::block(
            "if (_response.error.reason === \"status-code\") {",
            vec![
                CodeFragment::line(format!(
                    "const _error = {schema}.parse(_response.error.body, {});",
                    zurg::parse_options(&schema_options)
                )),
                CodeFragment::block(
                    "if (_error.ok) {",
                    vec![CodeFragment::line(
                        "return { ok: false, error: _error.value };",
                    )],
                    Some("}".to_string()),
                ),
            ],
            Some("}".to_string()),
        ));
        statements.push(CodeFragment::Blank);
    }
    statements.extend(lines(&zurg::block(
        "return {",
        &[
            "ok: false".to_string(),
            zurg::block(
                "error: {",
                &["errorName: undefined".to_string(), "content: _response.error".to_string()],
                "}",
            ),
        ],
        "};",
    )));

    Ok(method
        .returns(format!(
            "Promise<{core}.APIResponse<{response_type}, {error}>>"
        ))
        .body(statements))
}

/// Schema used to convert a request or response body.
pub(super) fn schema_expression(
    ctx: &mut FileContext<'_>,
    reference: &TypeReference,
) -> Result<String, GenerationError> {
    match reference {
        TypeReference::Named(name) => Ok(ctx.reference_to_schema(name).expression),
        other => zurg::schema_for(ctx, other, None),
    }
}

fn append_query_parameter(
    ctx: &FileContext<'_>,
    wire_value: &str,
    access: &str,
    value_type: &TypeReference,
    allow_multiple: bool,
) -> Result<Vec<CodeFragment>, GenerationError> {
    let item_type = match value_type {
        TypeReference::Container {
            container: tsgen_ir::ContainerType::Optional { item_type },
        } => item_type.as_ref(),
        other => other,
    };
    let nullable = value_type.is_optional();
    let key = string_literal(wire_value);
    let append = |value: &str| append_line(ctx, &key, item_type, value);

    if !allow_multiple {
        let single = append(access)?;
        return Ok(if nullable {
            vec![CodeFragment::block(
                format!("if ({access} != null) {{"),
                vec![single],
                Some("}".to_string()),
            )]
        } else {
            vec![single]
        });
    }

    let each = append("_item")?;
    let single = append(access)?;
    let otherwise = if nullable {
        format!("}} else if ({access} != null) {{")
    } else {
        "} else {".to_string()
    };
    Ok(vec![
        CodeFragment::block(
            format!("if (Array.isArray({access})) {{"),
            vec![CodeFragment::block(
                format!("for (const _item of {access}) {{"),
                vec![each],
                Some("}".to_string()),
            )],
            None,
        ),
        CodeFragment::block(otherwise, vec![single], Some("}".to_string())),
    ])
}

fn append_line(
    ctx: &FileContext<'_>,
    key: &str,
    item_type: &TypeReference,
    value: &str,
) -> Result<CodeFragment, GenerationError> {
    let value = stringify_query_value(ctx, item_type, value)?;
    Ok(CodeFragment::line(format!(
        "_queryParams.append({key}, {});",
        value.expression
    )))
}

fn array_type(item: &str) -> String {
    if item.contains(" | ") {
        format!("({item})[]")
    } else {
        format!("{item}[]")
    }
}

/// The service base path joined with the endpoint path. Path parameters
/// become URI-encoded template substitutions.
fn path_expression(base_path: &HttpPath, endpoint: &HttpEndpoint) -> String {
    let parameter = |original: &str| {
        endpoint
            .path_parameters
            .iter()
            .find(|p| p.name.original_name == original)
            .map(|p| safe_name(&p.name.camel_case))
            .unwrap_or_else(|| safe_name(&to_camel_case(original)))
    };

    let mut literal = String::new();
    let mut template = String::new();
    let mut has_parameters = false;
    for path in [base_path, &endpoint.path] {
        literal.push_str(&path.head);
        template.push_str(&escape_template(&path.head));
        for part in &path.parts {
            has_parameters = true;
            template.push_str(&format!(
                "${{encodeURIComponent({})}}",
                parameter(&part.path_parameter)
            ));
            template.push_str(&escape_template(&part.tail));
        }
    }
    if has_parameters {
        format!("`{template}`")
    } else {
        string_literal(&literal)
    }
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// One line fragment per line of a multi-line statement.
pub(super) fn lines(text: &str) -> Vec<CodeFragment> {
    text.lines().map(CodeFragment::line).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tsgen_codegen::{GeneratorOptions, resolvers::Resolvers};
    use tsgen_ir::{
        DeclaredErrorName, DeclaredServiceName, DeclaredTypeName, Environment, ErrorDeclaration,
        HttpMethod, HttpPathPart, Name, PathParameter,
    };

    use super::*;
    use crate::declaration_referencer::{Referencer, Referencers, WrapperName};

    fn movie() -> DeclaredTypeName {
        DeclaredTypeName::new(&["imdb"], "Movie")
    }

    fn imdb_ir() -> IntermediateRepresentation {
        let not_found = DeclaredErrorName::new(&["imdb"], "MovieNotFound");
        let mut ir = IntermediateRepresentation::new("acme");
        ir.errors.push(ErrorDeclaration::new(not_found.clone(), 404));
        ir.environments = Some(EnvironmentsConfig {
            default_environment: Some("Production".to_string()),
            environments: vec![Environment::new("Production", "https://api.acme.com")],
        });
        ir.auth.schemes.push(AuthScheme::Bearer {
            token: Name::new("token"),
        });

        let mut get_movie = HttpEndpoint::new("getMovie", HttpMethod::Get, "/movies/")
            .with_response(TypeReference::named(movie()))
            .with_error(not_found);
        get_movie.path.parts.push(HttpPathPart {
            path_parameter: "movieId".to_string(),
            tail: String::new(),
        });
        get_movie.path_parameters.push(PathParameter {
            name: Name::new("movieId"),
            value_type: TypeReference::string(),
            docs: None,
        });
        let search = HttpEndpoint::new("search", HttpMethod::Get, "/movies")
            .with_query("title", TypeReference::optional(TypeReference::string()))
            .with_query("year", TypeReference::primitive(tsgen_ir::PrimitiveType::Integer))
            .with_response(TypeReference::list(TypeReference::named(movie())));
        let create = HttpEndpoint::new("createMovie", HttpMethod::Post, "/movies")
            .with_request(TypeReference::named(movie()));

        ir.services.push(
            HttpService::new(DeclaredServiceName::new(&["imdb"]))
                .endpoint(get_movie)
                .endpoint(search)
                .endpoint(create),
        );
        ir.services.push(
            HttpService::new(DeclaredServiceName::new(&["imdb", "v2"]))
                .endpoint(HttpEndpoint::new("ping", HttpMethod::Get, "/ping")),
        );
        ir
    }

    fn generate_with(
        ir: IntermediateRepresentation,
        path: &str,
        f: impl FnOnce(&IntermediateRepresentation, &mut FileContext<'_>) -> CodeFile,
    ) -> String {
        let options = GeneratorOptions::new("@acme/sdk", "Acme");
        let referencers = Referencers::new(&ir.api_name, &options.namespace_export);
        let ir = Arc::new(ir);
        let resolvers = Resolvers::new(ir.clone());
        let mut ctx = FileContext::new(path, &referencers, &resolvers, &options);
        f(&ir, &mut ctx).render()
    }

    #[test]
    fn test_service_client_methods() {
        let code = generate_with(imdb_ir(), "api/imdb/client/Client.ts", |ir, ctx| {
            ServiceClientFile::new(&ir.services[0], ClientSettings::from_ir(ir))
                .generate(ctx)
                .unwrap()
        });

        assert!(code.contains("import { AcmeEnvironment } from \"../../../environments\";\n"));
        assert!(code.contains(
            "    environment?: AcmeEnvironment | string;\n    token: string;\n"
        ));
        assert!(code.contains("  constructor(protected readonly options: Client.Options) {}\n"));
        assert!(code.contains(
            concat!(
                "  public async getMovie(movieId: string): ",
                "Promise<core.APIResponse<Acme.imdb.Movie, Acme.imdb.getMovie.Error>> {\n",
            )
        ));
        assert!(code.contains(
            concat!(
                "      url: core.urlJoin(this.options.environment ?? AcmeEnvironment.Production, ",
                "`/movies/${encodeURIComponent(movieId)}`),\n",
            )
        ));
        assert!(code.contains("        Authorization: `Bearer ${this.options.token}`,\n"));
        assert!(code.contains(
            "    const _error = serializers.imdb.getMovie.Error.parse(_response.error.body, "
        ));
        assert!(code.contains(
            "        errorName: undefined,\n        content: _response.error,\n"
        ));
    }

    #[test]
    fn test_query_parameters_and_bodies() {
        let code = generate_with(imdb_ir(), "api/imdb/client/Client.ts", |ir, ctx| {
            ServiceClientFile::new(&ir.services[0], ClientSettings::from_ir(ir))
                .generate(ctx)
                .unwrap()
        });

        assert!(code.contains(
            concat!(
                "  public async search(request: { title?: string; year: number }): ",
                "Promise<core.APIResponse<Acme.imdb.Movie[], Acme.imdb.search.Error>> {\n",
            )
        ));
        assert!(code.contains(
            concat!(
                "    if (request.title != null) {\n      _queryParams.append(\"title\", ",
                "request.title);\n    }\n",
            )
        ));
        assert!(code.contains("    _queryParams.append(\"year\", request.year.toString());\n"));
        assert!(code.contains(
            "body: core.serialization.list(serializers.imdb.Movie).parseOrThrow(_response.body, "
        ));
        assert!(code.contains(
            concat!(
                "  public async createMovie(request: Acme.imdb.Movie): ",
                "Promise<core.APIResponse<void, Acme.imdb.createMovie.Error>> {\n",
            )
        ));
        assert!(code.contains("      body: serializers.imdb.Movie.jsonOrThrow(request, "));
        assert!(!code.contains("createMovie.Error.parse("));
    }

    #[test]
    fn test_wrapper_extends_own_service() {
        let code = generate_with(imdb_ir(), "api/imdb/ImdbClient.ts", |ir, ctx| {
            let package = &ir.services[0].name.package;
            let class = WrapperName::new(package.clone());
            let class_name = ctx.referencers().wrappers.exported_name(&class);
            WrapperClientFile::new(package, class_name, ClientSettings::from_ir(ir))
                .generate(ctx)
                .unwrap()
        });

        assert!(code.contains("import { Client as ImdbService } from \"./client/Client\";\n"));
        assert!(code.contains("import { Client as ImdbV2Client } from \"./v2/client/Client\";\n"));
        assert!(code.contains("export class ImdbClient extends ImdbService {\n"));
        assert!(code.contains("  protected _v2: ImdbV2Client | undefined;\n"));
        assert!(code.contains(
            concat!(
                "  public get v2(): ImdbV2Client {\n    return (this._v2 ??= new ",
                "ImdbV2Client(this.options));\n  }\n",
            )
        ));
    }

    #[test]
    fn test_root_client_without_environments() {
        let mut ir = imdb_ir();
        ir.environments = None;
        ir.auth = ApiAuth::default();
        let code = generate_with(ir, "Client.ts", |ir, ctx| {
            RootClientFile::new("AcmeClient".to_string(), None, ClientSettings::from_ir(ir))
                .generate(ctx)
                .unwrap()
        });

        insta::assert_snapshot!(code, @r#"
        // This file was auto-generated by tsgen. Do not edit.

        import { ImdbClient } from "./api/imdb/ImdbClient";

        export declare namespace AcmeClient {
          interface Options {
            environment: string;
          }
        }

        export class AcmeClient {
          constructor(protected readonly options: AcmeClient.Options) {}

          protected _imdb: ImdbClient | undefined;

          public get imdb(): ImdbClient {
            return (this._imdb ??= new ImdbClient(this.options));
          }
        }
        "#);
    }

    #[test]
    fn test_path_expression() {
        let endpoint = HttpEndpoint::new("list", HttpMethod::Get, "/movies");
        assert_eq!(
            path_expression(&HttpPath::literal("/v1"), &endpoint),
            "\"/v1/movies\""
        );
    }
}
