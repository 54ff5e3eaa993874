//! Express server stubs.
//!
//! - [`ApiErrorFile`]: `<Api>Error.ts`, the abstract base of every error a
//!   service implementation may throw.
//! - [`ExpressErrorFile`]: `api/<package>/errors/<Name>.ts`, an error that
//!   serializes its body onto the response through the same schemas the
//!   serialization tree exports.
//! - [`ExpressServiceFile`]: `api/<package>/service/<Package>Service.ts`, the
//!   methods a server implements and the router that parses requests,
//!   calls them and serializes responses and errors.
//! - [`RegisterFile`]: `register.ts`, mounting every router on an app.

use tsgen_codegen::{GenerationError, builder::CodeFragment};
use tsgen_ir::{ErrorDeclaration, HttpEndpoint, HttpPath, HttpService, PackagePath, TypeReference};

use super::{
    DeclarationFile,
    clients::{lines, schema_expression},
};
use crate::{
    CodeFile,
    ast::{Class, Function, Interface, Method, property_key, string_literal},
    context::{ErrorReferencing, ExpressReferencing, FileContext, SchemaReferencing},
    type_reference::parsed_type,
    zurg,
};

/// Key of a package's own service inside the `services` argument of
/// `register`.
const ROOT_SERVICE_KEY: &str = "_root";

/// `<Api>Error.ts`
pub struct ApiErrorFile {
    class: String,
}

impl ApiErrorFile {
    pub fn new(class: String) -> Self {
        Self { class }
    }
}

impl DeclarationFile for ApiErrorFile {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        ctx.reserve(&self.class);
        let express = ctx.express();
        let class = Class::new(self.class.as_str())
            .abstract_class()
            .extends("Error")
            .constructor(
                "public readonly errorName?: string",
                vec![
                    CodeFragment::line("super();"),
                    CodeFragment::line(format!(
                        "Object.setPrototypeOf(this, {}.prototype);",
                        self.class
                    )),
                ],
            )
            .field(format!(
                "public abstract send(res: {express}.Response): Promise<void>;"
            ));
        Ok(ctx.code_file().add(class))
    }
}

/// `api/<package>/errors/<Name>.ts` for servers.
pub struct ExpressErrorFile<'a> {
    declaration: &'a ErrorDeclaration,
}

impl<'a> ExpressErrorFile<'a> {
    pub fn new(declaration: &'a ErrorDeclaration) -> Self {
        Self { declaration }
    }

    /// Statement writing the error onto `res`.
    fn send(&self, ctx: &mut FileContext<'_>) -> Result<String, GenerationError> {
        let status = self.declaration.status_code;
        let Some(body) = &self.declaration.type_ else {
            return Ok(format!("res.sendStatus({status});"));
        };
        let schema = match body {
            TypeReference::Unknown => None,
            TypeReference::Named(name) => Some(ctx.reference_to_schema(name)),
            _ => ctx.reference_to_error_schema(&self.declaration.name)?,
        };
        let json = match schema {
            Some(schema) => format!(
                "{schema}.jsonOrThrow(this.body, {})",
                zurg::json_options(&ctx.options().schema)
            ),
            None => "this.body".to_string(),
        };
        Ok(format!("res.status({status}).json({json});"))
    }
}

impl DeclarationFile for ExpressErrorFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        let name = &self.declaration.name.name.pascal_case;
        ctx.reserve(name);
        let base = ctx.reference_to_api_error();
        let express = ctx.express();

        let params = match &self.declaration.type_ {
            Some(body) => format!("public readonly body: {}", parsed_type(ctx, body)),
            None => String::new(),
        };
        let constructor = vec![
            CodeFragment::line(format!(
                "super({});",
                string_literal(&self.declaration.discriminant_value.wire_value)
            )),
            CodeFragment::line(format!("Object.setPrototypeOf(this, {name}.prototype);")),
        ];
        let send = Method::new("send")
            .asynchronous()
            .param("res", &format!("{express}.Response"), false)
            .returns("Promise<void>")
            .body(vec![CodeFragment::line(self.send(ctx)?)]);

        let class = Class::new(name.as_str())
            .doc(self.declaration.docs.as_deref())
            .extends(base.expression)
            .constructor(&params, constructor)
            .method(send);
        Ok(ctx.code_file().add(class))
    }
}

/// `api/<package>/service/<Package>Service.ts`
pub struct ExpressServiceFile<'a> {
    service: &'a HttpService,
    class: String,
}

impl<'a> ExpressServiceFile<'a> {
    pub fn new(service: &'a HttpService, class: String) -> Self {
        Self { service, class }
    }

    fn methods_interface(&self) -> String {
        format!("{}Methods", self.class)
    }
}

impl DeclarationFile for ExpressServiceFile<'_> {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        let methods = self.methods_interface();
        ctx.reserve(&self.class);
        ctx.reserve(&methods);
        let express = ctx.express();

        let mut interface = Interface::new(methods.as_str()).doc(self.service.docs.as_deref());
        let mut routes = Vec::new();
        for endpoint in &self.service.endpoints {
            interface = interface.member(method_signature(ctx, endpoint));
            routes.push(route(ctx, &self.service.base_path, endpoint)?);
            routes.push(CodeFragment::Blank);
        }
        routes.push(CodeFragment::line("return this.router;"));

        let class = Class::new(self.class.as_str())
            .field(format!("private router: {express}.Router;"))
            .constructor(
                &format!(
                    "private readonly methods: {methods}, middleware: {express}.RequestHandler[] = []"
                ),
                vec![CodeFragment::line(format!(
                    "this.router = {express}.Router({{ mergeParams: true }}).use({express}.json({{ strict: false }}), ...middleware);"
                ))],
            )
            .method(
                Method::new("addMiddleware")
                    .param("handler", &format!("{express}.RequestHandler"), false)
                    .returns("this")
                    .body(vec![
                        CodeFragment::line("this.router.use(handler);"),
                        CodeFragment::line("return this;"),
                    ]),
            )
            .method(
                Method::new("toRouter")
                    .returns(format!("{express}.Router"))
                    .body(routes),
            );
        Ok(ctx.code_file().add(interface).add(class))
    }
}

/// The signature a server implements for `endpoint`.
fn method_signature(ctx: &mut FileContext<'_>, endpoint: &HttpEndpoint) -> String {
    let express = ctx.express();
    let params = match endpoint.path_parameters.as_slice() {
        [] => "never".to_string(),
        parameters => type_literal(
            parameters
                .iter()
                .map(|p| format!("{}: string", property_key(&p.name.original_name))),
        ),
    };
    let response = endpoint
        .response
        .as_ref()
        .map(|response| parsed_type(ctx, &response.response_body_type));
    let body = endpoint
        .request_body
        .as_ref()
        .map(|body| parsed_type(ctx, &body.request_body_type))
        .unwrap_or_else(|| "never".to_string());
    let query = match endpoint.query_parameters.as_slice() {
        [] => "never".to_string(),
        parameters => type_literal(parameters.iter().map(|query| {
            let optional = if query.value_type.is_optional() { "?" } else { "" };
            let ty = if query.allow_multiple {
                "string | string[]"
            } else {
                "string"
            };
            format!("{}{optional}: {ty}", property_key(&query.name.wire_value))
        })),
    };
    let send = match &response {
        Some(ty) => format!("(responseBody: {ty}) => Promise<void>"),
        None => "() => Promise<void>".to_string(),
    };
    format!(
        "{}(req: {express}.Request<{params}, {}, {body}, {query}>, res: {{ send: {send}; locals: any }}, next: {express}.NextFunction): void | Promise<void>",
        endpoint.name.camel_case,
        response.as_deref().unwrap_or("never"),
    )
}

/// `this.router.<method>(<path>, handler);`
fn route(
    ctx: &mut FileContext<'_>,
    base_path: &HttpPath,
    endpoint: &HttpEndpoint,
) -> Result<CodeFragment, GenerationError> {
    let schema_options = ctx.options().schema;
    let header = format!(
        "this.router.{}({}, async (req, res, next) => {{",
        endpoint.method.as_str().to_lowercase(),
        string_literal(&express_path(base_path, endpoint))
    );
    let invoke = invoke_and_handle(ctx, endpoint)?;

    let body_schema = match endpoint.request_body.as_ref().map(|b| &b.request_body_type) {
        None | Some(TypeReference::Unknown) => None,
        Some(body) => Some(schema_expression(ctx, body)?),
    };
    let Some(schema) = body_schema else {
        return Ok(CodeFragment::block(header, invoke, Some("});".to_string())));
    };

    let mut parsed = vec![CodeFragment::line("req.body = request.value;")];
    parsed.extend(invoke);
    let rejected = vec![
        CodeFragment::line("res.status(422).json({"),
        CodeFragment::line(
            "  errors: request.errors.map((error) => [\"request\", ...error.path].join(\" -> \") + \": \" + error.message),",
        ),
        CodeFragment::line("});"),
        CodeFragment::line("next(request.errors);"),
    ];
    Ok(CodeFragment::block(
        header,
        vec![
            CodeFragment::line(format!(
                "const request = {schema}.parse(req.body, {});",
                zurg::parse_options(&schema_options)
            )),
            CodeFragment::block("if (request.ok) {", parsed, None),
            CodeFragment::block("} else {", rejected, Some("}".to_string())),
        ],
        Some("});".to_string()),
    ))
}

/// Call the implementation, send its response, and turn thrown errors into
/// responses.
fn invoke_and_handle(
    ctx: &mut FileContext<'_>,
    endpoint: &HttpEndpoint,
) -> Result<Vec<CodeFragment>, GenerationError> {
    let schema_options = ctx.options().schema;
    let send = match endpoint.response.as_ref().map(|r| &r.response_body_type) {
        None => "send: async () => {\n  res.sendStatus(204);\n}".to_string(),
        Some(TypeReference::Unknown) => {
            "send: async (responseBody) => {\n  res.json(responseBody);\n}".to_string()
        }
        Some(response) => format!(
            "send: async (responseBody) => {{\n  res.json({}.jsonOrThrow(responseBody, {}));\n}}",
            schema_expression(ctx, response)?,
            zurg::json_options(&schema_options)
        ),
    };
    let response = zurg::block("{", &[send, "locals: res.locals".to_string()], "}");
    let call = zurg::block(
        &format!("await this.methods.{}(", endpoint.name.camel_case),
        &["req as any".to_string(), response, "next".to_string()],
        ");",
    );
    let mut attempt = lines(&call);
    attempt.push(CodeFragment::line("next();"));

    let base = ctx.reference_to_api_error();
    let warn = CodeFragment::line(format!(
        "console.warn(`Endpoint '{}' unexpectedly threw ${{error.constructor.name}}. If this was intentional, add it to the endpoint's declared errors.`);",
        endpoint.name.original_name
    ));
    let declared: Vec<String> = endpoint
        .errors
        .iter()
        .map(|error| {
            let class = ctx.reference_to_error(&error.error);
            format!("error instanceof {class}")
        })
        .collect();
    let mut known = Vec::new();
    if declared.is_empty() {
        known.push(warn);
    } else {
        known.push(CodeFragment::block(
            format!("if (!({})) {{", declared.join(" || ")),
            vec![warn],
            Some("}".to_string()),
        ));
    }
    known.push(CodeFragment::line("await error.send(res);"));

    Ok(vec![
        CodeFragment::block("try {", attempt, None),
        CodeFragment::block(
            "} catch (error) {",
            vec![
                CodeFragment::block(format!("if (error instanceof {base}) {{"), known, None),
                CodeFragment::block(
                    "} else {",
                    vec![CodeFragment::line(
                        "res.status(500).json(\"Internal Server Error\");",
                    )],
                    Some("}".to_string()),
                ),
                CodeFragment::line("next(error);"),
            ],
            Some("}".to_string()),
        ),
    ])
}

/// The service base path joined with the endpoint path, path parameters as
/// `:name` segments.
fn express_path(base_path: &HttpPath, endpoint: &HttpEndpoint) -> String {
    let mut path = String::new();
    for part in [base_path, &endpoint.path] {
        path.push_str(&part.head);
        for parameter in &part.parts {
            path.push(':');
            path.push_str(&parameter.path_parameter);
            path.push_str(&parameter.tail);
        }
    }
    if path.is_empty() {
        path.push('/');
    }
    path
}

/// `{ a: A; b: B }` on one line.
fn type_literal(members: impl Iterator<Item = String>) -> String {
    let members: Vec<String> = members.collect();
    format!("{{ {} }}", members.join("; "))
}

/// `register.ts`
pub struct RegisterFile {
    function: String,
}

impl RegisterFile {
    pub fn new(function: String) -> Self {
        Self { function }
    }
}

impl DeclarationFile for RegisterFile {
    fn generate(&self, ctx: &mut FileContext<'_>) -> Result<CodeFile, GenerationError> {
        if ctx.resolvers().services.declarations().is_empty() {
            return Ok(CodeFile::new());
        }
        ctx.reserve(&self.function);
        let express = ctx.express();
        let services = services_type(ctx, &PackagePath::root());

        let mut body = Vec::new();
        for service in ctx.resolvers().services.declarations() {
            body.push(CodeFragment::line(format!(
                "(expressApp as any).use(services.{}.toRouter());",
                service_access(ctx, &service.name.package)
            )));
        }
        let function = Function::new(self.function.as_str())
            .param(
                "expressApp",
                &format!("{express}.Express | {express}.Router"),
            )
            .param("services", &services)
            .body(body);
        Ok(ctx.code_file().add(function))
    }
}

/// Type of the services of `package` and its sub-packages. A package
/// without sub-packages is its router class itself; otherwise an object
/// holding its own router under `_root` and one key per sub-package.
fn services_type(ctx: &mut FileContext<'_>, package: &PackagePath) -> String {
    let resolvers = ctx.resolvers();
    let service = resolvers.services.service_in(package);
    let children = resolvers.services.subpackages_of(package);
    if !package.is_root() && children.is_empty() {
        if let Some(service) = service {
            return ctx.reference_to_express_service(&service.name).expression;
        }
    }

    let mut members = Vec::new();
    if let Some(service) = service {
        let class = ctx.reference_to_express_service(&service.name);
        members.push(format!("{ROOT_SERVICE_KEY}: {class}"));
    }
    for child in children {
        let Some(segment) = child.segments().last() else {
            continue;
        };
        members.push(format!(
            "{}: {}",
            property_key(&segment.camel_case),
            services_type(ctx, child)
        ));
    }
    let mut out = String::from("{");
    for member in &members {
        out.push_str("\n  ");
        out.push_str(&member.replace('\n', "\n  "));
        out.push(';');
    }
    out.push_str("\n}");
    out
}

/// Path of a package's router inside the `services` argument.
fn service_access(ctx: &FileContext<'_>, package: &PackagePath) -> String {
    let mut keys: Vec<&str> = package
        .segments()
        .iter()
        .map(|segment| segment.camel_case.as_str())
        .collect();
    if package.is_root() || !ctx.resolvers().services.subpackages_of(package).is_empty() {
        keys.push(ROOT_SERVICE_KEY);
    }
    keys.join(".")
}
