//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the auth, dashboard and health paths declared with
//! `#[utoipa::path]`. The resource CRUD handlers are generic, so their paths
//! are added by [`ResourcePathsAddon`] from the [`Table`] catalogue instead.
//!
//! Swagger UI serves the document in debug builds; `openapi-dump` prints it
//! for external tooling.

use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, Parameter, ParameterBuilder, ParameterIn,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{Array, KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::openapi::{
    Components, Content, ContentBuilder, Ref, RefOr, Required, Response, ResponseBuilder,
};
use utoipa::{Modify, OpenApi};

use crate::domain::resources::{
    Assignment, AssignmentDraft, AssignmentStatus, Client, ClientDraft, Position, PositionDraft,
    Table, TemporaryWorker, TemporaryWorkerDraft, WorkLocation, WorkLocationDraft, WorkerStatus,
};
use crate::domain::{AuthUser, DashboardSummary};
use crate::inbound::http::resources::collection_path;
use crate::inbound::http::schemas::{ActionErrorSchema, ErrorCodeSchema, FailureEnvelope};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

const API_PREFIX: &str = "/api/v1";
const FAILURE_ENVELOPE: &str = "FailureEnvelope";

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Encrypted session cookie issued by POST /api/v1/auth/sign-in.",
            ))),
        );
    }
}

/// Add list/get/create/update/delete paths for every resource table.
struct ResourcePathsAddon;

impl Modify for ResourcePathsAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        for table in Table::ALL {
            let (record, draft) = schema_names(table);
            let collection = format!("{API_PREFIX}{}", collection_path(table));
            let item = format!("{collection}/{{id}}");
            let tag = collection_path(table).trim_start_matches('/');
            let label = table.label();

            let mut list = operation(tag, &format!("list_{table}"), &format!("List {label} records"))
                .response("200", envelope_response(array_schema(record)));
            for column in table.filter_columns() {
                list = list.parameter(
                    ParameterBuilder::new()
                        .name(*column)
                        .parameter_in(ParameterIn::Query)
                        .required(Required::False)
                        .schema(Some(uuid_schema()))
                        .build(),
                );
            }
            let create = operation(tag, &format!("create_{table}"), &format!("Create a {label} record"))
                .request_body(Some(json_body(draft)))
                .response("200", envelope_response(record_schema(record)));
            let get = operation(tag, &format!("get_{table}"), &format!("Fetch one {label} record"))
                .parameter(id_parameter())
                .response("200", envelope_response(record_schema(record)));
            let update = operation(tag, &format!("update_{table}"), &format!("Replace a {label} record"))
                .parameter(id_parameter())
                .request_body(Some(json_body(draft)))
                .response("200", envelope_response(record_schema(record)));
            let delete = operation(tag, &format!("delete_{table}"), &format!("Delete a {label} record"))
                .parameter(id_parameter())
                .response("200", envelope_response(null_schema()));

            let paths = &mut openapi.paths;
            paths.add_path_operation(&collection, vec![HttpMethod::Get], list.build());
            paths.add_path_operation(&collection, vec![HttpMethod::Post], create.build());
            paths.add_path_operation(&item, vec![HttpMethod::Get], get.build());
            paths.add_path_operation(&item, vec![HttpMethod::Put], update.build());
            paths.add_path_operation(&item, vec![HttpMethod::Delete], delete.build());
        }
    }
}

const fn schema_names(table: Table) -> (&'static str, &'static str) {
    match table {
        Table::Clients => ("Client", "ClientDraft"),
        Table::WorkLocations => ("WorkLocation", "WorkLocationDraft"),
        Table::Positions => ("Position", "PositionDraft"),
        Table::TemporaryWorkers => ("TemporaryWorker", "TemporaryWorkerDraft"),
        Table::Assignments => ("Assignment", "AssignmentDraft"),
    }
}

fn operation(tag: &str, operation_id: &str, summary: &str) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(operation_id))
        .summary(Some(summary))
        .response("401", failure_response("No valid session"))
        .response("404", failure_response("Record not found"))
        .response("409", failure_response("Conflicts with existing data"))
        .response("422", failure_response("Invalid input"))
        .response("500", failure_response("Unclassified failure"))
}

fn json_content(schema: RefOr<Schema>) -> Content {
    ContentBuilder::new().schema(Some(schema)).build()
}

fn failure_response(description: &str) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            json_content(Ref::from_schema_name(FAILURE_ENVELOPE).into()),
        )
        .build()
}

fn envelope_response(data: RefOr<Schema>) -> Response {
    let envelope = ObjectBuilder::new()
        .property(
            "status",
            RefOr::T(Schema::Object(
                ObjectBuilder::new()
                    .schema_type(Type::String)
                    .enum_values(Some(["success"]))
                    .build(),
            )),
        )
        .required("status")
        .property("data", data)
        .required("data")
        .build();
    ResponseBuilder::new()
        .description("Action succeeded")
        .content("application/json", json_content(RefOr::T(Schema::Object(envelope))))
        .build()
}

fn json_body(schema_name: &str) -> utoipa::openapi::request_body::RequestBody {
    RequestBodyBuilder::new()
        .content(
            "application/json",
            json_content(Ref::from_schema_name(schema_name).into()),
        )
        .required(Some(Required::True))
        .build()
}

fn uuid_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Uuid)))
            .build(),
    ))
}

fn record_schema(name: &str) -> RefOr<Schema> {
    Ref::from_schema_name(name).into()
}

fn array_schema(item: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Array(Array::new(Ref::from_schema_name(item))))
}

fn null_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::Null).build(),
    ))
}

fn id_parameter() -> Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .schema(Some(uuid_schema()))
        .build()
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon, &ResourcePathsAddon),
    info(
        title = "Staffing backend API",
        description = "Session-authenticated administration of clients, work locations, positions, temporary workers and assignments.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::sign_out,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::dashboard::summary,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorCodeSchema,
        ActionErrorSchema,
        FailureEnvelope,
        AuthUser,
        DashboardSummary,
        Client,
        ClientDraft,
        WorkLocation,
        WorkLocationDraft,
        Position,
        PositionDraft,
        TemporaryWorker,
        TemporaryWorkerDraft,
        WorkerStatus,
        Assignment,
        AssignmentDraft,
        AssignmentStatus,
    )),
    tags(
        (name = "auth", description = "Sign-in, sign-out and session lookup"),
        (name = "dashboard", description = "Record counts for the landing page"),
        (name = "clients", description = "Client companies"),
        (name = "work-locations", description = "Sites belonging to clients"),
        (name = "positions", description = "Roles offered at a client site"),
        (name = "workers", description = "Temporary workers"),
        (name = "assignments", description = "Workers placed in positions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;

    fn document() -> utoipa::openapi::OpenApi {
        ApiDoc::openapi()
    }

    #[rstest]
    #[case("/api/v1/auth/sign-in")]
    #[case("/api/v1/auth/session")]
    #[case("/api/v1/dashboard")]
    #[case("/api/v1/clients")]
    #[case("/api/v1/work-locations/{id}")]
    #[case("/api/v1/assignments/{id}")]
    #[case("/health/ready")]
    fn registers_paths(#[case] path: &str) {
        assert!(document().paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn resource_item_paths_cover_read_replace_and_delete() {
        let doc = document();
        let item = doc
            .paths
            .paths
            .get("/api/v1/workers/{id}")
            .expect("worker item path");
        assert!(item.get.is_some());
        assert!(item.put.is_some());
        assert!(item.delete.is_some());
        assert!(item.post.is_none());
    }

    #[rstest]
    fn filterable_listings_document_their_query_parameters() {
        let doc = document();
        let list = doc
            .paths
            .paths
            .get("/api/v1/positions")
            .and_then(|item| item.get.as_ref())
            .expect("positions listing");
        let names: Vec<_> = list
            .parameters
            .iter()
            .flatten()
            .map(|parameter| parameter.name.as_str())
            .collect();
        assert_eq!(names, vec!["client_id", "work_location_id"]);
    }

    #[rstest]
    fn registers_envelope_and_resource_schemas() {
        let doc = document();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        for name in [
            "crate.domain.ErrorCode",
            "crate.domain.ActionError",
            FAILURE_ENVELOPE,
            "Client",
            "TemporaryWorkerDraft",
            "DashboardSummary",
        ] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = document();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
