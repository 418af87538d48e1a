use api_types::{
    MEDIA_TYPE,
    document::{ErrorDocument, ErrorObject, ErrorSource},
};
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use engine::EngineError;
use serde::Serialize;

pub use server::{router, run_with_listener};

mod funds;
mod server;

pub mod types {
    pub mod fund {
        pub use api_types::fund::{FundList, FundNew};
        pub use engine::Currency;
    }
}

/// JSON body sent with the JSON-API media type.
pub struct JsonApi<T>(pub T);

impl<T: Serialize> IntoResponse for JsonApi<T> {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, MEDIA_TYPE)], Json(self.0)).into_response()
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// A required attribute of the request resource is absent.
    MissingAttribute(&'static str),
    /// The body is not a JSON document of the expected shape.
    Document(JsonRejection),
    /// The request resource has the wrong `type`.
    TypeMismatch(String),
    /// The request resource carries an `id`; ids are assigned by the store.
    ClientId,
    RouteNotFound(String),
}

fn attribute_pointer(field: &str) -> Option<ErrorSource> {
    Some(ErrorSource {
        pointer: format!("/data/attributes/{field}"),
    })
}

fn engine_error_object(err: EngineError) -> (StatusCode, ErrorObject) {
    match err {
        EngineError::InvalidName(detail) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_object(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Attribute",
                Some(detail),
                attribute_pointer("name"),
            ),
        ),
        EngineError::InvalidCurrency(err) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            error_object(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid Attribute",
                Some(err.to_string()),
                attribute_pointer("currency"),
            ),
        ),
        EngineError::KeyNotFound(key) => (
            StatusCode::NOT_FOUND,
            error_object(
                StatusCode::NOT_FOUND,
                "Not Found",
                Some(format!("{key} not found")),
                None,
            ),
        ),
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_object(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    Some("internal server error".to_string()),
                    None,
                ),
            )
        }
    }
}

fn error_object(
    status: StatusCode,
    title: &str,
    detail: Option<String>,
    source: Option<ErrorSource>,
) -> ErrorObject {
    ErrorObject {
        status: status.as_u16().to_string(),
        title: title.to_string(),
        detail,
        source,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ServerError::Engine(err) => engine_error_object(err),
            ServerError::MissingAttribute(field) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                let error = error_object(
                    status,
                    "Missing Attribute",
                    Some(format!("attribute '{field}' is required")),
                    attribute_pointer(field),
                );
                (status, error)
            }
            ServerError::Document(rejection) => {
                let status = rejection.status();
                let error = error_object(
                    status,
                    "Invalid Document",
                    Some(rejection.body_text()),
                    None,
                );
                (status, error)
            }
            ServerError::TypeMismatch(kind) => {
                let status = StatusCode::CONFLICT;
                let error = error_object(
                    status,
                    "Type Mismatch",
                    Some(format!("resource type '{kind}' does not match the endpoint")),
                    Some(ErrorSource {
                        pointer: "/data/type".to_string(),
                    }),
                );
                (status, error)
            }
            ServerError::ClientId => {
                let status = StatusCode::FORBIDDEN;
                let error = error_object(
                    status,
                    "Client Generated ID",
                    Some("ids are assigned by the server".to_string()),
                    Some(ErrorSource {
                        pointer: "/data/id".to_string(),
                    }),
                );
                (status, error)
            }
            ServerError::RouteNotFound(path) => {
                let status = StatusCode::NOT_FOUND;
                let error = error_object(
                    status,
                    "Not Found",
                    Some(format!("no resource at {path}")),
                    None,
                );
                (status, error)
            }
        };

        (
            status,
            JsonApi(ErrorDocument {
                errors: vec![error],
            }),
        )
            .into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
