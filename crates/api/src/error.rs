use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cybermind_core::error::{CoreError, FieldErrors};
use cybermind_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce the JSON error envelope:
///
/// ```json
/// { "message": "Failed to create contact", "error": "...", "code": "VALIDATION_ERROR" }
/// ```
///
/// Validation failures also carry a `fields` map.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cybermind_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from the contact store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The body could not be read as the expected JSON. Keeps the
    /// extractor's status (400, 413, 415 or 422).
    #[error("Invalid request body: {0}")]
    Rejected(#[from] JsonRejection),

    /// Names the operation that failed; becomes the envelope's `message`.
    #[error("{message}: {source}")]
    Context {
        message: &'static str,
        source: Box<AppError>,
    },
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Attach an operation message to any error convertible into [`AppError`].
pub trait ResultExt<T> {
    fn context(self, message: &'static str) -> AppResult<T>;
}

impl<T, E: Into<AppError>> ResultExt<T> for Result<T, E> {
    fn context(self, message: &'static str) -> AppResult<T> {
        self.map_err(|e| AppError::Context {
            message,
            source: Box::new(e.into()),
        })
    }
}

/// Status, code and public detail derived from an error.
struct Classified {
    status: StatusCode,
    code: &'static str,
    error: String,
    fields: Option<FieldErrors>,
}

impl Classified {
    fn new(status: StatusCode, code: &'static str, error: impl Into<String>) -> Self {
        Self {
            status,
            code,
            error: error.into(),
            fields: None,
        }
    }

    fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An internal error occurred",
        )
    }
}

impl AppError {
    /// The innermost error and the outermost operation message, if any.
    fn unwrap_context(self) -> (Option<&'static str>, AppError) {
        let mut message = None;
        let mut err = self;
        while let AppError::Context { message: m, source } = err {
            message.get_or_insert(m);
            err = *source;
        }
        (message, err)
    }

    fn classify(self) -> Classified {
        match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => Classified::new(
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(fields) => Classified {
                    error: fields.to_string(),
                    fields: Some(fields),
                    ..Classified::new(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "")
                },
                CoreError::Unauthorized(msg) => {
                    Classified::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::Connect(err)) => {
                tracing::error!(error = %err, "Database unavailable");
                Classified::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Database unavailable",
                )
            }
            AppError::Store(StoreError::Migrate(err)) => {
                tracing::error!(error = %err, "Database migration failed");
                Classified::internal()
            }
            AppError::Store(StoreError::Query(err)) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::Rejected(rejection) => {
                let status = rejection.status();
                let code = match status {
                    StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "UNSUPPORTED_MEDIA_TYPE",
                    StatusCode::UNPROCESSABLE_ENTITY => "UNPROCESSABLE_ENTITY",
                    _ => "BAD_REQUEST",
                };
                Classified::new(status, code, rejection.body_text())
            }

            AppError::Context { source, .. } => source.classify(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (message, err) = self.unwrap_context();
        let Classified {
            status,
            code,
            error,
            fields,
        } = err.classify();

        let message = message
            .or_else(|| status.canonical_reason())
            .unwrap_or("Request failed");

        let mut body = json!({
            "message": message,
            "error": error,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a sqlx error into a status, error code, and public message.
///
/// - `RowNotFound` maps to 404.
/// - Check constraint violations (SQLSTATE `23514`) map to 400.
/// - Pool exhaustion and I/O failures map to 503.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Classified {
    match err {
        sqlx::Error::RowNotFound => {
            Classified::new(StatusCode::NOT_FOUND, "NOT_FOUND", "Resource not found")
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23514") => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            Classified::new(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                format!("Value violates check constraint: {constraint}"),
            )
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            tracing::error!(error = %err, "Database unavailable");
            Classified::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "SERVICE_UNAVAILABLE",
                "Database unavailable",
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            Classified::internal()
        }
    }
}
