use config::ConfigError;
use mongodb::bson::oid::Error as OidError;
use mongodb::error::{Error as MongoError, ErrorKind};
use tracing::{event, instrument, Level};
use validator::ValidationErrors;
use warp::{
    filters::{body::BodyDeserializeError, cors::CorsForbidden},
    http::StatusCode,
    reject::{
        InvalidHeader, LengthRequired, MethodNotAllowed, PayloadTooLarge, Reject,
        UnsupportedMediaType,
    },
    Rejection, Reply,
};

#[derive(Debug)]
pub enum Error {
    ParseError(OidError),
    VocabNotFound(String),
    Validation(ValidationErrors),
    DatabaseQueryError(MongoError),
    ConfigError(ConfigError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::ParseError(ref err) => write!(f, "Cannot parse id: {}", err),
            Error::VocabNotFound(ref id) => write!(f, "Vocab {} not found", id),
            Error::Validation(ref errors) => write!(f, "Invalid vocab: {}", errors),
            Error::DatabaseQueryError(ref e) => {
                write!(f, "Query could not be executed: {}", e)
            }
            Error::ConfigError(ref e) => write!(f, "Cannot load configuration: {}", e),
        }
    }
}

impl Reject for Error {}

impl From<MongoError> for Error {
    fn from(e: MongoError) -> Self {
        Error::DatabaseQueryError(e)
    }
}

/// A stored document that no longer decodes is a server bug, not an outage.
fn storage_status(e: &MongoError) -> StatusCode {
    match *e.kind {
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn detail(message: String, status: StatusCode) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "detail": message })),
        status,
    )
}

#[instrument]
pub async fn return_error(r: Rejection) -> Result<impl Reply, Rejection> {
    if let Some(crate::Error::VocabNotFound(id)) = r.find() {
        event!(Level::WARN, "vocab {} not found", id);
        Ok(detail(format!("Vocab {} not found", id), StatusCode::NOT_FOUND))
    } else if let Some(crate::Error::ParseError(e)) = r.find() {
        event!(Level::WARN, "{}", e);
        Ok(detail(format!("Cannot parse id: {}", e), StatusCode::NOT_FOUND))
    } else if let Some(crate::Error::Validation(e)) = r.find() {
        event!(Level::WARN, "{}", e);
        Ok(detail(e.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
    } else if let Some(crate::Error::DatabaseQueryError(e)) = r.find() {
        event!(Level::ERROR, "Database query error: {}", e);
        let status = storage_status(e);
        if status == StatusCode::SERVICE_UNAVAILABLE {
            Ok(detail("Storage unavailable".to_string(), status))
        } else {
            Ok(detail("Internal Server Error".to_string(), status))
        }
    } else if let Some(error) = r.find::<Error>() {
        event!(Level::ERROR, "{}", error);
        Ok(detail(
            "Internal Server Error".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR,
        ))
    } else if let Some(error) = r.find::<CorsForbidden>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::FORBIDDEN))
    } else if let Some(error) = r.find::<BodyDeserializeError>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::UNPROCESSABLE_ENTITY))
    } else if let Some(error) = r.find::<PayloadTooLarge>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::PAYLOAD_TOO_LARGE))
    } else if let Some(error) = r.find::<UnsupportedMediaType>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::UNSUPPORTED_MEDIA_TYPE))
    } else if let Some(error) = r.find::<LengthRequired>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::LENGTH_REQUIRED))
    } else if let Some(error) = r.find::<InvalidHeader>() {
        event!(Level::WARN, "{}", error);
        Ok(detail(error.to_string(), StatusCode::BAD_REQUEST))
    } else if r.find::<MethodNotAllowed>().is_some() {
        Ok(detail(
            "Method not allowed".to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        ))
    } else {
        Ok(detail("Route not found".to_string(), StatusCode::NOT_FOUND))
    }
}
