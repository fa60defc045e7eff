// errors.rs
use thiserror::Error;

/// Errors originating from the server logic
/// (routing, bad input) or downstream layers (spreadsheet export).
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Spreadsheet Error: {0}")]
    XlsxError(String),
    #[error("Internal Server Error")]
    InternalError,
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound => 404,
            ServerError::BadRequest(_) => 400,
            ServerError::XlsxError(_) | ServerError::InternalError => 500,
        }
    }
}
