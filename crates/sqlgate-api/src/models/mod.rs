//! Request and response models for the REST API.

mod request;
mod response;

pub use request::StatementBody;
pub use response::{
    ErrorResponse, HealthResponse, NotFoundResponse, StatementResponse, TablesResponse,
};
