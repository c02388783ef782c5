mod request;

pub use request::{load_request_document, parse_request_document, RequestDocument, RequestError};
