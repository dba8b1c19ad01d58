//! Error mapping between the domain and HTTP

pub mod error;

pub use error::{
    handle_domain_error, json_error_handler, not_found, unauthorized_response,
    validation_error_response,
};
