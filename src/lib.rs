pub mod error;
pub mod extract;
pub mod links;
pub mod message;
pub mod models;
pub mod resolver;
pub mod routes;
pub mod source;

pub use error::ExtractError;
pub use extract::extract_json;
