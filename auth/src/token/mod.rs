pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use errors::TokenError;
pub use handler::TokenAlgorithm;
pub use handler::TokenHandler;
