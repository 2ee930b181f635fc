pub mod model;
pub mod retrieval;
pub mod server;
