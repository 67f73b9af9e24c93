pub mod cache;
pub mod http_source;
