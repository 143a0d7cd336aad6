pub mod adapters;
pub mod http_client;
pub mod images;
