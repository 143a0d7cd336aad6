pub mod catalog_transport;

pub use catalog_transport::CatalogTransport;
#[cfg(test)]
pub use catalog_transport::MockCatalogTransport;
