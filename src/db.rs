pub mod broker_repo;
pub use broker_repo::BrokerRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod price_repo;
pub use price_repo::PriceTableRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
