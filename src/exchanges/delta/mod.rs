pub mod builder;
pub mod connector;
pub mod conversions;
pub mod product;
pub mod rest;
pub mod signer;
pub mod types;

// Re-export main types for easier importing
pub use builder::build_connector;
pub use connector::DeltaConnector;
pub use product::ProductResolver;
pub use rest::DeltaRestClient;
pub use signer::DeltaSigner;
pub use types::{
    DeltaApiResponse, DeltaBalance, DeltaOrder, DeltaOrderRequest, DeltaPosition, DeltaProduct,
    DeltaTicker,
};
