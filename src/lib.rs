pub mod core;
pub mod exchanges;

pub use crate::core::{errors::ExchangeError, traits::ExchangeConnector, types::*};
pub use crate::exchanges::delta::DeltaConnector;
