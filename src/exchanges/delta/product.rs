use crate::core::errors::ExchangeError;
use crate::core::kernel::RestClient;
use crate::exchanges::delta::rest::DeltaRestClient;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// How long a fetched catalog stays trusted before the next resolution
/// refetches it.
const CATALOG_TTL: Duration = Duration::from_secs(60);

struct CatalogSnapshot {
    fetched_at: Instant,
    ids: HashMap<String, i64>,
}

/// Maps trading symbols to Delta's numeric product ids.
///
/// The catalog is cached with a TTL and refreshed on any miss, so an
/// unknown symbol is always reported against a freshly fetched catalog
/// and a newly listed product resolves without waiting out the TTL.
/// Concurrent refreshes are benign; the last writer wins with equivalent
/// data.
pub struct ProductResolver<R: RestClient> {
    rest: DeltaRestClient<R>,
    cache: RwLock<Option<CatalogSnapshot>>,
    ttl: Duration,
}

impl<R: RestClient> ProductResolver<R> {
    pub fn new(client: R) -> Self {
        Self {
            rest: DeltaRestClient::new(client),
            cache: RwLock::new(None),
            ttl: CATALOG_TTL,
        }
    }

    /// Resolve a symbol to its numeric product id.
    ///
    /// Fails with `ProductNotFound` when the symbol is absent from the
    /// catalog; never silently defaults. Callers must abort before issuing
    /// any mutating request when this fails.
    #[instrument(skip(self), fields(exchange = "delta", symbol = %symbol))]
    pub async fn resolve(&self, symbol: &str) -> Result<i64, ExchangeError> {
        if let Some(id) = self.lookup_cached(symbol).await {
            return Ok(id);
        }

        // Stale cache or miss: refetch before giving up on the symbol
        let ids = self.refresh().await?;
        ids.get(symbol)
            .copied()
            .ok_or_else(|| ExchangeError::ProductNotFound(symbol.to_string()))
    }

    async fn lookup_cached(&self, symbol: &str) -> Option<i64> {
        let guard = self.cache.read().await;
        guard
            .as_ref()
            .filter(|snapshot| snapshot.fetched_at.elapsed() < self.ttl)
            .and_then(|snapshot| snapshot.ids.get(symbol).copied())
    }

    async fn refresh(&self) -> Result<HashMap<String, i64>, ExchangeError> {
        let response = self.rest.get_products().await?;
        if !response.success {
            return Err(ExchangeError::ExchangeRejection {
                operation: "get_products",
            });
        }

        let ids: HashMap<String, i64> = response
            .result
            .into_iter()
            .map(|product| (product.symbol, product.id))
            .collect();

        debug!(products = ids.len(), "refreshed product catalog");

        let mut guard = self.cache.write().await;
        *guard = Some(CatalogSnapshot {
            fetched_at: Instant::now(),
            ids: ids.clone(),
        });

        Ok(ids)
    }
}
