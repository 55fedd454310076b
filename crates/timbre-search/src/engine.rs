//! Recommendation entry points.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;
use timbre_core::{CatalogIndex, Genre, Result, YearRange};

use crate::pool::{CandidatePool, Recommendation};
use crate::query::Query;

/// Rank the candidate pool for raw query input.
///
/// `features` lists acousticness, danceability, energy, instrumentalness,
/// valence and tempo. An empty pool yields an empty list.
///
/// # Errors
/// `InvalidGenre` or `InvalidRange` when the input does not validate.
pub fn recommend(
    index: &CatalogIndex,
    genre: &str,
    start_year: i32,
    end_year: i32,
    features: &[f64],
) -> Result<Vec<Recommendation>> {
    let query = Query::parse(genre, start_year, end_year, features)?;
    Ok(recommend_query(index, &query))
}

/// Rank the candidate pool for an already validated query.
#[must_use]
pub fn recommend_query(index: &CatalogIndex, query: &Query) -> Vec<Recommendation> {
    CandidatePool::select(index, query.genre(), query.years()).rank(query.target())
}

/// Run independent queries in parallel. Results keep input order.
#[must_use]
pub fn recommend_batch(index: &CatalogIndex, queries: &[Query]) -> Vec<Vec<Recommendation>> {
    log::debug!("Running {} queries in parallel", queries.len());
    queries
        .par_iter()
        .map(|query| recommend_query(index, query))
        .collect()
}

type PoolKey = (Genre, YearRange);

/// Pools a [`Recommender::new`] cache holds before it stops caching.
pub const DEFAULT_MAX_POOLS: usize = 64;

/// Answers queries against one catalog, reusing the candidate pool of each
/// (genre, year range) pair across targets.
///
/// Shareable between threads; pools are built on first use. The cache holds
/// at most `max_pools` pools of up to [`POOL_LIMIT`](crate::POOL_LIMIT)
/// entries each. Once full, pools for new pairs are built per query and
/// dropped afterwards; [`Recommender::clear_cache`] makes room again.
#[derive(Debug)]
pub struct Recommender<'a> {
    index: &'a CatalogIndex,
    max_pools: usize,
    pools: RwLock<HashMap<PoolKey, Arc<CandidatePool>>>,
}

impl<'a> Recommender<'a> {
    #[must_use]
    pub fn new(index: &'a CatalogIndex) -> Self {
        Self::with_capacity(index, DEFAULT_MAX_POOLS)
    }

    /// A recommender caching at most `max_pools` pools. Zero disables the
    /// cache.
    #[must_use]
    pub fn with_capacity(index: &'a CatalogIndex, max_pools: usize) -> Self {
        Self {
            index,
            max_pools,
            pools: RwLock::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn recommend(&self, query: &Query) -> Vec<Recommendation> {
        self.pool(query.genre(), query.years()).rank(query.target())
    }

    /// Parallel variant of [`Recommender::recommend`] sharing this cache.
    #[must_use]
    pub fn recommend_batch(&self, queries: &[Query]) -> Vec<Vec<Recommendation>> {
        queries.par_iter().map(|query| self.recommend(query)).collect()
    }

    /// Number of pools currently cached.
    #[must_use]
    pub fn cached_pools(&self) -> usize {
        self.pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn clear_cache(&self) {
        self.pools
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn pool(&self, genre: Genre, years: YearRange) -> Arc<CandidatePool> {
        let key = (genre, years);
        if let Some(pool) = self
            .pools
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(pool);
        }

        let pool = Arc::new(CandidatePool::select(self.index, genre, years));
        let mut pools = self.pools.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have filled the slot meanwhile; keep the first.
        if let Some(cached) = pools.get(&key) {
            return Arc::clone(cached);
        }
        if pools.len() >= self.max_pools {
            log::debug!(
                "Pool cache full ({} pools), not caching {} {}",
                pools.len(),
                genre,
                years
            );
            return pool;
        }
        Arc::clone(pools.entry(key).or_insert(pool))
    }
}
