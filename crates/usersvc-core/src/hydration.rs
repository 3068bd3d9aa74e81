//! Batch resolution of ID references.
//!
//! Entities such as users and roles point at related entities by ID. Resolving
//! those one entity at a time costs a round trip per entity; [`hydrate`]
//! collects the union of referenced IDs across a batch, fetches them in a
//! single lookup and joins the results back through a map.
//!
//! References that do not resolve are skipped, so every entity ends up with a
//! relation list free of placeholders (possibly empty).
//!
//! # Example
//!
//! ```ignore
//! let hydrated = hydrate(
//!     users,
//!     |user| user.role_ids.as_slice(),
//!     |ids| roles.find_by_ids(ids),
//!     |role: &Role| role.id.clone(),
//! )
//! .await?;
//! ```

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;

/// An entity paired with the related entities it references.
#[derive(Debug, Clone, PartialEq)]
pub struct Hydrated<E, R> {
    pub entity: E,
    pub related: Vec<R>,
}

impl<E, R> Hydrated<E, R> {
    pub fn into_parts(self) -> (E, Vec<R>) {
        (self.entity, self.related)
    }
}

/// Union of the IDs referenced by `batch`, deduplicated in first-seen order.
pub fn collect_reference_ids<E, K, F>(batch: &[E], refs: F) -> Vec<K>
where
    K: Eq + Hash + Clone,
    F: Fn(&E) -> &[K],
{
    let mut seen = HashSet::new();
    let mut ids = Vec::new();

    for id in batch.iter().flat_map(|entity| refs(entity)) {
        if seen.insert(id.clone()) {
            ids.push(id.clone());
        }
    }

    ids
}

/// Joins fetched entities back onto the batch, keeping each entity's own
/// reference order and skipping references that were not fetched.
pub fn resolve_references<E, R, K, F, G>(
    batch: Vec<E>,
    refs: F,
    related: Vec<R>,
    key: G,
) -> Vec<Hydrated<E, R>>
where
    K: Eq + Hash,
    R: Clone,
    F: Fn(&E) -> &[K],
    G: Fn(&R) -> K,
{
    let by_id: HashMap<K, R> = related.into_iter().map(|r| (key(&r), r)).collect();

    batch
        .into_iter()
        .map(|entity| {
            let related = refs(&entity)
                .iter()
                .filter_map(|id| by_id.get(id).cloned())
                .collect();
            Hydrated { entity, related }
        })
        .collect()
}

/// Resolves the references of a whole batch with one call to `fetch`.
///
/// `fetch` receives the deduplicated ID set and is not called at all when the
/// batch references nothing.
pub async fn hydrate<E, R, K, F, Fetch, Fut, G, Err>(
    batch: Vec<E>,
    refs: F,
    fetch: Fetch,
    key: G,
) -> Result<Vec<Hydrated<E, R>>, Err>
where
    K: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&E) -> &[K],
    Fetch: FnOnce(Vec<K>) -> Fut,
    Fut: Future<Output = Result<Vec<R>, Err>>,
    G: Fn(&R) -> K,
{
    let ids = collect_reference_ids(&batch, &refs);
    let related = if ids.is_empty() {
        Vec::new()
    } else {
        fetch(ids).await?
    };

    Ok(resolve_references(batch, refs, related, key))
}

/// Synchronous variant of [`hydrate`] for in-memory lookups.
pub fn hydrate_with<E, R, K, F, Fetch, G>(
    batch: Vec<E>,
    refs: F,
    fetch: Fetch,
    key: G,
) -> Vec<Hydrated<E, R>>
where
    K: Eq + Hash + Clone,
    R: Clone,
    F: Fn(&E) -> &[K],
    Fetch: FnOnce(Vec<K>) -> Vec<R>,
    G: Fn(&R) -> K,
{
    let ids = collect_reference_ids(&batch, &refs);
    let related = if ids.is_empty() { Vec::new() } else { fetch(ids) };

    resolve_references(batch, refs, related, key)
}
