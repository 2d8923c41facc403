// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tabula_typedefs::*;

use crate::{CustomMetadataCache, TagCache};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Holds one cache instance per catalog account for the lifetime of the
/// registry. Owned by the embedding application (a singleton in its DI
/// catalog), not an implicit process-global: tearing down the registry tears
/// down every cache it created.
pub struct TypeDefCacheRegistry {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    tag_caches: HashMap<CatalogAccountKey, Arc<TagCache>>,
    custom_metadata_caches: HashMap<CatalogAccountKey, Arc<CustomMetadataCache>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
impl TypeDefCacheRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    pub fn tag_cache(
        &self,
        key: &CatalogAccountKey,
        typedef_repo: &Arc<dyn TypeDefRepository>,
    ) -> Arc<TagCache> {
        {
            let state = self.state.read().unwrap();
            if let Some(cache) = state.tag_caches.get(key) {
                return Arc::clone(cache);
            }
        }

        let mut state = self.state.write().unwrap();
        let cache = state
            .tag_caches
            .entry(key.clone())
            .or_insert_with(|| Arc::new(TagCache::new(Arc::clone(typedef_repo))));
        Arc::clone(cache)
    }

    pub fn custom_metadata_cache(
        &self,
        key: &CatalogAccountKey,
        typedef_repo: &Arc<dyn TypeDefRepository>,
    ) -> Arc<CustomMetadataCache> {
        {
            let state = self.state.read().unwrap();
            if let Some(cache) = state.custom_metadata_caches.get(key) {
                return Arc::clone(cache);
            }
        }

        let mut state = self.state.write().unwrap();
        let cache = state
            .custom_metadata_caches
            .entry(key.clone())
            .or_insert_with(|| Arc::new(CustomMetadataCache::new(Arc::clone(typedef_repo))));
        Arc::clone(cache)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
