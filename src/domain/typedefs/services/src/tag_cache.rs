// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tabula_typedefs::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Bidirectional translation between classification tag display names and
/// their internal hashed ids, synchronized lazily with the catalog.
///
/// Lookups that miss trigger a full resynchronization before the miss is
/// declared definitive. A definitive miss is a soft outcome (`Ok(None)`):
/// historical records legitimately reference tags deleted long ago. Misses
/// are remembered until the next refresh so that repeated lookups of the
/// same dead reference do not hammer the catalog.
///
/// Safe for concurrent readers; a refresh rebuilds all maps off-lock and
/// swaps them in atomically, so readers observe either the old or the new
/// complete map set, never a mix.
pub struct TagCache {
    typedef_repo: Arc<dyn TypeDefRepository>,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    defs_by_id: HashMap<String, TagDef>,
    names_by_id: HashMap<String, String>,
    ids_by_name: HashMap<String, String>,
    confirmed_missing_ids: HashSet<String>,
    confirmed_missing_names: HashSet<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl TagCache {
    pub fn new(typedef_repo: Arc<dyn TypeDefRepository>) -> Self {
        Self {
            typedef_repo,
            state: RwLock::new(State::default()),
        }
    }

    #[tracing::instrument(level = "debug", name = "TagCache_get_id_for_name", skip_all, fields(%name))]
    pub async fn get_id_for_name(&self, name: &str) -> Result<Option<String>, TypeDefError> {
        if name.is_empty() {
            return Ok(None);
        }

        {
            let state = self.state.read().unwrap();
            if let Some(id) = state.ids_by_name.get(name) {
                return Ok(Some(id.clone()));
            }
            if state.confirmed_missing_names.contains(name) {
                return Ok(None);
            }
        }

        self.refresh().await?;

        let mut state = self.state.write().unwrap();
        if let Some(id) = state.ids_by_name.get(name) {
            return Ok(Some(id.clone()));
        }

        tracing::debug!(%name, "Tag name not defined in the catalog, recording as missing");
        state.confirmed_missing_names.insert(name.to_string());
        Ok(None)
    }

    #[tracing::instrument(level = "debug", name = "TagCache_get_name_for_id", skip_all, fields(%id))]
    pub async fn get_name_for_id(&self, id: &str) -> Result<Option<String>, TypeDefError> {
        if id.is_empty() {
            return Ok(None);
        }

        {
            let state = self.state.read().unwrap();
            if let Some(name) = state.names_by_id.get(id) {
                return Ok(Some(name.clone()));
            }
            if state.confirmed_missing_ids.contains(id) {
                return Ok(None);
            }
        }

        self.refresh().await?;

        let mut state = self.state.write().unwrap();
        if let Some(name) = state.names_by_id.get(id) {
            return Ok(Some(name.clone()));
        }

        tracing::debug!(%id, "Tag id not defined in the catalog, recording as missing");
        state.confirmed_missing_ids.insert(id.to_string());
        Ok(None)
    }

    pub async fn get_def_for_id(&self, id: &str) -> Result<Option<TagDef>, TypeDefError> {
        if id.is_empty() {
            return Ok(None);
        }

        {
            let state = self.state.read().unwrap();
            if let Some(def) = state.defs_by_id.get(id) {
                return Ok(Some(def.clone()));
            }
            if state.confirmed_missing_ids.contains(id) {
                return Ok(None);
            }
        }

        self.refresh().await?;

        let mut state = self.state.write().unwrap();
        if let Some(def) = state.defs_by_id.get(id) {
            return Ok(Some(def.clone()));
        }
        state.confirmed_missing_ids.insert(id.to_string());
        Ok(None)
    }

    /// Resynchronizes with the catalog's current tag definitions.
    ///
    /// The new map set is built without holding the lock and committed with
    /// a single swap; a failed listing leaves the previous state intact.
    /// Concurrent misses may each run their own refresh — refreshes are
    /// idempotent over the same upstream source of truth.
    #[tracing::instrument(level = "debug", name = "TagCache_refresh", skip_all)]
    pub async fn refresh(&self) -> Result<(), TypeDefError> {
        let tag_defs = self.typedef_repo.list_tag_defs().await?;

        let mut new_state = State::default();
        for def in tag_defs {
            new_state
                .names_by_id
                .insert(def.id.clone(), def.display_name.clone());
            new_state
                .ids_by_name
                .insert(def.display_name.clone(), def.id.clone());
            new_state.defs_by_id.insert(def.id.clone(), def);
        }

        tracing::debug!(num_tags = new_state.defs_by_id.len(), "Rebuilt tag cache");

        *self.state.write().unwrap() = new_state;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
