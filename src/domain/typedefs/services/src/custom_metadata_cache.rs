// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, RwLock};

use tabula_typedefs::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Translation cache for custom metadata set definitions and their
/// attributes.
///
/// Follows the same refresh-on-miss protocol as `TagCache`, with an extra
/// level of maps: within each set, attribute ids and display names translate
/// both ways, and archived attributes are tracked separately so listings can
/// exclude them.
pub struct CustomMetadataCache {
    typedef_repo: Arc<dyn TypeDefRepository>,
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    populated: bool,
    defs_by_id: HashMap<String, CustomMetadataDef>,
    names_by_id: HashMap<String, String>,
    ids_by_name: HashMap<String, String>,
    attrs_by_set_id: HashMap<String, AttributeMaps>,
    archived_attr_ids: HashSet<String>,
    confirmed_missing_ids: HashSet<String>,
    confirmed_missing_names: HashSet<String>,
}

#[derive(Default)]
struct AttributeMaps {
    names_by_id: HashMap<String, String>,
    ids_by_name: HashMap<String, String>,
}

// Set and attribute names never contain "::", so composite keys in the
// missing sets cannot collide with plain set names/ids
fn attr_missing_key(set: &str, attr: &str) -> String {
    format!("{set}::{attr}")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl CustomMetadataCache {
    pub fn new(typedef_repo: Arc<dyn TypeDefRepository>) -> Self {
        Self {
            typedef_repo,
            state: RwLock::new(State::default()),
        }
    }

    #[tracing::instrument(level = "debug", name = "CustomMetadataCache_get_id_for_name", skip_all, fields(%name))]
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

        tracing::debug!(%name, "Custom metadata set not defined in the catalog, recording as missing");
        state.confirmed_missing_names.insert(name.to_string());
        Ok(None)
    }

    #[tracing::instrument(level = "debug", name = "CustomMetadataCache_get_name_for_id", skip_all, fields(%id))]
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

        tracing::debug!(%id, "Custom metadata set id not defined in the catalog, recording as missing");
        state.confirmed_missing_ids.insert(id.to_string());
        Ok(None)
    }

    #[tracing::instrument(
        level = "debug",
        name = "CustomMetadataCache_get_attr_id_for_name",
        skip_all,
        fields(%set_name, %attr_name)
    )]
    pub async fn get_attr_id_for_name(
        &self,
        set_name: &str,
        attr_name: &str,
    ) -> Result<Option<String>, TypeDefError> {
        if set_name.is_empty() || attr_name.is_empty() {
            return Ok(None);
        }

        {
            let state = self.state.read().unwrap();
            if let Some(id) = state.lookup_attr_id(set_name, attr_name) {
                return Ok(Some(id));
            }
            if state
                .confirmed_missing_names
                .contains(&attr_missing_key(set_name, attr_name))
            {
                return Ok(None);
            }
        }

        self.refresh().await?;

        let mut state = self.state.write().unwrap();
        if let Some(id) = state.lookup_attr_id(set_name, attr_name) {
            return Ok(Some(id));
        }

        tracing::debug!(
            %set_name,
            %attr_name,
            "Custom metadata attribute not defined in the catalog, recording as missing",
        );
        state
            .confirmed_missing_names
            .insert(attr_missing_key(set_name, attr_name));
        Ok(None)
    }

    #[tracing::instrument(
        level = "debug",
        name = "CustomMetadataCache_get_attr_name_for_id",
        skip_all,
        fields(%set_id, %attr_id)
    )]
    pub async fn get_attr_name_for_id(
        &self,
        set_id: &str,
        attr_id: &str,
    ) -> Result<Option<String>, TypeDefError> {
        if set_id.is_empty() || attr_id.is_empty() {
            return Ok(None);
        }

        {
            let state = self.state.read().unwrap();
            if let Some(name) = state.lookup_attr_name(set_id, attr_id) {
                return Ok(Some(name));
            }
            if state
                .confirmed_missing_ids
                .contains(&attr_missing_key(set_id, attr_id))
            {
                return Ok(None);
            }
        }

        self.refresh().await?;

        let mut state = self.state.write().unwrap();
        if let Some(name) = state.lookup_attr_name(set_id, attr_id) {
            return Ok(Some(name));
        }

        tracing::debug!(
            %set_id,
            %attr_id,
            "Custom metadata attribute id not defined in the catalog, recording as missing",
        );
        state
            .confirmed_missing_ids
            .insert(attr_missing_key(set_id, attr_id));
        Ok(None)
    }

    /// All attribute definitions grouped by set display name.
    #[tracing::instrument(
        level = "debug",
        name = "CustomMetadataCache_get_all_custom_attributes",
        skip_all,
        fields(include_archived, force_refresh)
    )]
    pub async fn get_all_custom_attributes(
        &self,
        include_archived: bool,
        force_refresh: bool,
    ) -> Result<BTreeMap<String, Vec<AttributeDef>>, TypeDefError> {
        if force_refresh || !self.state.read().unwrap().populated {
            self.refresh().await?;
        }

        let state = self.state.read().unwrap();
        let mut attrs_by_set_name = BTreeMap::new();
        for def in state.defs_by_id.values() {
            let attrs: Vec<AttributeDef> = def
                .attribute_defs
                .iter()
                .filter(|attr| include_archived || !state.archived_attr_ids.contains(&attr.id))
                .cloned()
                .collect();
            attrs_by_set_name.insert(def.display_name.clone(), attrs);
        }
        Ok(attrs_by_set_name)
    }

    /// Resynchronizes with the catalog's current custom metadata
    /// definitions. Same commit discipline as `TagCache::refresh`: build
    /// off-lock, swap atomically, never leave a partial update behind.
    #[tracing::instrument(level = "debug", name = "CustomMetadataCache_refresh", skip_all)]
    pub async fn refresh(&self) -> Result<(), TypeDefError> {
        let defs = self.typedef_repo.list_custom_metadata_defs().await?;

        let mut new_state = State {
            populated: true,
            ..State::default()
        };
        for def in defs {
            let mut attr_maps = AttributeMaps::default();
            for attr in &def.attribute_defs {
                attr_maps
                    .names_by_id
                    .insert(attr.id.clone(), attr.display_name.clone());
                attr_maps
                    .ids_by_name
                    .insert(attr.display_name.clone(), attr.id.clone());
                if attr.is_archived {
                    new_state.archived_attr_ids.insert(attr.id.clone());
                }
            }

            new_state.attrs_by_set_id.insert(def.id.clone(), attr_maps);
            new_state
                .names_by_id
                .insert(def.id.clone(), def.display_name.clone());
            new_state
                .ids_by_name
                .insert(def.display_name.clone(), def.id.clone());
            new_state.defs_by_id.insert(def.id.clone(), def);
        }

        tracing::debug!(
            num_sets = new_state.defs_by_id.len(),
            num_archived_attrs = new_state.archived_attr_ids.len(),
            "Rebuilt custom metadata cache",
        );

        *self.state.write().unwrap() = new_state;
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl State {
    fn lookup_attr_id(&self, set_name: &str, attr_name: &str) -> Option<String> {
        let set_id = self.ids_by_name.get(set_name)?;
        self.attrs_by_set_id
            .get(set_id)?
            .ids_by_name
            .get(attr_name)
            .cloned()
    }

    fn lookup_attr_name(&self, set_id: &str, attr_id: &str) -> Option<String> {
        self.attrs_by_set_id
            .get(set_id)?
            .names_by_id
            .get(attr_id)
            .cloned()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
