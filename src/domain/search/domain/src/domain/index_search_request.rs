// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const MAX_SEARCH_PAGE_SIZE: usize = 10000;
pub const DEFAULT_SEARCH_PAGE_SIZE: usize = 10;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wire document of one index search call.
///
/// `dsl` carries the query itself; `attributes` / `relation_attributes` are
/// the field projections applied to matched assets and to their returned
/// relations respectively.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct IndexSearchRequest {
    pub dsl: SearchDsl,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,

    #[serde(
        default,
        rename = "relationAttributes",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub relation_attributes: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchDsl {
    pub from: usize,
    pub size: usize,
    pub track_total_hits: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub aggregations: BTreeMap<String, serde_json::Value>,
}

impl Default for SearchDsl {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_SEARCH_PAGE_SIZE,
            track_total_hits: true,
            query: None,
            sort: Vec::new(),
            aggregations: BTreeMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
