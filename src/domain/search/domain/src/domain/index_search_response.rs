// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Wire document of one index search reply.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct IndexSearchResponse {
    /// Service-side estimate of the total number of matches. Treated as a
    /// hint only: pagination exhaustion is decided by page sizes, not by
    /// this value.
    #[serde(rename = "approximateCount")]
    pub approximate_count: Option<u64>,

    #[serde(default)]
    pub entities: Vec<serde_json::Value>,

    #[serde(default)]
    pub aggregations: Option<serde_json::Value>,

    /// Echo of the request parameters, as interpreted by the service.
    #[serde(rename = "searchParameters")]
    pub search_parameters: Option<serde_json::Value>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
