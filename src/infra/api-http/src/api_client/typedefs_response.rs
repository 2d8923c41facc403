// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

#![allow(dead_code)]

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reply of `GET /api/meta/types/typedefs`. The endpoint always answers
/// with every category bucket; the `type` query parameter leaves the
/// unrequested ones empty.
#[derive(Debug, serde::Deserialize)]
pub struct TypeDefsResponse {
    #[serde(default, rename = "classificationDefs")]
    pub classification_defs: Vec<tabula_typedefs::TagDef>,

    #[serde(default, rename = "businessMetadataDefs")]
    pub business_metadata_defs: Vec<tabula_typedefs::CustomMetadataDef>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
