// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Classification tag definition. Humans refer to tags by `display_name`,
/// the catalog internally by the opaque hashed `id`; historical records
/// (audit log entries, lineage) may reference ids of tags deleted long ago.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TagDef {
    #[serde(rename = "name")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Custom metadata (business metadata) set definition: a named collection of
/// typed attributes attachable to catalog assets. The set and each of its
/// attributes carry independent name↔id mappings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CustomMetadataDef {
    #[serde(rename = "name")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "attributeDefs")]
    pub attribute_defs: Vec<AttributeDef>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AttributeDef {
    #[serde(rename = "name")]
    pub id: String,

    #[serde(rename = "displayName")]
    pub display_name: String,

    #[serde(rename = "typeName")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Archived attributes are retained by the catalog for historical
    /// records but are hidden from default listings.
    #[serde(default, rename = "isArchived")]
    pub is_archived: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
