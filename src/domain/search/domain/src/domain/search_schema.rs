// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Index field paths of the catalog's internal asset attributes.
///
/// The `__`-prefixed paths are maintained by the catalog itself and are
/// present on every asset document regardless of its type.
pub mod fields {
    /// Internal unique identifier. Ascending sort on this field is the
    /// tie-breaker that makes offset pagination stable.
    pub const GUID: &str = "__guid";

    pub const STATE: &str = "__state";
    pub const TYPE_NAME: &str = "__typeName";
    pub const SUPER_TYPE_NAMES: &str = "__superTypeNames";

    pub const CREATED_BY: &str = "__createdBy";
    pub const MODIFIED_BY: &str = "__modifiedBy";
    pub const CREATE_TIME: &str = "__timestamp";
    pub const UPDATE_TIME: &str = "__modificationTimestamp";

    pub const TAG_NAMES: &str = "__classificationNames";

    pub const NAME: &str = "name.keyword";
    pub const QUALIFIED_NAME: &str = "qualifiedName";
    pub const DESCRIPTION: &str = "description";
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub mod asset_state {
    pub const ACTIVE: &str = "ACTIVE";
    pub const DELETED: &str = "DELETED";
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
