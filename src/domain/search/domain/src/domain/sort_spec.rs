// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Map, Value};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
    pub nested_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SortSpec {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
            nested_path: None,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
            nested_path: None,
        }
    }

    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "order".to_string(),
            Value::from(match self.direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            }),
        );
        if let Some(nested_path) = &self.nested_path {
            body.insert(
                "nested".to_string(),
                serde_json::json!({ "path": nested_path }),
            );
        }

        let field = self.field.as_str();
        serde_json::json!({ field: body })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
