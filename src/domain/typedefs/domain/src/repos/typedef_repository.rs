// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

use crate::{CustomMetadataDef, TagDef};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Remote catalog typedef listing endpoint. Each call returns the full
/// current set of definitions for one concept — the source of truth the
/// translation caches resynchronize against.
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait TypeDefRepository: Send + Sync {
    async fn list_tag_defs(&self) -> Result<Vec<TagDef>, TypeDefError>;

    async fn list_custom_metadata_defs(&self) -> Result<Vec<CustomMetadataDef>, TypeDefError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, thiserror::Error)]
pub enum TypeDefError {
    #[error("Catalog API access denied: {message}")]
    AccessDenied { message: String },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
