// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Identity of one remote catalog account: endpoint plus a fingerprint of
/// the credential used against it. Never contains the credential itself.
///
/// Caches are maintained per account key, so two clients talking to the same
/// endpoint with different credentials do not share translation state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogAccountKey(String);

impl CatalogAccountKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn from_endpoint(endpoint: &str, credential_fingerprint: u32) -> Self {
        Self(format!("{endpoint}#{credential_fingerprint:08x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CatalogAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
