// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use secrecy::SecretString;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Connection settings of one catalog account. The bearer token is wrapped
/// in [`SecretString`] and never appears in `Debug` output or derived keys.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// Base url of the catalog deployment, e.g. `https://acme.tabula.dev/`.
    /// Must end with a trailing slash.
    pub url: url::Url,
    pub access_token: SecretString,
    pub timeout_secs: u64,
}

impl CatalogApiConfig {
    pub fn new(url: url::Url, access_token: SecretString) -> Self {
        Self {
            url,
            access_token,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
