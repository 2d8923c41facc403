// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::time::Duration;

use internal_error::{ErrorIntoInternal, InternalError, ResultIntoInternal};
use secrecy::ExposeSecret;
use tabula_search::{
    IndexSearchRequest,
    IndexSearchResponse,
    SearchIndexError,
    SearchIndexRepository,
};
use tabula_typedefs::{
    CatalogAccountKey,
    CustomMetadataDef,
    TagDef,
    TypeDefError,
    TypeDefRepository,
};

use crate::CatalogApiConfig;
use crate::api_client::TypeDefsResponse;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct HttpCatalogApi {
    config: Arc<CatalogApiConfig>,
    client: tokio::sync::OnceCell<reqwest::Client>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::scope(dill::Singleton)]
#[dill::interface(dyn SearchIndexRepository)]
#[dill::interface(dyn TypeDefRepository)]
impl HttpCatalogApi {
    pub fn new(config: Arc<CatalogApiConfig>) -> Self {
        assert!(
            !config.url.cannot_be_a_base() && config.url.path().ends_with('/'),
            "Invalid catalog base url: {}",
            config.url,
        );
        Self {
            config,
            client: tokio::sync::OnceCell::new(),
        }
    }

    /// Identity this client represents in the cache registry.
    pub fn account_key(&self) -> CatalogAccountKey {
        let credential_fingerprint =
            crc32fast::hash(self.config.access_token.expose_secret().as_bytes());
        CatalogAccountKey::from_endpoint(
            self.config.url.as_str().trim_end_matches('/'),
            credential_fingerprint,
        )
    }

    async fn client(&self) -> Result<&reqwest::Client, InternalError> {
        let client = self
            .client
            .get_or_try_init(async || self.init_client())
            .await?;
        Ok(client)
    }

    fn init_client(&self) -> Result<reqwest::Client, InternalError> {
        let mut auth_header = http::HeaderValue::try_from(format!(
            "Bearer {}",
            self.config.access_token.expose_secret(),
        ))
        .int_err()?;
        auth_header.set_sensitive(true);

        let mut default_headers = http::HeaderMap::new();
        default_headers.insert(http::header::AUTHORIZATION, auth_header);

        reqwest::Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .build()
            .int_err()
    }

    async fn get_typedefs(&self, category: &str) -> Result<TypeDefsResponse, CatalogApiCallError> {
        let client = self.client().await?;
        let url = self.config.url.join("api/meta/types/typedefs").int_err()?;

        let response = client
            .get(url)
            .query(&[("type", category)])
            .send()
            .await
            .int_err()?;
        let response = check_response_status(response)?;

        let parsed = response.json::<TypeDefsResponse>().await.int_err()?;
        Ok(parsed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SearchIndexRepository for HttpCatalogApi {
    #[tracing::instrument(level = "debug", name = "HttpCatalogApi_search", skip_all)]
    async fn search(
        &self,
        request: IndexSearchRequest,
    ) -> Result<IndexSearchResponse, SearchIndexError> {
        let client = self.client().await?;
        let url = self
            .config
            .url
            .join("api/meta/search/indexsearch")
            .int_err()?;

        let response = client.post(url).json(&request).send().await.int_err()?;
        let response = check_response_status(response)?;

        let parsed = response.json::<IndexSearchResponse>().await.int_err()?;

        tracing::debug!(
            num_entities = parsed.entities.len(),
            approximate_count = parsed.approximate_count,
            "Index search round-trip complete",
        );

        Ok(parsed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl TypeDefRepository for HttpCatalogApi {
    #[tracing::instrument(level = "debug", name = "HttpCatalogApi_list_tag_defs", skip_all)]
    async fn list_tag_defs(&self) -> Result<Vec<TagDef>, TypeDefError> {
        let response = self.get_typedefs("classification").await?;
        Ok(response.classification_defs)
    }

    #[tracing::instrument(level = "debug", name = "HttpCatalogApi_list_custom_metadata_defs", skip_all)]
    async fn list_custom_metadata_defs(&self) -> Result<Vec<CustomMetadataDef>, TypeDefError> {
        let response = self.get_typedefs("business_metadata").await?;
        Ok(response.business_metadata_defs)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Status mapping
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

enum CatalogApiCallError {
    AccessDenied { message: String },
    Internal(InternalError),
}

impl From<InternalError> for CatalogApiCallError {
    fn from(e: InternalError) -> Self {
        Self::Internal(e)
    }
}

impl From<CatalogApiCallError> for SearchIndexError {
    fn from(e: CatalogApiCallError) -> Self {
        match e {
            CatalogApiCallError::AccessDenied { message } => Self::AccessDenied { message },
            CatalogApiCallError::Internal(e) => Self::Internal(e),
        }
    }
}

impl From<CatalogApiCallError> for TypeDefError {
    fn from(e: CatalogApiCallError) -> Self {
        match e {
            CatalogApiCallError::AccessDenied { message } => Self::AccessDenied { message },
            CatalogApiCallError::Internal(e) => Self::Internal(e),
        }
    }
}

fn check_response_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, CatalogApiCallError> {
    match response.error_for_status_ref() {
        Ok(_) => Ok(response),
        Err(e)
            if e.status() == Some(http::StatusCode::UNAUTHORIZED)
                || e.status() == Some(http::StatusCode::FORBIDDEN) =>
        {
            Err(CatalogApiCallError::AccessDenied {
                message: e.to_string(),
            })
        }
        Err(e) => Err(CatalogApiCallError::Internal(e.int_err())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
