// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tabula_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Drives repeated search request/response cycles against the catalog,
/// advancing an offset cursor until the index is exhausted.
///
/// Pages are strictly ordered by ascending offset. Before the first request
/// the pager ensures an ascending sort on the internal unique identifier, so
/// the page sequence forms a stable total order even while the underlying
/// catalog receives writes.
///
/// Exhaustion is decided solely by a short page (fewer results than the
/// requested page size); the service-reported approximate count is exposed
/// via [`IndexSearchPager::approximate_count`] but never drives termination.
pub struct IndexSearchPager {
    search_repo: Arc<dyn SearchIndexRepository>,
    request: IndexSearchRequest,
    state: IndexSearchPagerState,
    offset: usize,
    page_size: usize,
    total_fetched: u64,
    approximate_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSearchPagerState {
    Ready,
    Exhausted,
    Failed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl IndexSearchPager {
    pub fn new(search_repo: Arc<dyn SearchIndexRepository>, mut request: IndexSearchRequest) -> Self {
        Self::ensure_stable_order(&mut request.dsl);

        let offset = request.dsl.from;
        let page_size = request.dsl.size;

        Self {
            search_repo,
            request,
            state: IndexSearchPagerState::Ready,
            offset,
            page_size,
            total_fetched: 0,
            approximate_count: None,
        }
    }

    fn ensure_stable_order(dsl: &mut SearchDsl) {
        let has_guid_sort = dsl
            .sort
            .iter()
            .any(|sort| sort.get(fields::GUID).is_some());
        if !has_guid_sort {
            dsl.sort.push(SortSpec::ascending(fields::GUID).to_document());
        }
    }

    pub fn state(&self) -> IndexSearchPagerState {
        self.state
    }

    pub fn has_more_results(&self) -> bool {
        self.state == IndexSearchPagerState::Ready
    }

    pub fn total_fetched(&self) -> u64 {
        self.total_fetched
    }

    /// Latest service-side estimate of the total number of matches.
    pub fn approximate_count(&self) -> Option<u64> {
        self.approximate_count
    }

    /// Fetches the next page of matching entities, or `Ok(None)` once the
    /// index is exhausted.
    ///
    /// A transport failure is surfaced verbatim and leaves the cursor at the
    /// failed offset; the pager then stays in the terminal `Failed` state. A
    /// fresh pager restarts from the initial offset.
    #[tracing::instrument(
        level = "debug",
        name = "IndexSearchPager_next_page",
        skip_all,
        fields(offset = self.offset, page_size = self.page_size)
    )]
    pub async fn next_page(
        &mut self,
    ) -> Result<Option<Vec<serde_json::Value>>, SearchIndexError> {
        if self.state != IndexSearchPagerState::Ready {
            return Ok(None);
        }

        let mut request = self.request.clone();
        request.dsl.from = self.offset;

        let response = match self.search_repo.search(request).await {
            Ok(response) => response,
            Err(e) => {
                self.state = IndexSearchPagerState::Failed;
                return Err(e);
            }
        };

        if response.approximate_count.is_some() {
            self.approximate_count = response.approximate_count;
        }

        let page = response.entities;
        self.total_fetched += page.len() as u64;

        if page.len() < self.page_size {
            self.state = IndexSearchPagerState::Exhausted;
        } else {
            self.offset += self.page_size;
        }

        tracing::debug!(
            num_entities = page.len(),
            total_fetched = self.total_fetched,
            exhausted = (self.state == IndexSearchPagerState::Exhausted),
            "Fetched index search page",
        );

        if page.is_empty() {
            return Ok(None);
        }

        Ok(Some(page))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
