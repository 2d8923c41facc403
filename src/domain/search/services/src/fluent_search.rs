// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use tabula_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Chainable accumulator for building an [`IndexSearchRequest`] without
/// hand-writing the query document.
///
/// Each mutator is a pure accumulation; [`FluentSearch::to_request`] is a
/// pure function of the accumulated state, so compiling the same builder
/// twice yields identical documents. A builder instance belongs to a single
/// logical search operation and is not meant for concurrent mutation.
#[derive(Debug, Clone, Default)]
pub struct FluentSearch {
    wheres: Vec<QueryExpr>,
    where_nots: Vec<QueryExpr>,
    where_somes: Vec<QueryExpr>,
    min_somes: Option<usize>,
    sorts: Vec<SortSpec>,
    page_size: Option<usize>,
    aggregations: BTreeMap<String, serde_json::Value>,
    includes_on_results: Vec<String>,
    includes_on_relations: Vec<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl FluentSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an exact-value positive filter on `field`.
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.where_expr(QueryExpr::term(field, value))
    }

    /// Appends an arbitrary query node as a positive filter clause.
    pub fn where_expr(mut self, query: QueryExpr) -> Self {
        self.wheres.push(query);
        self
    }

    /// Excludes assets matching any of the given queries.
    pub fn where_not(mut self, queries: impl IntoIterator<Item = QueryExpr>) -> Self {
        self.where_nots.extend(queries);
        self
    }

    /// Requires at least [`FluentSearch::min_some`] of the given queries to
    /// match (one, if never set).
    pub fn where_some(mut self, queries: impl IntoIterator<Item = QueryExpr>) -> Self {
        self.where_somes.extend(queries);
        self
    }

    pub fn min_some(mut self, count: usize) -> Self {
        self.min_somes = Some(count);
        self
    }

    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sorts.push(spec);
        self
    }

    /// Page size must be positive; values are forwarded to the service
    /// without clamping.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Last write wins on duplicate aggregation names.
    pub fn aggregate(mut self, name: impl Into<String>, definition: serde_json::Value) -> Self {
        self.aggregations.insert(name.into(), definition);
        self
    }

    pub fn include_on_results<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.includes_on_results
            .extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn include_on_relations<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.includes_on_relations
            .extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn active_assets(self) -> Self {
        self.where_eq(fields::STATE, asset_state::ACTIVE)
    }

    pub fn archived_assets(self) -> Self {
        self.where_eq(fields::STATE, asset_state::DELETED)
    }

    pub fn asset_type(self, type_name: impl Into<String>) -> Self {
        self.where_eq(fields::TYPE_NAME, type_name.into())
    }

    pub fn asset_types<S: Into<String>>(self, type_names: impl IntoIterator<Item = S>) -> Self {
        self.where_expr(QueryExpr::terms(
            fields::TYPE_NAME,
            type_names.into_iter().map(Into::into),
        ))
    }

    /// Compiles the accumulated state into a single request document.
    pub fn to_request(&self) -> IndexSearchRequest {
        let mut query: Option<QueryExpr> = if self.wheres.is_empty() {
            None
        } else {
            Some(QueryExpr::Bool(BoolQuery::filter_clauses(
                self.wheres.clone(),
            )))
        };

        if !self.where_nots.is_empty() {
            query = Some(match query {
                None => QueryExpr::Bool(BoolQuery::must_not_clauses(self.where_nots.clone())),
                // Compatibility contract: the prior query is carried under
                // both `filter` and `must` of the composite
                Some(prior) => QueryExpr::Bool(BoolQuery {
                    filter: vec![prior.clone()],
                    must: vec![prior],
                    must_not: self.where_nots.clone(),
                    ..BoolQuery::default()
                }),
            });
        }

        if !self.where_somes.is_empty() {
            query = Some(match query {
                None => QueryExpr::Bool(BoolQuery {
                    should: self.where_somes.clone(),
                    minimum_should_match: self.min_somes,
                    ..BoolQuery::default()
                }),
                Some(prior) => QueryExpr::Bool(BoolQuery {
                    filter: vec![prior.clone()],
                    must: vec![prior],
                    should: self.where_somes.clone(),
                    minimum_should_match: self.min_somes,
                    ..BoolQuery::default()
                }),
            });
        }

        let mut sorts = self.sorts.clone();
        if !sorts.is_empty() && !sorts.iter().any(|s| s.field == fields::GUID) {
            sorts.push(SortSpec::ascending(fields::GUID));
        }

        IndexSearchRequest {
            dsl: SearchDsl {
                from: 0,
                size: self.page_size.unwrap_or(DEFAULT_SEARCH_PAGE_SIZE),
                track_total_hits: true,
                query: query.map(|q| q.to_document()),
                sort: sorts.iter().map(SortSpec::to_document).collect(),
                aggregations: self.aggregations.clone(),
            },
            attributes: self.includes_on_results.clone(),
            relation_attributes: self.includes_on_relations.clone(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
