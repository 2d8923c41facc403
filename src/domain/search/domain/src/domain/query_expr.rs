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

/// Closed set of query node types understood by the catalog search index.
///
/// Nodes are immutable value objects. The only operation is [`QueryExpr::to_document`],
/// which is total and pure: optional members absent from the node are absent
/// from the compiled document (never emitted as `null`). Validation of
/// semantically odd combinations (e.g. a range with no bounds) is left to the
/// service.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExpr {
    Term(TermQuery),
    Terms(TermsQuery),
    Range(RangeQuery),
    Prefix(PrefixQuery),
    Wildcard(WildcardQuery),
    Regexp(RegexpQuery),
    Fuzzy(FuzzyQuery),
    Match(MatchQuery),
    MatchAll(MatchAllQuery),
    MatchNone,
    Exists(ExistsQuery),
    Bool(BoolQuery),
    Nested(NestedQuery),
}

impl QueryExpr {
    pub fn to_document(&self) -> Value {
        match self {
            QueryExpr::Term(q) => q.to_document(),
            QueryExpr::Terms(q) => q.to_document(),
            QueryExpr::Range(q) => q.to_document(),
            QueryExpr::Prefix(q) => q.to_document(),
            QueryExpr::Wildcard(q) => q.to_document(),
            QueryExpr::Regexp(q) => q.to_document(),
            QueryExpr::Fuzzy(q) => q.to_document(),
            QueryExpr::Match(q) => q.to_document(),
            QueryExpr::MatchAll(q) => q.to_document(),
            QueryExpr::MatchNone => serde_json::json!({ "match_none": {} }),
            QueryExpr::Exists(q) => q.to_document(),
            QueryExpr::Bool(q) => q.to_document(),
            QueryExpr::Nested(q) => q.to_document(),
        }
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        QueryExpr::Term(TermQuery {
            field: field.into(),
            value: value.into(),
        })
    }

    pub fn terms<V>(field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self
    where
        V: Into<Value>,
    {
        QueryExpr::Terms(TermsQuery {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            boost: None,
        })
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        QueryExpr::Prefix(PrefixQuery {
            field: field.into(),
            value: value.into(),
            case_insensitive: None,
            boost: None,
        })
    }

    pub fn exists(field: impl Into<String>) -> Self {
        QueryExpr::Exists(ExistsQuery {
            field: field.into(),
        })
    }

    pub fn match_all() -> Self {
        QueryExpr::MatchAll(MatchAllQuery { boost: None })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    pub field: String,
    pub value: Value,
}

impl TermQuery {
    pub fn to_document(&self) -> Value {
        let field = self.field.as_str();
        serde_json::json!({
            "term": {
                field: {
                    "value": self.value,
                }
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct TermsQuery {
    pub field: String,
    pub values: Vec<Value>,
    pub boost: Option<f32>,
}

impl TermsQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert(self.field.clone(), Value::from(self.values.clone()));
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }
        serde_json::json!({ "terms": body })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeQuery {
    pub field: String,
    pub gt: Option<Value>,
    pub gte: Option<Value>,
    pub lt: Option<Value>,
    pub lte: Option<Value>,
    pub boost: Option<f32>,
    pub format: Option<String>,
    pub relation: Option<String>,
    pub time_zone: Option<String>,
}

impl RangeQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        for (key, bound) in [
            ("gt", &self.gt),
            ("gte", &self.gte),
            ("lt", &self.lt),
            ("lte", &self.lte),
        ] {
            if let Some(bound) = bound {
                body.insert(key.to_string(), bound.clone());
            }
        }
        if let Some(format) = &self.format {
            body.insert("format".to_string(), Value::from(format.clone()));
        }
        if let Some(relation) = &self.relation {
            body.insert("relation".to_string(), Value::from(relation.clone()));
        }
        if let Some(time_zone) = &self.time_zone {
            body.insert("time_zone".to_string(), Value::from(time_zone.clone()));
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "range": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixQuery {
    pub field: String,
    pub value: String,
    pub case_insensitive: Option<bool>,
    pub boost: Option<f32>,
}

impl PrefixQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), Value::from(self.value.clone()));
        if let Some(case_insensitive) = self.case_insensitive {
            body.insert(
                "case_insensitive".to_string(),
                Value::from(case_insensitive),
            );
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "prefix": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct WildcardQuery {
    pub field: String,
    pub value: String,
    pub case_insensitive: Option<bool>,
    pub boost: Option<f32>,
}

impl WildcardQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), Value::from(self.value.clone()));
        if let Some(case_insensitive) = self.case_insensitive {
            body.insert(
                "case_insensitive".to_string(),
                Value::from(case_insensitive),
            );
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "wildcard": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct RegexpQuery {
    pub field: String,
    pub value: String,
    pub flags: Option<String>,
    pub case_insensitive: Option<bool>,
    pub boost: Option<f32>,
}

impl RegexpQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), Value::from(self.value.clone()));
        if let Some(flags) = &self.flags {
            body.insert("flags".to_string(), Value::from(flags.clone()));
        }
        if let Some(case_insensitive) = self.case_insensitive {
            body.insert(
                "case_insensitive".to_string(),
                Value::from(case_insensitive),
            );
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "regexp": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyQuery {
    pub field: String,
    pub value: String,
    pub fuzziness: Option<String>,
    pub max_expansions: Option<u32>,
    pub prefix_length: Option<u32>,
    pub boost: Option<f32>,
}

impl FuzzyQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("value".to_string(), Value::from(self.value.clone()));
        if let Some(fuzziness) = &self.fuzziness {
            body.insert("fuzziness".to_string(), Value::from(fuzziness.clone()));
        }
        if let Some(max_expansions) = self.max_expansions {
            body.insert("max_expansions".to_string(), Value::from(max_expansions));
        }
        if let Some(prefix_length) = self.prefix_length {
            body.insert("prefix_length".to_string(), Value::from(prefix_length));
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "fuzzy": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct MatchQuery {
    pub field: String,
    pub query: String,
    pub operator: Option<String>,
    pub fuzziness: Option<String>,
    pub boost: Option<f32>,
}

impl MatchQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("query".to_string(), Value::from(self.query.clone()));
        if let Some(operator) = &self.operator {
            body.insert("operator".to_string(), Value::from(operator.clone()));
        }
        if let Some(fuzziness) = &self.fuzziness {
            body.insert("fuzziness".to_string(), Value::from(fuzziness.clone()));
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }

        let field = self.field.as_str();
        serde_json::json!({ "match": { field: body } })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MatchAllQuery {
    pub boost: Option<f32>,
}

impl MatchAllQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }
        serde_json::json!({ "match_all": body })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct ExistsQuery {
    pub field: String,
}

impl ExistsQuery {
    pub fn to_document(&self) -> Value {
        serde_json::json!({
            "exists": {
                "field": self.field,
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Composite node. Clause order within each role is preserved in the
/// compiled document; a role with zero clauses is omitted entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoolQuery {
    pub must: Vec<QueryExpr>,
    pub should: Vec<QueryExpr>,
    pub must_not: Vec<QueryExpr>,
    pub filter: Vec<QueryExpr>,
    pub boost: Option<f32>,
    pub minimum_should_match: Option<usize>,
}

impl BoolQuery {
    pub fn filter_clauses(clauses: Vec<QueryExpr>) -> Self {
        Self {
            filter: clauses,
            ..Self::default()
        }
    }

    pub fn must_not_clauses(clauses: Vec<QueryExpr>) -> Self {
        Self {
            must_not: clauses,
            ..Self::default()
        }
    }

    pub fn should_clauses(clauses: Vec<QueryExpr>) -> Self {
        Self {
            should: clauses,
            ..Self::default()
        }
    }

    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        for (role, clauses) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
            ("filter", &self.filter),
        ] {
            if !clauses.is_empty() {
                let compiled: Vec<Value> = clauses.iter().map(QueryExpr::to_document).collect();
                body.insert(role.to_string(), Value::from(compiled));
            }
        }
        if let Some(minimum_should_match) = self.minimum_should_match {
            body.insert(
                "minimum_should_match".to_string(),
                Value::from(minimum_should_match),
            );
        }
        if let Some(boost) = self.boost {
            body.insert("boost".to_string(), Value::from(boost));
        }
        serde_json::json!({ "bool": body })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub struct NestedQuery {
    pub path: String,
    pub query: Box<QueryExpr>,
    pub score_mode: Option<String>,
    pub ignore_unmapped: Option<bool>,
}

impl NestedQuery {
    pub fn to_document(&self) -> Value {
        let mut body = Map::new();
        body.insert("path".to_string(), Value::from(self.path.clone()));
        body.insert("query".to_string(), self.query.to_document());
        if let Some(score_mode) = &self.score_mode {
            body.insert("score_mode".to_string(), Value::from(score_mode.clone()));
        }
        if let Some(ignore_unmapped) = self.ignore_unmapped {
            body.insert("ignore_unmapped".to_string(), Value::from(ignore_unmapped));
        }
        serde_json::json!({ "nested": body })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
