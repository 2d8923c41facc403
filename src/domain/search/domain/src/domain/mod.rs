// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod index_search_request;
mod index_search_response;
mod query_expr;
mod search_schema;
mod sort_spec;

pub use index_search_request::*;
pub use index_search_response::*;
pub use query_expr::*;
pub use search_schema::*;
pub use sort_spec::*;
