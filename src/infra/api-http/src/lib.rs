// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

pub(crate) mod api_client;

mod catalog_api_config;
mod http_catalog_api;

pub use catalog_api_config::*;
pub use http_catalog_api::*;
