// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod custom_metadata_cache;
mod tag_cache;
mod typedef_cache_registry;

pub use custom_metadata_cache::*;
pub use tag_cache::*;
pub use typedef_cache_registry::*;
