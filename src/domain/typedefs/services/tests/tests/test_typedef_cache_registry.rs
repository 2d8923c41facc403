// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use tabula_typedefs::*;
use tabula_typedefs_services::TypeDefCacheRegistry;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn typedef_repo() -> Arc<dyn TypeDefRepository> {
    let mut mock_typedef_repo = MockTypeDefRepository::new();
    mock_typedef_repo
        .expect_list_tag_defs()
        .returning(|| Ok(vec![]));
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(|| Ok(vec![]));
    Arc::new(mock_typedef_repo)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_create_or_get_is_keyed_by_account() {
    let registry = TypeDefCacheRegistry::new();

    let key_a = CatalogAccountKey::from_endpoint("https://acme.tabula.dev", 0x1111_2222);
    let key_b = CatalogAccountKey::from_endpoint("https://acme.tabula.dev", 0x3333_4444);

    let repo = typedef_repo();

    // Same key gets the same instance back
    let cache_1 = registry.tag_cache(&key_a, &repo);
    let cache_2 = registry.tag_cache(&key_a, &repo);
    assert!(Arc::ptr_eq(&cache_1, &cache_2));

    // A different credential against the same endpoint gets its own cache
    let cache_3 = registry.tag_cache(&key_b, &repo);
    assert!(!Arc::ptr_eq(&cache_1, &cache_3));

    // Tag and custom metadata caches are independent per key
    let cm_cache_1 = registry.custom_metadata_cache(&key_a, &repo);
    let cm_cache_2 = registry.custom_metadata_cache(&key_a, &repo);
    assert!(Arc::ptr_eq(&cm_cache_1, &cm_cache_2));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test]
fn test_account_key_embeds_fingerprint_not_credential() {
    let key = CatalogAccountKey::from_endpoint("https://acme.tabula.dev", 0xDEAD_BEEF);
    assert_eq!(key.as_str(), "https://acme.tabula.dev#deadbeef");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
