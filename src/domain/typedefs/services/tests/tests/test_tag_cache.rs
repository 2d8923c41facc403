// Copyright Tabula Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use internal_error::InternalError;
use tabula_typedefs::*;
use tabula_typedefs_services::TagCache;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn tag_def(id: &str, display_name: &str) -> TagDef {
    TagDef {
        id: id.to_string(),
        display_name: display_name.to_string(),
        description: None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_miss_triggers_exactly_one_refresh_then_hits_from_cache() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo.expect_list_tag_defs().returning(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![tag_def("zKx1fW7pgQ", "Hourly"), tag_def("b93RqTdMnY", "PII")])
    });

    let cache = TagCache::new(Arc::new(mock_typedef_repo));

    // Cold miss resynchronizes once, then resolves
    let id = cache.get_id_for_name("Hourly").await.unwrap();
    assert_eq!(id.as_deref(), Some("zKx1fW7pgQ"));
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    // Further lookups in both directions are served from the maps
    assert_eq!(
        cache.get_id_for_name("Hourly").await.unwrap().as_deref(),
        Some("zKx1fW7pgQ")
    );
    assert_eq!(
        cache.get_name_for_id("b93RqTdMnY").await.unwrap().as_deref(),
        Some("PII")
    );
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_round_trip_translation_is_inverse() {
    let mut mock_typedef_repo = MockTypeDefRepository::new();
    mock_typedef_repo.expect_list_tag_defs().returning(|| {
        Ok(vec![
            tag_def("zKx1fW7pgQ", "Hourly"),
            tag_def("b93RqTdMnY", "PII"),
            tag_def("c5T0WhsJkz", "Confidential"),
        ])
    });

    let cache = TagCache::new(Arc::new(mock_typedef_repo));
    cache.refresh().await.unwrap();

    for name in ["Hourly", "PII", "Confidential"] {
        let id = cache.get_id_for_name(name).await.unwrap().unwrap();
        assert_eq!(cache.get_name_for_id(&id).await.unwrap().as_deref(), Some(name));
    }
    for id in ["zKx1fW7pgQ", "b93RqTdMnY", "c5T0WhsJkz"] {
        let name = cache.get_name_for_id(id).await.unwrap().unwrap();
        assert_eq!(cache.get_id_for_name(&name).await.unwrap().as_deref(), Some(id));
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_undefined_name_is_soft_miss_and_short_circuits() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo.expect_list_tag_defs().returning(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(vec![tag_def("zKx1fW7pgQ", "Hourly")])
    });

    let cache = TagCache::new(Arc::new(mock_typedef_repo));

    // One refresh confirms the miss, no error raised
    assert_eq!(cache.get_id_for_name("NonExistentTag").await.unwrap(), None);
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    // The confirmed miss is remembered: no further upstream traffic
    assert_eq!(cache.get_id_for_name("NonExistentTag").await.unwrap(), None);
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    // Same for ids
    assert_eq!(cache.get_name_for_id("deadbeef01").await.unwrap(), None);
    assert_eq!(cache.get_name_for_id("deadbeef01").await.unwrap(), None);
    assert_eq!(num_calls.load(Ordering::SeqCst), 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_empty_name_resolves_to_none_without_upstream_call() {
    let mock_typedef_repo = MockTypeDefRepository::new();
    let cache = TagCache::new(Arc::new(mock_typedef_repo));

    assert_eq!(cache.get_id_for_name("").await.unwrap(), None);
    assert_eq!(cache.get_name_for_id("").await.unwrap(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_failed_refresh_keeps_stale_maps_intact() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo.expect_list_tag_defs().returning(move || {
        match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(vec![tag_def("zKx1fW7pgQ", "Hourly")]),
            _ => Err(TypeDefError::Internal(InternalError::new("connection reset"))),
        }
    });

    let cache = TagCache::new(Arc::new(mock_typedef_repo));
    cache.refresh().await.unwrap();

    // Second refresh fails...
    assert!(matches!(
        cache.refresh().await,
        Err(TypeDefError::Internal(_))
    ));

    // ...but the previously committed maps still serve lookups
    assert_eq!(
        cache.get_id_for_name("Hourly").await.unwrap().as_deref(),
        Some("zKx1fW7pgQ")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_lookup_error_propagates_from_triggered_refresh() {
    let mut mock_typedef_repo = MockTypeDefRepository::new();
    mock_typedef_repo
        .expect_list_tag_defs()
        .returning(|| Err(TypeDefError::AccessDenied {
            message: "expired token".to_string(),
        }));

    let cache = TagCache::new(Arc::new(mock_typedef_repo));

    assert!(matches!(
        cache.get_id_for_name("Hourly").await,
        Err(TypeDefError::AccessDenied { .. })
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test(flavor = "multi_thread"))]
async fn test_concurrent_lookups_observe_complete_map_sets() {
    let mut mock_typedef_repo = MockTypeDefRepository::new();
    mock_typedef_repo.expect_list_tag_defs().returning(|| {
        Ok(vec![
            tag_def("zKx1fW7pgQ", "Hourly"),
            tag_def("b93RqTdMnY", "PII"),
        ])
    });

    let cache = Arc::new(TagCache::new(Arc::new(mock_typedef_repo)));

    let mut join_set = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let cache = Arc::clone(&cache);
        join_set.spawn(async move {
            for _ in 0..50 {
                // Both directions must always agree, whichever of the
                // concurrent refreshes committed last
                let id = cache.get_id_for_name("Hourly").await.unwrap().unwrap();
                assert_eq!(id, "zKx1fW7pgQ");
                let name = cache.get_name_for_id(&id).await.unwrap().unwrap();
                assert_eq!(name, "Hourly");
            }
        });
    }
    for _ in 0..4 {
        let cache = Arc::clone(&cache);
        join_set.spawn(async move {
            for _ in 0..10 {
                cache.refresh().await.unwrap();
            }
        });
    }

    while let Some(res) = join_set.join_next().await {
        res.unwrap();
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_refresh_drops_stale_mappings_in_both_directions() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo.expect_list_tag_defs().returning(move || {
        match counter.fetch_add(1, Ordering::SeqCst) {
            0 => Ok(vec![tag_def("zKx1fW7pgQ", "Hourly")]),
            // The tag was deleted and re-created under a new hashed id
            _ => Ok(vec![tag_def("nG4vchR2qL", "Hourly")]),
        }
    });

    let cache = TagCache::new(Arc::new(mock_typedef_repo));
    cache.refresh().await.unwrap();
    cache.refresh().await.unwrap();

    // New mapping present both ways
    assert_eq!(
        cache.get_id_for_name("Hourly").await.unwrap().as_deref(),
        Some("nG4vchR2qL")
    );
    assert_eq!(
        cache.get_name_for_id("nG4vchR2qL").await.unwrap().as_deref(),
        Some("Hourly")
    );

    // No dangling one-directional leftover of the old id
    assert_eq!(cache.get_name_for_id("zKx1fW7pgQ").await.unwrap(), None);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
