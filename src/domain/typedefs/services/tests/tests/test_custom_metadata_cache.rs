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

use tabula_typedefs::*;
use tabula_typedefs_services::CustomMetadataCache;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn attr_def(id: &str, display_name: &str, is_archived: bool) -> AttributeDef {
    AttributeDef {
        id: id.to_string(),
        display_name: display_name.to_string(),
        type_name: "string".to_string(),
        description: None,
        is_archived,
    }
}

fn quality_set() -> CustomMetadataDef {
    CustomMetadataDef {
        id: "mQ3xPbhVgk".to_string(),
        display_name: "Data Quality".to_string(),
        description: None,
        attribute_defs: vec![
            attr_def("aF7wRtmZcN", "Completeness", false),
            attr_def("aJ2qLypXsD", "Freshness", false),
            attr_def("aj9KvuBfhT", "Legacy Score", true),
        ],
    }
}

fn ownership_set() -> CustomMetadataDef {
    CustomMetadataDef {
        id: "mV5cWdnYrL".to_string(),
        display_name: "Ownership".to_string(),
        description: None,
        attribute_defs: vec![attr_def("aj0HgkQwnM", "Steward", false)],
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_set_level_round_trip() {
    let mut mock_typedef_repo = MockTypeDefRepository::new();
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(|| Ok(vec![quality_set(), ownership_set()]));

    let cache = CustomMetadataCache::new(Arc::new(mock_typedef_repo));

    let id = cache.get_id_for_name("Data Quality").await.unwrap().unwrap();
    assert_eq!(id, "mQ3xPbhVgk");
    assert_eq!(
        cache.get_name_for_id(&id).await.unwrap().as_deref(),
        Some("Data Quality")
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_attribute_lookups_are_scoped_by_set() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![quality_set(), ownership_set()])
        });

    let cache = CustomMetadataCache::new(Arc::new(mock_typedef_repo));

    assert_eq!(
        cache
            .get_attr_id_for_name("Data Quality", "Completeness")
            .await
            .unwrap()
            .as_deref(),
        Some("aF7wRtmZcN")
    );
    assert_eq!(
        cache
            .get_attr_name_for_id("mQ3xPbhVgk", "aJ2qLypXsD")
            .await
            .unwrap()
            .as_deref(),
        Some("Freshness")
    );
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    // The attribute exists, but under another set
    assert_eq!(
        cache
            .get_attr_id_for_name("Ownership", "Completeness")
            .await
            .unwrap(),
        None
    );

    // The confirmed miss is scoped: the same attribute still resolves
    // within its own set without new upstream traffic
    assert_eq!(
        cache
            .get_attr_id_for_name("Ownership", "Completeness")
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        cache
            .get_attr_id_for_name("Data Quality", "Completeness")
            .await
            .unwrap()
            .as_deref(),
        Some("aF7wRtmZcN")
    );
    assert_eq!(num_calls.load(Ordering::SeqCst), 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_get_all_custom_attributes_filters_archived() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![quality_set(), ownership_set()])
        });

    let cache = CustomMetadataCache::new(Arc::new(mock_typedef_repo));

    // Lazy population on first use
    let attrs = cache.get_all_custom_attributes(false, false).await.unwrap();
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    assert_eq!(
        attrs.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Data Quality", "Ownership"]
    );
    assert_eq!(
        attrs["Data Quality"]
            .iter()
            .map(|a| a.display_name.as_str())
            .collect::<Vec<_>>(),
        vec!["Completeness", "Freshness"]
    );

    // Archived attributes included on demand, no refresh needed
    let attrs = cache.get_all_custom_attributes(true, false).await.unwrap();
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);
    assert_eq!(attrs["Data Quality"].len(), 3);
    assert!(attrs["Data Quality"].iter().any(|a| a.is_archived));

    // Forced refresh goes upstream again
    cache.get_all_custom_attributes(false, true).await.unwrap();
    assert_eq!(num_calls.load(Ordering::SeqCst), 2);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_set_is_soft_miss() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![quality_set()])
        });

    let cache = CustomMetadataCache::new(Arc::new(mock_typedef_repo));

    assert_eq!(cache.get_id_for_name("Retired Set").await.unwrap(), None);
    assert_eq!(cache.get_id_for_name("Retired Set").await.unwrap(), None);
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);

    // Empty inputs never reach the catalog
    assert_eq!(cache.get_attr_id_for_name("", "Completeness").await.unwrap(), None);
    assert_eq!(cache.get_attr_name_for_id("mQ3xPbhVgk", "").await.unwrap(), None);
    assert_eq!(num_calls.load(Ordering::SeqCst), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_refresh_replaces_attribute_maps_atomically() {
    let num_calls = Arc::new(AtomicUsize::new(0));

    let mut mock_typedef_repo = MockTypeDefRepository::new();
    let counter = Arc::clone(&num_calls);
    mock_typedef_repo
        .expect_list_custom_metadata_defs()
        .returning(move || {
            match counter.fetch_add(1, Ordering::SeqCst) {
                0 => Ok(vec![quality_set()]),
                // "Freshness" renamed, keeping its attribute id
                _ => Ok(vec![CustomMetadataDef {
                    attribute_defs: vec![
                        attr_def("aF7wRtmZcN", "Completeness", false),
                        attr_def("aJ2qLypXsD", "Staleness", false),
                    ],
                    ..quality_set()
                }]),
            }
        });

    let cache = CustomMetadataCache::new(Arc::new(mock_typedef_repo));
    cache.refresh().await.unwrap();
    cache.refresh().await.unwrap();

    assert_eq!(
        cache
            .get_attr_name_for_id("mQ3xPbhVgk", "aJ2qLypXsD")
            .await
            .unwrap()
            .as_deref(),
        Some("Staleness")
    );

    // The old display name is gone from the inverse direction too;
    // the confirming lookup triggers one more refresh before giving up
    assert_eq!(
        cache
            .get_attr_id_for_name("Data Quality", "Freshness")
            .await
            .unwrap(),
        None
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
