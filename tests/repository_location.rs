mod common;

use serde_json::json;
use std::sync::Arc;

use geo_locator::domain::entities::NewGeoLocation;
use geo_locator::domain::identifier::RequestIdentifier;
use geo_locator::domain::repositories::LocationRepository;
use geo_locator::error::AppError;
use geo_locator::infrastructure::persistence::SqliteLocationRepository;

async fn repository() -> SqliteLocationRepository {
    SqliteLocationRepository::new(Arc::new(common::test_pool().await))
}

fn new_location(ip: &str) -> NewGeoLocation {
    NewGeoLocation {
        ip: ip.to_string(),
        provider_response: json!({ "ip": ip, "country_code": "US" }),
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let repo = repository().await;

    let stored = repo
        .insert(NewGeoLocation {
            ip: common::GOOGLE_IP.to_string(),
            provider_response: common::google_record(),
        })
        .await
        .unwrap();

    assert!(stored.id > 0);
    assert_eq!(stored.ip, common::GOOGLE_IP);

    let found = repo.find_by_ip(common::GOOGLE_IP).await.unwrap().unwrap();
    assert_eq!(found.id, stored.id);
    assert_eq!(found.provider_response, common::google_record());
    assert_eq!(found.created_at, stored.created_at);
}

#[tokio::test]
async fn test_find_missing() {
    let repo = repository().await;

    assert!(repo.find_by_ip("192.0.2.1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_already_exists() {
    let repo = repository().await;

    repo.insert(new_location("192.0.2.1")).await.unwrap();
    let result = repo.insert(new_location("192.0.2.1")).await;

    assert!(matches!(result, Err(AppError::AlreadyExists)));
    assert_eq!(repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_delete_by_ip() {
    let repo = repository().await;

    repo.insert(new_location("192.0.2.1")).await.unwrap();
    repo.insert(new_location("192.0.2.2")).await.unwrap();

    assert!(repo.delete_by_ip("192.0.2.1").await.unwrap());
    assert!(!repo.delete_by_ip("192.0.2.1").await.unwrap());

    assert!(repo.find_by_ip("192.0.2.1").await.unwrap().is_none());
    assert!(repo.find_by_ip("192.0.2.2").await.unwrap().is_some());
}

#[tokio::test]
async fn test_list_and_count() {
    let repo = repository().await;

    for i in 1..=5 {
        repo.insert(new_location(&format!("192.0.2.{i}"))).await.unwrap();
    }

    assert_eq!(repo.count().await.unwrap(), 5);

    let first_page = repo.list(1, 2).await.unwrap();
    assert_eq!(first_page.len(), 2);
    // Newest first
    assert_eq!(first_page[0].ip, "192.0.2.5");
    assert_eq!(first_page[1].ip, "192.0.2.4");

    let last_page = repo.list(3, 2).await.unwrap();
    assert_eq!(last_page.len(), 1);
    assert_eq!(last_page[0].ip, "192.0.2.1");

    assert!(repo.list(4, 2).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_creates_store_one_record() {
    let ctx = common::create_test_context().await;
    let identifier = RequestIdentifier::Hostname("google.com".to_string());

    let (first, second) = tokio::join!(
        ctx.service.create_location(&identifier),
        ctx.service.create_location(&identifier),
    );

    let outcomes = [first, second];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(AppError::AlreadyExists)))
            .count(),
        1
    );
    assert_eq!(common::stored_count(&ctx.pool).await, 1);
}

#[tokio::test]
async fn test_list_rejects_out_of_range_pages() {
    let repo = repository().await;

    assert!(matches!(
        repo.list(i64::MAX, 20).await,
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(repo.list(0, 20).await, Err(AppError::BadRequest(_))));
    assert!(matches!(repo.list(1, 0).await, Err(AppError::BadRequest(_))));
}

#[tokio::test]
async fn test_provider_record_keeps_key_order() {
    let repo = repository().await;
    let original = r#"{"ip":"142.251.98.139","type":"ipv4","continent_code":"NA","city":"Mountain View","location":{"is_eu":false,"geoname_id":7173909}}"#;

    repo.insert(NewGeoLocation {
        ip: common::GOOGLE_IP.to_string(),
        provider_response: serde_json::from_str(original).unwrap(),
    })
    .await
    .unwrap();

    let found = repo.find_by_ip(common::GOOGLE_IP).await.unwrap().unwrap();

    assert_eq!(
        serde_json::to_string(&found.provider_response).unwrap(),
        original
    );
}
