#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geo_locator::application::services::GeoService;
use geo_locator::domain::identifier::RequestIdentifier;
use geo_locator::infrastructure::persistence::{self, MIGRATOR, SqliteLocationRepository};
use geo_locator::infrastructure::provider::{GeoProvider, ProviderError, ProviderResult};
use geo_locator::infrastructure::resolver::AddressResolver;
use geo_locator::state::AppState;

pub const GOOGLE_IP: &str = "142.251.98.139";
pub const UNKNOWN_IP: &str = "198.51.111.42";
pub const GITHUB_IP: &str = "162.159.140.229";
/// Makes the fake provider fail as if ipstack rejected the access key.
pub const FAILING_IP: &str = "203.0.113.99";

/// Fresh in-memory database with migrations applied.
pub async fn test_pool() -> SqlitePool {
    let pool = persistence::connect_pool("sqlite::memory:", 1, Duration::from_secs(5))
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// Resolver backed by a fixed hostname table.
pub struct FakeResolver {
    hosts: HashMap<String, String>,
    pub calls: AtomicUsize,
}

impl Default for FakeResolver {
    fn default() -> Self {
        let hosts = [
            ("google.com", GOOGLE_IP),
            ("unknown.address.com", UNKNOWN_IP),
            ("github.com", GITHUB_IP),
        ]
        .into_iter()
        .map(|(host, ip)| (host.to_string(), ip.to_string()))
        .collect();

        Self {
            hosts,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AddressResolver for FakeResolver {
    async fn resolve_to_ip(&self, identifier: &RequestIdentifier) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match identifier {
            RequestIdentifier::Ip(ip) => Some(ip.to_string()),
            RequestIdentifier::Hostname(host) => self.hosts.get(host).cloned(),
        }
    }
}

/// Provider serving canned ipstack records.
pub struct FakeProvider {
    records: HashMap<String, Value>,
    pub calls: AtomicUsize,
}

impl Default for FakeProvider {
    fn default() -> Self {
        let records = [
            (GOOGLE_IP, google_record()),
            (UNKNOWN_IP, unknown_record()),
            (GITHUB_IP, github_record()),
        ]
        .into_iter()
        .map(|(ip, record)| (ip.to_string(), record))
        .collect();

        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeProvider {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeoProvider for FakeProvider {
    async fn lookup(&self, ip: &str) -> ProviderResult<Option<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if ip == FAILING_IP {
            return Err(ProviderError::Api {
                code: 101,
                info: "invalid_access_key".to_string(),
            });
        }
        Ok(self.records.get(ip).cloned())
    }
}

pub fn google_record() -> Value {
    json!({
        "ip": GOOGLE_IP,
        "type": "ipv4",
        "continent_code": "NA",
        "continent_name": "North America",
        "country_code": "US",
        "country_name": "United States",
        "region_code": "CA",
        "region_name": "California",
        "city": "Mountain View",
        "zip": "94041",
        "latitude": 37.38801956176758,
        "longitude": -122.07431030273438
    })
}

/// A record ipstack returns for addresses it knows nothing about.
pub fn unknown_record() -> Value {
    json!({
        "ip": UNKNOWN_IP,
        "type": "ipv4",
        "continent_code": null,
        "continent_name": null,
        "country_code": null,
        "country_name": null,
        "region_code": null,
        "region_name": null,
        "city": null,
        "zip": null,
        "latitude": 0.0,
        "longitude": 0.0
    })
}

pub fn github_record() -> Value {
    json!({
        "ip": GITHUB_IP,
        "type": "ipv4",
        "continent_code": "NA",
        "country_code": "US",
        "region_code": "CA",
        "city": "San Francisco",
        "zip": "94107",
        "latitude": 37.76784896850586,
        "longitude": -122.39286041259766
    })
}

pub struct TestContext {
    pub pool: Arc<SqlitePool>,
    pub state: AppState,
    pub service: Arc<GeoService>,
    pub provider: Arc<FakeProvider>,
    pub resolver: Arc<FakeResolver>,
}

pub async fn create_test_context() -> TestContext {
    let pool = Arc::new(test_pool().await);
    let provider = Arc::new(FakeProvider::default());
    let resolver = Arc::new(FakeResolver::default());

    let service = Arc::new(GeoService::new(
        Arc::new(SqliteLocationRepository::new(pool.clone())),
        resolver.clone(),
        provider.clone(),
    ));

    TestContext {
        state: AppState::new(service.clone(), pool.clone()),
        pool,
        service,
        provider,
        resolver,
    }
}

pub async fn stored_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM geo_locations")
        .fetch_one(pool)
        .await
        .unwrap()
}
