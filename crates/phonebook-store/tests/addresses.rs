use async_trait::async_trait;
use fred::error::{Error as RedisError, ErrorKind as RedisErrorKind};
use phonebook_core::domain::{Address, CustomerAddress, PhoneNumber};
use phonebook_store::backend::{KvBackend, MemoryBackend};
use phonebook_store::error::{StoreError, StoreErrorKind};
use phonebook_store::Store;
use std::sync::Arc;

fn record(phone: &str, address: &str) -> CustomerAddress {
    CustomerAddress::new(
        PhoneNumber::new(phone).expect("phone"),
        Address::new(address).expect("address"),
    )
}

fn phone(raw: &str) -> PhoneNumber {
    PhoneNumber::new(raw).expect("phone")
}

#[tokio::test]
async fn create_then_fetch_round_trips_address() {
    let store = Store::in_memory();
    let created = record("+447911123456", "г. Белгород, ул. Щорса, 123");

    assert!(store.addresses().create(&created).await.expect("create"));

    let fetched = store
        .addresses()
        .fetch(&phone("+447911123456"))
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn second_create_is_rejected_without_mutation() {
    let store = Store::in_memory();
    assert!(store
        .addresses()
        .create(&record("+447911123457", "Some address 1"))
        .await
        .expect("create a"));
    assert!(!store
        .addresses()
        .create(&record("+447911123457", "Some address 2"))
        .await
        .expect("create b"));

    let fetched = store
        .addresses()
        .fetch(&phone("+447911123457"))
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(fetched.address.as_str(), "Some address 1");
}

#[tokio::test]
async fn update_replaces_and_is_idempotent() {
    let store = Store::in_memory();
    let repo = store.addresses();
    repo.create(&record("+447911123458", "Original address"))
        .await
        .expect("create");

    let updated = record("+447911123458", "Updated address");
    assert!(repo.update(&updated).await.expect("update"));
    assert!(repo.update(&updated).await.expect("update again"));

    let fetched = repo
        .fetch(&phone("+447911123458"))
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(fetched.address.as_str(), "Updated address");
}

#[tokio::test]
async fn missing_phone_reports_not_found_everywhere() {
    let store = Store::in_memory();
    let repo = store.addresses();
    let never = phone("+447911123459");

    assert!(repo.fetch(&never).await.expect("fetch").is_none());
    assert!(!repo
        .update(&record("+447911123459", "No such address"))
        .await
        .expect("update"));
    assert!(!repo.remove(&never).await.expect("remove"));
    assert!(repo.fetch(&never).await.expect("fetch").is_none());
}

#[tokio::test]
async fn removed_phone_looks_like_never_created() {
    let store = Store::in_memory();
    let repo = store.addresses();
    repo.create(&record("+447911123460", "To be deleted"))
        .await
        .expect("create");

    assert!(repo.remove(&phone("+447911123460")).await.expect("remove"));
    assert!(repo
        .fetch(&phone("+447911123460"))
        .await
        .expect("fetch")
        .is_none());
    assert!(!repo.remove(&phone("+447911123460")).await.expect("remove"));
    assert!(!repo
        .update(&record("+447911123460", "Resurrected address"))
        .await
        .expect("update"));
}

#[tokio::test]
async fn separator_variants_share_one_record() {
    let store = Store::in_memory();
    store
        .addresses()
        .create(&record("+7-911-123-45-67", "RU address sample"))
        .await
        .expect("create");

    let fetched = store
        .addresses()
        .fetch(&phone("+79111234567"))
        .await
        .expect("fetch")
        .expect("record");
    assert_eq!(fetched.address.as_str(), "RU address sample");
    assert!(!store
        .addresses()
        .create(&record("+7 911 123 45 67", "Another RU address"))
        .await
        .expect("create"));
}

#[tokio::test]
async fn stores_plain_text_under_canonical_key() {
    let backend = Arc::new(MemoryBackend::new());
    let store = Store::with_backend(backend.clone());
    store
        .addresses()
        .create(&record("+8 190 123 45678", "JP address sample"))
        .await
        .expect("create");

    assert_eq!(
        backend.get("+819012345678").await.expect("get").as_deref(),
        Some("JP address sample")
    );
    assert_eq!(backend.len(), 1);
}

#[tokio::test]
async fn concurrent_creates_have_exactly_one_winner() {
    let store = Store::in_memory();
    let mut tasks = Vec::new();
    for n in 0..16 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            let candidate = record("+14155552671", &format!("Candidate address {n}"));
            store.addresses().create(&candidate).await
        }));
    }

    let mut winners = 0;
    for result in futures::future::join_all(tasks).await {
        if result.expect("join").expect("create") {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn corrupt_stored_value_is_reported() {
    let backend = Arc::new(MemoryBackend::new());
    backend
        .set_if_absent("+447911123461", "short")
        .await
        .expect("seed");
    let store = Store::with_backend(backend);

    let err = store
        .addresses()
        .fetch(&phone("+447911123461"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), StoreErrorKind::CorruptValue);
}

struct UnreachableBackend;

fn refused() -> StoreError {
    StoreError::Redis(RedisError::new(RedisErrorKind::IO, "connection refused"))
}

#[async_trait]
impl KvBackend for UnreachableBackend {
    fn name(&self) -> &'static str {
        "unreachable"
    }

    async fn get(&self, _key: &str) -> phonebook_store::error::Result<Option<String>> {
        Err(refused())
    }

    async fn set_if_absent(&self, _key: &str, _value: &str) -> phonebook_store::error::Result<bool> {
        Err(refused())
    }

    async fn set_if_present(&self, _key: &str, _value: &str) -> phonebook_store::error::Result<bool> {
        Err(refused())
    }

    async fn delete(&self, _key: &str) -> phonebook_store::error::Result<u64> {
        Err(refused())
    }
}

#[tokio::test]
async fn backend_failures_propagate_from_every_operation() {
    let store = Store::with_backend(Arc::new(UnreachableBackend));
    let repo = store.addresses();
    let target = record("+447911123462", "Unreachable address");

    let fetch = repo.fetch(&target.phone).await.unwrap_err();
    let create = repo.create(&target).await.unwrap_err();
    let update = repo.update(&target).await.unwrap_err();
    let remove = repo.remove(&target.phone).await.unwrap_err();

    for err in [fetch, create, update, remove] {
        assert_eq!(err.kind(), StoreErrorKind::Unavailable);
    }
}
