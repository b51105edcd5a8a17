//! Order Repository

use serde::Serialize;
use shared::models::OrderStatus;

use super::RepoResult;
use crate::db::models::Order;
use crate::db::{DocumentStore, Filter};

#[derive(Clone)]
pub struct OrderRepository {
    store: DocumentStore,
}

impl OrderRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.store.insert(order).await
    }

    /// All orders, oldest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        self.store
            .find_all(&Filter::new().order_by("order_date"))
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.store.find_by_id(id).await
    }

    /// Merge fields that do not touch the status
    pub async fn merge<P: Serialize + 'static>(&self, id: &str, patch: P) -> RepoResult<Option<Order>> {
        self.store.merge(id, patch).await
    }

    /// Merge only while the stored status is still `expected`
    pub async fn merge_if_status<P: Serialize + 'static>(
        &self,
        id: &str,
        expected: OrderStatus,
        patch: P,
    ) -> RepoResult<Option<Order>> {
        let guard = Filter::new().eq("status", expected.as_str());
        self.store.merge_if(id, patch, &guard).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<Order>> {
        self.store.delete(id).await
    }
}
