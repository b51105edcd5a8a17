//! Catalog repositories
//!
//! Menu, category, banner and product records share the same plain CRUD
//! surface.

use serde::Serialize;

use super::RepoResult;
use crate::db::models::{Banner, Category, MenuItem, Product};
use crate::db::{Document, DocumentStore, Filter};

/// Plain CRUD over one collection
#[derive(Clone)]
pub struct CatalogRepository<T> {
    store: DocumentStore,
    order_by: &'static str,
    _record: std::marker::PhantomData<fn() -> T>,
}

impl<T: Document> CatalogRepository<T> {
    pub fn new(store: DocumentStore, order_by: &'static str) -> Self {
        Self {
            store,
            order_by,
            _record: std::marker::PhantomData,
        }
    }

    pub async fn create(&self, record: T) -> RepoResult<T> {
        self.store.insert(record).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<T>> {
        self.store
            .find_all(&Filter::new().order_by(self.order_by))
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>> {
        self.store.find_by_id(id).await
    }

    pub async fn merge<P: Serialize + 'static>(&self, id: &str, patch: P) -> RepoResult<Option<T>> {
        self.store.merge(id, patch).await
    }

    pub async fn delete(&self, id: &str) -> RepoResult<Option<T>> {
        self.store.delete(id).await
    }
}

pub type MenuRepository = CatalogRepository<MenuItem>;
pub type CategoryRepository = CatalogRepository<Category>;
pub type BannerRepository = CatalogRepository<Banner>;
pub type ProductRepository = CatalogRepository<Product>;
