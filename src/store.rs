// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! In-memory data store.
//!
//! [`InMemoryDatabase`] owns the committed entities and is shared across
//! requests. Each request works through its own [`StoreSession`]: writes are
//! staged in the session and only become visible to other sessions once
//! [`DataStore::save_changes`] commits them, all or nothing, under the write
//! lock.

use async_trait::async_trait;
use indexmap::IndexMap;
use log::debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Something the store can hold. Keys are assigned by the store on `add`.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{kind} with id {id} already exists")]
    DuplicateKey { kind: &'static str, id: i64 },

    #[error("{kind} with id {id} no longer exists")]
    Missing { kind: &'static str, id: i64 },
}

/// Unit-of-work contract used by the handlers.
#[async_trait]
pub trait DataStore<E: Entity>: Send {
    async fn find_by_id(&self, id: i64) -> Option<E>;

    async fn find_all(&self) -> Vec<E>;

    /// Stage an insert. The returned entity carries its newly assigned id.
    fn add(&mut self, entity: E) -> E;

    /// Stage a replacement of the entity with the same id.
    fn update(&mut self, entity: E);

    /// Stage a delete.
    fn remove(&mut self, id: i64);

    /// Commit every staged change. Returns the number of changes written.
    async fn save_changes(&mut self) -> Result<usize, StoreError>;
}

/// Shared, committed state.
#[derive(Clone)]
pub struct InMemoryDatabase<E: Entity> {
    entities: Arc<RwLock<IndexMap<i64, E>>>,
    next_id: Arc<AtomicI64>,
}

impl<E: Entity> InMemoryDatabase<E> {
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(IndexMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Open a unit of work.
    pub fn session(&self) -> StoreSession<E> {
        StoreSession {
            database: self.clone(),
            pending: Vec::new(),
        }
    }

    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl<E: Entity> Default for InMemoryDatabase<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum Change<E> {
    Add(E),
    Update(E),
    Remove(i64),
}

/// A request-scoped view of an [`InMemoryDatabase`].
///
/// Reads always see committed state. Dropping a session discards whatever it
/// staged.
pub struct StoreSession<E: Entity> {
    database: InMemoryDatabase<E>,
    pending: Vec<Change<E>>,
}

impl<E: Entity> StoreSession<E> {
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl<E: Entity> DataStore<E> for StoreSession<E> {
    async fn find_by_id(&self, id: i64) -> Option<E> {
        self.database.entities.read().await.get(&id).cloned()
    }

    async fn find_all(&self) -> Vec<E> {
        self.database.entities.read().await.values().cloned().collect()
    }

    fn add(&mut self, mut entity: E) -> E {
        entity.set_id(self.database.allocate_id());
        self.pending.push(Change::Add(entity.clone()));
        entity
    }

    fn update(&mut self, entity: E) {
        self.pending.push(Change::Update(entity));
    }

    fn remove(&mut self, id: i64) {
        self.pending.push(Change::Remove(id));
    }

    async fn save_changes(&mut self) -> Result<usize, StoreError> {
        if self.pending.is_empty() {
            return Ok(0);
        }

        let mut entities = self.database.entities.write().await;

        // Validate against a scratch copy first so a failure leaves the
        // committed state untouched.
        let mut staged = entities.clone();
        for change in &self.pending {
            match change {
                Change::Add(entity) => {
                    if staged.contains_key(&entity.id()) {
                        return Err(StoreError::DuplicateKey {
                            kind: E::KIND,
                            id: entity.id(),
                        });
                    }
                    staged.insert(entity.id(), entity.clone());
                }
                Change::Update(entity) => match staged.get_mut(&entity.id()) {
                    Some(existing) => *existing = entity.clone(),
                    None => {
                        return Err(StoreError::Missing {
                            kind: E::KIND,
                            id: entity.id(),
                        })
                    }
                },
                Change::Remove(id) => {
                    if staged.shift_remove(id).is_none() {
                        return Err(StoreError::Missing {
                            kind: E::KIND,
                            id: *id,
                        });
                    }
                }
            }
        }

        *entities = staged;
        let written = self.pending.len();
        self.pending.clear();
        debug!("Committed {written} {} change(s)", E::KIND);
        Ok(written)
    }
}
