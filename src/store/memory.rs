//! In-process collections for tests. `MemoryCollection` keeps insertion order
//! and reports matched/modified counts the way MongoDB does for `$set`.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use handle_errors::Error;
use indexmap::IndexMap;
use mongodb::bson::oid::ObjectId;

use super::{UpdateOutcome, VocabCollection};
use crate::types::vocab::{NewVocab, UpdateVocab, VocabDocument};

#[derive(Clone, Default)]
pub struct MemoryCollection {
    docs: Arc<Mutex<IndexMap<ObjectId, VocabDocument>>>,
}

#[async_trait]
impl VocabCollection for MemoryCollection {
    async fn insert_one(&self, vocab: NewVocab) -> Result<ObjectId, Error> {
        let id = ObjectId::new();
        self.docs.lock().unwrap().insert(id, vocab.with_id(id));
        Ok(id)
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<VocabDocument>, Error> {
        Ok(self.docs.lock().unwrap().get(&id).cloned())
    }

    async fn find(&self, limit: i64) -> Result<Vec<VocabDocument>, Error> {
        let docs = self.docs.lock().unwrap();
        Ok(docs.values().take(limit as usize).cloned().collect())
    }

    async fn update_one(
        &self,
        id: ObjectId,
        update: &UpdateVocab,
    ) -> Result<UpdateOutcome, Error> {
        let mut docs = self.docs.lock().unwrap();
        Ok(match docs.get_mut(&id) {
            Some(doc) => UpdateOutcome {
                matched: 1,
                modified: update.merge_into(doc) as u64,
            },
            None => UpdateOutcome {
                matched: 0,
                modified: 0,
            },
        })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, Error> {
        Ok(self.docs.lock().unwrap().shift_remove(&id).is_some() as u64)
    }
}

/// Every call fails as if the server could not be reached.
pub struct UnavailableCollection;

fn refused() -> Error {
    let io = io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused");
    Error::DatabaseQueryError(mongodb::error::Error::from(io))
}

#[async_trait]
impl VocabCollection for UnavailableCollection {
    async fn insert_one(&self, _vocab: NewVocab) -> Result<ObjectId, Error> {
        Err(refused())
    }

    async fn find_one(&self, _id: ObjectId) -> Result<Option<VocabDocument>, Error> {
        Err(refused())
    }

    async fn find(&self, _limit: i64) -> Result<Vec<VocabDocument>, Error> {
        Err(refused())
    }

    async fn update_one(
        &self,
        _id: ObjectId,
        _update: &UpdateVocab,
    ) -> Result<UpdateOutcome, Error> {
        Err(refused())
    }

    async fn delete_one(&self, _id: ObjectId) -> Result<u64, Error> {
        Err(refused())
    }
}
