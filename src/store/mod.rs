use std::sync::Arc;

use async_trait::async_trait;
use handle_errors::Error;
use mongodb::bson::oid::ObjectId;
use tracing::{debug, info, instrument};

use crate::types::vocab::{parse_vocab_id, NewVocab, UpdateVocab, Vocab, VocabDocument};

#[cfg(test)]
pub mod memory;
mod mongo;

pub use mongo::MongoCollection;

/// `GET /` never returns more than this many entries.
pub const LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub matched: u64,
    pub modified: u64,
}

/// Single-document operations on the `vocabs` collection.
#[async_trait]
pub trait VocabCollection: Send + Sync {
    /// Persists a new document and returns the id it was stored under.
    async fn insert_one(&self, vocab: NewVocab) -> Result<ObjectId, Error>;
    async fn find_one(&self, id: ObjectId) -> Result<Option<VocabDocument>, Error>;
    async fn find(&self, limit: i64) -> Result<Vec<VocabDocument>, Error>;
    /// `$set` of the present fields. `modified` stays 0 when every value was already equal.
    async fn update_one(&self, id: ObjectId, update: &UpdateVocab)
        -> Result<UpdateOutcome, Error>;
    /// Returns the deleted count.
    async fn delete_one(&self, id: ObjectId) -> Result<u64, Error>;
}

#[derive(Clone)]
pub struct Store {
    pub connection: Arc<dyn VocabCollection>,
}

impl Store {
    pub async fn new(db_url: &str, db_name: &str) -> Result<Self, Error> {
        let collection = MongoCollection::connect(db_url, db_name).await?;
        Ok(Store::from_collection(collection))
    }

    pub fn from_collection(collection: impl VocabCollection + 'static) -> Self {
        Store {
            connection: Arc::new(collection),
        }
    }

    #[instrument(skip(self))]
    pub async fn add_vocab(&self, vocab: NewVocab) -> Result<Vocab, Error> {
        let id = self.connection.insert_one(vocab).await?;
        match self.connection.find_one(id).await? {
            Some(doc) => {
                info!("vocab added: {}", id);
                Ok(doc.into())
            }
            None => Err(Error::VocabNotFound(id.to_hex())),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_vocabs(&self) -> Result<Vec<Vocab>, Error> {
        let docs = self.connection.find(LIST_LIMIT).await?;
        Ok(docs.into_iter().map(Vocab::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_vocab(&self, id: &str) -> Result<Vocab, Error> {
        let oid = lookup_id(id)?;
        match self.connection.find_one(oid).await? {
            Some(doc) => Ok(doc.into()),
            None => Err(Error::VocabNotFound(id.to_string())),
        }
    }

    /// Partial update. An empty update, or one that changes nothing, still
    /// answers with the current document.
    #[instrument(skip(self))]
    pub async fn update_vocab(&self, id: &str, vocab: UpdateVocab) -> Result<Vocab, Error> {
        let oid = lookup_id(id)?;

        if !vocab.is_empty() {
            let outcome = self.connection.update_one(oid, &vocab).await?;
            if outcome.matched == 0 {
                debug!("update matched nothing for {}", id);
            }
            if outcome.modified == 1 {
                if let Some(doc) = self.connection.find_one(oid).await? {
                    info!("vocab updated: {}", id);
                    return Ok(doc.into());
                }
            }
        }

        match self.connection.find_one(oid).await? {
            Some(doc) => Ok(doc.into()),
            None => Err(Error::VocabNotFound(id.to_string())),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_vocab(&self, id: &str) -> Result<(), Error> {
        let oid = lookup_id(id)?;
        if self.connection.delete_one(oid).await? == 1 {
            info!("vocab deleted: {}", id);
            Ok(())
        } else {
            Err(Error::VocabNotFound(id.to_string()))
        }
    }
}

// Only the exact lowercase hex that Create hands out names an entry.
fn lookup_id(id: &str) -> Result<ObjectId, Error> {
    let oid = parse_vocab_id(id).map_err(|e| {
        debug!("{}: {}", id, e);
        Error::VocabNotFound(id.to_string())
    })?;
    if oid.to_hex() != id {
        debug!("{} is not the canonical form of {}", id, oid);
        return Err(Error::VocabNotFound(id.to_string()));
    }
    Ok(oid)
}
