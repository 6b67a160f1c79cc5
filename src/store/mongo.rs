use async_trait::async_trait;
use futures::TryStreamExt;
use handle_errors::Error;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection};
use tracing::info;

use super::{UpdateOutcome, VocabCollection};
use crate::types::vocab::{NewVocab, UpdateVocab, VocabDocument};

pub const COLLECTION: &str = "vocabs";

#[derive(Clone)]
pub struct MongoCollection {
    vocabs: Collection<VocabDocument>,
}

impl MongoCollection {
    /// Parses the connection string and builds the client. The driver connects
    /// lazily, so an unreachable server shows up on the first query.
    pub async fn connect(db_url: &str, db_name: &str) -> Result<Self, Error> {
        let options = ClientOptions::parse(db_url).await?;
        let client = Client::with_options(options)?;
        info!("using collection {}.{}", db_name, COLLECTION);
        Ok(MongoCollection {
            vocabs: client.database(db_name).collection(COLLECTION),
        })
    }
}

#[async_trait]
impl VocabCollection for MongoCollection {
    async fn insert_one(&self, vocab: NewVocab) -> Result<ObjectId, Error> {
        let id = ObjectId::new();
        self.vocabs.insert_one(vocab.with_id(id), None).await?;
        Ok(id)
    }

    async fn find_one(&self, id: ObjectId) -> Result<Option<VocabDocument>, Error> {
        Ok(self.vocabs.find_one(doc! { "_id": id }, None).await?)
    }

    async fn find(&self, limit: i64) -> Result<Vec<VocabDocument>, Error> {
        let options = FindOptions::builder().limit(limit).build();
        let cursor = self.vocabs.find(doc! {}, options).await?;
        let vocabs: Vec<VocabDocument> = cursor.try_collect().await?;
        Ok(vocabs)
    }

    async fn update_one(
        &self,
        id: ObjectId,
        update: &UpdateVocab,
    ) -> Result<UpdateOutcome, Error> {
        let result = self
            .vocabs
            .update_one(
                doc! { "_id": id },
                doc! { "$set": update.to_set_document() },
                None,
            )
            .await?;
        Ok(UpdateOutcome {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, id: ObjectId) -> Result<u64, Error> {
        let result = self.vocabs.delete_one(doc! { "_id": id }, None).await?;
        Ok(result.deleted_count)
    }
}
