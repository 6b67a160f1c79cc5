use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A vocab entry as it is stored in the `vocabs` collection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VocabDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub german: String,
    pub english: String,
    pub korean: String,
    pub audio_url: String,
    pub image_url: String,
}

/// A vocab entry as clients see it. `_id` is the hex form of the stored ObjectId.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Vocab {
    #[serde(rename = "_id")]
    pub id: String,
    pub german: String,
    pub english: String,
    pub korean: String,
    pub audio_url: String,
    pub image_url: String,
}

impl From<VocabDocument> for Vocab {
    fn from(doc: VocabDocument) -> Self {
        Vocab {
            id: doc.id.to_hex(),
            german: doc.german,
            english: doc.english,
            korean: doc.korean,
            audio_url: doc.audio_url,
            image_url: doc.image_url,
        }
    }
}

/// Create body. Unknown keys are dropped, so a client `_id` never reaches the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
pub struct NewVocab {
    #[validate(length(min = 1))]
    pub german: String,
    #[validate(length(min = 1))]
    pub english: String,
    #[validate(length(min = 1))]
    pub korean: String,
    pub audio_url: String,
    pub image_url: String,
}

impl NewVocab {
    pub fn with_id(self, id: ObjectId) -> VocabDocument {
        VocabDocument {
            id,
            german: self.german,
            english: self.english,
            korean: self.korean,
            audio_url: self.audio_url,
            image_url: self.image_url,
        }
    }
}

/// Partial update body. A field that is missing or `null` is left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
pub struct UpdateVocab {
    #[validate(length(min = 1))]
    pub german: Option<String>,
    #[validate(length(min = 1))]
    pub english: Option<String>,
    #[validate(length(min = 1))]
    pub korean: Option<String>,
    pub audio_url: Option<String>,
    pub image_url: Option<String>,
}

impl UpdateVocab {
    /// The fields the caller actually set, by stored field name.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("german", &self.german),
            ("english", &self.english),
            ("korean", &self.korean),
            ("audio_url", &self.audio_url),
            ("image_url", &self.image_url),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }

    /// Body of the `$set` operator for this update.
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        for (name, value) in self.fields() {
            set.insert(name, value);
        }
        set
    }

    /// Field-level merge into a stored document. Returns whether any value changed.
    pub fn merge_into(&self, doc: &mut VocabDocument) -> bool {
        let mut changed = false;
        for (name, value) in self.fields() {
            let slot = match name {
                "german" => &mut doc.german,
                "english" => &mut doc.english,
                "korean" => &mut doc.korean,
                "audio_url" => &mut doc.audio_url,
                _ => &mut doc.image_url,
            };
            if slot.as_str() != value {
                *slot = value.to_string();
                changed = true;
            }
        }
        changed
    }
}

pub fn parse_vocab_id(id: &str) -> Result<ObjectId, handle_errors::Error> {
    ObjectId::parse_str(id).map_err(handle_errors::Error::ParseError)
}
