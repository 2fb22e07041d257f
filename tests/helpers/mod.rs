#![allow(dead_code)]

use bestiary::monster::types::{FeatureVector, Monster, VECTOR_DIMENSION};
use bestiary::store::{CollectionSpec, MonsterStore, StoreError};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for the document store. Ranks by Euclidean distance and
/// counts every call so tests can assert which queries were issued.
#[derive(Default)]
pub struct InMemoryStore {
    pub documents: Mutex<Vec<Monster>>,
    pub collections: Mutex<Vec<CollectionSpec>>,
    pub find_one_calls: AtomicUsize,
    pub find_nearest_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    /// When set, every read fails as if the store answered HTTP 503.
    pub unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn with_monsters(monsters: Vec<Monster>) -> Self {
        let documents = monsters
            .into_iter()
            .map(|m| m.with_vector().unwrap())
            .collect();
        Self {
            documents: Mutex::new(documents),
            ..Default::default()
        }
    }

    pub fn set_unavailable(&self) {
        self.unavailable.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Status {
                status: 503,
                body: "service unavailable".into(),
            });
        }
        Ok(())
    }

    pub fn total_calls(&self) -> usize {
        self.find_one_calls.load(Ordering::SeqCst)
            + self.find_nearest_calls.load(Ordering::SeqCst)
            + self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl MonsterStore for InMemoryStore {
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().unwrap();
        match collections.iter().find(|c| c.name == spec.name) {
            Some(existing) if existing != spec => Err(StoreError::Api(vec![
                bestiary::store::ApiError {
                    message: format!("collection {} exists with different settings", spec.name),
                    error_code: Some("EXISTING_COLLECTION_DIFFERENT_SETTINGS".into()),
                },
            ])),
            Some(_) => Ok(()),
            None => {
                collections.push(spec.clone());
                Ok(())
            }
        }
    }

    async fn list_collections(&self) -> Result<Vec<CollectionSpec>, StoreError> {
        Ok(self.collections.lock().unwrap().clone())
    }

    async fn insert_many(&self, documents: &[Monster]) -> Result<usize, StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut stored = self.documents.lock().unwrap();
        for (i, doc) in documents.iter().enumerate() {
            let mut doc = doc.clone();
            if doc.id().is_none() {
                let id = json!(format!("doc-{}", stored.len() + i));
                doc.extra.insert("_id".into(), id);
            }
            stored.push(doc);
        }
        Ok(documents.len())
    }

    async fn find_one_by_name(&self, name: &str) -> Result<Option<Monster>, StoreError> {
        self.find_one_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let stored = self.documents.lock().unwrap();
        Ok(stored.iter().find(|m| m.name == name).cloned())
    }

    async fn find_nearest(
        &self,
        vector: &[f64],
        limit: usize,
    ) -> Result<Vec<Monster>, StoreError> {
        self.find_nearest_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut query = [0.0; VECTOR_DIMENSION];
        query.copy_from_slice(vector);
        let query = FeatureVector(query);

        let stored = self.documents.lock().unwrap();
        let mut ranked: Vec<(f64, Monster)> = stored
            .iter()
            .map(|m| (query.distance(&m.search_vector().unwrap()), m.clone()))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|(distance, mut m)| {
                m.similarity = Some(1.0 / (1.0 + distance * distance));
                m
            })
            .collect())
    }
}

/// Build a monster from its name and the seven vector stats.
pub fn monster(name: &str, stats: [i64; VECTOR_DIMENSION]) -> Monster {
    serde_json::from_value(json!({
        "name": name,
        "hit_points": stats[0],
        "strength": stats[1],
        "dexterity": stats[2],
        "constitution": stats[3],
        "intelligence": stats[4],
        "wisdom": stats[5],
        "charisma": stats[6],
    }))
    .unwrap()
}

pub fn goblin() -> Monster {
    monster("Goblin", [7, 8, 14, 10, 10, 8, 8])
}

/// A small bestiary with a clear nearest neighbor for the goblin.
pub fn sample_monsters() -> Vec<Monster> {
    vec![
        goblin(),
        monster("Kobold", [5, 7, 15, 9, 8, 7, 8]),
        monster("Hobgoblin", [11, 13, 12, 12, 10, 10, 9]),
        monster("Ogre", [59, 19, 8, 16, 5, 7, 7]),
        monster("Adult red dragon", [256, 27, 10, 25, 16, 13, 21]),
    ]
}

/// `count` distinct monsters, for limit tests.
pub fn many_monsters(count: usize) -> Vec<Monster> {
    (0..count)
        .map(|i| {
            let i = i as i64;
            monster(&format!("Swarm{i}"), [i, 10, 10, 10, 10, 10, 10])
        })
        .collect()
}
