//! Owned record store.
//!
//! # Responsibility
//! - Own the authoritative ordered record collection for a session.
//! - Apply intents through `reconcile` and persist after every change.
//! - Rehydrate the collection at startup, falling back to the seed.
//!
//! # Invariants
//! - Consumers only ever see immutable snapshots; a mutation swaps in a new
//!   snapshot instead of editing the current one.
//! - Persistence is fire-and-forget: write failures are logged, never
//!   retried and never surfaced.
//! - Intents submitted through an `IntentSender` are applied in submission
//!   order by `drain`.

use crate::model::intent::Intent;
use crate::model::record::{Record, RecordId};
use crate::repo::kv_repo::KvRepository;
use crate::repo::record_blob;
use crate::service::reconcile::{self, Outcome};
use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Storage key of the record collection blob.
pub const RECORDS_KEY: &str = "myEvents";

/// Where the initial collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    /// No blob was stored yet.
    SeedMissing,
    /// A blob existed but could not be decoded or read.
    SeedRecovered,
}

/// Submission handle given to views.
#[derive(Debug, Clone)]
pub struct IntentSender {
    tx: Sender<Intent>,
}

impl IntentSender {
    /// Queues an intent. Returns `false` when the store is gone.
    pub fn submit(&self, intent: Intent) -> bool {
        self.tx.send(intent).is_ok()
    }
}

/// Single owner of the record collection.
pub struct RecordStore<R: KvRepository> {
    repo: R,
    records: Arc<Vec<Record>>,
    loaded_from: LoadSource,
    inbox_tx: Sender<Intent>,
    inbox_rx: Receiver<Intent>,
}

impl<R: KvRepository> RecordStore<R> {
    /// Loads the persisted collection, or the seed collection built at `now`.
    ///
    /// A seeded collection is written back immediately, replacing any
    /// unreadable blob.
    pub fn open(repo: R, now: DateTime<Utc>) -> Self {
        let (records, loaded_from) = load_records(&repo, now);
        let (inbox_tx, inbox_rx) = mpsc::channel();
        let store = Self {
            repo,
            records: Arc::new(records),
            loaded_from,
            inbox_tx,
            inbox_rx,
        };
        if loaded_from != LoadSource::Persisted {
            store.persist();
        }
        store
    }

    pub fn loaded_from(&self) -> LoadSource {
        self.loaded_from
    }

    /// Current collection in display order.
    pub fn all(&self) -> &[Record] {
        self.records.as_slice()
    }

    /// Shared handle to the current collection; later mutations do not
    /// affect it.
    pub fn snapshot(&self) -> Arc<Vec<Record>> {
        Arc::clone(&self.records)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Appends a record. Returns whether the collection changed.
    pub fn add(&mut self, record: Record) -> bool {
        self.dispatch(&Intent::Add(record))
    }

    /// Replaces the matched record with `updater(record)`.
    ///
    /// The update is dropped when the id is unknown or the result violates a
    /// record invariant.
    pub fn replace(&mut self, id: RecordId, updater: impl FnOnce(&Record) -> Record) -> bool {
        let outcome = reconcile::replace_with(&self.records, id, updater);
        self.commit("replace", id, outcome)
    }

    /// Removes a record. Unknown ids are a no-op.
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.dispatch(&Intent::Delete { id })
    }

    /// Applies one intent. Returns whether the collection changed.
    pub fn dispatch(&mut self, intent: &Intent) -> bool {
        let outcome = reconcile::apply(&self.records, intent);
        self.commit(intent.name(), intent.target(), outcome)
    }

    /// Applies intents in order. Returns how many changed the collection.
    pub fn dispatch_all<'a>(&mut self, intents: impl IntoIterator<Item = &'a Intent>) -> usize {
        intents
            .into_iter()
            .filter(|intent| self.dispatch(intent))
            .count()
    }

    /// Returns a handle views use to submit intents.
    pub fn sender(&self) -> IntentSender {
        IntentSender {
            tx: self.inbox_tx.clone(),
        }
    }

    /// Applies every queued intent in submission order.
    ///
    /// Returns how many of them changed the collection.
    pub fn drain(&mut self) -> usize {
        let mut changed = 0;
        while let Ok(intent) = self.inbox_rx.try_recv() {
            if self.dispatch(&intent) {
                changed += 1;
            }
        }
        changed
    }

    fn commit(&mut self, intent_name: &'static str, target: RecordId, outcome: Outcome) -> bool {
        match outcome {
            Outcome::Changed(next) => {
                self.records = Arc::new(next);
                debug!(
                    "event=intent_apply module=store status=ok intent={intent_name} target={target} count={}",
                    self.records.len()
                );
                self.persist();
                true
            }
            Outcome::Unchanged(reason) => {
                debug!(
                    "event=intent_apply module=store status=skip intent={intent_name} target={target} reason={}",
                    reason.as_str()
                );
                false
            }
        }
    }

    fn persist(&self) {
        let blob = match record_blob::encode(&self.records) {
            Ok(blob) => blob,
            Err(err) => {
                error!("event=store_persist module=store status=error stage=encode error={err}");
                return;
            }
        };
        if let Err(err) = self.repo.put(RECORDS_KEY, &blob) {
            error!("event=store_persist module=store status=error stage=write error={err}");
        }
    }
}

fn load_records<R: KvRepository>(repo: &R, now: DateTime<Utc>) -> (Vec<Record>, LoadSource) {
    let blob = match repo.get(RECORDS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("event=store_load module=store status=ok source=seed reason=missing");
            return (seed_records(now), LoadSource::SeedMissing);
        }
        Err(err) => {
            error!("event=store_load module=store status=error source=seed stage=read error={err}");
            return (seed_records(now), LoadSource::SeedRecovered);
        }
    };

    match record_blob::decode(&blob) {
        Ok(records) => {
            info!(
                "event=store_load module=store status=ok source=persisted count={}",
                records.len()
            );
            (records, LoadSource::Persisted)
        }
        Err(err) => {
            warn!("event=store_load module=store status=error source=seed stage=decode error={err}");
            (seed_records(now), LoadSource::SeedRecovered)
        }
    }
}

/// Collection used when nothing valid is persisted.
pub fn seed_records(now: DateTime<Utc>) -> Vec<Record> {
    vec![Record::seed(now)]
}
