//! Persisted record of which questions have been shown.
//!
//! Opening a store runs four steps in order: load the saved map, reconcile it
//! with the catalog ids, repair tiers with no unused question, and write the
//! result back. Each step is a free function here so it can be tested alone.
//! After opening, every tier in `1..=15` that has ids has at least one unused
//! id, and every catalog id has an entry.
//!
//! Storage failures never reach callers. A corrupt file is replaced, and a
//! failed write is logged while the in-memory map stays authoritative.

use crate::core::tier::{in_tier, tiers};
use crate::domain::model::{Question, UsageMap};
use crate::domain::ports::Storage;
use crate::utils::error::{Result, TrackerError};
use std::fmt;

pub const DEFAULT_USAGE_FILE: &str = "SaveFile.json";

/// Outcome of reading the usage file.
#[derive(Debug)]
pub enum UsageLoad {
    Missing,
    Loaded(UsageMap),
    Corrupt(TrackerError),
}

impl UsageLoad {
    /// The loaded map, or an empty one for a missing or corrupt file.
    pub fn into_map(self) -> UsageMap {
        match self {
            UsageLoad::Loaded(map) => map,
            UsageLoad::Missing | UsageLoad::Corrupt(_) => UsageMap::new(),
        }
    }
}

pub fn load_usage<S: Storage + ?Sized>(storage: &S, path: &str) -> UsageLoad {
    if !storage.exists(path) {
        return UsageLoad::Missing;
    }

    let parsed = storage
        .read_file(path)
        .and_then(|bytes| serde_json::from_slice::<UsageMap>(&bytes).map_err(TrackerError::from));

    match parsed {
        Ok(map) => UsageLoad::Loaded(map),
        Err(e) => UsageLoad::Corrupt(TrackerError::UsagePersistenceCorrupt {
            path: path.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Adds every id missing from `usage` as unused. Existing flags are kept.
/// Returns how many ids were added.
pub fn reconcile<'a, I>(usage: &mut UsageMap, ids: I) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    let mut added = 0;
    for id in ids {
        if !usage.contains_key(id) {
            usage.insert(id.to_string(), false);
            added += 1;
        }
    }
    added
}

pub fn count_unused(usage: &UsageMap, tier: u8) -> usize {
    usage
        .iter()
        .filter(|(id, used)| !**used && in_tier(id, tier))
        .count()
}

/// Clears the used flag on every id in `tier`. Returns the number of ids in the tier.
pub fn reset_tier_in(usage: &mut UsageMap, tier: u8) -> usize {
    let mut touched = 0;
    for (id, used) in usage.iter_mut() {
        if in_tier(id, tier) {
            *used = false;
            touched += 1;
        }
    }
    touched
}

/// Resets every tier left without an unused id. Returns the tiers that had
/// ids and were reset; tiers with no ids at all are skipped silently.
pub fn repair_tiers(usage: &mut UsageMap) -> Vec<u8> {
    let mut repaired = Vec::new();
    for tier in tiers() {
        if count_unused(usage, tier) > 0 {
            continue;
        }
        let reset = reset_tier_in(usage, tier);
        if reset > 0 {
            tracing::info!("Tier {} exhausted, reset {} question(s)", tier, reset);
            repaired.push(tier);
        } else {
            tracing::debug!("Tier {} has no questions", tier);
        }
    }
    repaired
}

pub fn serialize_usage(usage: &UsageMap) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(usage)?)
}

/// Per-tier unused counts and the total used count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub unused_by_tier: Vec<(u8, usize)>,
    pub used_total: usize,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Save File Status ===")?;
        for (tier, unused) in &self.unused_by_tier {
            writeln!(f, "Tier {}: {} unused", tier, unused)?;
        }
        write!(f, "Total used: {}", self.used_total)
    }
}

pub struct UsageStore<S: Storage> {
    storage: S,
    path: String,
    usage: UsageMap,
}

impl<S: Storage> UsageStore<S> {
    /// Loads, reconciles, repairs and persists the usage map for `catalog_ids`.
    pub fn open<'a, I>(storage: S, path: impl Into<String>, catalog_ids: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let path = path.into();

        let mut usage = match load_usage(&storage, &path) {
            UsageLoad::Missing => {
                tracing::debug!("No usage file at {}, starting fresh", path);
                UsageMap::new()
            }
            UsageLoad::Loaded(map) => {
                tracing::debug!("Loaded {} usage entries from {}", map.len(), path);
                map
            }
            UsageLoad::Corrupt(e) => {
                tracing::warn!("Save file corrupted, rebuilding: {}", e);
                UsageMap::new()
            }
        };

        let added = reconcile(&mut usage, catalog_ids);
        if added > 0 {
            tracing::debug!("Added {} new question id(s) as unused", added);
        }

        let repaired = repair_tiers(&mut usage);
        if !repaired.is_empty() {
            tracing::info!("Reset exhausted tiers: {:?}", repaired);
        }

        let store = Self {
            storage,
            path,
            usage,
        };
        store.flush();
        store
    }

    pub fn from_questions(storage: S, path: impl Into<String>, questions: &[Question]) -> Self {
        Self::open(storage, path, questions.iter().map(|q| q.id.as_str()))
    }

    /// `false` for ids the store has never seen.
    pub fn is_used(&self, id: &str) -> bool {
        self.usage.get(id).copied().unwrap_or(false)
    }

    pub fn mark_used(&mut self, id: &str) {
        self.usage.insert(id.to_string(), true);
        self.flush();
    }

    pub fn reset_all(&mut self) {
        for used in self.usage.values_mut() {
            *used = false;
        }
        self.flush();
    }

    pub fn count_unused_in_tier(&self, tier: u8) -> usize {
        count_unused(&self.usage, tier)
    }

    pub fn has_unused_in_tier(&self, tier: u8) -> bool {
        self.count_unused_in_tier(tier) > 0
    }

    pub fn reset_tier(&mut self, tier: u8) {
        reset_tier_in(&mut self.usage, tier);
        self.flush();
    }

    /// Resets `tier` if it has run out of unused ids during play.
    /// Returns `true` when a reset happened.
    pub fn ensure_tier_playable(&mut self, tier: u8) -> bool {
        if self.has_unused_in_tier(tier) {
            return false;
        }
        let reset = reset_tier_in(&mut self.usage, tier);
        if reset == 0 {
            return false;
        }
        tracing::info!("Tier {} exhausted during play, reset {} question(s)", tier, reset);
        self.flush();
        true
    }

    pub fn count_used_total(&self) -> usize {
        self.usage.values().filter(|used| **used).count()
    }

    pub fn status(&self) -> StatusReport {
        StatusReport {
            unused_by_tier: tiers()
                .map(|tier| (tier, self.count_unused_in_tier(tier)))
                .collect(),
            used_total: self.count_used_total(),
        }
    }

    pub fn print_status(&self) {
        for line in self.status().to_string().lines() {
            tracing::info!("{}", line);
        }
    }

    /// Writes the whole map, replacing the previous file.
    pub fn persist(&self) -> Result<()> {
        let write_err = |e: TrackerError| TrackerError::UsagePersistenceWrite {
            path: self.path.clone(),
            reason: e.to_string(),
        };
        let data = serialize_usage(&self.usage).map_err(write_err)?;
        self.storage.write_file(&self.path, &data).map_err(write_err)
    }

    fn flush(&self) {
        if let Err(e) = self.persist() {
            tracing::error!("{} (keeping in-memory state)", e);
        }
    }

    pub fn usage(&self) -> &UsageMap {
        &self.usage
    }

    pub fn len(&self) -> usize {
        self.usage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usage.is_empty()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
