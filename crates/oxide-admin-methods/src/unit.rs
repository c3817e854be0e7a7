//! Display and action units handed to the admin host.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, UnitError};
use crate::identity::{Binding, Identity};
use crate::record::Record;
use crate::value::Value;

/// Capability flags attached to a unit at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Output is pre-rendered markup and must not be escaped.
    RendersMarkup,
}

/// Serializable description of a unit, as shown to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitInfo {
    pub identity: Identity,
    pub label: String,
    pub tags: BTreeSet<Tag>,
}

type DisplayFn = dyn Fn(&dyn Record) -> Result<Value> + Send + Sync;
type ActionFn = dyn Fn(&mut dyn Record) -> Result<()> + Send + Sync;

/// A per-record display unit: a list column or a detail field.
#[derive(Clone)]
pub struct DisplayUnit {
    info: UnitInfo,
    behavior: Arc<DisplayFn>,
}

impl DisplayUnit {
    pub(crate) fn new<F>(binding: Binding, tags: &[Tag], behavior: F) -> Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        let info = UnitInfo {
            identity: binding.identity,
            label: binding.label,
            tags: tags.iter().copied().collect(),
        };
        debug!(identity = %info.identity, label = %info.label, "built display unit");
        Self {
            info,
            behavior: Arc::new(behavior),
        }
    }

    /// The unit's machine identity.
    pub fn identity(&self) -> &Identity {
        &self.info.identity
    }

    /// The unit's header label. Empty for unlabeled units.
    pub fn label(&self) -> &str {
        &self.info.label
    }

    /// Capability flags.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.info.tags
    }

    /// Whether output bypasses escaping.
    pub fn renders_markup(&self) -> bool {
        self.info.tags.contains(&Tag::RendersMarkup)
    }

    /// Metadata without the behavior.
    pub fn info(&self) -> &UnitInfo {
        &self.info
    }

    /// Resolves the unit against one record.
    pub fn call(&self, record: &dyn Record) -> Result<Value> {
        (self.behavior)(record)
    }
}

impl fmt::Debug for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayUnit")
            .field("identity", &self.info.identity)
            .field("label", &self.info.label)
            .field("tags", &self.info.tags)
            .finish_non_exhaustive()
    }
}

/// A bulk action unit applied to a batch of records.
#[derive(Clone)]
pub struct ActionUnit {
    info: UnitInfo,
    per_record: Arc<ActionFn>,
}

impl ActionUnit {
    pub(crate) fn new<F>(binding: Binding, per_record: F) -> Self
    where
        F: Fn(&mut dyn Record) -> Result<()> + Send + Sync + 'static,
    {
        let info = UnitInfo {
            identity: binding.identity,
            label: binding.label,
            tags: BTreeSet::new(),
        };
        debug!(identity = %info.identity, label = %info.label, "built action unit");
        Self {
            info,
            per_record: Arc::new(per_record),
        }
    }

    /// The action's machine identity.
    pub fn identity(&self) -> &Identity {
        &self.info.identity
    }

    /// The label shown in the actions menu.
    pub fn label(&self) -> &str {
        &self.info.label
    }

    /// Metadata without the behavior.
    pub fn info(&self) -> &UnitInfo {
        &self.info
    }

    /// Applies the action to each record in batch order, persisting each one.
    ///
    /// Not atomic: if record `k` fails, records before it stay persisted, the
    /// rest are untouched, and the error reports how many were applied.
    pub fn apply<'a, R, I>(&self, batch: I) -> Result<usize>
    where
        R: Record + 'a,
        I: IntoIterator<Item = &'a mut R>,
    {
        let mut applied = 0;
        for record in batch {
            let record: &mut dyn Record = record;
            if let Err(source) = (self.per_record)(record) {
                return Err(UnitError::BatchAborted {
                    applied,
                    source: Box::new(source),
                });
            }
            applied += 1;
            debug!(action = %self.info.identity, applied, "persisted record");
        }
        Ok(applied)
    }
}

impl fmt::Debug for ActionUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionUnit")
            .field("identity", &self.info.identity)
            .field("label", &self.info.label)
            .finish_non_exhaustive()
    }
}
