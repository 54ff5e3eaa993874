use std::sync::{Arc, OnceLock, Weak};

use serde_json::Value;

use crate::{
    error::{BuildError, MaybeValid},
    schema::{DynSchema, Schema, SchemaOptions},
};

struct Slot {
    name: String,
    schema: OnceLock<DynSchema>,
}

/// Named schema slots that can be referenced before they are defined.
///
/// References hold a weak pointer to the table, so slots may refer to each
/// other (or themselves) without creating a reference cycle.
pub struct SchemaTable {
    slots: Vec<Slot>,
}

impl SchemaTable {
    pub fn new<I, S>(names: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            slots: names
                .into_iter()
                .map(|name| Slot {
                    name: name.into(),
                    schema: OnceLock::new(),
                })
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.name == name)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(|slot| slot.name.as_str())
    }

    /// A schema that forwards to slot `index` once it is defined.
    pub fn reference(self: &Arc<Self>, index: usize) -> TableRef {
        TableRef {
            table: Arc::downgrade(self),
            index,
        }
    }

    pub fn define(&self, index: usize, schema: DynSchema) -> Result<(), BuildError> {
        let slot = self.slot(index)?;
        slot.schema
            .set(schema)
            .map_err(|_| BuildError::AlreadyDefined {
                index,
                name: slot.name.clone(),
            })
    }

    pub fn get(&self, index: usize) -> Result<&DynSchema, BuildError> {
        let slot = self.slot(index)?;
        slot.schema.get().ok_or_else(|| BuildError::Undefined {
            index,
            name: slot.name.clone(),
        })
    }

    /// Names of slots that have not been defined yet.
    pub fn undefined(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|slot| slot.schema.get().is_none())
            .map(|slot| slot.name.as_str())
            .collect()
    }

    fn slot(&self, index: usize) -> Result<&Slot, BuildError> {
        self.slots.get(index).ok_or(BuildError::OutOfRange {
            index,
            len: self.slots.len(),
        })
    }
}

/// Weak reference to a [`SchemaTable`] slot.
#[derive(Clone)]
pub struct TableRef {
    table: Weak<SchemaTable>,
    index: usize,
}

impl TableRef {
    fn table(&self) -> Result<Arc<SchemaTable>, BuildError> {
        self.table.upgrade().ok_or(BuildError::TableDropped)
    }
}

impl Schema for TableRef {
    type Raw = Value;
    type Parsed = Value;

    fn parse(&self, raw: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        let table = self.table()?;
        table.get(self.index)?.parse(raw, opts)
    }

    fn json(&self, parsed: &Value, opts: &SchemaOptions) -> MaybeValid<Value> {
        let table = self.table()?;
        table.get(self.index)?.json(parsed, opts)
    }

    fn is_optional(&self) -> bool {
        self.table()
            .and_then(|table| table.get(self.index).map(|schema| schema.is_optional()))
            .unwrap_or(false)
    }
}
