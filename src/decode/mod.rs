pub mod fields;
pub mod mlb;
pub mod nba;
pub mod nhl;
pub mod odds;
pub mod result_set;

pub use result_set::{normalized_dict, NamedRecordSet, Record, ResultSets};

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Output of a collection mapper: the entities that decoded, and how many rows did not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mapped<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Mapped<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Run `map` over every input row, counting the rows it rejects
pub(crate) fn map_rows<S, T, F>(entity: &str, rows: impl IntoIterator<Item = S>, mut map: F) -> Mapped<T>
where
    F: FnMut(S) -> Option<T>,
{
    let mut items = Vec::new();
    let mut skipped = 0;
    for row in rows {
        match map(row) {
            Some(item) => items.push(item),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("{}: skipped {} malformed rows", entity, skipped);
    }
    Mapped { items, skipped }
}

/// The object at the top of a provider response
pub(crate) fn require_object<'a>(raw: &'a Value, entity: &'static str) -> Result<&'a Map<String, Value>> {
    raw.as_object()
        .ok_or_else(|| Error::decode(entity, "response is not an object"))
}

/// A required array field of a provider object
pub(crate) fn require_array<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    entity: &'static str,
) -> Result<&'a Vec<Value>> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::decode(entity, format!("missing {} array", key)))
}

/// Records of a named result set; a missing set means the response is not the one we asked for
pub(crate) fn require_result_set<'a>(
    dict: &'a NamedRecordSet,
    names: &[&str],
    entity: &'static str,
) -> Result<&'a [Record]> {
    names
        .iter()
        .find_map(|name| dict.get(name).ok())
        .ok_or_else(|| Error::decode(entity, format!("missing {} result set", names.join("/"))))
}
