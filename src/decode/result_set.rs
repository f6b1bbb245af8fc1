//! Decoder for the tabular `{ parameters, resultSets: [{ name, headers, rowSet }] }`
//! response convention used by the NBA stats provider.

use super::fields::header_text;
use crate::error::{Error, Result};
use crate::utils::fanout::{fan_out_into_map, UnitOutcome};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One decoded row: field name → raw value, in header order
pub type Record = Map<String, Value>;

const UNKNOWN_NAME: &str = "Unknown";

/// Result-set name → records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamedRecordSet(BTreeMap<String, Vec<Record>>);

impl NamedRecordSet {
    /// Records of one result set, `NotFound` if the response has no set by that name
    pub fn get(&self, name: &str) -> Result<&[Record]> {
        self.0
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::NotFound(format!("result set {}", name)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Vec<Record>> {
        self.0
    }
}

/// A single entry of `resultSets` after the shape checks.
/// `headers`/`rows` are `None` when the provider sent something that is not an array.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    pub name: String,
    pub headers: Option<Vec<String>>,
    pub rows: Option<Vec<Value>>,
}

impl ResultSet {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_NAME)
            .to_string();
        let headers = obj
            .get("headers")
            .and_then(Value::as_array)
            .map(|headers| headers.iter().map(header_text).collect());
        let rows = obj.get("rowSet").and_then(Value::as_array).cloned();

        Some(Self {
            name,
            headers,
            rows,
        })
    }

    /// Zip the headers with every row. Rows that are not arrays are skipped,
    /// cells past the last header are dropped, short rows leave fields absent.
    pub fn records(&self) -> Option<Vec<Record>> {
        let headers = self.headers.as_ref()?;
        let rows = self.rows.as_ref()?;

        let mut malformed = 0;
        let records = rows
            .iter()
            .filter_map(|row| match row.as_array() {
                Some(cells) => Some(
                    headers
                        .iter()
                        .zip(cells.iter())
                        .map(|(header, cell)| (header.clone(), cell.clone()))
                        .collect::<Record>(),
                ),
                None => {
                    malformed += 1;
                    None
                }
            })
            .collect();

        if malformed > 0 {
            tracing::debug!("{}: skipped {} malformed rows", self.name, malformed);
        }
        Some(records)
    }
}

/// The typed intermediate form of a tabular response
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSets {
    parameters: Option<Value>,
    resource: Option<String>,
    sets: Vec<ResultSet>,
}

impl ResultSets {
    /// Check the top-level shape. Fails when the value is not an object, has no
    /// `resultSets` array, or the array is empty. Non-object entries are dropped.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let obj = raw
            .as_object()
            .ok_or_else(|| Error::Shape("response is not an object".to_string()))?;
        let entries = obj
            .get("resultSets")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::Shape("response has no resultSets array".to_string()))?;
        if entries.is_empty() {
            return Err(Error::Shape("resultSets is empty".to_string()));
        }

        Ok(Self {
            parameters: obj.get("parameters").cloned(),
            resource: obj
                .get("resource")
                .and_then(Value::as_str)
                .map(str::to_string),
            sets: entries.iter().filter_map(ResultSet::from_value).collect(),
        })
    }

    pub fn sets(&self) -> &[ResultSet] {
        &self.sets
    }

    /// Every result set as records, keyed by name
    pub fn normalized_dict(&self) -> NamedRecordSet {
        NamedRecordSet(self.collect_by_name("resultSets", |set| set.records()))
    }

    /// Headers per result-set name
    pub fn all_headers(&self) -> BTreeMap<String, Vec<String>> {
        self.collect_by_name("headers", |set| set.headers.clone())
    }

    /// Raw rows per result-set name
    pub fn row_sets(&self) -> BTreeMap<String, Vec<Value>> {
        self.collect_by_name("rowSets", |set| set.rows.clone())
    }

    /// Result-set names in response order, duplicates included
    pub fn result_set_names(&self) -> Vec<String> {
        self.sets.iter().map(|set| set.name.clone()).collect()
    }

    pub fn headers_for(&self, name: &str) -> Result<Vec<String>> {
        self.all_headers()
            .remove(name)
            .ok_or_else(|| Error::NotFound(format!("headers for result set {}", name)))
    }

    /// Headers of the first result set
    pub fn headers(&self) -> Result<&[String]> {
        self.first()?
            .headers
            .as_deref()
            .ok_or_else(|| Error::NotFound("headers of the first result set".to_string()))
    }

    /// Rows of the first result set
    pub fn row_set(&self) -> Result<&[Value]> {
        self.first()?
            .rows
            .as_deref()
            .ok_or_else(|| Error::NotFound("rowSet of the first result set".to_string()))
    }

    pub fn parameters(&self) -> Option<&Value> {
        self.parameters.as_ref()
    }

    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    fn first(&self) -> Result<&ResultSet> {
        self.sets
            .first()
            .ok_or_else(|| Error::NotFound("no usable result set".to_string()))
    }

    // One set is handled inline; several are decoded as independent units and merged
    // by name, with the later set winning on a name collision either way.
    fn collect_by_name<T, F>(&self, label: &str, extract: F) -> BTreeMap<String, T>
    where
        T: Send,
        F: Fn(&ResultSet) -> Option<T> + Sync,
    {
        if let [only] = self.sets.as_slice() {
            return extract(only)
                .map(|value| BTreeMap::from([(only.name.clone(), value)]))
                .unwrap_or_default();
        }

        fan_out_into_map(label, self.sets.iter().collect(), |set: &ResultSet| {
            UnitOutcome::from_option(
                extract(set).map(|value| (set.name.clone(), value)),
                format!("{} has no usable {}", set.name, label),
            )
        })
    }
}

/// Decode a raw tabular response straight into records
pub fn normalized_dict(raw: &Value) -> Result<NamedRecordSet> {
    Ok(ResultSets::from_value(raw)?.normalized_dict())
}
