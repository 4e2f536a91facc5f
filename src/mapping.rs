//! Shallow field copy between unrelated record shapes.
//!
//! Fields are matched by serialized name. A value is copied when the target
//! has a field of the same name holding the same JSON kind, or holding
//! `null` (an empty optional), and the target type actually accepts the
//! value. Fields that fail any of these checks are skipped; everything else on
//! the target is left alone.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("{0} does not serialize to a record with named fields")]
    NotARecord(&'static str),

    #[error("Field mapping failed: {0}")]
    Serde(#[from] serde_json::Error),
}

fn as_record(value: Value, side: &'static str) -> Result<Map<String, Value>, MappingError> {
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(MappingError::NotARecord(side)),
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

/// Copy matching fields of `source` onto `target`, returning how many were copied.
pub fn map_fields<S, T>(source: &S, target: &mut T) -> Result<usize, MappingError>
where
    S: Serialize,
    T: Serialize + DeserializeOwned,
{
    let source = as_record(serde_json::to_value(source)?, "source")?;
    let mut fields = as_record(serde_json::to_value(&*target)?, "target")?;

    let mut copied = 0;
    let mut mapped = None;
    for (name, value) in source {
        let Some(slot) = fields.get(&name) else {
            continue;
        };
        if !slot.is_null() && !same_kind(slot, &value) {
            continue;
        }

        // A null slot says nothing about the field's type, and numbers may
        // not fit; let the target type decide.
        let mut candidate = fields.clone();
        candidate.insert(name, value);
        if let Ok(value) = serde_json::from_value::<T>(Value::Object(candidate.clone())) {
            fields = candidate;
            mapped = Some(value);
            copied += 1;
        }
    }

    if let Some(value) = mapped {
        *target = value;
    }
    Ok(copied)
}

/// Build a fresh `T` from its defaults and copy matching fields of `source` onto it.
pub fn map_into<S, T>(source: &S) -> Result<T, MappingError>
where
    S: Serialize,
    T: Serialize + DeserializeOwned + Default,
{
    let mut target = T::default();
    map_fields(source, &mut target)?;
    Ok(target)
}
