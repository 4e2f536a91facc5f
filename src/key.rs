//! Primary-key field resolution.
//!
//! Lookups by id filter on the conventional `Id` field unless the record type
//! declares a different integral primary key. The answer never changes at
//! runtime, so it is computed once per entity type and cached.

use log::debug;
use once_cell::sync::Lazy;
use sea_orm::{ColumnTrait, ColumnType, EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn};
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::constants::CONVENTIONAL_KEY_FIELD;
use crate::error::{DataError, DataResult};
use crate::record::AuditedEntity;

static KEY_FIELDS: Lazy<RwLock<HashMap<TypeId, String>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Integral value types a key field may carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Int32,
    Int64,
}

/// Explicit declaration of a record type's key field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub field: String,
    pub kind: KeyKind,
}

impl KeyDescriptor {
    pub fn new(field: impl Into<String>, kind: KeyKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

/// Declared metadata of a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldMeta {
    pub name: String,
    pub kind: Option<KeyKind>,
    pub primary_key: bool,
}

/// Pick the key field from declared field metadata.
///
/// Exactly one integral field tagged as primary key wins; any other shape
/// (none, several, or a non-integral key) falls back to `Id`.
pub fn resolve_from_fields(fields: &[FieldMeta]) -> String {
    let mut keys = fields.iter().filter(|f| f.primary_key && f.kind.is_some());
    match (keys.next(), keys.next()) {
        (Some(field), None) => field.name.clone(),
        _ => CONVENTIONAL_KEY_FIELD.to_string(),
    }
}

/// Field metadata for every column of `E`, with PascalCase field names.
pub fn fields_of<E: EntityTrait>() -> Vec<FieldMeta> {
    let key_columns: Vec<String> = E::PrimaryKey::iter()
        .map(|pk| pk.into_column().as_str().to_string())
        .collect();

    E::Column::iter()
        .map(|column| FieldMeta {
            name: pascal_case(column.as_str()),
            kind: integral_kind(column.def().get_column_type()),
            primary_key: key_columns.iter().any(|key| key == column.as_str()),
        })
        .collect()
}

fn integral_kind(column_type: &ColumnType) -> Option<KeyKind> {
    match column_type {
        ColumnType::Integer => Some(KeyKind::Int32),
        ColumnType::BigInteger => Some(KeyKind::Int64),
        _ => None,
    }
}

/// Seed the cache with an explicit descriptor, overriding any earlier answer.
pub fn register_key<E: EntityTrait>(descriptor: KeyDescriptor) {
    if let Ok(mut cache) = KEY_FIELDS.write() {
        cache.insert(TypeId::of::<E>(), descriptor.field);
    }
}

/// Name of the field lookups by id must filter on.
pub fn resolve_key_field<E: AuditedEntity>() -> String {
    let type_id = TypeId::of::<E>();
    if let Ok(cache) = KEY_FIELDS.read() {
        if let Some(field) = cache.get(&type_id) {
            return field.clone();
        }
    }

    let field = match E::key_descriptor() {
        Some(descriptor) => descriptor.field,
        None => resolve_from_fields(&fields_of::<E>()),
    };
    debug!("Resolved key field '{}' for {}", field, entity_name::<E>());

    match KEY_FIELDS.write() {
        Ok(mut cache) => cache.entry(type_id).or_insert(field).clone(),
        Err(_) => field,
    }
}

/// Column backing the resolved key field.
pub fn key_column<E: AuditedEntity>() -> DataResult<E::Column> {
    let field = resolve_key_field::<E>();
    column_for_field::<E>(&field).ok_or_else(|| DataError::UnknownField {
        entity: entity_name::<E>(),
        field,
    })
}

/// Case- and underscore-insensitive match of a field name against `E`'s columns.
pub fn column_for_field<E: EntityTrait>(field: &str) -> Option<E::Column> {
    let wanted = normalize(field);
    if wanted.is_empty() {
        return None;
    }
    E::Column::iter().find(|column| normalize(column.as_str()) == wanted)
}

pub fn entity_name<E: EntityTrait>() -> String {
    E::default().table_name().to_string()
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// `account_number` -> `AccountNumber`
pub fn pascal_case(column: &str) -> String {
    column
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
