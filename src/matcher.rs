//! Primary-key matching of submitted form data against loaded entities.
//!
//! Used when a form edits a collection of related objects: each submitted
//! row has to be paired with the instance it describes, if any, by comparing
//! the row's primary-key fields with the instances' attributes after
//! coercing the raw input to the key columns' types.

use serde_json::Value as JsonValue;
use tracing::{Level, event};

use crate::convert::{CoercionConfig, ColumnDescriptor, FormData, RawValue};
use crate::core::{Result, Value};
use crate::model::{Entity, Model};

/// Matches payloads against candidates using a fixed coercion configuration.
#[derive(Debug, Clone, Default)]
pub struct EntityMatcher {
    config: CoercionConfig,
}

impl EntityMatcher {
    pub fn new(config: CoercionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CoercionConfig {
        &self.config
    }

    /// Returns the first candidate whose primary-key attributes equal the
    /// coerced key values of `data`.
    ///
    /// Any key field that is absent or blank means no match. A key value
    /// that cannot be coerced (bad format or wrong JSON kind) cannot equal
    /// any attribute, so it also means no match; other coercion failures
    /// and attribute access errors are returned.
    pub fn find<'a, E, I, C>(
        &self,
        candidates: I,
        primary_keys: &[C],
        data: &FormData,
    ) -> Result<Option<&'a E>>
    where
        E: Entity + ?Sized + 'a,
        I: IntoIterator<Item = &'a E>,
        C: ColumnDescriptor,
    {
        let Some(key) = self.coerce_key(primary_keys, data)? else {
            return Ok(None);
        };

        for candidate in candidates {
            if Self::matches(candidate, &key)? {
                event!(Level::DEBUG, key = ?key, "matched entity by primary key");
                return Ok(Some(candidate));
            }
        }

        Ok(None)
    }

    /// Like [`find`](Self::find), with the key columns taken from `M`'s table.
    pub fn find_model<'a, M, I>(&self, candidates: I, data: &FormData) -> Result<Option<&'a M>>
    where
        M: Model + 'a,
        I: IntoIterator<Item = &'a M>,
    {
        let table = M::table();
        let primary_keys: Vec<_> = table.primary_keys().collect();
        self.find(candidates, &primary_keys, data)
    }

    /// Coerces every key field, in key order.
    ///
    /// `Ok(None)` when a field is missing or blank, when some field could
    /// not be coerced, or when there are no key columns at all.
    fn coerce_key<'k, C: ColumnDescriptor>(
        &self,
        primary_keys: &'k [C],
        data: &FormData,
    ) -> Result<Option<Vec<(&'k str, Value)>>> {
        let mut key = Vec::with_capacity(primary_keys.len());
        let mut coercible = true;

        for column in primary_keys {
            let name = column.name();
            let Some(raw) = data.get(name).filter(|raw| !is_blank(raw)) else {
                event!(Level::TRACE, column = name, "primary key field missing or blank");
                return Ok(None);
            };

            match column.coerce(raw, &self.config) {
                Ok(value) => key.push((name, value)),
                Err(err) if err.is_recoverable() => {
                    event!(Level::TRACE, column = name, error = %err, "primary key value rejected");
                    coercible = false;
                }
                Err(err) => return Err(err.into()),
            }
        }

        if !coercible || key.is_empty() {
            return Ok(None);
        }
        Ok(Some(key))
    }

    fn matches<E: Entity + ?Sized>(candidate: &E, key: &[(&str, Value)]) -> Result<bool> {
        for (name, expected) in key {
            if candidate.attribute(name)? != *expected {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Finds the entity in `candidates` identified by the primary-key fields of
/// `data`, with the default coercion configuration.
pub fn find_entity<'a, E, I, C>(
    candidates: I,
    primary_keys: &[C],
    data: &FormData,
) -> Result<Option<&'a E>>
where
    E: Entity + ?Sized + 'a,
    I: IntoIterator<Item = &'a E>,
    C: ColumnDescriptor,
{
    EntityMatcher::default().find(candidates, primary_keys, data)
}

/// [`find_entity`] with the key columns of `M`.
pub fn find_model_entity<'a, M, I>(candidates: I, data: &FormData) -> Result<Option<&'a M>>
where
    M: Model + 'a,
    I: IntoIterator<Item = &'a M>,
{
    EntityMatcher::default().find_model(candidates, data)
}

/// Falsy payload values: null, empty strings and containers, `false` and zero.
pub fn is_blank(raw: &RawValue) -> bool {
    match raw {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(fields) => fields.is_empty(),
    }
}
