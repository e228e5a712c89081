//! Map requested fields of an entity to the columns that must be fetched for them.

use super::super::error::Error;

/// Static information about how an entity is stored.
pub trait TypeInfo {
    /// The collection name used in error messages.
    const COLLECTION_NAME: &'static str;

    /// The column backing a field. Relationship fields map to the key column the
    /// relationship is resolved with.
    fn column_for_field(field: &str) -> Option<&'static str>;
}

/// Translate the requested fields into a sorted, de-duplicated list of columns.
///
/// Introspection fields (those starting with `__`) are ignored.
pub fn extract_columns<T, S>(fields: &[S]) -> Result<Vec<&'static str>, Error>
where
    T: TypeInfo,
    S: AsRef<str>,
{
    let mut columns = fields
        .iter()
        .map(AsRef::as_ref)
        .filter(|field| !field.starts_with("__"))
        .map(|field| {
            T::column_for_field(field).ok_or_else(|| Error::FieldNotFound {
                field: field.to_string(),
                collection: T::COLLECTION_NAME.to_string(),
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    columns.sort_unstable();
    columns.dedup();
    Ok(columns)
}
