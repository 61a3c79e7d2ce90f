use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

/// Retrieves a text column and parses it into an enum stored by its display text.
pub fn get_parsed<T: FromStr>(
    row: &PgRow,
    col_name: &str,
) -> Result<T, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    T::from_str(&s).map_err(|_| format!("Unexpected value '{s}' in column '{col_name}'").into())
}

/// Like [`get_parsed`], but an empty string reads as `None`.
pub fn get_optional_parsed<T: FromStr>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<T>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => T::from_str(value)
            .map(Some)
            .map_err(|_| format!("Unexpected value '{value}' in column '{col_name}'").into()),
    }
}
