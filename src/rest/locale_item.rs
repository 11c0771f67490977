//! Locale-aware field values.
//!
//! Contentful returns a field either as a bare value (when the request named
//! a single locale) or as an object keyed by locale code (management API and
//! `locale=*` requests). [`LocaleItem`] models both shapes.

use std::collections::BTreeMap;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::clients::HttpError;

/// A field value that is either a single value or a per-locale map.
///
/// # Decoding
///
/// Decoding first tries a map of locale code to `T`; if that fails it
/// decodes a bare `T`. If both fail, decoding fails.
///
/// # Encoding
///
/// Each variant encodes to its own shape: a bare value, or an object with
/// keys in sorted order.
///
/// # Example
///
/// ```rust
/// use contentful::LocaleItem;
///
/// let title: LocaleItem<String> =
///     serde_json::from_str(r#"{"en-US":"Hello","de-DE":"Hallo"}"#).unwrap();
/// assert!(title.is_localized());
/// assert_eq!(title.get("de-DE").map(String::as_str), Some("Hallo"));
///
/// let title: LocaleItem<String> = serde_json::from_str(r#""Hello""#).unwrap();
/// assert_eq!(title.get("fr-FR").map(String::as_str), Some("Hello"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocaleItem<T> {
    /// A value that applies to whatever locale was requested.
    Single(T),
    /// Values keyed by locale code.
    Localized(BTreeMap<String, T>),
}

impl<T: DeserializeOwned> LocaleItem<T> {
    /// Decodes a value from raw JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::EmptyPayload`] if `bytes` is empty or only
    /// whitespace, and [`HttpError::Decode`] if neither shape matches.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HttpError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(HttpError::EmptyPayload);
        }
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl<T> LocaleItem<T> {
    /// Returns the value for `locale`.
    ///
    /// A single value is returned for every locale.
    #[must_use]
    pub fn get(&self, locale: &str) -> Option<&T> {
        match self {
            Self::Single(value) => Some(value),
            Self::Localized(map) => map.get(locale),
        }
    }

    /// Returns `true` for the per-locale variant.
    #[must_use]
    pub const fn is_localized(&self) -> bool {
        matches!(self, Self::Localized(_))
    }

    /// Converts into a per-locale map, filing a single value under
    /// `default_locale`.
    #[must_use]
    pub fn into_map(self, default_locale: &str) -> BTreeMap<String, T> {
        match self {
            Self::Single(value) => BTreeMap::from([(default_locale.to_string(), value)]),
            Self::Localized(map) => map,
        }
    }
}

impl<T> From<T> for LocaleItem<T> {
    fn from(value: T) -> Self {
        Self::Single(value)
    }
}

impl<T: Serialize> Serialize for LocaleItem<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Single(value) => value.serialize(serializer),
            Self::Localized(map) => map.serialize(serializer),
        }
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for LocaleItem<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;

        if let Ok(map) = BTreeMap::<String, T>::deserialize(&value) {
            return Ok(Self::Localized(map));
        }

        T::deserialize(&value)
            .map(Self::Single)
            .map_err(|e| D::Error::custom(format!("invalid locale item: {e}")))
    }
}
