//! Path building for REST resources.
//!
//! Resource paths are written as templates with `{name}` placeholders:
//!
//! - `/spaces/{space_id}`
//! - `/spaces/{space_id}/environments/{environment}/entries/{entry_id}`
//!
//! [`build_path`] fills the placeholders, percent-encoding each value so
//! that an id cannot break out of its path segment.
//!
//! # Example
//!
//! ```rust
//! use contentful::rest::build_path;
//!
//! let path = build_path(
//!     "/spaces/{space_id}/environments/{environment}/entries/{entry_id}",
//!     &[("space_id", "cfexampleapi"), ("environment", "master"), ("entry_id", "nyancat")],
//! )
//! .unwrap();
//! assert_eq!(path, "/spaces/cfexampleapi/environments/master/entries/nyancat");
//! ```

use crate::clients::InvalidHttpRequestError;

/// Fills the `{name}` placeholders of `template`.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::InvalidPath`] if a value is empty or a
/// placeholder is left unfilled.
pub fn build_path(template: &str, ids: &[(&str, &str)]) -> Result<String, InvalidHttpRequestError> {
    let mut result = template.to_string();

    for (key, value) in ids {
        if value.is_empty() {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: template.to_string(),
            });
        }
        let placeholder = format!("{{{key}}}");
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }

    if result.contains('{') {
        return Err(InvalidHttpRequestError::InvalidPath { path: result });
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_template_interpolation_single_id() {
        let result = build_path("/spaces/{space_id}", &[("space_id", "abc")]).unwrap();
        assert_eq!(result, "/spaces/abc");
    }

    #[test]
    fn test_path_template_interpolation_multiple_ids() {
        let result = build_path(
            "/spaces/{space_id}/environments/{environment}/locales/{locale_id}",
            &[
                ("space_id", "s1"),
                ("environment", "staging"),
                ("locale_id", "l1"),
            ],
        )
        .unwrap();
        assert_eq!(result, "/spaces/s1/environments/staging/locales/l1");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let result = build_path("/spaces/{space_id}", &[("space_id", "a/b c")]).unwrap();
        assert_eq!(result, "/spaces/a%2Fb%20c");
    }

    #[test]
    fn test_missing_placeholder_value_is_an_error() {
        let result = build_path("/spaces/{space_id}/entries/{entry_id}", &[("space_id", "s")]);
        let Err(InvalidHttpRequestError::InvalidPath { path }) = result else {
            panic!("expected InvalidPath");
        };
        assert_eq!(path, "/spaces/s/entries/{entry_id}");
    }

    #[test]
    fn test_empty_value_is_an_error() {
        let result = build_path("/spaces/{space_id}", &[("space_id", "")]);
        assert!(result.is_err());
    }
}
