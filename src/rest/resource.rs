//! Shared plumbing for Contentful resource services.
//!
//! Every service in [`crate::rest::resources`] speaks the same small
//! protocol:
//!
//! - `GET {collection}` lists into a [`Collection`]
//! - `GET {collection}/{id}` fetches one entity
//! - `POST {collection}` creates an entity that has no `sys.id`
//! - `PUT {collection}/{id}` creates or updates an entity that has one
//! - `PUT|DELETE {collection}/{id}/{state}` moves an entity through its
//!   lifecycle (`published`, `archived`)
//! - `DELETE {collection}/{id}` removes it
//!
//! A few entities (app definitions, app installations, scheduled actions)
//! are deleted by id alone; [`remove`] sends those without a version.
//!
//! Every write carries `X-Contentful-Version` taken from
//! [`Versioned::version`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{
    Context, HttpClient, HttpError, HttpMethod, HttpRequest, InvalidHttpRequestError,
    VERSION_HEADER,
};
use crate::rest::collection::Collection;
use crate::rest::query::Query;
use crate::rest::sys::Versioned;

/// A Contentful entity that a service can read and write.
pub trait Resource: Versioned + Serialize + DeserializeOwned + Send + Sync {
    /// Human-readable name used in error messages, e.g. `entry`.
    const NAME: &'static str;
}

/// Returns the entity id, failing before any I/O when it is missing.
pub(crate) fn require_id<'a, R: Resource>(
    entity: &'a R,
    operation: &'static str,
) -> Result<&'a str, HttpError> {
    entity
        .id()
        .filter(|id| !id.is_empty())
        .ok_or(HttpError::InvalidRequest(
            InvalidHttpRequestError::MissingEntityId {
                resource: R::NAME,
                operation,
            },
        ))
}

/// Appends one percent-encoded segment to `base`.
pub(crate) fn child_path(base: &str, segment: &str) -> Result<String, HttpError> {
    if segment.is_empty() {
        return Err(InvalidHttpRequestError::InvalidPath {
            path: format!("{base}/"),
        }
        .into());
    }
    Ok(format!("{base}/{}", urlencoding::encode(segment)))
}

pub(crate) async fn fetch<R: Resource>(
    http: &HttpClient,
    path: String,
    ctx: &Context,
) -> Result<R, HttpError> {
    let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
    http.request_json(&request, ctx).await
}

pub(crate) async fn list<R: Resource>(
    http: &HttpClient,
    path: String,
    query: Option<Query>,
    ctx: &Context,
) -> Result<Collection<R>, HttpError> {
    let request = HttpRequest::builder(HttpMethod::Get, path).build()?;
    Collection::new(http.clone(), request, query, ctx).await
}

/// Creates or updates `entity` under `collection`.
///
/// Entities with a `sys.id` are PUT to their item path; new entities are
/// POSTed to the collection so the API assigns the id. An empty id counts
/// as new.
pub(crate) async fn upsert<R: Resource>(
    http: &HttpClient,
    collection: &str,
    entity: &R,
    headers: &[(&str, &str)],
    ctx: &Context,
) -> Result<R, HttpError> {
    let (method, path) = upsert_target(collection, entity)?;
    write(http, method, path, entity, headers, ctx).await
}

fn upsert_target<R: Resource>(
    collection: &str,
    entity: &R,
) -> Result<(HttpMethod, String), HttpError> {
    match entity.id().filter(|id| !id.is_empty()) {
        Some(id) => Ok((HttpMethod::Put, child_path(collection, id)?)),
        None => Ok((HttpMethod::Post, collection.to_string())),
    }
}

/// Sends `entity` as the JSON body of a versioned write and decodes the reply.
pub(crate) async fn write<R: Resource>(
    http: &HttpClient,
    method: HttpMethod,
    path: String,
    entity: &R,
    headers: &[(&str, &str)],
    ctx: &Context,
) -> Result<R, HttpError> {
    let mut builder = HttpRequest::builder(method, path)
        .json_body(entity)
        .map_err(HttpError::Encode)?
        .header(VERSION_HEADER, entity.version().to_string());
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.build()?;
    http.request_json(&request, ctx).await
}

/// Issues a body-less versioned call on `path` and decodes the entity it
/// returns.
pub(crate) async fn transition<R: Resource>(
    http: &HttpClient,
    method: HttpMethod,
    path: String,
    entity: &R,
    ctx: &Context,
) -> Result<R, HttpError> {
    let request = HttpRequest::builder(method, path)
        .header(VERSION_HEADER, entity.version().to_string())
        .build()?;
    http.request_json(&request, ctx).await
}

/// Deletes the entity at `path`.
pub(crate) async fn delete<R: Resource>(
    http: &HttpClient,
    path: String,
    entity: &R,
    ctx: &Context,
) -> Result<(), HttpError> {
    let request = HttpRequest::builder(HttpMethod::Delete, path)
        .header(VERSION_HEADER, entity.version().to_string())
        .build()?;
    http.request_empty(&request, ctx).await
}

/// Deletes the unversioned entity at `path`.
pub(crate) async fn remove(
    http: &HttpClient,
    path: String,
    query: Option<&Query>,
    ctx: &Context,
) -> Result<(), HttpError> {
    let mut builder = HttpRequest::builder(HttpMethod::Delete, path);
    if let Some(query) = query {
        builder = builder.query(query.params());
    }
    http.request_empty(&builder.build()?, ctx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::sys::Sys;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Thing {
        #[serde(skip_serializing_if = "Option::is_none")]
        sys: Option<Sys>,
    }

    impl Versioned for Thing {
        fn sys(&self) -> Option<&Sys> {
            self.sys.as_ref()
        }
    }

    impl Resource for Thing {
        const NAME: &'static str = "thing";
    }

    #[test]
    fn test_require_id_rejects_new_entities() {
        let thing = Thing { sys: None };
        let err = require_id(&thing, "publish").unwrap_err();
        assert_eq!(err.to_string(), "Cannot publish thing without sys.id.");
    }

    #[test]
    fn test_require_id_rejects_empty_id() {
        let thing = Thing {
            sys: Some(Sys {
                id: Some(String::new()),
                ..Sys::default()
            }),
        };
        assert!(require_id(&thing, "delete").is_err());
    }

    #[test]
    fn test_require_id_returns_id() {
        let thing = Thing {
            sys: Some(Sys {
                id: Some("t1".to_string()),
                ..Sys::default()
            }),
        };
        assert_eq!(require_id(&thing, "delete").unwrap(), "t1");
    }

    #[test]
    fn test_upsert_target_posts_when_id_is_empty() {
        let thing = Thing {
            sys: Some(Sys {
                id: Some(String::new()),
                ..Sys::default()
            }),
        };
        let (method, path) = upsert_target("/spaces/s/things", &thing).unwrap();
        assert_eq!(method, HttpMethod::Post);
        assert_eq!(path, "/spaces/s/things");
    }

    #[test]
    fn test_upsert_target_puts_when_id_is_set() {
        let thing = Thing {
            sys: Some(Sys {
                id: Some("t1".to_string()),
                ..Sys::default()
            }),
        };
        let (method, path) = upsert_target("/spaces/s/things", &thing).unwrap();
        assert_eq!(method, HttpMethod::Put);
        assert_eq!(path, "/spaces/s/things/t1");
    }

    #[test]
    fn test_child_path_encodes_segment() {
        assert_eq!(
            child_path("/spaces/s/entries", "a b").unwrap(),
            "/spaces/s/entries/a%20b"
        );
        assert!(child_path("/spaces", "").is_err());
    }
}
