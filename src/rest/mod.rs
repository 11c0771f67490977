//! REST building blocks for the Contentful APIs.
//!
//! This module provides:
//!
//! - **[`LocaleItem<T>`]**: A field value that is either bare or keyed by locale
//! - **[`Query`]**: Search parameters for list endpoints
//! - **[`Collection<T>`]**: One page of a listing that fetches the next in place
//! - **[`Sys`] and [`Versioned`]**: Entity metadata and the version sent on writes
//! - **[`Resource`]**: The contract shared by every model in [`resources`]
//! - **Path building**: [`build_path`] for templated, percent-encoded paths
//!
//! # Example
//!
//! ```rust,ignore
//! use contentful::{Client, Context, Query};
//!
//! let ctx = Context::background();
//! let query = Query::new().content_type("cat").limit(100);
//!
//! let cats = client.entries().list(&ctx, "cfexampleapi", Some(query)).await?;
//! let everything = cats.collect_all(&ctx).await?;
//! ```

mod collection;
mod locale_item;
mod path;
mod query;
mod resource;
mod sys;

pub mod resources;

pub use collection::{Collection, DEFAULT_ORDER_FIELD};
pub use locale_item::LocaleItem;
pub use path::build_path;
pub use query::{MimeTypeGroup, Query};
pub use resource::Resource;
pub use sys::{Link, LinkSys, Sys, Versioned};
