//! WHATWG-style URL and URLSearchParams data model, suitable for backing
//! the `URL` Web API in an embedded script runtime.
//!
//! The crate operates purely on strings and ordered key/value pairs; it has
//! no knowledge of any script engine. Absolute-URL resolution is delegated
//! to the [`url`](https://docs.rs/url) crate, while component storage,
//! serialization, the form-urlencoded codec, and the bidirectional
//! `search`/`searchParams` synchronization are implemented here.
//!
//! ```
//! use webapi_url::Url;
//!
//! let mut url = Url::new("https://example.com/path?query=value#hash", None).unwrap();
//! assert_eq!(url.hostname(), "example.com");
//! assert_eq!(url.search_params().get("query"), Some("value"));
//!
//! url.search_params_mut().set("query", "other");
//! assert_eq!(url.search(), "?query=other");
//! ```
//!
//! Known limitations, kept deliberately:
//!
//! - `entries`/`keys`/`values`/`for_each` observe a snapshot; mutation during
//!   traversal is not reflected in a sequence already produced.
//! - Percent-decoded bytes that are not valid UTF-8 are replaced with U+FFFD.
//! - Blob URLs and opaque-path `data:` URLs are unsupported.

mod form_codec;
mod search_params;
mod url_record;

pub use self::form_codec::{encode_form_encoded, form_encode, parse_form_encoded, percent_decode};
pub use self::search_params::{Param, UrlSearchParams};
pub use self::url_record::Url;

pub type Result<T> = std::result::Result<T, Error>;

/// The single error kind of this crate.
///
/// Hosts surface it as a `TypeError`. Only parsing and href-reset can
/// fail; component setters store invalid values verbatim, as the
/// standard's permissive setters require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Invalid URL")]
    InvalidUrl,
}
