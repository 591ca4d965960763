//! Opaque cursor and page envelope primitives shared by listing endpoints.
//!
//! A [`Cursor`] wraps an ordering key (for example `(date, id)` for news
//! items) and encodes it as URL-safe base64 JSON so clients treat it as an
//! opaque token. A [`Page`] carries one slice of results plus the cursor for
//! the following slice, when there is one.
//!
//! ```
//! use pagination::{Cursor, Page};
//!
//! let page = Page::from_overfetch(vec![5, 4, 3], 2, |last| *last).expect("page");
//! assert_eq!(page.items, vec![5, 4]);
//! let next: Cursor<i32> = Cursor::decode(page.next.as_deref().expect("next")).expect("cursor");
//! assert_eq!(*next.key(), 4);
//! ```

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Errors raised while encoding or decoding cursors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token is not valid URL-safe base64.
    #[error("cursor is not valid base64: {message}")]
    InvalidEncoding {
        /// Decoder failure description.
        message: String,
    },
    /// The decoded bytes do not describe the expected key.
    #[error("cursor payload is malformed: {message}")]
    InvalidPayload {
        /// Deserialiser failure description.
        message: String,
    },
    /// The key could not be serialised.
    #[error("cursor key could not be serialised: {message}")]
    Serialize {
        /// Serialiser failure description.
        message: String,
    },
}

/// Opaque pagination cursor wrapping an ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor<K> {
    key: K,
}

impl<K> Cursor<K> {
    /// Wrap an ordering key.
    pub const fn new(key: K) -> Self {
        Self { key }
    }

    /// Borrow the ordering key.
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Consume the cursor and return its key.
    pub fn into_key(self) -> K {
        self.key
    }
}

impl<K: Serialize> Cursor<K> {
    /// Encode the cursor as a URL-safe token.
    ///
    /// # Errors
    /// Returns [`CursorError::Serialize`] when the key cannot be rendered as
    /// JSON.
    pub fn encode(&self) -> Result<String, CursorError> {
        let bytes = serde_json::to_vec(&self.key).map_err(|err| CursorError::Serialize {
            message: err.to_string(),
        })?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}

impl<K: DeserializeOwned> Cursor<K> {
    /// Decode a token produced by [`Cursor::encode`].
    ///
    /// # Errors
    /// Returns [`CursorError::InvalidEncoding`] for non-base64 input and
    /// [`CursorError::InvalidPayload`] when the payload does not match `K`.
    pub fn decode(token: &str) -> Result<Self, CursorError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|err| CursorError::InvalidEncoding {
                message: err.to_string(),
            })?;
        let key = serde_json::from_slice(&bytes).map_err(|err| CursorError::InvalidPayload {
            message: err.to_string(),
        })?;
        Ok(Self { key })
    }
}

/// One slice of an ordered listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items in listing order.
    pub items: Vec<T>,
    /// Cursor for the next slice, absent on the last page.
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Build a page from a query that fetched up to `limit + 1` rows.
    ///
    /// The extra row only signals that another page exists; it is dropped and
    /// the cursor points at the last row that is kept.
    ///
    /// # Errors
    /// Propagates [`CursorError::Serialize`] from cursor encoding.
    pub fn from_overfetch<K, F>(mut items: Vec<T>, limit: usize, key_of: F) -> Result<Self, CursorError>
    where
        K: Serialize,
        F: FnOnce(&T) -> K,
    {
        if items.len() <= limit {
            return Ok(Self { items, next: None });
        }
        items.truncate(limit);
        let next = match items.last() {
            Some(last) => Some(Cursor::new(key_of(last)).encode()?),
            None => None,
        };
        Ok(Self { items, next })
    }

    /// Build an absolute link to the next page, replacing any existing query.
    #[must_use]
    pub fn next_link(&self, base: &Url, param: &str) -> Option<Url> {
        let cursor = self.next.as_deref()?;
        let mut link = base.clone();
        link.query_pairs_mut().clear().append_pair(param, cursor);
        Some(link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    struct DateKey {
        date: String,
        id: i64,
    }

    #[rstest]
    fn cursor_round_trips_structured_keys() {
        let key = DateKey {
            date: "2024-05-01T10:00:00Z".to_owned(),
            id: 7,
        };
        let token = Cursor::new(key.clone()).encode().expect("encode");
        assert!(!token.contains('='), "token must be unpadded: {token}");

        let decoded: Cursor<DateKey> = Cursor::decode(&token).expect("decode");
        assert_eq!(decoded.into_key(), key);
    }

    #[rstest]
    #[case("not base64!")]
    #[case("%%%")]
    fn decode_rejects_non_base64(#[case] token: &str) {
        let err = Cursor::<DateKey>::decode(token).expect_err("must fail");
        assert!(matches!(err, CursorError::InvalidEncoding { .. }));
    }

    #[rstest]
    fn decode_rejects_foreign_payloads() {
        let token = Cursor::new("just a string").encode().expect("encode");
        let err = Cursor::<DateKey>::decode(&token).expect_err("must fail");
        assert!(matches!(err, CursorError::InvalidPayload { .. }));
    }

    #[rstest]
    #[case(vec![1, 2], 2, None)]
    #[case(vec![1, 2, 3], 2, Some(2))]
    #[case(Vec::new(), 10, None)]
    fn overfetch_sets_cursor_only_when_more_rows_exist(
        #[case] rows: Vec<i64>,
        #[case] limit: usize,
        #[case] expected_key: Option<i64>,
    ) {
        let page = Page::from_overfetch(rows, limit, |last| *last).expect("page");
        assert!(page.items.len() <= limit);
        let key = page
            .next
            .as_deref()
            .map(|token| Cursor::<i64>::decode(token).expect("decode").into_key());
        assert_eq!(key, expected_key);
    }

    #[rstest]
    fn next_link_replaces_existing_query() {
        let page = Page {
            items: vec![1],
            next: Some("abc".to_owned()),
        };
        let base = Url::parse("http://localhost/?cursor=old&x=1").expect("url");
        let link = page.next_link(&base, "cursor").expect("link");
        assert_eq!(link.as_str(), "http://localhost/?cursor=abc");
    }

    #[rstest]
    fn next_link_is_absent_on_last_page() {
        let page: Page<i32> = Page {
            items: Vec::new(),
            next: None,
        };
        let base = Url::parse("http://localhost/").expect("url");
        assert!(page.next_link(&base, "cursor").is_none());
    }
}
