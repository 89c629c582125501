use bytes::Bytes;
use chrono::Utc;
use reqwest::StatusCode;
use url::Url;

use crate::fetcher::types::PageResponse;

/// Build a [`PageResponse`] from a raw body.
///
/// The body is always decoded as UTF-8, ignoring whatever charset the server
/// declared. The scrape targets serve UTF-8 bytes under mislabeled headers,
/// and an honest decode of the declared charset garbles their multi-byte
/// text. Invalid sequences become replacement characters rather than errors.
pub fn process_response(url_final: Url, status: StatusCode, body_bytes: Bytes) -> PageResponse {
    let (decoded, _, _) = encoding_rs::UTF_8.decode(&body_bytes);

    PageResponse {
        url_final,
        status,
        body_utf8: decoded.into_owned(),
        fetched_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8_body() {
        let url = Url::parse("http://example.com/").unwrap();
        let body = Bytes::from_static("<p>今日份外刊</p>".as_bytes());

        let resp = process_response(url, StatusCode::OK, body);
        assert_eq!(resp.body_utf8, "<p>今日份外刊</p>");
    }

    #[test]
    fn invalid_bytes_become_replacement_chars() {
        let url = Url::parse("http://example.com/").unwrap();
        let body = Bytes::from_static(b"ok \xff\xfe bytes");

        let resp = process_response(url, StatusCode::OK, body);
        assert!(resp.body_utf8.starts_with("ok "));
        assert!(resp.body_utf8.contains('\u{fffd}'));
    }
}
