//! Netscape bookmark file export.
//!
//! The output is the de facto interchange format understood by every major
//! browser's "import bookmarks from HTML" dialog.

use std::fmt::{self, Write};

use bookmark_core::{Bookmark, BookmarkId};

/// Fixed attachment filename of an export.
pub const EXPORT_FILENAME: &str = "bookmarks.html";

/// Name of the single folder holding every exported bookmark.
pub const EXPORT_FOLDER: &str = "Bookmarks";

/// Errors that abort an export. No partial document is returned.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("bookmark {0} has an empty href")]
    EmptyHref(BookmarkId),

    #[error("failed to format export document: {0}")]
    Format(#[from] fmt::Error),
}

/// Render `bookmarks` as a Netscape bookmark file.
pub fn render_netscape(bookmarks: &[Bookmark]) -> Result<String, ExportError> {
    let mut out = String::with_capacity(256 + bookmarks.len() * 160);

    writeln!(out, "<!DOCTYPE NETSCAPE-Bookmark-file-1>")?;
    writeln!(
        out,
        "<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">"
    )?;
    writeln!(out, "<TITLE>{EXPORT_FOLDER}</TITLE>")?;
    writeln!(out, "<H1>{EXPORT_FOLDER}</H1>")?;
    writeln!(out, "<DL><p>")?;

    for bookmark in bookmarks {
        if bookmark.url.is_empty() {
            return Err(ExportError::EmptyHref(bookmark.id));
        }
        writeln!(
            out,
            "    <DT><A HREF=\"{}\" ADD_DATE=\"{}\" LAST_MODIFIED=\"{}\">{}</A>",
            escape_html(&bookmark.url),
            bookmark.created_at.timestamp(),
            bookmark.updated_at.timestamp(),
            escape_html(&bookmark.title),
        )?;
    }

    writeln!(out, "</DL><p>")?;
    Ok(out)
}

/// Escape text for HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bookmark(id: BookmarkId, title: &str, url: &str) -> Bookmark {
        Bookmark {
            id,
            title: title.to_string(),
            url: url.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 7, 8, 9, 10).unwrap(),
        }
    }

    #[test]
    fn test_document_has_one_entry_per_bookmark() {
        let bookmarks = vec![
            bookmark(1, "Rust", "https://www.rust-lang.org"),
            bookmark(2, "Docs", "https://docs.rs"),
            bookmark(3, "Crates", "https://crates.io"),
        ];

        let doc = render_netscape(&bookmarks).unwrap();

        assert!(doc.starts_with("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
        assert!(doc.contains("<H1>Bookmarks</H1>"));
        assert_eq!(doc.matches("<DT><A ").count(), 3);

        let created = bookmarks[0].created_at.timestamp();
        let modified = bookmarks[0].updated_at.timestamp();
        assert!(doc.contains(&format!(
            "<DT><A HREF=\"https://www.rust-lang.org\" ADD_DATE=\"{created}\" LAST_MODIFIED=\"{modified}\">Rust</A>"
        )));
    }

    #[test]
    fn test_empty_collection() {
        let doc = render_netscape(&[]).unwrap();
        assert!(doc.contains("<DL><p>"));
        assert_eq!(doc.matches("<DT>").count(), 0);
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = render_netscape(&[bookmark(
            1,
            "Q&A <fast> \"tips\"",
            "https://example.com/?a=1&b=\"2\"",
        )])
        .unwrap();

        assert!(doc.contains("HREF=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));
        assert!(doc.contains(">Q&amp;A &lt;fast&gt; &quot;tips&quot;</A>"));
    }

    #[test]
    fn test_empty_href_aborts_export() {
        let err = render_netscape(&[bookmark(1, "ok", "https://a.test"), bookmark(7, "bad", "")])
            .unwrap_err();
        assert!(matches!(err, ExportError::EmptyHref(7)));
    }
}
