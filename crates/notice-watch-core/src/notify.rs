//! Notification dispatch contract.
//!
//! A [`Notifier`] takes one newly discovered item and tries to deliver it.
//! It never returns an error: transport failures are logged inside the
//! implementation and surface only as [`Delivery::Failed`], which the
//! reconciliation engine counts but otherwise ignores.

use async_trait::async_trait;
use url::Url;

use crate::models::RawItem;

/// Outcome of one [`Notifier::notify`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered through the rich (document attachment) mode.
    Document,
    /// Delivered as a plain text message, directly or as a fallback.
    Message,
    /// Every delivery mode failed.
    Failed,
}

impl Delivery {
    pub fn is_delivered(self) -> bool {
        !matches!(self, Delivery::Failed)
    }
}

/// Delivery boundary for new-item alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempt delivery of `item`. Must not panic or propagate errors.
    async fn notify(&self, item: &RawItem) -> Delivery;
}

/// Document suffixes that get the rich delivery mode.
const DOCUMENT_SUFFIXES: &[&str] = &[".pdf"];

/// Whether `link` points at a document worth attaching rather than
/// linking.
///
/// Only the URL path is considered, so query strings and fragments do not
/// hide the suffix. Matching is case-insensitive.
pub fn prefers_document(link: &str) -> bool {
    let path = Url::parse(link)
        .map(|u| u.path().to_ascii_lowercase())
        .unwrap_or_else(|_| link.to_ascii_lowercase());
    DOCUMENT_SUFFIXES.iter().any(|suffix| path.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_links_prefer_document() {
        assert!(prefers_document("http://dtu.ac.in/upload/notice.pdf"));
        assert!(prefers_document("http://dtu.ac.in/upload/NOTICE.PDF"));
        assert!(prefers_document("https://exam.dtu.ac.in/a/b.pdf?v=2#page=1"));
    }

    #[test]
    fn test_other_links_prefer_message() {
        assert!(!prefers_document("https://exam.dtu.ac.in/Notices-n-Circulars.htm"));
        assert!(!prefers_document("https://x.test/pdf"));
        assert!(!prefers_document("https://x.test/file.pdf.html"));
    }

    #[test]
    fn test_failed_is_not_delivered() {
        assert!(Delivery::Document.is_delivered());
        assert!(Delivery::Message.is_delivered());
        assert!(!Delivery::Failed.is_delivered());
    }
}
