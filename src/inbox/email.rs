use serde::Deserialize;

/// A classified email exactly as the backend serves it. The collection is
/// read-only and kept in received order; nothing here is sorted, filtered,
/// or deduplicated client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Email {
    pub id: i64,
    /// Sender address.
    pub email: String,
    /// Raw markup body.
    pub body: String,
    /// marketing | support | newsletter; display-only here.
    pub email_type: String,
    pub confidence_score: f64,
    pub needs_review: bool,
    /// Opaque server timestamp, never parsed.
    pub created_at: String,
}
