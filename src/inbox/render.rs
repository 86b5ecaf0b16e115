use crate::inbox::email::Email;

/// Shown instead of the list when the fetched collection is empty.
pub const EMPTY_PLACEHOLDER: &str = "No emails ingested yet.";

/// Preview length in characters, before the ellipsis suffix.
const PREVIEW_CHARS: usize = 150;

/// Display-ready projection of one email record.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailCard {
    pub sender: String,
    pub preview: String,
    pub type_label: String,
    pub confidence_label: String,
    pub needs_review: bool,
}

/// Project every record, keeping the collection order.
pub fn render_cards(emails: &[Email]) -> Vec<EmailCard> {
    emails.iter().map(card).collect()
}

pub fn card(email: &Email) -> EmailCard {
    EmailCard {
        sender: email.email.clone(),
        preview: preview(&email.body),
        type_label: email.email_type.to_uppercase(),
        confidence_label: confidence_label(email.confidence_score),
        needs_review: email.needs_review,
    }
}

/// First 150 characters of the tag-stripped body. The `…` suffix is a fixed
/// cosmetic marker, appended whether or not anything was cut.
pub fn preview(body: &str) -> String {
    let mut out: String = strip_tags(body).chars().take(PREVIEW_CHARS).collect();
    out.push('…');
    out
}

/// Remove markup tags in one linear pass: a `<` swallows everything through
/// the next `>`, or to the end of the input when unclosed.
pub fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '<' {
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn confidence_label(score: f64) -> String {
    format!("{}%", (score * 100.0).round())
}
