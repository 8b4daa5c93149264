//! Module that includes the validated email address type.

/// RFC 5321 ceiling for a mailbox address.
const MAX_EMAIL_LENGTH: usize = 254;

/// Symbols, besides ASCII alphanumerics, that are accepted in the local part.
const LOCAL_PART_SYMBOLS: &str = ".!#$%&'*+/=?^_`{|}~-";

/// A syntactically valid subscriber email address.
///
/// # Description
///
/// The check is purely syntactic: no DNS lookup, no mailbox verification.
/// An address is accepted when all of the following hold:
/// - it is at most 254 bytes long;
/// - it contains exactly one `@` with a non-empty local part made of ASCII
///   alphanumerics and the symbols `.!#$%&'*+/=?^_`{|}~-`;
/// - the domain is made of dot-separated labels, each 1 to 63 characters,
///   alphanumeric with internal hyphens only, and there are at least two
///   labels.
#[derive(Debug, Clone)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Parse a candidate address, returning a [SubscriberEmail] if it passes
    /// the syntactic rules described on the type.
    pub fn parse(s: String) -> Result<SubscriberEmail, String> {
        if is_valid_email(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{} is not a valid email address", s))
        }
    }
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_valid_email(address: &str) -> bool {
    if address.len() > MAX_EMAIL_LENGTH {
        return false;
    }

    let mut parts = address.splitn(2, '@');
    let (local, domain) = match (parts.next(), parts.next()) {
        (Some(local), Some(domain)) => (local, domain),
        _ => return false,
    };

    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    // A second `@` would end up inside the domain and fail the label check.
    let mut labels = domain.split('.');
    labels.clone().count() >= 2 && labels.all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
