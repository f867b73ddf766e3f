//! Client-side form validation.
//!
//! Checks run before any network call; failures are keyed by field so a
//! view can render each message next to the offending input. Nothing here
//! ever reaches the backend.

use crate::types::{PostDraft, ProfileUpdate, RegisterRequest};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 200;
pub const CONTENT_MIN_LEN: usize = 50;
pub const USERNAME_MIN_LEN: usize = 3;
pub const BIO_MAX_LEN: usize = 500;

/// Field-keyed validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for one field, if it failed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed")?;
        for (field, message) in self.errors.iter() {
            write!(f, "; {field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl PostDraft {
    /// Authoring-form rules: title 3..=200 chars, content at least 50,
    /// image (when given) a parseable URL.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim();
        if title.is_empty() {
            errors.insert("title", "Title is required");
        } else if title.chars().count() < TITLE_MIN_LEN {
            errors.insert(
                "title",
                format!("Title must be at least {TITLE_MIN_LEN} characters long"),
            );
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.insert(
                "title",
                format!("Title cannot exceed {TITLE_MAX_LEN} characters"),
            );
        }

        let content = self.content.trim();
        if content.is_empty() {
            errors.insert("content", "Content is required");
        } else if content.chars().count() < CONTENT_MIN_LEN {
            errors.insert(
                "content",
                format!("Content must be at least {CONTENT_MIN_LEN} characters long"),
            );
        }

        if let Some(image) = self.image.as_deref()
            && !image.is_empty()
            && Url::parse(image).is_err()
        {
            errors.insert("image", "Please enter a valid image URL");
        }

        errors.into_result()
    }
}

impl ProfileUpdate {
    /// Profile-form rules, applied to the fields the update sets:
    /// username at least 3 chars of letters, digits, or underscores; bio
    /// at most 500 chars.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if let Some(username) = self.username.as_deref() {
            if username.is_empty() {
                errors.insert("username", "Username is required");
            } else if username.chars().count() < USERNAME_MIN_LEN {
                errors.insert(
                    "username",
                    format!("Username must be at least {USERNAME_MIN_LEN} characters long"),
                );
            } else if !username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                errors.insert(
                    "username",
                    "Username can only contain letters, numbers, and underscores",
                );
            }
        }

        if let Some(bio) = self.bio.as_deref()
            && bio.chars().count() > BIO_MAX_LEN
        {
            errors.insert("bio", format!("Bio cannot exceed {BIO_MAX_LEN} characters"));
        }

        errors.into_result()
    }
}

impl RegisterRequest {
    /// Registration-form rules: everything required, email must look like
    /// an address.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        if self.username.trim().is_empty() {
            errors.insert("username", "Username is required");
        }
        if self.email.trim().is_empty() {
            errors.insert("email", "Email is required");
        } else if !looks_like_email(self.email.trim()) {
            errors.insert("email", "Please enter a valid email address");
        }
        if self.password.is_empty() {
            errors.insert("password", "Password is required");
        }

        errors.into_result()
    }
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
        None => false,
    }
}

/// Split a comma-separated tags input the way the authoring form does:
/// trimmed, empties dropped, order and duplicates preserved.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: content.to_string(),
            tags: vec![],
            image: None,
        }
    }

    #[test]
    fn post_draft_requires_title_and_content() {
        let errors = draft("", "").validate().unwrap_err();
        assert_eq!(errors.get("title"), Some("Title is required"));
        assert_eq!(errors.get("content"), Some("Content is required"));
    }

    #[test]
    fn short_title_and_content_are_rejected() {
        let errors = draft("ab", "too short").validate().unwrap_err();
        assert_eq!(
            errors.get("title"),
            Some("Title must be at least 3 characters long")
        );
        assert_eq!(
            errors.get("content"),
            Some("Content must be at least 50 characters long")
        );
    }

    #[test]
    fn long_enough_draft_passes() {
        let draft = draft("A real title", &"x".repeat(50));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn overlong_title_is_rejected() {
        let errors = draft(&"t".repeat(201), &"x".repeat(50))
            .validate()
            .unwrap_err();
        assert_eq!(errors.get("title"), Some("Title cannot exceed 200 characters"));
    }

    #[test]
    fn bad_image_url_is_rejected() {
        let mut d = draft("A real title", &"x".repeat(50));
        d.image = Some("not a url".to_string());
        let errors = d.validate().unwrap_err();
        assert_eq!(errors.get("image"), Some("Please enter a valid image URL"));

        d.image = Some("https://example.com/cover.jpg".to_string());
        assert!(d.validate().is_ok());
    }

    #[test]
    fn profile_username_charset_is_enforced() {
        let update = ProfileUpdate {
            username: Some("bad name!".to_string()),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Username can only contain letters, numbers, and underscores")
        );

        let update = ProfileUpdate {
            username: Some("alice_01".to_string()),
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn overlong_bio_is_rejected() {
        let update = ProfileUpdate {
            bio: Some("b".repeat(501)),
            ..Default::default()
        };
        let errors = update.validate().unwrap_err();
        assert_eq!(errors.get("bio"), Some("Bio cannot exceed 500 characters"));
    }

    #[test]
    fn register_rules() {
        let request = RegisterRequest {
            username: String::new(),
            email: "not-an-email".to_string(),
            password: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn tags_keep_order_and_duplicates() {
        assert_eq!(
            parse_tags(" rust , blog,,rust ,  "),
            vec!["rust", "blog", "rust"]
        );
        assert!(parse_tags("").is_empty());
    }
}
