use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use url::Url;

use super::{MAX_FIELD_LEN, UserId, require_field};
use crate::error::DomainError;

pub type PostId = i32;

/// Long date format used when a post's creation date is displayed.
pub const DATE_FORMAT: &str = "%B %d, %Y";

/// BlogPost entity - an article authored by the administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: PostId,
    pub author_id: UserId,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
    pub created_on: NaiveDate,
}

impl BlogPost {
    /// Creation date rendered as e.g. `October 16, 2026`.
    pub fn display_date(&self) -> String {
        self.created_on.format(DATE_FORMAT).to_string()
    }
}

/// The editable content of a post. Every edit replaces all of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub img_url: String,
}

impl PostFields {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_field("Title", &self.title, Some(MAX_FIELD_LEN))?;
        require_field("Subtitle", &self.subtitle, Some(MAX_FIELD_LEN))?;
        require_field("Image URL", &self.img_url, Some(MAX_FIELD_LEN))?;
        require_field("Body", &self.body, None)?;

        if !is_http_url(&self.img_url) {
            return Err(DomainError::Validation(
                "Image URL must be an absolute http(s) URL".to_string(),
            ));
        }
        Ok(())
    }
}

/// A post waiting to be inserted.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: UserId,
    pub fields: PostFields,
    pub created_on: NaiveDate,
}

impl NewPost {
    /// Stamp the post with today's local date.
    pub fn new(author_id: UserId, fields: PostFields) -> Self {
        Self {
            author_id,
            fields,
            created_on: Local::now().date_naive(),
        }
    }
}

/// A full overwrite of a post, authored by `editor_id`.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub editor_id: UserId,
    pub fields: PostFields,
}

fn is_http_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match Url::parse(value) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> PostFields {
        PostFields {
            title: "The Life of Cactus".to_string(),
            subtitle: "Who knew that cacti lived such interesting lives.".to_string(),
            body: "<p>Nori grape silver beet broccoli kombu beet greens.</p>".to_string(),
            img_url: "https://images.unsplash.com/photo-1530482054429".to_string(),
        }
    }

    #[test]
    fn test_valid_fields() {
        assert!(fields().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut f = fields();
        f.subtitle = String::new();
        assert!(matches!(f.validate(), Err(DomainError::Validation(_))));

        let mut f = fields();
        f.body = "  ".to_string();
        assert!(matches!(f.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_image_url_must_be_http() {
        for bad in [
            "ftp://host/img.png",
            "images/cactus.png",
            "https://",
            "http:// spaced.com",
            "http://user@",
            "http://%%%/x",
            "http://exa<mple>.com/",
            "http://a:b:c/",
            "mailto:someone@example.com",
        ] {
            let mut f = fields();
            f.img_url = bad.to_string();
            assert!(f.validate().is_err(), "{bad} should be rejected");
        }

        let mut f = fields();
        f.img_url = "http://localhost:8080/img.png".to_string();
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_display_date() {
        let post = BlogPost {
            id: 1,
            author_id: 1,
            title: "t".to_string(),
            subtitle: "s".to_string(),
            body: "b".to_string(),
            img_url: "https://x.y".to_string(),
            created_on: NaiveDate::from_ymd_opt(2026, 10, 6).unwrap(),
        };
        assert_eq!(post.display_date(), "October 06, 2026");
    }

    #[test]
    fn test_new_post_is_stamped_today() {
        let post = NewPost::new(1, fields());
        assert_eq!(post.created_on, Local::now().date_naive());
    }
}
