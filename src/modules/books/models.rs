use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use shelfmark_store::Document;

use crate::error::{CatalogError, FieldError};
use crate::modules::reviews::models::Review;
use crate::ratings;

/// A cataloged book.
///
/// `owner_id` and `owner_name` are fixed at creation from the acting
/// identity and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub description: String,
    pub image_url: String,
    pub owner_id: String,
    pub owner_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Document for Book {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Request payload for creating a book. Everything is optional at the wire
/// level; validation reports each missing field by name.
#[derive(Debug, Default, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Validated, trimmed field set ready to be stamped into a [`Book`].
#[derive(Debug)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: i32,
    pub description: String,
    pub image_url: Option<String>,
}

impl NewBook {
    /// Validate required fields. Title, author, and genre are stored
    /// trimmed; the description keeps its spacing but must not be blank.
    pub fn into_draft(self) -> Result<BookDraft, CatalogError> {
        let title = non_blank(self.title);
        let author = non_blank(self.author);
        let genre = non_blank(self.genre);
        let description = self.description.filter(|d| !d.trim().is_empty());

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push(FieldError::required("title"));
        }
        if author.is_none() {
            missing.push(FieldError::required("author"));
        }
        if genre.is_none() {
            missing.push(FieldError::required("genre"));
        }
        if self.year.is_none() {
            missing.push(FieldError::required("year"));
        }
        if description.is_none() {
            missing.push(FieldError::required("description"));
        }

        match (title, author, genre, self.year, description) {
            (Some(title), Some(author), Some(genre), Some(year), Some(description)) => {
                Ok(BookDraft {
                    title,
                    author,
                    genre,
                    year,
                    description,
                    image_url: non_blank(self.image_url),
                })
            }
            _ => Err(CatalogError::validation(
                "title, author, genre, year and description are required",
                missing,
            )),
        }
    }
}

/// Partial update for a book. A present field overwrites, an absent field
/// keeps the prior value; present-but-blank text is rejected outright rather
/// than silently ignored.
#[derive(Debug, Default, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl BookPatch {
    pub fn validate(&self) -> Result<(), CatalogError> {
        let provided = [
            ("title", &self.title),
            ("author", &self.author),
            ("genre", &self.genre),
            ("description", &self.description),
            ("image_url", &self.image_url),
        ];

        let blank: Vec<FieldError> = provided
            .into_iter()
            .filter(|(_, value)| matches!(value, Some(v) if v.trim().is_empty()))
            .map(|(field, _)| FieldError::new(field, "must not be blank"))
            .collect();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::validation(
                "provided fields must not be blank",
                blank,
            ))
        }
    }

    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title.trim().to_string();
        }
        if let Some(author) = self.author {
            book.author = author.trim().to_string();
        }
        if let Some(genre) = self.genre {
            book.genre = genre.trim().to_string();
        }
        if let Some(year) = self.year {
            book.year = year;
        }
        if let Some(description) = self.description {
            book.description = description;
        }
        if let Some(image_url) = self.image_url {
            book.image_url = image_url.trim().to_string();
        }
    }
}

/// Book enriched with its rating aggregate, for list responses.
#[derive(Debug, Clone, Serialize)]
pub struct RatedBook {
    #[serde(flatten)]
    pub book: Book,
    pub average_rating: f64,
    pub review_count: usize,
}

impl RatedBook {
    pub fn new(book: Book, reviews: &[Review]) -> Self {
        Self {
            average_rating: ratings::average_rating(reviews),
            review_count: reviews.len(),
            book,
        }
    }
}

/// Book detail: the aggregate plus the full review list, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub average_rating: f64,
    pub reviews: Vec<Review>,
}

impl BookDetail {
    pub fn new(book: Book, reviews: Vec<Review>) -> Self {
        Self {
            average_rating: ratings::average_rating(&reviews),
            book,
            reviews,
        }
    }
}

/// One page of the catalog listing.
#[derive(Debug, Serialize)]
pub struct BookPage {
    pub books: Vec<RatedBook>,
    pub total_pages: u64,
    pub current_page: u64,
    pub total: u64,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> NewBook {
        NewBook {
            title: Some("  The Dispossessed ".to_string()),
            author: Some("Ursula K. Le Guin".to_string()),
            genre: Some("Science Fiction".to_string()),
            year: Some(1974),
            description: Some("An ambiguous utopia.".to_string()),
            image_url: None,
        }
    }

    #[test]
    fn draft_trims_text_fields() {
        let draft = full_request().into_draft().unwrap();
        assert_eq!(draft.title, "The Dispossessed");
        assert!(draft.image_url.is_none());
    }

    #[test]
    fn draft_reports_every_missing_field() {
        let err = NewBook::default().into_draft().unwrap_err();
        match err {
            CatalogError::Validation { details, .. } => {
                let fields: Vec<_> = details.iter().map(|d| d.field).collect();
                assert_eq!(
                    fields,
                    ["title", "author", "genre", "year", "description"]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn blank_title_counts_as_missing() {
        let request = NewBook {
            title: Some("   ".to_string()),
            ..full_request()
        };
        assert!(request.into_draft().is_err());
    }

    #[test]
    fn patch_rejects_blank_provided_fields() {
        let patch = BookPatch {
            title: Some(" ".to_string()),
            ..BookPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn patch_overwrites_only_present_fields() {
        let draft = full_request().into_draft().unwrap();
        let mut book = Book {
            id: "b1".to_string(),
            title: draft.title,
            author: draft.author,
            genre: draft.genre,
            year: draft.year,
            description: draft.description,
            image_url: "http://example.test/cover.png".to_string(),
            owner_id: "user-1".to_string(),
            owner_name: "ada".to_string(),
            created_at: shelfmark_store::now(),
        };

        let patch = BookPatch {
            title: Some("The Left Hand of Darkness".to_string()),
            year: Some(1969),
            ..BookPatch::default()
        };
        patch.apply(&mut book);

        assert_eq!(book.title, "The Left Hand of Darkness");
        assert_eq!(book.year, 1969);
        assert_eq!(book.author, "Ursula K. Le Guin");
        assert_eq!(book.genre, "Science Fiction");
    }
}
