use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PostKind {
    Request,
    Offer,
}

impl PostKind {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Offer => "offer",
        }
    }
}

impl FromStr for PostKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "request" => Ok(Self::Request),
            "offer" => Ok(Self::Offer),
            _ => Err(DomainError::Validation {
                field: "type",
                message: "must be either 'request' or 'offer'",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Category {
    Coding,
    Math,
    Science,
    #[default]
    Other,
}

impl Category {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Coding => "coding",
            Self::Math => "math",
            Self::Science => "science",
            Self::Other => "other",
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "coding" => Ok(Self::Coding),
            "math" => Ok(Self::Math),
            "science" => Ok(Self::Science),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::Validation {
                field: "category",
                message: "must be one of 'coding', 'math', 'science', 'other'",
            }),
        }
    }
}

/// Card background assigned once when a post is created.
///
/// Rendered as `hsl(H, S%, L%)` with the hue anywhere on the wheel and both
/// saturation and lightness pinned to `95..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PastelColor {
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl PastelColor {
    pub(crate) const BAND_MIN: u8 = 95;
    pub(crate) const BAND_MAX: u8 = 100;

    pub(crate) fn new(hue: u16, saturation: u8, lightness: u8) -> Result<Self, DomainError> {
        if hue >= 360 {
            return Err(DomainError::Validation {
                field: "color",
                message: "hue must be 0..360",
            });
        }
        let band = Self::BAND_MIN..=Self::BAND_MAX;
        if !band.contains(&saturation) || !band.contains(&lightness) {
            return Err(DomainError::Validation {
                field: "color",
                message: "saturation and lightness must be 95..=100",
            });
        }
        Ok(Self {
            hue,
            saturation,
            lightness,
        })
    }

    pub(crate) fn random() -> Self {
        Self {
            hue: rand::random_range(0..360),
            saturation: rand::random_range(Self::BAND_MIN..=Self::BAND_MAX),
            lightness: rand::random_range(Self::BAND_MIN..=Self::BAND_MAX),
        }
    }
}

impl fmt::Display for PastelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({}, {}%, {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

impl FromStr for PastelColor {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = DomainError::Validation {
            field: "color",
            message: "must look like 'hsl(H, S%, L%)'",
        };

        let Some(inner) = value
            .trim()
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Err(malformed);
        };

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let [hue, saturation, lightness] = parts.as_slice() else {
            return Err(malformed);
        };

        let hue = hue.parse::<u16>().ok();
        let saturation = saturation
            .strip_suffix('%')
            .and_then(|s| s.parse::<u8>().ok());
        let lightness = lightness
            .strip_suffix('%')
            .and_then(|l| l.parse::<u8>().ok());

        match (hue, saturation, lightness) {
            (Some(h), Some(s), Some(l)) => Self::new(h, s, l),
            _ => Err(malformed),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) kind: PostKind,
    pub(crate) category: Category,
    pub(crate) description: String,
    pub(crate) color: PastelColor,
    pub(crate) created_at: DateTime<Utc>,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        draft: PostDraft,
        color: PastelColor,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0",
            });
        }

        Ok(Self {
            id,
            title: draft.title,
            kind: draft.kind,
            category: draft.category,
            description: draft.description,
            color,
            created_at,
        })
    }

    /// Replaces the editable fields. `id`, `color` and `created_at` are untouched.
    pub(crate) fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.kind = draft.kind;
        self.category = draft.category;
        self.description = draft.description;
    }
}

/// Raw create/update payload as it arrives from a client.
#[derive(Debug, Clone, Default)]
pub(crate) struct PostInput {
    pub(crate) title: Option<String>,
    pub(crate) kind: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) description: Option<String>,
}

/// Editable fields of a post after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostDraft {
    pub(crate) title: String,
    pub(crate) kind: PostKind,
    pub(crate) category: Category,
    pub(crate) description: String,
}

impl PostInput {
    pub(crate) fn validate(self) -> Result<PostDraft, DomainError> {
        let title = normalize_title(self.title.as_deref())?;

        let kind = match self.kind.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(DomainError::Validation {
                    field: "type",
                    message: "a post must be either a request or an offer",
                });
            }
            Some(raw) => raw.parse::<PostKind>()?,
        };

        let category = match self.category.as_deref() {
            None => Category::default(),
            Some(raw) => raw.trim().parse::<Category>()?,
        };

        let description = normalize_description(self.description.as_deref())?;

        Ok(PostDraft {
            title,
            kind,
            category,
            description,
        })
    }
}

fn normalize_title(title: Option<&str>) -> Result<String, DomainError> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.is_empty() {
        return Err(DomainError::Validation {
            field: "title",
            message: "a post must have a title",
        });
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "title cannot be more than 100 characters",
        });
    }
    Ok(title.to_string())
}

fn normalize_description(description: Option<&str>) -> Result<String, DomainError> {
    let description = description.map(str::trim).unwrap_or_default();
    if description.is_empty() {
        return Err(DomainError::Validation {
            field: "description",
            message: "a post must have a description",
        });
    }
    Ok(description.to_string())
}
