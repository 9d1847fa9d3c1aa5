//! Course aggregate and its validated value types.

use chrono::{DateTime, Utc};

use super::CourseId;

/// Maximum number of characters in a course title.
pub const TITLE_MAX: usize = 200;
/// Maximum number of characters in a course category.
pub const CATEGORY_MAX: usize = 100;
/// Maximum number of characters in a course description.
pub const DESCRIPTION_MAX: usize = 2000;
/// Inclusive bounds of the validity period in months.
pub const VALIDITY_MONTHS_RANGE: std::ops::RangeInclusive<u16> = 1..=120;

/// Validation errors raised while building course value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("validity months must be between {min} and {max}")]
    ValidityOutOfRange { min: u16, max: u16 },
    #[error("category must be at most {max} characters")]
    CategoryTooLong { max: usize },
    #[error("description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
}

impl CourseValidationError {
    /// Request field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::ValidityOutOfRange { .. } => "validityMonths",
            Self::CategoryTooLong { .. } => "category",
            Self::DescriptionTooLong { .. } => "description",
        }
    }
}

/// Course title; unique across courses, compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseTitle(String);

impl CourseTitle {
    /// Validate and construct a title. Surrounding whitespace is removed.
    pub fn new(title: &str) -> Result<Self, CourseValidationError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(CourseValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(CourseValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Number of months a completed course stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidityMonths(u16);

impl ValidityMonths {
    pub fn new(months: i64) -> Result<Self, CourseValidationError> {
        u16::try_from(months)
            .ok()
            .filter(|value| VALIDITY_MONTHS_RANGE.contains(value))
            .map(Self)
            .ok_or(CourseValidationError::ValidityOutOfRange {
                min: *VALIDITY_MONTHS_RANGE.start(),
                max: *VALIDITY_MONTHS_RANGE.end(),
            })
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

fn bounded_text(
    value: Option<String>,
    max: usize,
    too_long: CourseValidationError,
) -> Result<Option<String>, CourseValidationError> {
    match value {
        Some(text) if text.chars().count() > max => Err(too_long),
        other => Ok(other),
    }
}

/// Mutable part of a course record; replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetails {
    pub title: CourseTitle,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<ValidityMonths>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Raw course fields as supplied by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDetailsDraft {
    pub title: String,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<i64>,
    pub category: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<CourseDetailsDraft> for CourseDetails {
    type Error = CourseValidationError;

    fn try_from(draft: CourseDetailsDraft) -> Result<Self, Self::Error> {
        let CourseDetailsDraft {
            title,
            is_required,
            is_active,
            validity_months,
            category,
            description,
        } = draft;
        Ok(Self {
            title: CourseTitle::new(&title)?,
            is_required,
            is_active,
            validity_months: validity_months.map(ValidityMonths::new).transpose()?,
            category: bounded_text(
                category,
                CATEGORY_MAX,
                CourseValidationError::CategoryTooLong { max: CATEGORY_MAX },
            )?,
            description: bounded_text(
                description,
                DESCRIPTION_MAX,
                CourseValidationError::DescriptionTooLong {
                    max: DESCRIPTION_MAX,
                },
            )?,
        })
    }
}

/// Training course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    details: CourseDetails,
    created_at: DateTime<Utc>,
}

impl Course {
    pub fn new(id: CourseId, details: CourseDetails, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            created_at,
        }
    }

    /// Replace the details, keeping identity and creation time.
    #[must_use]
    pub fn with_details(self, details: CourseDetails) -> Self {
        Self { details, ..self }
    }

    pub fn id(&self) -> CourseId {
        self.id
    }

    pub fn title(&self) -> &CourseTitle {
        &self.details.title
    }

    pub fn is_required(&self) -> bool {
        self.details.is_required
    }

    pub fn is_active(&self) -> bool {
        self.details.is_active
    }

    pub fn validity_months(&self) -> Option<ValidityMonths> {
        self.details.validity_months
    }

    pub fn category(&self) -> Option<&str> {
        self.details.category.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.details.description.as_deref()
    }

    pub fn details(&self) -> &CourseDetails {
        &self.details
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Course awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub id: Option<CourseId>,
    pub details: CourseDetails,
    pub created_at: Option<DateTime<Utc>>,
}

impl NewCourse {
    pub fn new(details: CourseDetails) -> Self {
        Self {
            id: None,
            details,
            created_at: None,
        }
    }

    /// Materialise the course, generating any missing identity or timestamp.
    pub fn into_course(self, now: DateTime<Utc>) -> Course {
        Course::new(
            self.id.unwrap_or_else(CourseId::random),
            self.details,
            self.created_at.unwrap_or(now),
        )
    }
}
