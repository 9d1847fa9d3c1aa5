//! Driving port for course read operations and the course projections.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{PageRequest, Paginated};
use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseId, Error};

/// Reduced course projection returned by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: CourseId,
    pub title: String,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<u16>,
    pub category: Option<String>,
}

/// Full course projection; adds description and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: CourseId,
    pub title: String,
    pub is_required: bool,
    pub is_active: bool,
    pub validity_months: Option<u16>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl From<&Course> for CourseSummary {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_string(),
            is_required: course.is_required(),
            is_active: course.is_active(),
            validity_months: course.validity_months().map(|months| months.get()),
            category: course.category().map(str::to_owned),
        }
    }
}

impl From<&Course> for CourseDetail {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id(),
            title: course.title().to_string(),
            is_required: course.is_required(),
            is_active: course.is_active(),
            validity_months: course.validity_months().map(|months| months.get()),
            category: course.category().map(str::to_owned),
            description: course.description().map(str::to_owned),
            created_utc: course.created_at(),
        }
    }
}

/// Driving port for course reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CoursesQuery: Send + Sync {
    /// List courses ordered by title.
    async fn list_courses(&self, page: PageRequest) -> Result<Paginated<CourseSummary>, Error>;

    /// Fetch one course; `NotFound` when the id is unknown.
    async fn get_course(&self, id: CourseId) -> Result<CourseDetail, Error>;
}
