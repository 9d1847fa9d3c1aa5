//! Demo records loaded into empty in-memory stores at start-up.

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{
    CourseDetails, CourseDetailsDraft, CourseValidationError, EmailAddress, NewCourse, NewUser,
    PersonName, UserProfile, UserValidationError,
};

const DEMO_USERS: [(&str, &str); 2] = [
    ("alice@example.com", "Alice Example"),
    ("bob@example.com", "Bob Example"),
];

struct DemoCourse {
    title: &'static str,
    is_required: bool,
    validity_months: Option<i64>,
    category: &'static str,
    description: &'static str,
}

const DEMO_COURSES: [DemoCourse; 3] = [
    DemoCourse {
        title: "Safety Orientation",
        is_required: true,
        validity_months: Some(12),
        category: "Safety",
        description: "Mandatory safety intro.",
    },
    DemoCourse {
        title: "Electrical Compliance 101",
        is_required: true,
        validity_months: Some(24),
        category: "Compliance",
        description: "Electrical standards overview.",
    },
    DemoCourse {
        title: "Leadership Essentials",
        is_required: false,
        validity_months: None,
        category: "Development",
        description: "Soft skills for team leads.",
    },
];

/// Failures while loading demo data.
#[derive(Debug, Error)]
pub enum DemoSeedError {
    #[error("invalid demo user: {0}")]
    InvalidUser(#[from] UserValidationError),
    #[error("invalid demo course: {0}")]
    InvalidCourse(#[from] CourseValidationError),
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
    #[error(transparent)]
    Courses(#[from] CourseRepositoryError),
}

fn demo_course_details(course: &DemoCourse) -> Result<CourseDetails, CourseValidationError> {
    CourseDetails::try_from(CourseDetailsDraft {
        title: course.title.to_owned(),
        is_required: course.is_required,
        is_active: true,
        validity_months: course.validity_months,
        category: Some(course.category.to_owned()),
        description: Some(course.description.to_owned()),
    })
}

/// Insert the demo users and courses.
///
/// # Errors
/// Returns [`DemoSeedError`] when a repository write fails.
pub async fn seed_demo_data(
    users: &dyn UserRepository,
    courses: &dyn CourseRepository,
) -> Result<(), DemoSeedError> {
    for (email, full_name) in DEMO_USERS {
        let profile = UserProfile {
            email: EmailAddress::new(email)?,
            name: PersonName::parse(full_name)?,
            is_active: true,
        };
        users.create(NewUser::new(profile)).await?;
    }
    for course in &DEMO_COURSES {
        courses
            .create(NewCourse::new(demo_course_details(course)?))
            .await?;
    }
    info!(
        users = DEMO_USERS.len(),
        courses = DEMO_COURSES.len(),
        "demo data seeded"
    );
    Ok(())
}
