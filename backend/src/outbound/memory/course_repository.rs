//! In-memory [`CourseRepository`].

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;

use crate::domain::ports::{CourseRepository, CourseRepositoryError};
use crate::domain::{Course, CourseId, CourseTitle, NewCourse};

use super::{lock, sorted_page};

/// Course store ordered by title on list.
pub struct MemoryCourseRepository {
    courses: Mutex<Vec<Course>>,
    clock: Arc<dyn Clock>,
}

impl MemoryCourseRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            courses: Mutex::new(Vec::new()),
            clock,
        }
    }

    fn courses(&self) -> Result<MutexGuard<'_, Vec<Course>>, CourseRepositoryError> {
        lock(&self.courses, "course", CourseRepositoryError::query)
    }
}

#[async_trait]
impl CourseRepository for MemoryCourseRepository {
    async fn list(&self, page: PageRequest) -> Result<(Vec<Course>, u64), CourseRepositoryError> {
        let courses = self.courses()?;
        Ok(sorted_page(&courses, page, |left, right| {
            left.title().cmp(right.title())
        }))
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CourseRepositoryError> {
        Ok(self
            .courses()?
            .iter()
            .find(|course| course.id() == *id)
            .cloned())
    }

    async fn create(&self, course: NewCourse) -> Result<Course, CourseRepositoryError> {
        let created = course.into_course(self.clock.utc());
        self.courses()?.push(created.clone());
        Ok(created)
    }

    async fn update(&self, course: &Course) -> Result<Option<Course>, CourseRepositoryError> {
        let mut courses = self.courses()?;
        let Some(stored) = courses.iter_mut().find(|stored| stored.id() == course.id()) else {
            return Ok(None);
        };
        *stored = course.clone();
        Ok(Some(course.clone()))
    }

    async fn delete(&self, id: &CourseId) -> Result<bool, CourseRepositoryError> {
        let mut courses = self.courses()?;
        let before = courses.len();
        courses.retain(|course| course.id() != *id);
        Ok(courses.len() != before)
    }

    async fn exists_by_title(
        &self,
        title: &CourseTitle,
        exclude: Option<CourseId>,
    ) -> Result<bool, CourseRepositoryError> {
        Ok(self
            .courses()?
            .iter()
            .any(|course| course.title() == title && Some(course.id()) != exclude))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::{course_details, fixture_clock};

    #[fixture]
    fn repo() -> MemoryCourseRepository {
        MemoryCourseRepository::new(fixture_clock())
    }

    #[rstest]
    #[tokio::test]
    async fn list_orders_by_title(repo: MemoryCourseRepository) {
        for title in ["Working at Height", "Electrical Compliance 101", "Leadership"] {
            repo.create(NewCourse::new(course_details(title, false)))
                .await
                .expect("create");
        }

        let (courses, total) = repo.list(PageRequest::default()).await.expect("list");
        let titles: Vec<_> = courses.iter().map(|course| course.title().to_string()).collect();
        assert_eq!(total, 3);
        assert_eq!(
            titles,
            ["Electrical Compliance 101", "Leadership", "Working at Height"]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn title_check_honours_exclusion(repo: MemoryCourseRepository) {
        let course = repo
            .create(NewCourse::new(course_details("Safety 101", true)))
            .await
            .expect("create");
        let title = CourseTitle::new("Safety 101").expect("title");

        assert!(repo.exists_by_title(&title, None).await.expect("check"));
        assert!(!repo
            .exists_by_title(&title, Some(course.id()))
            .await
            .expect("check"));
        let lower = CourseTitle::new("safety 101").expect("title");
        assert!(!repo.exists_by_title(&lower, None).await.expect("check"));
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_only_the_target(repo: MemoryCourseRepository) {
        let keep = repo
            .create(NewCourse::new(course_details("Keep", false)))
            .await
            .expect("create");
        let drop = repo
            .create(NewCourse::new(course_details("Drop", false)))
            .await
            .expect("create");

        assert!(repo.delete(&drop.id()).await.expect("delete"));
        assert!(!repo.delete(&drop.id()).await.expect("delete again"));
        assert!(repo.find_by_id(&keep.id()).await.expect("find").is_some());
    }
}
