//! Shared helpers for unit tests. Only compiled under `cfg(test)`.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    CourseDetails, CourseTitle, EmailAddress, PersonName, UserProfile, ValidityMonths,
};

/// Fixed instant used by service and adapter tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 9, 8, 15, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at a caller-supplied instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    pub utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub fn profile(email: &str, full_name: &str) -> UserProfile {
    UserProfile {
        email: EmailAddress::new(email).expect("fixture email"),
        name: PersonName::parse(full_name).expect("fixture name"),
        is_active: true,
    }
}

pub fn course_details(title: &str, is_required: bool) -> CourseDetails {
    CourseDetails {
        title: CourseTitle::new(title).expect("fixture title"),
        is_required,
        is_active: true,
        validity_months: Some(ValidityMonths::new(12).expect("fixture validity")),
        category: Some("Safety".to_owned()),
        description: None,
    }
}
