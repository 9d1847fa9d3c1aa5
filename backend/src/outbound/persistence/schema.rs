//! Diesel table definitions for the `training` schema.
//!
//! Must match `backend/migrations` exactly.

diesel::table! {
    /// Registered users. `email` is unique and uses the "C" collation.
    training.users (id) {
        id -> Uuid,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        is_active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Training courses. `title` is unique and uses the "C" collation.
    training.courses (id) {
        id -> Uuid,
        title -> Varchar,
        is_required -> Bool,
        is_active -> Bool,
        validity_months -> Nullable<Int2>,
        category -> Nullable<Varchar>,
        description -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (course, user) pair, enforced by a unique index.
    training.enrollments (id) {
        id -> Uuid,
        user_id -> Uuid,
        course_id -> Uuid,
        status -> Varchar,
        enrolled_at -> Timestamptz,
        completed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(enrollments -> users (user_id));
diesel::joinable!(enrollments -> courses (course_id));

diesel::allow_tables_to_appear_in_same_query!(users, courses, enrollments);
