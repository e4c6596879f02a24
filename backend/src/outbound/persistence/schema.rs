//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. Regenerate
//! with `diesel print-schema` when migrations change.

diesel::table! {
    /// Barbershop client visit records.
    client (id) {
        /// Primary key, assigned by the database.
        id -> Int8,
        /// Client's full name.
        full_name -> Varchar,
        /// Visit date as entered, free-form text.
        visit_date -> Varchar,
        /// Service performed.
        service -> Varchar,
        /// Barber who served the visit.
        master_name -> Varchar,
    }
}

diesel::table! {
    /// Blog review posts.
    blog (post_id) {
        /// Primary key, assigned by the database.
        post_id -> Int8,
        /// Post title.
        post_name -> Varchar,
        /// Publish date as entered, free-form text.
        publish_date -> Varchar,
        /// Review body.
        text -> Text,
        /// Name of the client the review is about.
        client_name -> Varchar,
        /// Optional VK profile link.
        vk_link -> Nullable<Varchar>,
        /// Optional generic link.
        link -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Account credentials and roles.
    user_info (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Unique account name.
        name -> Varchar,
        /// Argon2id PHC password hash.
        password -> Varchar,
        /// Comma-separated role names.
        roles -> Varchar,
    }
}
