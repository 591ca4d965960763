//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations`; `diesel print-schema` regenerates them
//! from a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Personal notes; `slug` carries a unique index.
    notes (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        slug -> Varchar,
        author_id -> Uuid,
    }
}

diesel::table! {
    /// Public news items.
    news (id) {
        id -> Int8,
        title -> Varchar,
        text -> Text,
        date -> Timestamptz,
    }
}

diesel::table! {
    /// Comments on news items, deleted with their parent.
    comments (id) {
        id -> Int8,
        news_id -> Int8,
        author_id -> Uuid,
        text -> Text,
        created -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::joinable!(comments -> news (news_id));
diesel::joinable!(comments -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(users, notes, news, comments);
