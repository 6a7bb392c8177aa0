//! Diesel table definitions. Keep in step with `backend/migrations`.

diesel::table! {
    /// Credential records keyed by unique name.
    users (name) {
        name -> Varchar,
        /// bcrypt hash in modular crypt format.
        password_hash -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Book records; `title` carries the `books_title_key` unique constraint.
    books (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        author -> Varchar,
        year -> Int4,
        /// Insertion time, used for listing order.
        created_at -> Timestamptz,
    }
}
