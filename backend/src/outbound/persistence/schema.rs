//! Diesel table definitions mirroring `backend/migrations`.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique, stored lowercased.
        email -> Varchar,
        /// Credential secret; never written by the API.
        password_hash -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Support tickets, one owner each.
    tickets (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// One of `iPhone`, `Macbook`, `iMac`, `iPad`, `Other`.
        product -> Varchar,
        description -> Text,
        /// One of `new`, `open`, `closed`.
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tickets -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(users, tickets);
