//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly; regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Article groupings.
    categories (id) {
        id -> Int8,
        /// Display name, at most 50 characters.
        #[max_length = 50]
        nom -> Varchar,
    }
}

diesel::table! {
    /// Catalogue items.
    articles (id) {
        id -> Int8,
        /// Name, 5 to 50 characters (checked by the table).
        #[max_length = 255]
        nom -> Varchar,
        /// Non-zero price with two fractional digits.
        prix -> Numeric,
        /// Owning category; cleared when the category is deleted.
        category_id -> Nullable<Int8>,
    }
}

diesel::joinable!(articles -> categories (category_id));
diesel::allow_tables_to_appear_in_same_query!(articles, categories);
