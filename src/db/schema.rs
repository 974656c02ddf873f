//! SQL DDL for initializing the student record storage.

/// SQLite schema with:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT (ids are never reused)
/// - `firstname` / `lastname` NOT NULL, everything else nullable
/// - a non-unique index on the natural key to back the duplicate lookup
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS Student_Data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    firstname TEXT NOT NULL,
    lastname TEXT NOT NULL,
    title TEXT,
    age INTEGER,
    nationality TEXT,
    registration_status TEXT, -- 'Registered' | 'Not Registered'
    num_courses INTEGER,
    num_semesters INTEGER
);

CREATE INDEX IF NOT EXISTS idx_student_data_name ON Student_Data(firstname, lastname);
"#;
