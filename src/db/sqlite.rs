use crate::db::models::{NewStudent, StudentRecord};
use crate::db::repository::StudentRepository;
use crate::db::schema::SQLITE_INIT;
use crate::error::RegistryError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use std::str::FromStr;
use tracing::debug;

/// Guarded insert: a single statement, so the name check and the append are atomic.
const INSERT_IF_ABSENT: &str = r#"
    INSERT INTO Student_Data (
        firstname, lastname, title, age, nationality,
        registration_status, num_courses, num_semesters
    )
    SELECT ?, ?, ?, ?, ?, ?, ?, ?
    WHERE NOT EXISTS (
        SELECT 1 FROM Student_Data WHERE firstname = ? AND lastname = ?
    )
"#;

/// SQLite-backed record store.
///
/// Holds connection options only: every operation opens its own connection and
/// closes it before returning, on success and on failure.
#[derive(Clone, Debug)]
pub struct StudentStore {
    options: SqliteConnectOptions,
}

impl StudentStore {
    pub fn new(options: SqliteConnectOptions) -> Self {
        Self { options }
    }

    /// Build a store from a `sqlite:` URL, creating the database file on first use.
    pub fn from_url(database_url: &str) -> Result<Self, RegistryError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        Ok(Self::new(options))
    }

    /// Initialize the schema by executing the bundled DDL. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), RegistryError> {
        let mut conn = self.connect().await?;
        let result = Self::run_init(&mut conn).await;
        Self::release(conn, result).await
    }

    async fn run_init(conn: &mut SqliteConnection) -> Result<(), RegistryError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&mut *conn).await?;
        }
        Ok(())
    }

    async fn connect(&self) -> Result<SqliteConnection, RegistryError> {
        Ok(self.options.connect().await?)
    }

    /// Close `conn`, then hand back `result`. An operation error wins over a close error.
    async fn release<T>(
        conn: SqliteConnection,
        result: Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let closed = conn.close().await;
        let value = result?;
        closed?;
        Ok(value)
    }

    async fn count_by_name(
        conn: &mut SqliteConnection,
        first_name: &str,
        last_name: &str,
    ) -> Result<i64, RegistryError> {
        let rec: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM Student_Data WHERE firstname = ? AND lastname = ?")
                .bind(first_name)
                .bind(last_name)
                .fetch_one(&mut *conn)
                .await?;
        Ok(rec.0)
    }

    async fn insert_if_absent(
        conn: &mut SqliteConnection,
        student: &NewStudent,
    ) -> Result<i64, RegistryError> {
        let result = sqlx::query(INSERT_IF_ABSENT)
            .bind(student.first_name.as_str())
            .bind(student.last_name.as_str())
            .bind(student.title.as_str())
            .bind(student.age)
            .bind(student.nationality.as_str())
            .bind(student.registration_status.as_str())
            .bind(student.num_courses)
            .bind(student.num_semesters)
            .bind(student.first_name.as_str())
            .bind(student.last_name.as_str())
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RegistryError::Duplicate {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
            });
        }
        Ok(result.last_insert_rowid())
    }

    async fn select_all(conn: &mut SqliteConnection) -> Result<Vec<StudentRecord>, RegistryError> {
        let rows = sqlx::query_as::<_, StudentRecord>(
            r#"SELECT id, firstname, lastname, title, age, nationality,
               registration_status, num_courses, num_semesters
               FROM Student_Data ORDER BY id"#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }
}

impl StudentRepository for StudentStore {
    async fn exists(&self, first_name: &str, last_name: &str) -> Result<bool, RegistryError> {
        let mut conn = self.connect().await?;
        let result = Self::count_by_name(&mut conn, first_name, last_name).await;
        let count = Self::release(conn, result).await?;
        Ok(count > 0)
    }

    async fn insert(&self, student: NewStudent) -> Result<i64, RegistryError> {
        let mut conn = self.connect().await?;
        let result = Self::insert_if_absent(&mut conn, &student).await;
        let id = Self::release(conn, result).await?;
        debug!(id, "student row inserted");
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<StudentRecord>, RegistryError> {
        let mut conn = self.connect().await?;
        let result = Self::select_all(&mut conn).await;
        Self::release(conn, result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::form::RegistrationStatus;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDb {
        path: PathBuf,
        store: StudentStore,
    }

    impl Drop for TempDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn temp_db(tag: &str) -> TempDb {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "student-registry-{tag}-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        let store = StudentStore::from_url(&format!("sqlite:{}", path.display()))
            .expect("valid sqlite url");
        TempDb { path, store }
    }

    fn student(first: &str, last: &str) -> NewStudent {
        NewStudent {
            first_name: first.to_string(),
            last_name: last.to_string(),
            title: "Ms.".to_string(),
            age: 22,
            nationality: "South America".to_string(),
            registration_status: RegistrationStatus::Registered,
            num_courses: 5,
            num_semesters: 3,
        }
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let db = temp_db("schema");
        db.store.ensure_schema().await.unwrap();
        db.store.ensure_schema().await.unwrap();
        assert!(db.store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_exists_sees_them() {
        let db = temp_db("insert");
        db.store.ensure_schema().await.unwrap();

        assert!(!db.store.exists("Ana", "Lopez").await.unwrap());
        let first = db.store.insert(student("Ana", "Lopez")).await.unwrap();
        let second = db.store.insert(student("Ben", "Okafor")).await.unwrap();
        assert_eq!(first, 1);
        assert!(second > first);
        assert!(db.store.exists("Ana", "Lopez").await.unwrap());

        let rows = db.store.list_all().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], student("Ana", "Lopez").into_record(first));
        assert_eq!(rows[1].id, second);
    }

    #[tokio::test]
    async fn name_match_is_exact_and_case_sensitive() {
        let db = temp_db("case");
        db.store.ensure_schema().await.unwrap();
        db.store.insert(student("Ana", "Lopez")).await.unwrap();

        assert!(!db.store.exists("ana", "Lopez").await.unwrap());
        assert!(!db.store.exists("Ana", "Lopez ").await.unwrap());
        assert!(!db.store.exists("Ana", "Smith").await.unwrap());
    }

    #[tokio::test]
    async fn guarded_insert_rejects_existing_pair() {
        let db = temp_db("guard");
        db.store.ensure_schema().await.unwrap();
        db.store.insert(student("Ana", "Lopez")).await.unwrap();

        let err = db.store.insert(student("Ana", "Lopez")).await.unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
        assert_eq!(db.store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn operations_fail_without_schema() {
        let db = temp_db("noschema");
        let err = db.store.exists("Ana", "Lopez").await.unwrap_err();
        assert!(matches!(err, RegistryError::Database(_)));
    }
}
