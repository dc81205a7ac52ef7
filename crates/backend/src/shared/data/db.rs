use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

/// Rows per multi-row INSERT; keeps bound variables below SQLite's limit
pub const INSERT_CHUNK_ROWS: usize = 100;

const CREATE_CATEGORY_TABLE: &str = r#"
    CREATE TABLE a001_category (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
"#;

const CREATE_PRODUCT_TABLE: &str = r#"
    CREATE TABLE a002_product (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        specs TEXT NOT NULL DEFAULT '',
        price TEXT,
        condition TEXT NOT NULL DEFAULT 'new',
        category_id TEXT,
        image_url TEXT,
        created_at TEXT NOT NULL
    );
"#;

const CREATE_PRODUCT_CREATED_AT_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_a002_product_created_at
        ON a002_product (created_at DESC);
"#;

pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/catalog.db");
    let conn = open_database(std::path::Path::new(db_file)).await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

/// Connects to the SQLite file (created when missing) and ensures the schema
pub async fn open_database(db_file: &std::path::Path) -> anyhow::Result<DatabaseConnection> {
    if let Some(parent) = db_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if db_file.is_absolute() {
        db_file.to_path_buf()
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    ensure_table(&conn, "a001_category", CREATE_CATEGORY_TABLE).await?;
    ensure_table(&conn, "a002_product", CREATE_PRODUCT_TABLE).await?;
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        CREATE_PRODUCT_CREATED_AT_INDEX.to_string(),
    ))
    .await?;

    Ok(conn)
}

/// Creates `table` with `create_sql` unless sqlite_master already lists it
async fn ensure_table(
    conn: &DatabaseConnection,
    table: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let existing = conn
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type='table' AND name = ?;",
            [table.into()],
        ))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", table);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    } else {
        tracing::debug!("Table {} already exists", table);
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}
