use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, SqlxPostgresConnector, Statement};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;
use tokio::fs;

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

/// Create the shared Postgres pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Wrap an existing pool in a SeaORM connection so both layers share connections.
pub fn orm_from_pool(pool: DbPool) -> OrmConn {
    SqlxPostgresConnector::from_sqlx_postgres_pool(pool)
}

/// Minimal migration runner that executes SQL files in `migrations/` in filename order.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    let mut entries = fs::read_dir("migrations").await?;
    let mut files: Vec<PathBuf> = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();

    for file in files {
        let sql = fs::read_to_string(&file).await?;
        execute_script(conn, &sql).await?;
    }

    Ok(())
}

/// Run a multi-statement SQL script one statement at a time.
pub async fn execute_script<C: ConnectionTrait>(conn: &C, sql: &str) -> Result<(), sea_orm::DbErr> {
    // Postgres prepared statements cannot contain multiple commands.
    let backend = conn.get_database_backend();
    for stmt in split_statements(sql) {
        conn.execute(Statement::from_string(backend, stmt)).await?;
    }
    Ok(())
}

fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| format!("{stmt};"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_statements_skips_blank_fragments() {
        let stmts = split_statements("CREATE TABLE a (id INT);\n\n  ;DROP TABLE b;  ");
        assert_eq!(stmts, vec!["CREATE TABLE a (id INT);", "DROP TABLE b;"]);
    }

    #[test]
    fn bundled_schema_creates_every_table() {
        let schema = include_str!("../migrations/20241101000000_init.sql");
        let stmts = split_statements(schema);
        let creates = stmts.iter().filter(|s| s.starts_with("CREATE TABLE")).count();
        assert_eq!(creates, 15);
    }
}
