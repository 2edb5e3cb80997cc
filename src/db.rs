use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use sqlx::postgres::PgPoolOptions;
use tokio::fs;

pub type DbPool = sqlx::PgPool;
pub type OrmConn = DatabaseConnection;

pub const MIGRATIONS_DIR: &str = "migrations";
const MAX_CONNECTIONS: u32 = 10;

/// Raw sqlx pool, used for the key-value store and the audit trail.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(database_url)
        .await
        .context("connecting sqlx pool")?;
    Ok(pool)
}

pub async fn create_orm_conn(database_url: &str) -> Result<OrmConn> {
    Database::connect(database_url)
        .await
        .context("connecting sea-orm")
}

/// Applies every `*.sql` file under `migrations/` in filename order.
/// The files only use `IF NOT EXISTS` DDL so re-running is a no-op.
pub async fn run_migrations(conn: &OrmConn) -> Result<()> {
    let backend = conn.get_database_backend();
    for file in migration_files(Path::new(MIGRATIONS_DIR)).await? {
        let sql = fs::read_to_string(&file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        let mut applied = 0usize;
        for statement in statements(&sql) {
            conn.execute(Statement::from_string(backend, statement))
                .await
                .with_context(|| format!("applying {}", file.display()))?;
            applied += 1;
        }
        tracing::debug!(file = %file.display(), statements = applied, "migration applied");
    }
    Ok(())
}

async fn migration_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .await
        .with_context(|| format!("listing {}", dir.display()))?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "sql") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// Postgres prepared statements take one command each.
fn statements(sql: &str) -> impl Iterator<Item = String> + '_ {
    sql.split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(|stmt| format!("{stmt};"))
}

#[cfg(test)]
mod tests {
    use super::statements;

    #[test]
    fn splits_and_drops_blank_statements() {
        let sql = "CREATE TABLE a (id INT);\n\n  CREATE INDEX b ON a (id);\n;\n";
        let parsed: Vec<String> = statements(sql).collect();
        assert_eq!(
            parsed,
            vec!["CREATE TABLE a (id INT);", "CREATE INDEX b ON a (id);"]
        );
    }
}
