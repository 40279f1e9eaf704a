//! Runs the SQL scripts in `dump/` against a connection. Used by the admin CLI.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};
use std::{fs, io, path::Path};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Cannot read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Splits a script into statements on `;`, dropping blanks and `--` comment lines.
pub fn split_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|chunk| {
            chunk
                .lines()
                .filter(|line| !line.trim_start().starts_with("--"))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string()
        })
        .filter(|statement| !statement.is_empty())
        .collect()
}

fn is_already_exists(err: &DbErr) -> bool {
    let message = err.to_string();
    // 42P04 duplicate_database, 42P07 duplicate_table
    message.contains("already exists") || message.contains("42P04") || message.contains("42P07")
}

/// Executes every statement in the file. Objects that already exist are skipped.
/// Returns the number of statements that were applied.
pub async fn execute_sql_file(
    db: &DatabaseConnection,
    file_path: impl AsRef<Path>,
) -> Result<usize, SeedError> {
    let path = file_path.as_ref();
    let sql = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let mut applied = 0;
    for statement in split_statements(&sql) {
        match db
            .execute(Statement::from_string(db.get_database_backend(), statement.clone()))
            .await
        {
            Ok(_) => applied += 1,
            Err(e) if is_already_exists(&e) => {
                log::info!(
                    "Object already exists, skipping: {}",
                    statement.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    log::info!("Applied {} statements from {}", applied, path.display());
    Ok(applied)
}
