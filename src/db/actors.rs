use crate::errors::{AppError, AppResult};
use crate::models::actor::{Actor, Role};
use crate::utils::time::to_store;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

pub fn map_row(row: &Row) -> Result<Actor> {
    let role_str: String = row.get("role")?;
    let role = Role::from_db_str(&role_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidRole(role_str)),
        )
    })?;

    Ok(Actor {
        id: row.get("id")?,
        name: row.get("name")?,
        role,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_actor(conn: &Connection, name: &str, role: Role) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO actors (name, role, created_at) VALUES (?1, ?2, ?3)",
        params![name, role.to_db_str(), to_store(Utc::now())],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn load_actor(conn: &Connection, id: i64) -> AppResult<Actor> {
    let mut stmt = conn.prepare("SELECT * FROM actors WHERE id = ?1")?;
    stmt.query_row([id], map_row)
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("actor {}", id)))
}

pub fn list_actors(conn: &Connection) -> AppResult<Vec<Actor>> {
    let mut stmt = conn.prepare("SELECT * FROM actors ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
