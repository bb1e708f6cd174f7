//! Slot table queries: one serialized value per key.

use rusqlite::{params, Connection};

use crate::db::DatabaseError;

/// Get the raw value stored under `key`. Returns None if the slot is absent.
pub fn get_slot(conn: &Connection, key: &str) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT value FROM slots WHERE key = ?1")?;
    match stmt.query_row([key], |row| row.get::<_, String>(0)) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::from(e)),
    }
}

/// Overwrite the slot wholesale (upsert).
pub fn set_slot(conn: &Connection, key: &str, value: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO slots (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Delete the slot. Deleting an absent slot is not an error.
pub fn delete_slot(conn: &Connection, key: &str) -> Result<(), DatabaseError> {
    conn.execute("DELETE FROM slots WHERE key = ?1", [key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;

    #[test]
    fn absent_slot_reads_none() {
        let conn = open_memory_database().unwrap();
        assert_eq!(get_slot(&conn, "healcare_cart").unwrap(), None);
    }

    #[test]
    fn set_then_overwrite() {
        let conn = open_memory_database().unwrap();
        set_slot(&conn, "healcare_cart", "[]").unwrap();
        set_slot(&conn, "healcare_cart", "[{\"qty\":\"2\"}]").unwrap();
        assert_eq!(
            get_slot(&conn, "healcare_cart").unwrap().as_deref(),
            Some("[{\"qty\":\"2\"}]")
        );
        assert_eq!(get_slot(&conn, "healcare_history").unwrap(), None);
    }

    #[test]
    fn delete_is_idempotent() {
        let conn = open_memory_database().unwrap();
        set_slot(&conn, "healcare_history", "{}").unwrap();
        delete_slot(&conn, "healcare_history").unwrap();
        delete_slot(&conn, "healcare_history").unwrap();
        assert_eq!(get_slot(&conn, "healcare_history").unwrap(), None);
    }
}
