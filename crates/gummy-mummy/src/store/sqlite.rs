use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{ArchiveEntry, ClientRepository, StoreError, SubmissionArchive};
use crate::profile::{BabyGender, ClientId, ClientProfile, MaritalStatus, NewClient};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT,
    age INTEGER,
    marital_status TEXT,
    phone TEXT,
    email TEXT,
    is_first_child INTEGER NOT NULL DEFAULT 0,
    is_breastfeeding INTEGER NOT NULL DEFAULT 0,
    baby_age_months INTEGER,
    baby_gender TEXT,
    created_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS sections (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL,
    section_name TEXT NOT NULL,
    payload TEXT NOT NULL,
    result TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    FOREIGN KEY(client_id) REFERENCES clients(id)
);
";

/// SQLite-backed registry and archive. The connection sits behind a mutex;
/// every request performs a single short statement, so contention is not a
/// concern at this scale.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl ClientRepository for SqliteStore {
    fn insert(&self, client: &NewClient) -> Result<ClientProfile, StoreError> {
        let created_at = Utc::now();
        let conn = self.conn.lock().expect("sqlite mutex poisoned");

        conn.execute(
            "INSERT INTO clients (name, age, marital_status, phone, email, is_first_child,
                                  is_breastfeeding, baby_age_months, baby_gender, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                client.name,
                client.age,
                client.marital_status.map(|s| s.label()),
                client.phone,
                client.email,
                client.is_first_child.unwrap_or(false) as i64,
                client.is_breastfeeding.unwrap_or(false) as i64,
                client.baby_age_months,
                client.baby_gender.map(|g| g.label()),
                created_at.to_rfc3339(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        Ok(ClientProfile {
            id,
            name: client.name.clone(),
            age: client.age,
            marital_status: client.marital_status,
            phone: client.phone.clone(),
            email: client.email.clone(),
            is_first_child: client.is_first_child.unwrap_or(false),
            is_breastfeeding: client.is_breastfeeding.unwrap_or(false),
            baby_age_months: client.baby_age_months,
            baby_gender: client.baby_gender,
            created_at,
        })
    }

    fn fetch(&self, id: ClientId) -> Result<Option<ClientProfile>, StoreError> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        let row = conn
            .query_row(
                "SELECT id, name, age, marital_status, phone, email, is_first_child,
                        is_breastfeeding, baby_age_months, baby_gender, created_at
                 FROM clients WHERE id = ?1",
                params![id],
                profile_from_row,
            )
            .optional()?;

        row.transpose()
    }
}

impl SubmissionArchive for SqliteStore {
    fn append(&self, entry: ArchiveEntry) -> Result<(), StoreError> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT INTO sections (client_id, section_name, payload, result, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.client_id,
                entry.section,
                entry.payload.to_string(),
                entry.result.to_string(),
                entry.recorded_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn history(&self, client_id: ClientId) -> Result<Vec<ArchiveEntry>, StoreError> {
        let conn = self.conn.lock().expect("sqlite mutex poisoned");
        let mut statement = conn.prepare(
            "SELECT client_id, section_name, payload, result, timestamp
             FROM sections WHERE client_id = ?1 ORDER BY id",
        )?;

        let rows = statement.query_map(params![client_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (client_id, section, payload, result, timestamp) = row?;
            entries.push(ArchiveEntry {
                client_id,
                section,
                payload: parse_json(&payload)?,
                result: parse_json(&result)?,
                recorded_at: parse_timestamp(&timestamp)?,
            });
        }
        Ok(entries)
    }
}

fn profile_from_row(row: &Row<'_>) -> rusqlite::Result<Result<ClientProfile, StoreError>> {
    let marital: Option<String> = row.get(3)?;
    let gender: Option<String> = row.get(9)?;
    let created_at: String = row.get(10)?;

    let profile = (|| -> Result<ClientProfile, StoreError> {
        Ok(ClientProfile {
            id: row.get(0)?,
            name: row.get(1)?,
            age: row.get(2)?,
            marital_status: marital
                .as_deref()
                .map(|label| {
                    MaritalStatus::from_label(label).ok_or_else(|| {
                        StoreError::Corrupt(format!("unknown marital status '{label}'"))
                    })
                })
                .transpose()?,
            phone: row.get(4)?,
            email: row.get(5)?,
            is_first_child: row.get::<_, i64>(6)? != 0,
            is_breastfeeding: row.get::<_, i64>(7)? != 0,
            baby_age_months: row.get(8)?,
            baby_gender: gender
                .as_deref()
                .map(|label| {
                    BabyGender::from_label(label).ok_or_else(|| {
                        StoreError::Corrupt(format!("unknown baby gender '{label}'"))
                    })
                })
                .transpose()?,
            created_at: parse_timestamp(&created_at)?,
        })
    })();

    Ok(profile)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt(format!("bad timestamp '{raw}': {err}")))
}

fn parse_json(raw: &str) -> Result<serde_json::Value, StoreError> {
    serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(format!("bad json blob: {err}")))
}
