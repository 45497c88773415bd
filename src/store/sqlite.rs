use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::FormError;
use crate::form::types::{Form, FormPayload, OrderedField};
use crate::session::Session;
use crate::submission::types::{ResponseItem, Submission, SubmissionPayload};

use super::FormBackend;

const SHARE_SLUG_LEN: usize = 12;

/// Local, single-file store with the same contract as the HTTP API.
pub struct SqliteBackend {
    conn: Connection,
}

struct FormRow {
    id: String,
    title: String,
    unique_url: String,
    fields_json: String,
    created_at: String,
}

impl FormRow {
    fn into_form(self) -> Result<Form, FormError> {
        let fields: Vec<OrderedField> = serde_json::from_str(&self.fields_json)?;
        Ok(Form {
            id: self.id,
            title: self.title,
            unique_url: self.unique_url,
            fields,
            created_at: Some(parse_timestamp(&self.created_at)?),
        })
    }
}

const FORM_COLUMNS: &str = "id, title, unique_url, fields_json, created_at";

fn form_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<FormRow> {
    Ok(FormRow {
        id: row.get(0)?,
        title: row.get(1)?,
        unique_url: row.get(2)?,
        fields_json: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn now_string() -> String {
    Utc::now().to_rfc3339()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, FormError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| FormError::Validation(format!("Invalid timestamp '{raw}': {e}")))
}

fn init_schema(conn: &Connection) -> Result<(), FormError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS forms (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            title TEXT NOT NULL,
            unique_url TEXT NOT NULL UNIQUE,
            fields_json TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_forms_owner ON forms(owner_id);
        CREATE TABLE IF NOT EXISTS submissions (
            id TEXT PRIMARY KEY,
            form_id TEXT NOT NULL,
            responses_json TEXT NOT NULL,
            submitted_at TEXT NOT NULL,
            FOREIGN KEY(form_id) REFERENCES forms(id)
        );
        CREATE INDEX IF NOT EXISTS idx_submissions_form ON submissions(form_id);",
    )?;
    Ok(())
}

impl SqliteBackend {
    pub fn open(path: &Path) -> Result<Self, FormError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, FormError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, FormError> {
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn owned_form(&self, owner_id: &str, form_id: &str) -> Result<Form, FormError> {
        let sql = format!("SELECT {FORM_COLUMNS} FROM forms WHERE id = ?1 AND owner_id = ?2");
        self.conn
            .query_row(&sql, params![form_id, owner_id], form_row)
            .optional()?
            .ok_or_else(|| FormError::NotFound("Form".to_string()))?
            .into_form()
    }

    fn form_exists(&self, form_id: &str) -> Result<bool, FormError> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT id FROM forms WHERE id = ?1",
                params![form_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl FormBackend for SqliteBackend {
    fn list_forms(&self, session: &Session) -> Result<Vec<Form>, FormError> {
        let sql = format!(
            "SELECT {FORM_COLUMNS} FROM forms WHERE owner_id = ?1 \
            ORDER BY created_at DESC, rowid DESC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![session.user.id], form_row)?;

        let mut forms = Vec::new();
        for row in rows {
            forms.push(row?.into_form()?);
        }
        Ok(forms)
    }

    fn create_form(&self, session: &Session, payload: &FormPayload) -> Result<Form, FormError> {
        let id = Uuid::new_v4().to_string();
        let slug = Uuid::new_v4().simple().to_string();
        let unique_url = slug[..SHARE_SLUG_LEN].to_string();
        let now = now_string();
        self.conn.execute(
            "INSERT INTO forms (id, owner_id, title, unique_url, fields_json, created_at, updated_at) \
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
            params![
                id,
                session.user.id,
                payload.title,
                unique_url,
                serde_json::to_string(&payload.fields)?,
                now
            ],
        )?;
        info!(form_id = %id, "created form");
        self.owned_form(&session.user.id, &id)
    }

    fn get_form(&self, session: &Session, form_id: &str) -> Result<Form, FormError> {
        self.owned_form(&session.user.id, form_id)
    }

    fn update_form(
        &self,
        session: &Session,
        form_id: &str,
        payload: &FormPayload,
    ) -> Result<(), FormError> {
        let changed = self.conn.execute(
            "UPDATE forms SET title = ?1, fields_json = ?2, updated_at = ?3 \
            WHERE id = ?4 AND owner_id = ?5",
            params![
                payload.title,
                serde_json::to_string(&payload.fields)?,
                now_string(),
                form_id,
                session.user.id
            ],
        )?;
        if changed == 0 {
            return Err(FormError::NotFound("Form".to_string()));
        }
        info!(%form_id, fields = payload.fields.len(), "updated form");
        Ok(())
    }

    fn delete_form(&self, session: &Session, form_id: &str) -> Result<(), FormError> {
        // Submissions reference the form row, so they go first. Dropping the
        // transaction on an early return rolls both deletes back.
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute(
            "DELETE FROM submissions WHERE form_id IN             (SELECT id FROM forms WHERE id = ?1 AND owner_id = ?2)",
            params![form_id, session.user.id],
        )?;
        let changed = tx.execute(
            "DELETE FROM forms WHERE id = ?1 AND owner_id = ?2",
            params![form_id, session.user.id],
        )?;
        if changed == 0 {
            return Err(FormError::NotFound("Form".to_string()));
        }
        tx.commit()?;
        info!(%form_id, submissions = removed, "deleted form");
        Ok(())
    }

    fn get_public_form(&self, unique_url: &str) -> Result<Form, FormError> {
        let sql = format!("SELECT {FORM_COLUMNS} FROM forms WHERE unique_url = ?1");
        self.conn
            .query_row(&sql, params![unique_url], form_row)
            .optional()?
            .ok_or_else(|| FormError::NotFound("Form".to_string()))?
            .into_form()
    }

    fn submit(&self, form_id: &str, payload: &SubmissionPayload) -> Result<(), FormError> {
        if !self.form_exists(form_id)? {
            return Err(FormError::NotFound("Form".to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO submissions (id, form_id, responses_json, submitted_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                id,
                form_id,
                serde_json::to_string(&payload.responses)?,
                now_string()
            ],
        )?;
        debug!(%form_id, submission_id = %id, "stored submission");
        Ok(())
    }

    fn list_submissions(
        &self,
        session: &Session,
        form_id: &str,
    ) -> Result<Vec<Submission>, FormError> {
        self.owned_form(&session.user.id, form_id)?;
        let mut stmt = self.conn.prepare(
            "SELECT id, responses_json, submitted_at FROM submissions WHERE form_id = ?1 \
            ORDER BY submitted_at DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![form_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut submissions = Vec::new();
        for row in rows {
            let (id, responses_json, submitted_at) = row?;
            let responses: Vec<ResponseItem> = serde_json::from_str(&responses_json)?;
            submissions.push(Submission {
                id,
                responses,
                submitted_at: parse_timestamp(&submitted_at)?,
            });
        }
        Ok(submissions)
    }
}
