//! Database migration system
//!
//! Tracks schema versions and applies migrations in order.

use rusqlite::Connection;
use tracing::{info, instrument};

use crate::error::Result;

/// A database migration
pub struct Migration {
    /// Version number (must be sequential starting from 1)
    pub version: u32,
    /// Description of what this migration does
    pub description: &'static str,
    /// SQL to run for this migration
    pub sql: &'static str,
}

/// All migrations in order
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial schema",
        sql: r#"
            -- Events table
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                venue TEXT,
                starts_on TEXT NOT NULL,
                ends_on TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            -- Guests table
            CREATE TABLE IF NOT EXISTS guests (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                full_name TEXT NOT NULL,
                social_group TEXT,
                proximity_request TEXT,
                status INTEGER NOT NULL DEFAULT 0,
                allocated_floor TEXT,
                allocated_wing TEXT,
                created_at TEXT NOT NULL,
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
            );

            -- Room blocks table
            CREATE TABLE IF NOT EXISTS room_blocks (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                label TEXT NOT NULL,
                floor TEXT,
                wing TEXT,
                total_qty INTEGER NOT NULL,
                booked_qty INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
            );

            -- Activity log table
            CREATE TABLE IF NOT EXISTS activity_log (
                id TEXT PRIMARY KEY,
                event_id TEXT NOT NULL,
                actor TEXT NOT NULL,
                message TEXT NOT NULL,
                created_at TEXT NOT NULL,
                FOREIGN KEY (event_id) REFERENCES events(id) ON DELETE CASCADE
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add indexes for query performance",
        sql: r#"
            -- Guest indexes
            CREATE INDEX IF NOT EXISTS idx_guests_event ON guests(event_id);
            CREATE INDEX IF NOT EXISTS idx_guests_event_status ON guests(event_id, status);
            CREATE INDEX IF NOT EXISTS idx_guests_allocation
                ON guests(event_id, allocated_floor, allocated_wing);

            -- Room block indexes
            CREATE INDEX IF NOT EXISTS idx_room_blocks_event ON room_blocks(event_id);

            -- Activity log indexes
            CREATE INDEX IF NOT EXISTS idx_activity_event_created
                ON activity_log(event_id, created_at);
        "#,
    },
    Migration {
        version: 3,
        description: "Add structured detail payload to activity entries",
        sql: r#"
            -- JSON payload carrying the allocation mapping for runs
            ALTER TABLE activity_log ADD COLUMN detail_json TEXT;
        "#,
    },
];

/// Initialize the migrations table
fn init_migrations_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version
fn get_current_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> = conn
        .query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })
        .unwrap_or(None);
    Ok(version.unwrap_or(0))
}

/// Record that a migration was applied
fn record_migration(conn: &Connection, migration: &Migration) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![
            migration.version,
            migration.description,
            chrono::Utc::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

/// Run all pending migrations
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    init_migrations_table(conn)?;

    let current_version = get_current_version(conn)?;
    info!(current_version, "Checking for pending migrations");

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                description = migration.description,
                "Applying migration"
            );

            conn.execute_batch(migration.sql)?;
            record_migration(conn, migration)?;

            info!(version = migration.version, "Migration complete");
        }
    }

    let new_version = get_current_version(conn)?;
    if new_version > current_version {
        info!(
            from = current_version,
            to = new_version,
            "Database schema updated"
        );
    }

    Ok(())
}
