//! `SQLite` schema for the licence and signature store.

/// Licence identifiers, one row per match and role.
pub const CREATE_LICENCES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS licences (
    game_id TEXT NOT NULL,
    role TEXT NOT NULL,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (game_id, role)
)
";

/// Signatures, one row per match and role. `image` is base64 PNG.
pub const CREATE_SIGNATURES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS signatures (
    game_id TEXT NOT NULL,
    role TEXT NOT NULL,
    name TEXT NOT NULL,
    image TEXT,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (game_id, role)
)
";

/// Key-value pairs such as the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_LICENCES_TABLE,
    CREATE_SIGNATURES_TABLE,
    CREATE_METADATA_TABLE,
];
