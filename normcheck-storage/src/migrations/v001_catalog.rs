//! V001: Catalog tables — rule_books, rule_book_entries, reference_tables.

pub const MIGRATION_SQL: &str = r#"
-- Rule books: imported regulatory catalogs. Immutable once imported;
-- a superseding version is a new row, never a mutation.
CREATE TABLE IF NOT EXISTS rule_books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    version_label TEXT NOT NULL DEFAULT '',
    version INTEGER NOT NULL DEFAULT 1,
    imported_at INTEGER NOT NULL,
    row_count INTEGER NOT NULL DEFAULT 0
) STRICT;

CREATE INDEX IF NOT EXISTS idx_rule_books_imported
    ON rule_books(imported_at DESC);

-- Entries: one row per catalog row. Column names are import-supplied,
-- so the payload is an open JSON object. position preserves import
-- order, which segmentation carry-forward depends on.
CREATE TABLE IF NOT EXISTS rule_book_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rule_book_id INTEGER NOT NULL REFERENCES rule_books(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    data TEXT NOT NULL,
    UNIQUE(rule_book_id, position)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_entries_book
    ON rule_book_entries(rule_book_id, position);

-- Reference tables: auxiliary named tables referenced from entry text.
-- Header and rows are JSON arrays.
CREATE TABLE IF NOT EXISTS reference_tables (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    rule_book_id INTEGER NOT NULL REFERENCES rule_books(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    header TEXT NOT NULL,
    rows TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_reference_tables_book
    ON reference_tables(rule_book_id);
"#;
