//! V002: Analysis tables — project_analyses, analysis_results.

pub const MIGRATION_SQL: &str = r#"
-- Project analyses: one versioned review cycle per row. new_use and
-- fulfillability hold raw selection text (JSON array, delimited string,
-- or legacy brace literal); the engine normalizes on read.
CREATE TABLE IF NOT EXISTS project_analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    version INTEGER NOT NULL,
    started_at INTEGER NOT NULL,
    modified_at INTEGER NOT NULL,
    new_use TEXT NOT NULL DEFAULT '',
    fulfillability TEXT NOT NULL DEFAULT '',
    UNIQUE(project_id, version)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_analyses_project
    ON project_analyses(project_id, version DESC);

-- Analyst decisions: at most one per (analysis, entry) pair, enforced
-- by the unique index and written via upsert. entry_id is a
-- cross-aggregate reference, deliberately without cascade from entries.
CREATE TABLE IF NOT EXISTS analysis_results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    analysis_id INTEGER NOT NULL REFERENCES project_analyses(id) ON DELETE CASCADE,
    entry_id INTEGER NOT NULL,
    status TEXT,
    revised_fulfillability TEXT,
    updated_at INTEGER NOT NULL,
    UNIQUE(analysis_id, entry_id)
) STRICT;

CREATE INDEX IF NOT EXISTS idx_results_analysis
    ON analysis_results(analysis_id);
"#;
