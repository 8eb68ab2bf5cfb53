pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS projects (
    project_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_name TEXT NOT NULL,
    github_url TEXT NOT NULL UNIQUE,
    number_of_errors INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS configuration (
    configuration_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    system_prompt TEXT NOT NULL DEFAULT '',
    model TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS results (
    results_id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    configuration_id INTEGER REFERENCES configuration(configuration_id) ON DELETE CASCADE,
    number_of_fixes INTEGER,
    duration REAL,
    tokens INTEGER NOT NULL DEFAULT 0,
    detected_errors INTEGER,
    high_quality_errors INTEGER,
    false_positives INTEGER,
    run_time REAL NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS error_records (
    error_id TEXT PRIMARY KEY,
    error_type TEXT NOT NULL,
    was_fixed INTEGER NOT NULL DEFAULT 0,
    project_id INTEGER NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    configuration_id INTEGER REFERENCES configuration(configuration_id) ON DELETE CASCADE,
    run_time REAL NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_configuration_project ON configuration(project_id);
CREATE INDEX IF NOT EXISTS idx_results_project ON results(project_id, configuration_id);
CREATE INDEX IF NOT EXISTS idx_error_records_configuration ON error_records(configuration_id);
";
