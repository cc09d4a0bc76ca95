//! SQL schema for the CopBot SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Record tables carry no primary key: keys are not unique, and lookups
/// return the first match in `rowid` (insertion) order.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS case_records (
    fir_number      TEXT NOT NULL,
    crime_type      TEXT NOT NULL,
    status          TEXT NOT NULL,
    police_station  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stolen_vehicles (
    vehicle_no      TEXT NOT NULL,
    model           TEXT NOT NULL,
    stolen_from     TEXT NOT NULL,
    reported_date   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS missing_persons (
    name            TEXT NOT NULL,
    age             TEXT NOT NULL,
    last_seen       TEXT NOT NULL,
    contact         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS traffic_fines (
    violation       TEXT NOT NULL,
    fine_amount     TEXT NOT NULL,
    points          TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS legal_info (
    law             TEXT NOT NULL,
    description     TEXT NOT NULL,
    punishment      TEXT NOT NULL
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS chat_history (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_input      TEXT NOT NULL,
    bot_response    TEXT NOT NULL,
    timestamp       TEXT NOT NULL    -- RFC 3339 UTC
);

CREATE INDEX IF NOT EXISTS case_records_key_idx    ON case_records(fir_number);
CREATE INDEX IF NOT EXISTS stolen_vehicles_key_idx ON stolen_vehicles(vehicle_no);

PRAGMA user_version = 1;
";
