//! Record tables: the five independently keyed lookup tables.
//!
//! Every table is a plain list of text rows whose first column is the
//! natural key. Tables have no foreign keys between them and are replaced
//! wholesale on import.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Kinds ───────────────────────────────────────────────────────────────────

/// Which table a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
  /// FIR / case status records, keyed by FIR number.
  #[serde(rename = "case")]
  Case,
  /// Stolen vehicle records, keyed by registration number.
  #[serde(rename = "vehicle")]
  StolenProperty,
  #[serde(rename = "missing_person")]
  MissingPerson,
  /// Traffic violation fines, keyed by violation name.
  #[serde(rename = "violation")]
  Violation,
  /// Legal provisions, keyed by statute name (e.g. "IPC 420").
  #[serde(rename = "statute")]
  Statute,
}

/// How a query is compared against a table's key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
  /// Byte-for-byte equality.
  Exact,
  /// Containment of the query within the key, folding ASCII case only.
  Substring,
}

impl MatchPolicy {
  /// Reference semantics every [`RecordStore`](crate::store::RecordStore)
  /// backend must reproduce. Non-ASCII letters compare as-is, matching
  /// SQLite's `lower()`.
  pub fn matches(self, key: &str, query: &str) -> bool {
    match self {
      Self::Exact => key == query,
      Self::Substring => key
        .to_ascii_lowercase()
        .contains(&query.to_ascii_lowercase()),
    }
  }
}

impl RecordKind {
  pub const ALL: [RecordKind; 5] = [
    RecordKind::Case,
    RecordKind::StolenProperty,
    RecordKind::MissingPerson,
    RecordKind::Violation,
    RecordKind::Statute,
  ];

  /// Short identifier used in URLs, CLI arguments and serialised data.
  pub fn slug(self) -> &'static str {
    match self {
      Self::Case => "case",
      Self::StolenProperty => "vehicle",
      Self::MissingPerson => "missing_person",
      Self::Violation => "violation",
      Self::Statute => "statute",
    }
  }

  /// Backing table name.
  pub fn table(self) -> &'static str {
    match self {
      Self::Case => "case_records",
      Self::StolenProperty => "stolen_vehicles",
      Self::MissingPerson => "missing_persons",
      Self::Violation => "traffic_fines",
      Self::Statute => "legal_info",
    }
  }

  /// Column names, natural key first.
  pub fn columns(self) -> &'static [&'static str] {
    match self {
      Self::Case => &["fir_number", "crime_type", "status", "police_station"],
      Self::StolenProperty => {
        &["vehicle_no", "model", "stolen_from", "reported_date"]
      }
      Self::MissingPerson => &["name", "age", "last_seen", "contact"],
      Self::Violation => &["violation", "fine_amount", "points"],
      Self::Statute => &["law", "description", "punishment"],
    }
  }

  pub fn key_column(self) -> &'static str { self.columns()[0] }

  /// `(marker, label)` pairs used when rendering a record, one per column.
  pub fn labels(self) -> &'static [(&'static str, &'static str)] {
    match self {
      Self::Case => &[
        ("🚔", "FIR Number"),
        ("🔍", "Crime Type"),
        ("📌", "Status"),
        ("🏢", "Police Station"),
      ],
      Self::StolenProperty => &[
        ("🚗", "Vehicle No."),
        ("🚘", "Model"),
        ("📍", "Stolen From"),
        ("📅", "Reported Date"),
      ],
      Self::MissingPerson => &[
        ("🔎", "Missing Person"),
        ("🎂", "Age"),
        ("📍", "Last Seen"),
        ("📞", "Contact"),
      ],
      Self::Violation => &[
        ("🚦", "Violation"),
        ("💰", "Fine Amount"),
        ("⚠", "Points Deducted"),
      ],
      Self::Statute => &[
        ("📜", "Law"),
        ("🔍", "Description"),
        ("⚖", "Punishment"),
      ],
    }
  }

  /// How direct lookups against this table compare keys. Case and vehicle
  /// identifiers are exact; names are searched by substring.
  pub fn match_policy(self) -> MatchPolicy {
    match self {
      Self::Case | Self::StolenProperty => MatchPolicy::Exact,
      Self::MissingPerson | Self::Violation | Self::Statute => {
        MatchPolicy::Substring
      }
    }
  }

  /// Reply for a direct lookup that found nothing.
  pub fn not_found(self) -> &'static str {
    match self {
      Self::Case => "❌ FIR not found. Please enter a valid FIR number.",
      Self::StolenProperty => "❌ No record of a stolen vehicle with this number.",
      Self::MissingPerson => "❌ No missing person found with this name.",
      Self::Violation => "❌ No fine information found for this violation.",
      Self::Statute => "❌ No legal information found for this law.",
    }
  }
}

impl fmt::Display for RecordKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.slug())
  }
}

impl FromStr for RecordKind {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "case" | "fir" => Ok(Self::Case),
      "vehicle" | "stolen_vehicle" => Ok(Self::StolenProperty),
      "missing_person" | "missing" => Ok(Self::MissingPerson),
      "violation" | "traffic_fine" => Ok(Self::Violation),
      "statute" | "law" => Ok(Self::Statute),
      other => Err(Error::UnknownKind(other.to_owned())),
    }
  }
}

// ─── Rows ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
  pub fir_number:     String,
  pub crime_type:     String,
  pub status:         String,
  pub police_station: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StolenVehicleRecord {
  pub vehicle_no:    String,
  pub model:         String,
  pub stolen_from:   String,
  pub reported_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPersonRecord {
  pub name:      String,
  pub age:       String,
  pub last_seen: String,
  pub contact:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
  pub violation:   String,
  pub fine_amount: String,
  pub points:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteRecord {
  pub law:         String,
  pub description: String,
  pub punishment:  String,
}

/// A row from any of the five tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
  Case(CaseRecord),
  #[serde(rename = "vehicle")]
  StolenProperty(StolenVehicleRecord),
  MissingPerson(MissingPersonRecord),
  Violation(ViolationRecord),
  Statute(StatuteRecord),
}

impl Record {
  pub fn kind(&self) -> RecordKind {
    match self {
      Self::Case(_) => RecordKind::Case,
      Self::StolenProperty(_) => RecordKind::StolenProperty,
      Self::MissingPerson(_) => RecordKind::MissingPerson,
      Self::Violation(_) => RecordKind::Violation,
      Self::Statute(_) => RecordKind::Statute,
    }
  }

  /// Field values in column order.
  pub fn values(&self) -> Vec<&str> {
    match self {
      Self::Case(r) => vec![
        r.fir_number.as_str(),
        r.crime_type.as_str(),
        r.status.as_str(),
        r.police_station.as_str(),
      ],
      Self::StolenProperty(r) => vec![
        r.vehicle_no.as_str(),
        r.model.as_str(),
        r.stolen_from.as_str(),
        r.reported_date.as_str(),
      ],
      Self::MissingPerson(r) => vec![
        r.name.as_str(),
        r.age.as_str(),
        r.last_seen.as_str(),
        r.contact.as_str(),
      ],
      Self::Violation(r) => {
        vec![r.violation.as_str(), r.fine_amount.as_str(), r.points.as_str()]
      }
      Self::Statute(r) => {
        vec![r.law.as_str(), r.description.as_str(), r.punishment.as_str()]
      }
    }
  }

  pub fn key(&self) -> &str {
    match self {
      Self::Case(r) => &r.fir_number,
      Self::StolenProperty(r) => &r.vehicle_no,
      Self::MissingPerson(r) => &r.name,
      Self::Violation(r) => &r.violation,
      Self::Statute(r) => &r.law,
    }
  }

  /// Build a record of `kind` from values in column order.
  pub fn from_values(kind: RecordKind, values: Vec<String>) -> Result<Self> {
    let expected = kind.columns().len();
    if values.len() != expected {
      return Err(Error::FieldCount { kind, expected, found: values.len() });
    }

    let mut it = values.into_iter();
    // Length was checked above, so every `next()` yields a value.
    let mut next = || it.next().unwrap_or_default();

    Ok(match kind {
      RecordKind::Case => Self::Case(CaseRecord {
        fir_number:     next(),
        crime_type:     next(),
        status:         next(),
        police_station: next(),
      }),
      RecordKind::StolenProperty => Self::StolenProperty(StolenVehicleRecord {
        vehicle_no:    next(),
        model:         next(),
        stolen_from:   next(),
        reported_date: next(),
      }),
      RecordKind::MissingPerson => Self::MissingPerson(MissingPersonRecord {
        name:      next(),
        age:       next(),
        last_seen: next(),
        contact:   next(),
      }),
      RecordKind::Violation => Self::Violation(ViolationRecord {
        violation:   next(),
        fine_amount: next(),
        points:      next(),
      }),
      RecordKind::Statute => Self::Statute(StatuteRecord {
        law:         next(),
        description: next(),
        punishment:  next(),
      }),
    })
  }

  /// Render the record as labelled lines, one per field.
  pub fn format(&self) -> String {
    self
      .kind()
      .labels()
      .iter()
      .zip(self.values())
      .map(|((marker, label), value)| format!("{marker} **{label}:** {value}"))
      .collect::<Vec<_>>()
      .join("\n")
  }
}

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The full contents of one table, as handed to a bulk replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTable {
  kind: RecordKind,
  rows: Vec<Record>,
}

impl RecordTable {
  /// Every row must belong to `kind`.
  pub fn new(kind: RecordKind, rows: Vec<Record>) -> Result<Self> {
    if let Some(stray) = rows.iter().find(|r| r.kind() != kind) {
      return Err(Error::KindMismatch { expected: kind, found: stray.kind() });
    }
    Ok(Self { kind, rows })
  }

  pub fn empty(kind: RecordKind) -> Self { Self { kind, rows: Vec::new() } }

  pub fn kind(&self) -> RecordKind { self.kind }

  pub fn rows(&self) -> &[Record] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn into_rows(self) -> Vec<Record> { self.rows }
}
