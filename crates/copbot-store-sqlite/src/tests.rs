//! Integration tests for `SqliteStore` against an in-memory database.

use copbot_core::{
  history::NewInteraction,
  record::{MatchPolicy, Record, RecordKind, RecordTable},
  store::{InteractionLog, RecordStore},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn record(kind: RecordKind, values: &[&str]) -> Record {
  Record::from_values(kind, values.iter().map(|v| (*v).to_owned()).collect())
    .unwrap()
}

fn table(kind: RecordKind, rows: &[&[&str]]) -> RecordTable {
  RecordTable::new(kind, rows.iter().map(|r| record(kind, r)).collect()).unwrap()
}

fn statutes() -> RecordTable {
  table(
    RecordKind::Statute,
    &[
      &["IPC 420", "Cheating", "Up to 7 years"],
      &["IPC 302", "Murder", "Death or life imprisonment"],
      &["IPC 4201", "Fictional", "None"],
    ],
  )
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_table_finds_nothing() {
  let s = store().await;
  for kind in RecordKind::ALL {
    let hit = s.find_first(kind, kind.match_policy(), "anything").await.unwrap();
    assert!(hit.is_none(), "{kind}");
  }
}

#[tokio::test]
async fn exact_lookup_requires_full_case_sensitive_key() {
  let s = store().await;
  s.replace_table(table(
    RecordKind::Case,
    &[&["A123", "Theft", "Open", "Central"]],
  ))
  .await
  .unwrap();

  let hit = s.find_first(RecordKind::Case, MatchPolicy::Exact, "A123").await.unwrap();
  assert_eq!(hit.unwrap().key(), "A123");

  for miss in ["A12", "a123", "A1234"] {
    let hit = s.find_first(RecordKind::Case, MatchPolicy::Exact, miss).await.unwrap();
    assert!(hit.is_none(), "{miss}");
  }
}

#[tokio::test]
async fn substring_lookup_ignores_case() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();

  let lower = s
    .find_first(RecordKind::Statute, MatchPolicy::Substring, "ipc 302")
    .await
    .unwrap();
  let upper = s
    .find_first(RecordKind::Statute, MatchPolicy::Substring, "IPC 302")
    .await
    .unwrap();
  assert_eq!(lower, upper);
  assert_eq!(lower.unwrap().key(), "IPC 302");
}

#[tokio::test]
async fn substring_lookup_returns_first_row_in_insertion_order() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();

  // Both "IPC 420" and "IPC 4201" contain "420".
  let hit = s
    .find_first(RecordKind::Statute, MatchPolicy::Substring, "420")
    .await
    .unwrap();
  assert_eq!(hit.unwrap().key(), "IPC 420");
}

#[tokio::test]
async fn substring_query_is_literal_not_a_pattern() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();

  let hit = s
    .find_first(RecordKind::Statute, MatchPolicy::Substring, "IPC%")
    .await
    .unwrap();
  assert!(hit.is_none());
}

#[tokio::test]
async fn substring_lookup_agrees_with_match_policy_on_non_ascii() {
  let s = store().await;
  s.replace_table(table(
    RecordKind::MissingPerson,
    &[&["ÉLISE Dubois", "34", "Railway station", "100"]],
  ))
  .await
  .unwrap();

  for query in ["élise", "Élise", "dubois", "ÉLISE DUBOIS"] {
    let hit = s
      .find_first(RecordKind::MissingPerson, MatchPolicy::Substring, query)
      .await
      .unwrap();
    assert_eq!(
      hit.is_some(),
      MatchPolicy::Substring.matches("ÉLISE Dubois", query),
      "{query}"
    );
  }
  let folded = s
    .find_first(RecordKind::MissingPerson, MatchPolicy::Substring, "élise")
    .await
    .unwrap();
  assert!(folded.is_none());
}

// ─── Bulk replace ────────────────────────────────────────────────────────────

#[tokio::test]
async fn replace_is_not_append() {
  let s = store().await;

  let first = s.replace_table(statutes()).await.unwrap();
  let after_first = s.list(RecordKind::Statute).await.unwrap();
  let second = s.replace_table(statutes()).await.unwrap();
  let after_second = s.list(RecordKind::Statute).await.unwrap();

  assert_eq!(first, 3);
  assert_eq!(second, 3);
  assert_eq!(after_first, after_second);
}

#[tokio::test]
async fn replace_discards_previous_rows() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();
  s.replace_table(table(
    RecordKind::Statute,
    &[&["MV Act 185", "Drunk driving", "Fine and imprisonment"]],
  ))
  .await
  .unwrap();

  let rows = s.list(RecordKind::Statute).await.unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].key(), "MV Act 185");
}

#[tokio::test]
async fn replace_with_empty_table_clears_it() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();
  let count = s.replace_table(RecordTable::empty(RecordKind::Statute)).await.unwrap();
  assert_eq!(count, 0);
  assert!(s.list(RecordKind::Statute).await.unwrap().is_empty());
}

#[tokio::test]
async fn tables_are_independent() {
  let s = store().await;
  s.replace_table(statutes()).await.unwrap();
  s.replace_table(table(
    RecordKind::Violation,
    &[&["Speeding", "1000", "3"]],
  ))
  .await
  .unwrap();
  s.replace_table(RecordTable::empty(RecordKind::Violation)).await.unwrap();

  assert_eq!(s.list(RecordKind::Statute).await.unwrap().len(), 3);
}

#[tokio::test]
async fn list_round_trips_every_kind() {
  let s = store().await;
  let fixtures = [
    table(RecordKind::Case, &[&["A1", "Theft", "Open", "Central"]]),
    table(
      RecordKind::StolenProperty,
      &[&["KA01AB1234", "Swift", "MG Road", "2024-03-01"]],
    ),
    table(
      RecordKind::MissingPerson,
      &[&["Ravi Kumar", "12", "Bus stand", "100"]],
    ),
    table(RecordKind::Violation, &[&["Speeding", "1000", "3"]]),
    statutes(),
  ];

  for fixture in fixtures {
    let kind = fixture.kind();
    s.replace_table(fixture.clone()).await.unwrap();
    assert_eq!(s.list(kind).await.unwrap(), fixture.into_rows(), "{kind}");
  }
}

// ─── Interaction log ─────────────────────────────────────────────────────────

#[tokio::test]
async fn append_assigns_increasing_ids() {
  let s = store().await;
  let a = s.append(NewInteraction::new("hello", "Hi there")).await.unwrap();
  let b = s.append(NewInteraction::new("bye", "Stay safe")).await.unwrap();
  assert!(b.id > a.id);
  assert!(b.timestamp >= a.timestamp);
}

#[tokio::test]
async fn recent_is_newest_first_and_limited() {
  let s = store().await;
  for i in 0..5 {
    s.append(NewInteraction::new(format!("q{i}"), format!("r{i}")))
      .await
      .unwrap();
  }

  let recent = s.recent(3).await.unwrap();
  let inputs: Vec<_> = recent.iter().map(|e| e.user_input.as_str()).collect();
  assert_eq!(inputs, vec!["q4", "q3", "q2"]);
  assert_eq!(recent[0].bot_response, "r4");
}

#[tokio::test]
async fn recent_on_empty_log_is_empty() {
  let s = store().await;
  assert!(s.recent(20).await.unwrap().is_empty());
}
