// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::Connection;
use rust_decimal::Decimal;

use outlay::db;
use outlay::models::{Gender, Transaction, TransactionKind, User};
use outlay::session::Session;
use outlay::store::TransactionStore;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn signup(conn: &Connection) -> User {
    Session::new(conn)
        .create_local_user("Ada", "ada@example.com", Gender::Female)
        .unwrap()
}

fn tx(user: &User, id: &str, amount: &str, date: (i32, u32, u32)) -> Transaction {
    let category = user
        .categories
        .iter()
        .find(|c| c.name == "Food")
        .unwrap()
        .clone();
    Transaction {
        id: id.into(),
        user_id: user.id.clone(),
        amount: amount.parse().unwrap(),
        date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        category,
        details: Some("lunch".into()),
        kind: TransactionKind::Expense,
    }
}

#[test]
fn add_and_snapshot_in_insertion_order() {
    let conn = setup();
    let user = signup(&conn);
    let store = TransactionStore::new(&conn);

    store.add(&tx(&user, "a", "10", (2024, 3, 5))).unwrap();
    store.add(&tx(&user, "b", "20", (2024, 1, 2))).unwrap();

    let snapshot = store.all_for_user(&user.id).unwrap();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].id, "a");
    assert_eq!(snapshot[1].id, "b");
    assert_eq!(snapshot[0].category.name, "Food");
    assert_eq!(snapshot[0].amount, "10".parse::<Decimal>().unwrap());
    assert_eq!(snapshot[0].details.as_deref(), Some("lunch"));
}

#[test]
fn replace_updates_matching_id_only() {
    let conn = setup();
    let user = signup(&conn);
    let store = TransactionStore::new(&conn);
    store.add(&tx(&user, "a", "10", (2024, 3, 5))).unwrap();

    let mut corrected = tx(&user, "a", "15.75", (2024, 3, 6));
    corrected.kind = TransactionKind::Income;
    assert!(store.replace(&corrected).unwrap());

    let snapshot = store.all_for_user(&user.id).unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].amount, "15.75".parse::<Decimal>().unwrap());
    assert_eq!(snapshot[0].kind, TransactionKind::Income);

    // Unknown id is a no-op
    assert!(!store.replace(&tx(&user, "zzz", "1", (2024, 1, 1))).unwrap());
}

#[test]
fn remove_and_clear() {
    let conn = setup();
    let user = signup(&conn);
    let store = TransactionStore::new(&conn);
    store.add(&tx(&user, "a", "10", (2024, 3, 5))).unwrap();
    store.add(&tx(&user, "b", "20", (2024, 3, 6))).unwrap();

    assert!(store.remove(&user.id, "a").unwrap());
    assert!(!store.remove(&user.id, "a").unwrap());
    assert_eq!(store.all_for_user(&user.id).unwrap().len(), 1);

    store.clear_user(&user.id).unwrap();
    assert!(store.all_for_user(&user.id).unwrap().is_empty());
}

#[test]
fn writes_bump_the_data_revision() {
    let conn = setup();
    let user = signup(&conn);
    let store = TransactionStore::new(&conn);

    let r0 = store.revision().unwrap();
    store.add(&tx(&user, "a", "10", (2024, 3, 5))).unwrap();
    let r1 = store.revision().unwrap();
    assert!(r1 > r0);

    // Reads leave the revision alone
    store.all_for_user(&user.id).unwrap();
    assert_eq!(store.revision().unwrap(), r1);

    // A no-op replace does not bump
    store.replace(&tx(&user, "zzz", "1", (2024, 1, 1))).unwrap();
    assert_eq!(store.revision().unwrap(), r1);

    store.clear_user(&user.id).unwrap();
    assert!(store.revision().unwrap() > r1);
}
