// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::{params, Connection};

use outlay::commands::doctor::collect_issues;
use outlay::db;
use outlay::models::Gender;
use outlay::session::Session;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn clean_database_has_no_issues() {
    let conn = setup();
    Session::new(&conn)
        .create_local_user("Ada", "ada@example.com", Gender::Female)
        .unwrap();
    assert!(collect_issues(&conn).unwrap().is_empty());
}

#[test]
fn duplicate_category_names_are_flagged() {
    let conn = setup();
    let session = Session::new(&conn);
    let user = session
        .create_local_user("Ada", "ada@example.com", Gender::Female)
        .unwrap();
    // A second category named "Food": name-keyed sums would merge the two
    session.add_category(&user.id, "Food", "icon_other").unwrap();

    let issues = collect_issues(&conn).unwrap();
    assert!(issues
        .iter()
        .any(|r| r[0] == "duplicate_category_name" && r[1].contains("Food")));
}

#[test]
fn bad_stored_amounts_are_flagged() {
    let conn = setup();
    let session = Session::new(&conn);
    let user = session
        .create_local_user("Ada", "ada@example.com", Gender::Female)
        .unwrap();
    let food = session.category_by_name(&user.id, "Food").unwrap();
    // Bypass the store to plant a corrupt row
    conn.execute(
        "INSERT INTO transactions(id, user_id, amount, date, category_id, kind)
         VALUES ('bad', ?1, '-3', '2024-03-05', ?2, 'expense')",
        params![user.id, food.id],
    )
    .unwrap();

    let issues = collect_issues(&conn).unwrap();
    assert!(issues.iter().any(|r| r[0] == "bad_amount" && r[1].contains("bad")));
}
