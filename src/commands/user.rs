// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::models::Gender;
use crate::session::Session;
use crate::store::TransactionStore;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let session = Session::new(conn);
    match m.subcommand() {
        Some(("signup", sub)) => {
            let name = sub.get_one::<String>("name").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let gender = Gender::parse(sub.get_one::<String>("gender").unwrap())?;
            let user = session.create_local_user(name, email, gender)?;
            println!(
                "Created profile '{}' ({}) with {} default categories",
                user.name,
                user.email,
                user.categories.len()
            );
        }
        Some(("show", _)) => {
            let user = session.require_current()?;
            let rows = vec![vec![
                user.name.clone(),
                user.email.clone(),
                user.gender.as_str().to_string(),
                user.source.as_str().to_string(),
                user.categories.len().to_string(),
            ]];
            println!(
                "{}",
                pretty_table(&["Name", "Email", "Gender", "Source", "Categories"], rows)
            );
        }
        Some(("logout", _)) => {
            let store = TransactionStore::new(conn);
            session.logout(&store)?;
            println!("Logged out; local transactions cleared");
        }
        _ => {}
    }
    Ok(())
}
