// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use crate::session::Session;
use crate::utils::pretty_table;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let session = Session::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let user = session.require_current()?;
            let name = sub.get_one::<String>("name").unwrap();
            let icon = sub.get_one::<String>("icon").unwrap();
            session.add_category(&user.id, name, icon)?;
            println!("Added category '{}'", name);
        }
        Some(("list", _)) => {
            let user = session.require_current()?;
            let data = user
                .categories
                .iter()
                .map(|c| vec![c.name.clone(), c.icon.clone()])
                .collect();
            println!("{}", pretty_table(&["Category", "Icon"], data));
        }
        Some(("rm", sub)) => {
            let user = session.require_current()?;
            let name = sub.get_one::<String>("name").unwrap();
            session.remove_category(&user.id, name)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
