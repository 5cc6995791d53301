// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

use crate::remote::RemoteClient;
use crate::session::Session;
use crate::store::TransactionStore;
use crate::utils::{get_setting, set_setting};

const REMOTE_URL_KEY: &str = "remote_url";

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set-remote", sub)) => {
            let url = sub.get_one::<String>("url").unwrap();
            set_setting(conn, REMOTE_URL_KEY, url)?;
            println!("Remote store set to {}", url);
        }
        Some(("pull", _)) => pull(conn)?,
        Some(("push", _)) => push(conn)?,
        _ => {}
    }
    Ok(())
}

fn client(conn: &Connection) -> Result<RemoteClient> {
    let url = get_setting(conn, REMOTE_URL_KEY)?
        .context("No remote configured. Run 'outlay sync set-remote <url>' first.")?;
    RemoteClient::new(&url)
}

/// Replaces the local profile and transactions with the remote copy, unless
/// local writes landed while the fetch was in flight. The revision check
/// keeps a stale fetch from clobbering a newer local save.
fn pull(conn: &Connection) -> Result<()> {
    let session = Session::new(conn);
    let local = session.require_current()?;
    let store = TransactionStore::new(conn);
    let client = client(conn)?;

    let revision_before = store.revision()?;
    let user = client.fetch_user(&local.id)?;
    let transactions = client.fetch_transactions(&user)?;
    if store.revision()? != revision_before {
        bail!("Local data changed while pulling; push or retry");
    }

    session.set_current(&user)?;
    store.clear_user(&user.id)?;
    for t in &transactions {
        store.add(t)?;
    }
    println!(
        "Pulled profile '{}' and {} transactions",
        user.email,
        transactions.len()
    );
    Ok(())
}

fn push(conn: &Connection) -> Result<()> {
    let session = Session::new(conn);
    let user = session.require_current()?;
    let store = TransactionStore::new(conn);
    let client = client(conn)?;

    let snapshot = store.all_for_user(&user.id)?;
    client.push_user(&user)?;
    client.push_transactions(&user, &snapshot)?;
    println!(
        "Pushed profile '{}' and {} transactions",
        user.email,
        snapshot.len()
    );
    Ok(())
}
