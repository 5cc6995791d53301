// Copyright (c) Outlay contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("outlay")
        .version(crate_version!())
        .about("Personal expense tracking with monthly category reports")
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("user")
                .about("Manage the active profile")
                .subcommand(
                    Command::new("signup")
                        .about("Create a local profile and make it active")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(
                            Arg::new("gender")
                                .long("gender")
                                .required(true)
                                .help("male|female"),
                        ),
                )
                .subcommand(Command::new("show").about("Show the active profile"))
                .subcommand(
                    Command::new("logout")
                        .about("Drop the active profile and clear its transactions"),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage spending categories")
                .subcommand(
                    Command::new("add")
                        .about("Add a category")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("icon")
                                .long("icon")
                                .default_value("icon_custom")
                                .help("Icon key resolved by the front end"),
                        ),
                )
                .subcommand(Command::new("list").about("List categories"))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a category")
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and inspect transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(Arg::new("details").long("details"))
                        .arg(
                            Arg::new("kind")
                                .long("kind")
                                .default_value("expense")
                                .help("income|expense"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("edit")
                        .about("Correct a transaction in place")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date"))
                        .arg(Arg::new("details").long("details"))
                        .arg(Arg::new("kind").long("kind").help("income|expense")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Spending reports")
                .subcommand(json_flags(
                    Command::new("spend-by-category")
                        .about("Per-category expense totals (current month by default)")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("all")
                                .long("all")
                                .action(ArgAction::SetTrue)
                                .help("Aggregate over all time instead of one month"),
                        ),
                ))
                .subcommand(json_flags(
                    Command::new("history").about("Trailing 12-month summaries"),
                ))
                .subcommand(
                    Command::new("total")
                        .about("Total expenses for one month")
                        .arg(Arg::new("month").long("month").required(true)),
                ),
        )
        .subcommand(
            Command::new("export").about("Export data").subcommand(
                Command::new("transactions")
                    .about("Export transactions to a file")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
        .subcommand(
            Command::new("sync")
                .about("Mirror the profile and transactions to a remote store")
                .subcommand(
                    Command::new("set-remote")
                        .about("Set the remote store base URL")
                        .arg(Arg::new("url").required(true)),
                )
                .subcommand(Command::new("pull").about("Fetch profile and transactions"))
                .subcommand(Command::new("push").about("Upload profile and transactions")),
        )
        .subcommand(Command::new("doctor").about("Check local data for inconsistencies"))
}
