// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn file_arg(help: &'static str) -> Arg {
    Arg::new("file")
        .long("file")
        .required(true)
        .value_name("CSV")
        .help(help)
}

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(u64))
}

fn amount_arg() -> Arg {
    Arg::new("amount").long("amount").required(true)
}

const TX_FILE: &str = "Transactions CSV";
const INV_FILE: &str = "Investments CSV";
const GOAL_FILE: &str = "Goals CSV";

pub fn build_cli() -> Command {
    Command::new("wealthwise")
        .version(crate_version!())
        .about("Personal finance dashboard: cash flow, portfolio and savings goals")
        .subcommand(Command::new("config").about("Show the settings file and effective settings"))
        .subcommand(
            Command::new("tx")
                .about("Record and list income/expense transactions")
                .subcommand(
                    Command::new("add")
                        .arg(file_arg(TX_FILE))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .value_parser(["income", "expense"]),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(amount_arg())
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("date").long("date").help("YYYY-MM-DD, defaults to today")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(file_arg(TX_FILE))
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(Command::new("rm").arg(file_arg(TX_FILE)).arg(id_arg())),
        )
        .subcommand(
            Command::new("import")
                .about("Best-effort import of bank or broker CSV exports")
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(Arg::new("into").long("into").required(true).help(TX_FILE))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("Date for rows without one, defaults to today"),
                        ),
                )
                .subcommand(
                    Command::new("investments")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(Arg::new("into").long("into").required(true).help(INV_FILE))
                        .arg(
                            Arg::new("lookup")
                                .long("lookup")
                                .action(ArgAction::SetTrue)
                                .help("Fetch current prices from the quote service"),
                        ),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export a collection as CSV or JSON")
                .subcommand_required(true)
                .subcommands(["transactions", "investments", "goals"].map(|name| {
                    Command::new(name)
                        .arg(file_arg("Source CSV"))
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .value_parser(["csv", "json"]),
                        )
                        .arg(Arg::new("out").long("out").required(true))
                })),
        )
        .subcommand(
            Command::new("portfolio")
                .about("Track holdings and live prices")
                .subcommand(
                    Command::new("add")
                        .arg(file_arg(INV_FILE))
                        .arg(Arg::new("symbol").long("symbol").required(true))
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("shares").long("shares").required(true))
                        .arg(Arg::new("buy_price").long("buy-price"))
                        .arg(Arg::new("current_price").long("current-price"))
                        .arg(
                            Arg::new("no_lookup")
                                .long("no-lookup")
                                .action(ArgAction::SetTrue)
                                .help("Skip the live quote lookup"),
                        ),
                )
                .subcommand(json_args(Command::new("list").arg(file_arg(INV_FILE))))
                .subcommand(Command::new("rm").arg(file_arg(INV_FILE)).arg(id_arg()))
                .subcommand(Command::new("quote").arg(Arg::new("symbol").long("symbol").required(true)))
                .subcommand(
                    Command::new("watch")
                        .about("Poll the price of a staged symbol until interrupted")
                        .arg(Arg::new("symbol").long("symbol").required(true))
                        .arg(Arg::new("shares").long("shares").required(true))
                        .arg(
                            Arg::new("ticks")
                                .long("ticks")
                                .value_parser(value_parser!(u64))
                                .help("Stop after this many quotes"),
                        ),
                ),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals and projections")
                .subcommand(
                    Command::new("add")
                        .arg(file_arg(GOAL_FILE))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("current").long("current"))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .default_value("savings")
                                .value_parser(["savings", "purchase", "lifestyle", "investment"]),
                        )
                        .arg(Arg::new("monthly").long("monthly")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .arg(file_arg(GOAL_FILE))
                        .arg(Arg::new("as_of").long("as-of")),
                ))
                .subcommand(Command::new("rm").arg(file_arg(GOAL_FILE)).arg(id_arg()))
                .subcommand(
                    Command::new("contribute")
                        .arg(file_arg(GOAL_FILE))
                        .arg(id_arg())
                        .arg(amount_arg()),
                )
                .subcommand(
                    Command::new("withdraw")
                        .arg(file_arg(GOAL_FILE))
                        .arg(id_arg())
                        .arg(amount_arg()),
                )
                .subcommand(
                    Command::new("set")
                        .arg(file_arg(GOAL_FILE))
                        .arg(id_arg())
                        .arg(amount_arg()),
                )
                .subcommand(json_args(
                    Command::new("project")
                        .arg(file_arg(GOAL_FILE))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("12")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("as_of").long("as-of")),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Dashboard figures")
                .subcommand(json_args(
                    Command::new("summary")
                        .arg(Arg::new("transactions").long("transactions"))
                        .arg(Arg::new("investments").long("investments")),
                ))
                .subcommand(json_args(
                    Command::new("cashflow")
                        .arg(Arg::new("transactions").long("transactions").required(true))
                        .arg(
                            Arg::new("months")
                                .long("months")
                                .default_value("8")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("as_of").long("as-of")),
                ))
                .subcommand(json_args(
                    Command::new("categories")
                        .arg(Arg::new("transactions").long("transactions").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .action(ArgAction::Append)
                                .help("Category to chart; repeat for more"),
                        ),
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        build_cli().debug_assert();
    }
}
