// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use wealthwise::{cli, commands, config, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let settings = config::load()?;
    logging::init_logging(&settings.log_level)?;

    match matches.subcommand() {
        Some(("config", _)) => {
            println!("Settings file: {}", config::config_path()?.display());
            let mut shown = settings.clone();
            if shown.quote_token.is_some() {
                shown.quote_token = Some("********".into());
            }
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        Some(("tx", sub)) => commands::transactions::handle(sub)?,
        Some(("import", sub)) => commands::importer::handle(&settings, sub)?,
        Some(("export", sub)) => commands::exporter::handle(sub)?,
        Some(("portfolio", sub)) => commands::portfolio::handle(&settings, sub)?,
        Some(("goal", sub)) => commands::goals::handle(sub)?,
        Some(("report", sub)) => commands::reports::handle(&settings, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
