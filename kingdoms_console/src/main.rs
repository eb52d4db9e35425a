#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod bot_config;
mod bot_main;
mod console_platform;
mod deal_main;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Kingdoms")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Kingdoms hidden role dealer for EDH games")
        .subcommand_required(true)
        .subcommand(Command::new("bot").about("Run the bot on a local console server").arg(
            arg!(<config_file> "Path to the configuration file: yaml-serialized BotConfig."),
        ))
        .subcommand(deal_main::command())
        .subcommand(
            Command::new("check-config")
                .about("Verifies that the configuration file parses and the bot token is set.")
                .arg(arg!(<config_file> "Path to the configuration file")),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("bot", sub_matches)) => {
            let config = bot_config::read_config_file(
                sub_matches.get_one::<String>("config_file").unwrap(),
            )?;
            bot_main::run(config)
        }
        Some(("deal", sub_matches)) => {
            deal_main::run(deal_main::DealConfig::from_matches(sub_matches)?)
        }
        Some(("check-config", sub_matches)) => {
            let config = bot_config::read_config_file(
                sub_matches.get_one::<String>("config_file").unwrap(),
            )?;
            bot_config::load_token(&config.token)?;
            println!("OK");
            Ok(())
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
