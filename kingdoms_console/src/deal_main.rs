// Deals roles for a game played without the bot, e.g. around a table with one trusted dealer.

use std::io::{self, Write};

use clap::{ArgMatches, Command, arg, value_parser};
use console::style;
use kingdoms::assign::GameRequest;
use kingdoms::command::{SEPARATOR, split_players};
use kingdoms::error::KingdomsError;
use rand::SeedableRng;
use rand::rngs::StdRng;


pub fn command() -> Command {
    Command::new("deal")
        .about("Deal roles offline and print them")
        .arg(arg!([players] ... "Players who can become King"))
        // Clap swallows `--` itself, so everything after it lands here.
        .arg(arg!([excluded] ... "Players who cannot become King, listed after `--`").last(true))
        .arg(arg!(--seed <seed> "Random seed").value_parser(value_parser!(u64)))
}

pub struct DealConfig {
    pub request: GameRequest<String>,
    pub seed: Option<u64>,
}

impl DealConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, KingdomsError> {
        let mut tokens: Vec<String> =
            matches.get_many::<String>("players").into_iter().flatten().cloned().collect();
        if let Some(excluded) = matches.get_many::<String>("excluded") {
            tokens.push(SEPARATOR.to_owned());
            tokens.extend(excluded.cloned());
        }
        // Same rules as in chat: a second `--` is an error rather than a player name.
        let (eligible, excluded) = split_players(&tokens)?;
        Ok(DealConfig {
            request: GameRequest {
                eligible: eligible.to_vec(),
                excluded: excluded.to_vec(),
            },
            seed: matches.get_one::<u64>("seed").copied(),
        })
    }
}

pub fn deal(config: &DealConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let assignment = config.request.assign_roles(&mut rng)?;
    for (player, role) in assignment.iter() {
        writeln!(out, "{}: {}", style(player).bold(), role)?;
    }
    Ok(())
}

pub fn run(config: DealConfig) -> anyhow::Result<()> { deal(&config, &mut io::stdout().lock()) }
