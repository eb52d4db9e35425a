use std::io::{self, BufRead, Write};

use anyhow::Context;
use kingdoms::command::parse_invocation;
use kingdoms::platform::CommandContext;
use kingdoms::rules::HELP_MESSAGE;
use kingdoms::session::{CommandOutcome, handle_command};
use log::{debug, info, warn};

use crate::bot_config::{BotConfig, load_token};
use crate::console_platform::ConsolePlatform;


// Splits `Name: message` into the speaker and the message. Lines without a prefix are spoken by
// the default invoker.
pub fn split_speaker<'a>(line: &'a str, default_invoker: &'a str) -> (&'a str, &'a str) {
    match line.split_once(':') {
        Some((speaker, content)) if !speaker.trim().is_empty() && !speaker.contains(' ') => {
            (speaker.trim(), content)
        }
        _ => (default_invoker, line),
    }
}

pub async fn process_line<W: Write + Send>(
    platform: &ConsolePlatform<W>, config: &BotConfig, line: &str,
) {
    let (speaker, content) = split_speaker(line, &config.default_invoker);
    let Some(args) = parse_invocation(content) else {
        return;
    };
    let Some(invoker) = platform.member_by_name(speaker) else {
        warn!("Ignoring command from unknown member {speaker}");
        return;
    };
    let ctx = CommandContext {
        channel: config.channel.clone(),
        invoker: invoker.clone(),
    };
    match handle_command(platform, &ctx, &args, &mut rand::rng()).await {
        Ok(CommandOutcome::AboutSent) => debug!("Sent rules to {speaker}"),
        Ok(CommandOutcome::GameStarted(report)) => {
            info!(
                "Game started by {speaker}: {} players, {} undelivered",
                report.assignment.len(),
                report.undelivered.len()
            );
        }
        Err(err) => debug!("Command failed: {err:?}"),
    }
}

pub fn run(config: BotConfig) -> anyhow::Result<()> {
    let token = load_token(&config.token)?;
    let platform = ConsolePlatform::connect(&token, &config, io::stdout())?;
    info!("Bot started in {}. {HELP_MESSAGE}", config.channel);
    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin.")?;
        async_std::task::block_on(process_line(&platform, &config, &line));
    }
    info!("Input closed, shutting down");
    Ok(())
}
