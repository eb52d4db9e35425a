// Handling of a single `!kingdoms` command: validation, dealing, notifications.
//
// Nothing here outlives the command. Failures before roles are dealt abort the command and are
// reported to the channel. Failures to deliver roles afterwards are reported, but the game stands.

use futures_util::future::join_all;
use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;

use crate::assign::{GameRequest, RoleAssignment};
use crate::command::{self, Subcommand};
use crate::error::KingdomsError;
use crate::message::{self, OutgoingMessage};
use crate::platform::{ChatPlatform, CommandContext, DeliveryError, Participant};
use crate::role::Role;
use crate::rules::{ABOUT_TEXT, MAX_PLAYERS, MIN_PLAYERS};


#[derive(Clone, Debug)]
pub struct GameReport {
    pub assignment: RoleAssignment<Participant>,
    // Players who did not receive their role. They are still in the game.
    pub undelivered: Vec<Participant>,
}

#[derive(Clone, Debug)]
pub enum CommandOutcome {
    AboutSent,
    GameStarted(GameReport),
}

pub async fn handle_command<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, args: &[String], rng: &mut impl Rng,
) -> Result<CommandOutcome, KingdomsError> {
    debug!("Command from {}: {:?}", ctx.invoker, args);
    match command::classify(args) {
        Subcommand::Empty => Err(report(platform, ctx, KingdomsError::UnrecognizedCommand).await),
        Subcommand::About => {
            send_about(platform, ctx).await;
            Ok(CommandOutcome::AboutSent)
        }
        Subcommand::New(tokens) => {
            handle_new_game(platform, ctx, tokens, rng).await.map(CommandOutcome::GameStarted)
        }
        Subcommand::Other(tokens) => {
            // Shorthand: `!kingdoms @player1 @player2 ...` is the same as `!kingdoms new ...`.
            match platform.resolve_member(ctx, &tokens[0]).await {
                Some(first) => start_game(platform, ctx, tokens, Some(first), rng)
                    .await
                    .map(CommandOutcome::GameStarted),
                None => Err(report(platform, ctx, KingdomsError::UnrecognizedCommand).await),
            }
        }
    }
}

pub async fn handle_new_game<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, tokens: &[String], rng: &mut impl Rng,
) -> Result<GameReport, KingdomsError> {
    start_game(platform, ctx, tokens, None, rng).await
}

// `first` is the member `tokens[0]` has already been resolved to, if any.
async fn start_game<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, tokens: &[String], first: Option<Participant>,
    rng: &mut impl Rng,
) -> Result<GameReport, KingdomsError> {
    let assignment = match deal(platform, ctx, tokens, first, rng).await {
        Ok(assignment) => assignment,
        Err(err) => return Err(report(platform, ctx, err).await),
    };

    let rules = message::rules_summary(assignment.roles());
    let deliveries = assignment.iter().map(|(p, role)| deliver_role(platform, p, role, &rules));
    let delivered = join_all(deliveries).await;
    let undelivered = assignment
        .iter()
        .zip(delivered)
        .filter(|(_, delivered)| !delivered)
        .map(|((p, _), _)| p.clone())
        .collect_vec();

    send_to_channel(platform, ctx, &message::king_announcement(assignment.king())).await;
    if !undelivered.is_empty() {
        send_to_channel(platform, ctx, &message::undelivered_roles(&undelivered)).await;
    }
    Ok(GameReport { assignment, undelivered })
}

// Validates the player list, resolves every player exactly once and deals the roles. Duplicate
// players are rejected by the engine.
async fn deal<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, tokens: &[String], mut first: Option<Participant>,
    rng: &mut impl Rng,
) -> Result<RoleAssignment<Participant>, KingdomsError> {
    let num_players = command::count_players(tokens);
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
        return Err(KingdomsError::InvalidPlayerCount(num_players));
    }
    let (eligible_tokens, excluded_tokens) = command::split_players(tokens)?;
    let player_tokens = eligible_tokens.iter().chain(excluded_tokens).collect_vec();

    // With no eligible players the first token is the separator, which `first` cannot be.
    if eligible_tokens.is_empty() {
        first = None;
    }
    let resolved = join_all(player_tokens.iter().enumerate().map(|(index, token)| {
        let known = if index == 0 { first.take() } else { None };
        async move {
            match known {
                Some(member) => Some(member),
                None => platform.resolve_member(ctx, token).await,
            }
        }
    }))
    .await;
    let unknown = player_tokens
        .iter()
        .zip(&resolved)
        .filter(|(_, member)| member.is_none())
        .map(|(token, _)| (*token).clone())
        .collect_vec();
    if !unknown.is_empty() {
        return Err(KingdomsError::UnknownUsers(unknown));
    }
    let mut players = resolved.into_iter().flatten().collect_vec();

    let excluded = players.split_off(eligible_tokens.len());
    let request = GameRequest { eligible: players, excluded };
    info!(
        "Dealing roles in {}: {} players, {} eligible for King",
        ctx.channel,
        request.num_players(),
        request.eligible.len()
    );
    request.assign_roles(rng)
}

// Sends the player their role followed by the rules. Returns whether both messages got through.
async fn deliver_role<C: ChatPlatform + ?Sized>(
    platform: &C, player: &Participant, role: Role, rules: &OutgoingMessage,
) -> bool {
    let result: Result<(), DeliveryError> = async {
        platform.send_direct(player, &message::role_reveal(role)).await?;
        platform.send_direct(player, rules).await
    }
    .await;
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!("Could not deliver role to {} ({}): {}", player, player.id, err);
            false
        }
    }
}

async fn send_about<C: ChatPlatform + ?Sized>(platform: &C, ctx: &CommandContext) {
    if let Err(err) = platform.send_direct(&ctx.invoker, &OutgoingMessage::text(ABOUT_TEXT)).await {
        warn!("Could not send rules to {}: {}", ctx.invoker, err);
    }
}

async fn send_to_channel<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, message: &OutgoingMessage,
) {
    if let Err(err) = platform.send_to_channel(ctx, message).await {
        warn!("Could not post to {}: {}", ctx.channel, err);
    }
}

async fn report<C: ChatPlatform + ?Sized>(
    platform: &C, ctx: &CommandContext, err: KingdomsError,
) -> KingdomsError {
    info!("Rejected command from {}: {:?}", ctx.invoker, err);
    send_to_channel(platform, ctx, &OutgoingMessage::text(err.to_string())).await;
    err
}
