use itertools::Itertools;
use kingdoms::error::KingdomsError;
use kingdoms::message::{self, OutgoingMessage};
use kingdoms::role::Role;
use kingdoms::rules::{ABOUT_TEXT, ERROR_MESSAGE};
use kingdoms::session::{CommandOutcome, handle_command, handle_new_game};
use kingdoms::test_util::{FakePlatform, SentMessage, deterministic_rng, sample_player_names};
use pretty_assertions::assert_eq;


fn args(tokens: &[&str]) -> Vec<String> { tokens.iter().map(|&t| t.to_owned()).collect() }

fn server() -> FakePlatform {
    let mut names = sample_player_names().to_vec();
    names.push("Grace");
    FakePlatform::new(&names)
}

fn text(message: &OutgoingMessage) -> &str { message.as_text().unwrap() }

#[async_std::test]
async fn five_player_game() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["new", "@Alice", "@Bob", "@Charlie", "@Dave", "@Eve"]);
    let outcome = handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap();
    let CommandOutcome::GameStarted(report) = outcome else {
        panic!("Expected a game to start");
    };
    assert!(report.undelivered.is_empty());
    assert_eq!(report.assignment.len(), 5);

    let rules = message::rules_summary([
        Role::King,
        Role::Knight,
        Role::Bandit,
        Role::Assassin,
    ]);
    for (player, role) in report.assignment.iter() {
        let messages = server.direct_messages(&player.display_name);
        assert_eq!(messages, vec![message::role_reveal(role), rules.clone()]);
    }
    assert!(server.direct_messages("Frank").is_empty());

    let king = report.assignment.king();
    assert_eq!(server.channel_messages(), vec![OutgoingMessage::text(format!(
        "{} is the King! Long live the King!",
        king.mention()
    ))]);
}

#[async_std::test]
async fn six_player_game_rules_include_usurper() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["new", "@Alice", "@Bob", "@Charlie", "@Dave", "@Eve", "@Frank"]);
    handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap();
    let rules = server.direct_messages("Frank")[1].as_embed().unwrap().clone();
    assert_eq!(rules.title, "Roles");
    assert!(rules.description.contains("**USURPER**"));
    assert_eq!(server.num_direct_messages(), 12);
}

#[async_std::test]
async fn king_announced_after_private_messages() {
    let server = server();
    let ctx = server.context("Bob");
    let tokens = args(&["@Alice", "@Bob", "@Charlie", "@Dave", "@Eve", "@Frank"]);
    handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap();
    let sent = server.sent();
    assert!(matches!(sent.last(), Some(SentMessage::Channel(..))));
    assert_eq!(sent.iter().filter(|m| matches!(m, SentMessage::Channel(..))).count(), 1);
}

#[async_std::test]
async fn excluded_players_never_king() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["@Alice", "@Bob", "@Charlie", "--", "@Dave", "@Eve"]);
    let mut rng = deterministic_rng();
    for _ in 0..50 {
        let report = handle_new_game(&server, &ctx, &tokens, &mut rng).await.unwrap();
        let king = &report.assignment.king().display_name;
        assert!(["Alice", "Bob", "Charlie"].contains(&king.as_str()), "{king}");
    }
}

#[async_std::test]
async fn shorthand_without_new() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["<@2>", "<@3>", "<@4>", "<@5>", "<@6>"]);
    let outcome = handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap();
    assert!(matches!(outcome, CommandOutcome::GameStarted(_)));
    assert!(server.direct_messages("Alice").is_empty());
    assert_eq!(server.direct_messages("Bob").len(), 2);
    assert_eq!(server.resolved_tokens().into_iter().sorted().collect_vec(), tokens);
}

#[async_std::test]
async fn too_few_players() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["@Alice", "@Bob", "@Charlie", "@Dave"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::InvalidPlayerCount(4));
    assert_eq!(server.num_direct_messages(), 0);
    assert!(server.resolved_tokens().is_empty());
    assert_eq!(
        text(&server.channel_messages()[0]),
        "**ERROR**! Invalid number of players: 4. Kingdoms can only be played with 5 or 6 players."
    );
}

#[async_std::test]
async fn separator_does_not_count_as_player() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["@Alice", "@Bob", "@Charlie", "--", "@Dave", "@Eve", "@Frank", "@Grace"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::InvalidPlayerCount(7));
}

#[async_std::test]
async fn unknown_users() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["@Alice", "@Bob", "@Mallory", "@Dave", "@Eve"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::UnknownUsers(vec!["@Mallory".to_owned()]));
    assert_eq!(server.num_direct_messages(), 0);
    assert_eq!(server.channel_messages(), vec![OutgoingMessage::text(
        "Invalid users specified: @Mallory. \
        Please specify discord users on this server, using the `@User` syntax"
    )]);
}

#[async_std::test]
async fn each_token_resolved_once() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["new", "@Alice", "@Bob", "--", "@Charlie", "@Dave", "@Eve"]);
    handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap();
    assert_eq!(
        server.resolved_tokens().into_iter().sorted().collect_vec(),
        args(&["@Alice", "@Bob", "@Charlie", "@Dave", "@Eve"])
    );
}

#[async_std::test]
async fn duplicate_players() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["@Alice", "@Bob", "@Charlie", "@Dave", "<@1>"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::DuplicatePlayers(vec!["Alice".to_owned()]));
    assert_eq!(server.num_direct_messages(), 0);
}

#[async_std::test]
async fn separator_edge_cases() {
    let server = server();
    let ctx = server.context("Alice");
    let mut rng = deterministic_rng();

    let tokens = args(&["--", "@Alice", "@Bob", "@Charlie", "@Dave", "@Eve"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut rng).await.unwrap_err();
    assert_eq!(err, KingdomsError::NoEligibleKing);

    let tokens = args(&["@Alice", "--", "@Bob", "@Charlie", "--", "@Dave", "@Eve"]);
    let err = handle_new_game(&server, &ctx, &tokens, &mut rng).await.unwrap_err();
    assert_eq!(err, KingdomsError::MultipleSeparators);

    let tokens = args(&["@Alice", "@Bob", "@Charlie", "@Dave", "@Eve", "--"]);
    let report = handle_new_game(&server, &ctx, &tokens, &mut rng).await.unwrap();
    assert_eq!(report.assignment.len(), 5);

    assert_eq!(server.num_direct_messages(), 10);
}

#[async_std::test]
async fn blocked_direct_messages() {
    let mut server = server();
    server.block_direct_messages("Charlie");
    let ctx = server.context("Alice");
    let tokens = args(&["new", "@Alice", "@Bob", "@Charlie", "@Dave", "@Eve", "@Frank"]);
    let report = handle_new_game(&server, &ctx, &tokens[1..], &mut deterministic_rng())
        .await
        .unwrap();
    assert_eq!(report.undelivered, vec![server.member("Charlie")]);
    assert_eq!(server.num_direct_messages(), 10);
    assert!(report.assignment.role_of(&server.member("Charlie")).is_some());

    let channel = server.channel_messages();
    assert_eq!(channel.len(), 2);
    assert!(text(&channel[0]).ends_with("is the King! Long live the King!"));
    assert!(text(&channel[1]).contains("<@3>"));
}

#[async_std::test]
async fn empty_command() {
    let server = server();
    let ctx = server.context("Alice");
    let err = handle_command(&server, &ctx, &[], &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::UnrecognizedCommand);
    assert_eq!(server.sent(), vec![SentMessage::Channel(
        "#general".to_owned(),
        OutgoingMessage::text(ERROR_MESSAGE)
    )]);
}

#[async_std::test]
async fn unrecognized_command() {
    let server = server();
    let ctx = server.context("Alice");
    let tokens = args(&["start", "@Alice"]);
    let err = handle_command(&server, &ctx, &tokens, &mut deterministic_rng()).await.unwrap_err();
    assert_eq!(err, KingdomsError::UnrecognizedCommand);
    assert_eq!(server.num_direct_messages(), 0);
    assert_eq!(text(&server.channel_messages()[0]), ERROR_MESSAGE);
}

#[async_std::test]
async fn about() {
    let server = server();
    let ctx = server.context("Dave");
    let outcome =
        handle_command(&server, &ctx, &args(&["ABOUT"]), &mut deterministic_rng()).await.unwrap();
    assert!(matches!(outcome, CommandOutcome::AboutSent));
    assert!(server.channel_messages().is_empty());
    assert_eq!(server.direct_messages("Dave"), vec![OutgoingMessage::text(ABOUT_TEXT)]);
    assert_eq!(server.num_direct_messages(), 1);
}
