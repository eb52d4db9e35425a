use indoc::indoc;
use itertools::Itertools;

use crate::role::Role;


pub const MIN_PLAYERS: usize = 5;
pub const MAX_PLAYERS: usize = 6;

pub const COMMAND_NAME: &str = "!kingdoms";

// A macro rather than a const so that `concat!` can build on it.
macro_rules! help_message {
    () => {
        r#"Please use "!kingdoms about" for more information"#
    };
}

pub const HELP_MESSAGE: &str = help_message!();
pub const ERROR_MESSAGE: &str = concat!("Invalid command specified. ", help_message!());

pub const ABOUT_TEXT: &str = indoc! {"
    Kingdoms is an EDH variant based on hidden roles, intended to be played with 5 or 6 players.
    Games work best when players use decks that can interact with, and deal damage to, individual players.
    Decks which win through combo, or decks which shut down combat, are not encouraged.

    To create a new game, use `!kingdoms new <players>`
    i.e `!kingdoms new @player1 @player2 @player3 @player4 @player5`

    If you wish to prevent someone from being king, you can use the alternate syntax:
    `!kingdoms new <eligible king players> -- <non-king players>`
    i.e. `!kingdoms new @player2 @player3 @player4 -- @player1 @player5`
    would ensure that both player1 and player5 are not king
"};

pub const RULES_TITLE: &str = "Roles";

// Lists the roles that take part in the game, each with its goal. Every player receives this
// next to their own role.
pub fn rules_summary(roles: impl IntoIterator<Item = Role>) -> String {
    roles
        .into_iter()
        .sorted()
        .dedup()
        .map(|role| format!("**{role}**: {}", role.goal()))
        .join("\n\n")
}

pub fn king_announcement(king_mention: &str) -> String {
    format!("{king_mention} is the King! Long live the King!")
}
