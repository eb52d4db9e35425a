use std::fmt;

use itertools::Itertools;

use crate::rules::{ERROR_MESSAGE, MAX_PLAYERS, MIN_PLAYERS};


// Errors are shown to the user verbatim, so `Display` must not expose anything beyond the
// offending input.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum KingdomsError {
    InvalidPlayerCount(usize),
    UnknownUsers(Vec<String>),
    UnrecognizedCommand,
    NoEligibleKing,
    MultipleSeparators,
    DuplicatePlayers(Vec<String>),
}

impl fmt::Display for KingdomsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KingdomsError::InvalidPlayerCount(num_players) => write!(
                f,
                "**ERROR**! Invalid number of players: {num_players}. \
                Kingdoms can only be played with {MIN_PLAYERS} or {MAX_PLAYERS} players."
            ),
            KingdomsError::UnknownUsers(tokens) => write!(
                f,
                "Invalid users specified: {}. \
                Please specify discord users on this server, using the `@User` syntax",
                tokens.iter().join(", ")
            ),
            KingdomsError::UnrecognizedCommand => write!(f, "{ERROR_MESSAGE}"),
            KingdomsError::NoEligibleKing => write!(
                f,
                "**ERROR**! At least one player must be listed before `--` to be eligible for King."
            ),
            KingdomsError::MultipleSeparators => {
                write!(f, "**ERROR**! `--` can be used at most once.")
            }
            KingdomsError::DuplicatePlayers(names) => write!(
                f,
                "**ERROR**! Each player can only be listed once: {}.",
                names.iter().join(", ")
            ),
        }
    }
}

impl std::error::Error for KingdomsError {}
