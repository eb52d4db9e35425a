use crate::error::KingdomsError;
use crate::rules::COMMAND_NAME;


// Separates players who may become King (before) from those who may not (after).
pub const SEPARATOR: &str = "--";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Subcommand<'a> {
    Empty,
    About,
    // Explicit `new`: the rest are player tokens.
    New(&'a [String]),
    // Anything else. Treated as a shorthand for `new` if the first token is a server member.
    Other(&'a [String]),
}

// Returns the arguments after the command word, or `None` if the message is not addressed to
// the bot.
pub fn parse_invocation(content: &str) -> Option<Vec<String>> {
    let mut words = content.split_whitespace();
    if words.next()? != COMMAND_NAME {
        return None;
    }
    Some(words.map(str::to_owned).collect())
}

pub fn classify(args: &[String]) -> Subcommand<'_> {
    let Some(first) = args.first() else {
        return Subcommand::Empty;
    };
    if first.eq_ignore_ascii_case("about") {
        Subcommand::About
    } else if first.eq_ignore_ascii_case("new") {
        Subcommand::New(&args[1..])
    } else {
        Subcommand::Other(args)
    }
}

pub fn count_players(tokens: &[String]) -> usize {
    tokens.iter().filter(|t| *t != SEPARATOR).count()
}

// Splits player tokens into King-eligible and excluded ones.
pub fn split_players(tokens: &[String]) -> Result<(&[String], &[String]), KingdomsError> {
    let mut separators = tokens.iter().enumerate().filter(|(_, t)| *t == SEPARATOR);
    match (separators.next(), separators.next()) {
        (None, _) => Ok((tokens, &tokens[tokens.len()..])),
        (Some((index, _)), None) => Ok((&tokens[..index], &tokens[index + 1..])),
        (Some(_), Some(_)) => Err(KingdomsError::MultipleSeparators),
    }
}
