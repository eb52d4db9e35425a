// The chat platform as seen by the bot. Everything vendor-specific (gateway connection, mention
// syntax, embed rendering) lives behind `ChatPlatform`.

use std::fmt;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use crate::message::OutgoingMessage;


#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

// A server member taking part in a game. Two participants are the same player iff they have
// the same `id`; display names are not unique.
#[derive(Clone, Debug)]
pub struct Participant {
    pub id: UserId,
    pub display_name: String,
}

impl Participant {
    pub fn new(id: UserId, display_name: impl Into<String>) -> Self {
        Participant { id, display_name: display_name.into() }
    }

    pub fn mention(&self) -> String { format!("<@{}>", self.id) }
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}
impl Eq for Participant {}

impl Hash for Participant {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.display_name) }
}

// Where a command came from.
#[derive(Clone, Debug)]
pub struct CommandContext {
    pub channel: String,
    pub invoker: Participant,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DeliveryError {
    // The recipient doesn't accept direct messages from the bot.
    Blocked,
    Unavailable(String),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeliveryError::Blocked => write!(f, "recipient does not accept direct messages"),
            DeliveryError::Unavailable(reason) => write!(f, "platform unavailable: {reason}"),
        }
    }
}

#[async_trait]
pub trait ChatPlatform: Sync {
    // Returns `None` if `token` does not refer to a member of the server where the command
    // was issued.
    async fn resolve_member(&self, ctx: &CommandContext, token: &str) -> Option<Participant>;

    async fn send_direct(
        &self, recipient: &Participant, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError>;

    async fn send_to_channel(
        &self, ctx: &CommandContext, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError>;
}
