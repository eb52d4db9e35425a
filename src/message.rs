use crate::platform::Participant;
use crate::role::Role;
use crate::rules::{self, RULES_TITLE};


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: Option<u32>,
    pub thumbnail: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OutgoingMessage {
    Text(String),
    Embed(Embed),
}

impl OutgoingMessage {
    pub fn text(text: impl Into<String>) -> Self { OutgoingMessage::Text(text.into()) }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            OutgoingMessage::Text(text) => Some(text),
            OutgoingMessage::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            OutgoingMessage::Text(_) => None,
            OutgoingMessage::Embed(embed) => Some(embed),
        }
    }
}

pub fn role_reveal(role: Role) -> OutgoingMessage {
    let def = role.definition();
    OutgoingMessage::Embed(Embed {
        title: def.title.to_owned(),
        description: def.description.to_owned(),
        color: Some(def.color),
        thumbnail: Some(def.thumbnail.to_owned()),
    })
}

pub fn rules_summary(roles: impl IntoIterator<Item = Role>) -> OutgoingMessage {
    OutgoingMessage::Embed(Embed {
        title: RULES_TITLE.to_owned(),
        description: rules::rules_summary(roles),
        color: None,
        thumbnail: None,
    })
}

pub fn king_announcement(king: &Participant) -> OutgoingMessage {
    OutgoingMessage::Text(rules::king_announcement(&king.mention()))
}

pub fn undelivered_roles(players: &[Participant]) -> OutgoingMessage {
    let mentions: Vec<_> = players.iter().map(Participant::mention).collect();
    OutgoingMessage::Text(format!(
        "Could not send roles to: {}. Please make sure direct messages from server members are enabled.",
        mentions.join(", ")
    ))
}
