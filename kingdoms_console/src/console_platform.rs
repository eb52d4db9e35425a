// A local stand-in for the chat server: members come from the config file, the channel is
// stdin/stdout and direct messages are printed with the recipient's name.

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use console::style;
use kingdoms::message::{Embed, OutgoingMessage};
use kingdoms::platform::{ChatPlatform, CommandContext, DeliveryError, Participant, UserId};
use lazy_static::lazy_static;
use log::info;
use regex_lite::Regex;

use crate::bot_config::BotConfig;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MemberRef<'a> {
    Id(UserId),
    Name(&'a str),
}

// Accepts `<@id>`, `<@!id>`, a bare numeric id, or a name with an optional leading `@`.
pub fn parse_member_ref(token: &str) -> MemberRef<'_> {
    lazy_static! {
        static ref MENTION_RE: Regex = Regex::new(r"^<@!?([0-9]+)>$").unwrap();
    }
    let id = match MENTION_RE.captures(token) {
        Some(caps) => caps[1].parse().ok(),
        None => token.parse().ok(),
    };
    match id {
        Some(id) => MemberRef::Id(UserId(id)),
        None => MemberRef::Name(token.strip_prefix('@').unwrap_or(token)),
    }
}

struct Member {
    participant: Participant,
    accepts_direct_messages: bool,
}

pub struct ConsolePlatform<W: Write + Send> {
    members: Vec<Member>,
    out: Mutex<W>,
}

impl<W: Write + Send> ConsolePlatform<W> {
    pub fn connect(token: &str, config: &BotConfig, out: W) -> anyhow::Result<Self> {
        anyhow::ensure!(!token.is_empty(), "Cannot connect without a token.");
        let members = config
            .members
            .iter()
            .map(|m| Member {
                participant: Participant::new(UserId(m.id), m.name.clone()),
                accepts_direct_messages: m.accepts_direct_messages,
            })
            .collect::<Vec<_>>();
        info!("Connected to {} with {} members", config.channel, members.len());
        Ok(ConsolePlatform { members, out: Mutex::new(out) })
    }

    pub fn member_by_name(&self, name: &str) -> Option<&Participant> {
        self.find(MemberRef::Name(name)).map(|m| &m.participant)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W { self.out.into_inner().unwrap() }

    fn find(&self, member_ref: MemberRef<'_>) -> Option<&Member> {
        self.members.iter().find(|m| match member_ref {
            MemberRef::Id(id) => m.participant.id == id,
            MemberRef::Name(name) => m.participant.display_name.eq_ignore_ascii_case(name),
        })
    }

    fn write(&self, header: String, message: &OutgoingMessage) -> Result<(), DeliveryError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| DeliveryError::Unavailable("output is poisoned".to_owned()))?;
        writeln!(out, "{header}\n{}", render(message))
            .and_then(|()| out.flush())
            .map_err(|err| DeliveryError::Unavailable(err.to_string()))
    }
}

fn render(message: &OutgoingMessage) -> String {
    match message {
        OutgoingMessage::Text(text) => text.clone(),
        OutgoingMessage::Embed(Embed { title, description, color, thumbnail }) => {
            let mut lines = vec![style(title).bold().to_string()];
            if let Some(color) = color {
                lines.push(format!("color: #{color:06X}"));
            }
            if let Some(thumbnail) = thumbnail {
                lines.push(format!("icon: {thumbnail}"));
            }
            lines.push(description.clone());
            lines.join("\n")
        }
    }
}

#[async_trait]
impl<W: Write + Send> ChatPlatform for ConsolePlatform<W> {
    async fn resolve_member(&self, _ctx: &CommandContext, token: &str) -> Option<Participant> {
        self.find(parse_member_ref(token)).map(|m| m.participant.clone())
    }

    async fn send_direct(
        &self, recipient: &Participant, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError> {
        let member = self
            .find(MemberRef::Id(recipient.id))
            .ok_or_else(|| DeliveryError::Unavailable(format!("{recipient} left the server")))?;
        if !member.accepts_direct_messages {
            return Err(DeliveryError::Blocked);
        }
        let header = style(format!("[DM to {}]", recipient.display_name)).cyan().to_string();
        self.write(header, message)
    }

    async fn send_to_channel(
        &self, ctx: &CommandContext, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError> {
        let header = style(format!("[{}]", ctx.channel)).green().to_string();
        self.write(header, message)
    }
}


#[cfg(test)]
mod tests {
    use indoc::indoc;
    use kingdoms::message::role_reveal;
    use kingdoms::role::Role;

    use super::*;
    use crate::bot_config::parse_config;

    fn platform() -> ConsolePlatform<Vec<u8>> {
        let config = parse_config(indoc! {"
            default_invoker: Alice
            members:
              - id: 101
                name: Alice
              - id: 102
                name: Bob
                accepts_direct_messages: false
        "})
        .unwrap();
        ConsolePlatform::connect("token", &config, Vec::new()).unwrap()
    }

    #[test]
    fn member_refs() {
        assert_eq!(parse_member_ref("<@101>"), MemberRef::Id(UserId(101)));
        assert_eq!(parse_member_ref("<@!101>"), MemberRef::Id(UserId(101)));
        assert_eq!(parse_member_ref("101"), MemberRef::Id(UserId(101)));
        assert_eq!(parse_member_ref("@Alice"), MemberRef::Name("Alice"));
        assert_eq!(parse_member_ref("Alice"), MemberRef::Name("Alice"));
        assert_eq!(parse_member_ref("<@Alice>"), MemberRef::Name("<@Alice>"));
    }

    #[async_std::test]
    async fn resolve() {
        let platform = platform();
        let ctx = CommandContext {
            channel: "#kingdoms".to_owned(),
            invoker: platform.member_by_name("alice").unwrap().clone(),
        };
        assert_eq!(platform.resolve_member(&ctx, "<@102>").await.unwrap().display_name, "Bob");
        assert_eq!(platform.resolve_member(&ctx, "@bob").await.unwrap().id, UserId(102));
        assert!(platform.resolve_member(&ctx, "<@103>").await.is_none());
        assert!(platform.resolve_member(&ctx, "@Mallory").await.is_none());
    }

    #[async_std::test]
    async fn direct_messages() {
        let platform = platform();
        let alice = platform.member_by_name("Alice").unwrap().clone();
        let bob = platform.member_by_name("Bob").unwrap().clone();
        platform.send_direct(&alice, &role_reveal(Role::Knight)).await.unwrap();
        assert_eq!(
            platform.send_direct(&bob, &role_reveal(Role::King)).await,
            Err(DeliveryError::Blocked)
        );
        let output = String::from_utf8(platform.into_output()).unwrap();
        assert!(output.contains("[DM to Alice]"));
        assert!(output.contains("color: #00FF00"));
        assert!(output.contains("You are the knight!"));
        assert!(!output.contains("Bob"));
    }
}
