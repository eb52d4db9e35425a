// Test utilities shared by unit and integration tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::{Rng, SeedableRng};

use crate::message::OutgoingMessage;
use crate::platform::{ChatPlatform, CommandContext, DeliveryError, Participant, UserId};


// In theory random tests verify statistical properties that should always hold, but let's fix
// the seed to avoid sporadic failures.
pub fn deterministic_rng() -> impl Rng { rand::rngs::StdRng::from_seed([0; 32]) }

pub fn sample_player_names() -> [&'static str; 6] {
    ["Alice", "Bob", "Charlie", "Dave", "Eve", "Frank"]
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum SentMessage {
    Direct(UserId, OutgoingMessage),
    Channel(String, OutgoingMessage),
}

// In-memory server. Members are addressed as `@Name` or `<@id>`; ids are assigned in order
// starting from 1. Everything sent is recorded.
pub struct FakePlatform {
    members: Vec<Participant>,
    blocked: HashSet<UserId>,
    sent: Mutex<Vec<SentMessage>>,
    resolved_tokens: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new(names: &[&str]) -> Self {
        let members = names
            .iter()
            .enumerate()
            .map(|(index, name)| Participant::new(UserId(index as u64 + 1), *name))
            .collect();
        FakePlatform {
            members,
            blocked: HashSet::new(),
            sent: Mutex::new(Vec::new()),
            resolved_tokens: Mutex::new(Vec::new()),
        }
    }

    // Direct messages to this member will fail.
    pub fn block_direct_messages(&mut self, name: &str) {
        let id = self.member(name).id;
        self.blocked.insert(id);
    }

    pub fn member(&self, name: &str) -> Participant {
        self.members
            .iter()
            .find(|m| m.display_name == name)
            .cloned()
            .unwrap_or_else(|| panic!("No member named {name}"))
    }

    pub fn context(&self, invoker: &str) -> CommandContext {
        CommandContext {
            channel: "#general".to_owned(),
            invoker: self.member(invoker),
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> { self.sent.lock().unwrap().clone() }

    pub fn direct_messages(&self, name: &str) -> Vec<OutgoingMessage> {
        let id = self.member(name).id;
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMessage::Direct(to, message) if to == id => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn num_direct_messages(&self) -> usize {
        self.sent().iter().filter(|m| matches!(m, SentMessage::Direct(..))).count()
    }

    pub fn channel_messages(&self) -> Vec<OutgoingMessage> {
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMessage::Channel(_, message) => Some(message),
                SentMessage::Direct(..) => None,
            })
            .collect()
    }

    pub fn resolved_tokens(&self) -> Vec<String> { self.resolved_tokens.lock().unwrap().clone() }
}

#[async_trait]
impl ChatPlatform for FakePlatform {
    async fn resolve_member(&self, _ctx: &CommandContext, token: &str) -> Option<Participant> {
        self.resolved_tokens.lock().unwrap().push(token.to_owned());
        self.members
            .iter()
            .find(|m| {
                m.mention() == token || token.strip_prefix('@') == Some(m.display_name.as_str())
            })
            .cloned()
    }

    async fn send_direct(
        &self, recipient: &Participant, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError> {
        if self.blocked.contains(&recipient.id) {
            return Err(DeliveryError::Blocked);
        }
        self.sent.lock().unwrap().push(SentMessage::Direct(recipient.id, message.clone()));
        Ok(())
    }

    async fn send_to_channel(
        &self, ctx: &CommandContext, message: &OutgoingMessage,
    ) -> Result<(), DeliveryError> {
        let sent = SentMessage::Channel(ctx.channel.clone(), message.clone());
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}
