//! NPC conversation tracking.
//!
//! A nested sub-state with its own start/message/end lifecycle, coexisting
//! with (but independent of) the goal tracker. Only one conversation is
//! tracked at a time; the engine never overlaps two conversations for one
//! agent.

use wonderland_protocol::ConversationMessage;

/// Tracks the active NPC dialogue, if any.
///
/// Messages accumulate only while a conversation is open; the message list
/// cannot exist without one, so lines received while inactive have nowhere
/// to go and are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ConversationTracker {
    #[default]
    Inactive,
    Active {
        npc_name: String,
        npc_title: Option<String>,
        messages: Vec<ConversationMessage>,
    },
}

impl ConversationTracker {
    /// Open a conversation with an empty message list.
    ///
    /// A start while one is already active replaces the prior
    /// conversation's state.
    pub fn start(&mut self, npc_name: impl Into<String>, npc_title: Option<String>) {
        let npc_name = npc_name.into();
        if let ConversationTracker::Active {
            npc_name: prior, ..
        } = self
        {
            tracing::warn!(
                "Conversation with {} replaced by new conversation with {}",
                prior,
                npc_name
            );
        }
        *self = ConversationTracker::Active {
            npc_name,
            npc_title,
            messages: Vec::new(),
        };
    }

    /// Append a line to the active conversation.
    ///
    /// Returns false (and drops the line) when no conversation is open:
    /// it cannot belong to a conversation that is already closed from the
    /// client's point of view.
    pub fn push_message(&mut self, message: ConversationMessage) -> bool {
        match self {
            ConversationTracker::Active { messages, .. } => {
                messages.push(message);
                true
            }
            ConversationTracker::Inactive => {
                tracing::warn!(
                    "Dropping conversation line from {}: no conversation is active",
                    message.speaker
                );
                false
            }
        }
    }

    /// Close the conversation, clearing its message list.
    ///
    /// Returns false when no conversation was open.
    pub fn end(&mut self) -> bool {
        match self {
            ConversationTracker::Active { .. } => {
                *self = ConversationTracker::Inactive;
                true
            }
            ConversationTracker::Inactive => false,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ConversationTracker::Active { .. })
    }

    pub fn npc_name(&self) -> Option<&str> {
        match self {
            ConversationTracker::Active { npc_name, .. } => Some(npc_name),
            ConversationTracker::Inactive => None,
        }
    }

    pub fn npc_title(&self) -> Option<&str> {
        match self {
            ConversationTracker::Active { npc_title, .. } => npc_title.as_deref(),
            ConversationTracker::Inactive => None,
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        match self {
            ConversationTracker::Active { messages, .. } => messages,
            ConversationTracker::Inactive => &[],
        }
    }
}
