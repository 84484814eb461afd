//! Guided conversations that end in a journal entry.
//!
//! The chat provider is a trait: messages in, one completion out. Each guided
//! mode primes the model to finish with a fenced JSON record, which the
//! content codec turns into a structured entry body. Replies without a usable
//! record are kept as prose.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{self, StructuredContent};
use crate::error::{JournalError, Result};
use crate::storage::{EntryDraft, EntryKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// A chat-completion backend.
pub trait ChatCompletion {
    /// Complete the conversation, returning the assistant's text.
    ///
    /// # Errors
    ///
    /// Implementations should report provider failures as
    /// `JournalError::Chat`.
    fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// The guided flows a user can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GuidedMode {
    Story,
    SideQuest,
    ActionChallenge,
    JournalChallenge,
}

impl GuidedMode {
    pub const ALL: [GuidedMode; 4] = [
        GuidedMode::Story,
        GuidedMode::SideQuest,
        GuidedMode::ActionChallenge,
        GuidedMode::JournalChallenge,
    ];

    /// Entry kind saved at the end of this flow.
    pub fn entry_kind(&self) -> EntryKind {
        match self {
            GuidedMode::Story => EntryKind::Story,
            GuidedMode::SideQuest => EntryKind::SideQuest,
            GuidedMode::ActionChallenge => EntryKind::Action,
            GuidedMode::JournalChallenge => EntryKind::Journal,
        }
    }

    pub fn system_prompt(&self) -> String {
        let (role, fields) = match self {
            GuidedMode::Story => (
                "You help the user turn a moment from their life into a short story \
                 about their growth.",
                r#""title", "content""#,
            ),
            GuidedMode::SideQuest => (
                "You design a small real-world side quest that stretches the user a \
                 little outside their comfort zone.",
                r#""title", "content", "goal", "xp""#,
            ),
            GuidedMode::ActionChallenge => (
                "You turn what the user wants to change into one concrete action they \
                 can take today.",
                r#""title", "content", "goal""#,
            ),
            GuidedMode::JournalChallenge => (
                "You ask thoughtful follow-up questions and reflect back what the user \
                 shares about their day.",
                r#""title", "summary""#,
            ),
        };
        format!(
            "{role} When you are ready to save, answer with a single ```json fenced \
             block containing an object with the fields {fields} and \"type\": \"{kind}\".",
            kind = self.entry_kind()
        )
    }
}

impl fmt::Display for GuidedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GuidedMode::Story => "story",
            GuidedMode::SideQuest => "side-quest",
            GuidedMode::ActionChallenge => "action-challenge",
            GuidedMode::JournalChallenge => "journal-challenge",
        };
        f.write_str(name)
    }
}

/// An assistant reply and the record it carried, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub structured: Option<StructuredContent>,
}

/// Message history for one guided flow.
#[derive(Debug, Clone)]
pub struct Conversation {
    mode: GuidedMode,
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation primed with the mode's system prompt.
    pub fn new(mode: GuidedMode) -> Self {
        Self {
            mode,
            messages: vec![ChatMessage::system(mode.system_prompt())],
        }
    }

    pub fn mode(&self) -> GuidedMode {
        self.mode
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    /// Ask the provider for the next assistant turn and record it.
    ///
    /// # Errors
    ///
    /// Returns the provider's error; the history is left unchanged.
    pub fn reply<P: ChatCompletion + ?Sized>(&mut self, provider: &P) -> Result<Reply> {
        let text = provider.complete(&self.messages)?;
        let structured = codec::parse(&text);
        debug!(
            mode = %self.mode,
            structured = structured.is_some(),
            "assistant replied"
        );
        self.messages.push(ChatMessage::assistant(text.clone()));
        Ok(Reply { text, structured })
    }

    fn last_assistant(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == ChatRole::Assistant)
            .map(|message| message.content.as_str())
    }

    /// Turn the latest assistant reply into an entry draft.
    ///
    /// A reply carrying a record becomes a structured body with `type` filled
    /// in from the mode when the model left it out. Anything else is saved as
    /// prose.
    ///
    /// # Errors
    ///
    /// Returns `JournalError::Validation` if the assistant has not replied yet.
    pub fn draft(&self, prompt: impl Into<String>) -> Result<EntryDraft> {
        let text = self.last_assistant().ok_or_else(|| {
            JournalError::Validation("Conversation has no assistant reply yet".to_string())
        })?;
        let kind = self.mode.entry_kind();

        Ok(match codec::parse(text) {
            Some(mut content) => {
                content.ensure_kind(kind);
                EntryDraft::structured(prompt, content, kind)
            }
            None => EntryDraft::text(prompt, text, kind),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::storage::EntryBody;

    /// Replays canned completions and records what it was sent.
    struct ScriptedProvider {
        replies: RefCell<Vec<Result<String>>>,
        seen: RefCell<Vec<usize>>,
    }

    impl ScriptedProvider {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: RefCell::new(replies),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ChatCompletion for ScriptedProvider {
        fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            self.seen.borrow_mut().push(messages.len());
            self.replies.borrow_mut().remove(0)
        }
    }

    #[test]
    fn test_new_conversation_has_system_prompt() {
        let conversation = Conversation::new(GuidedMode::SideQuest);
        let messages = conversation.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].content.contains("\"type\": \"sideQuest\""));
    }

    #[test]
    fn test_modes_map_to_entry_kinds() {
        assert_eq!(GuidedMode::Story.entry_kind(), EntryKind::Story);
        assert_eq!(GuidedMode::SideQuest.entry_kind(), EntryKind::SideQuest);
        assert_eq!(GuidedMode::ActionChallenge.entry_kind(), EntryKind::Action);
        assert_eq!(GuidedMode::JournalChallenge.entry_kind(), EntryKind::Journal);
        for mode in GuidedMode::ALL {
            assert!(mode.system_prompt().contains("```json"));
        }
    }

    #[test]
    fn test_reply_parses_structured_record() {
        let provider = ScriptedProvider::new(vec![Ok(
            "Here you go:\n```json\n{\"title\": \"Talk to a stranger\", \"xp\": 50}\n```"
                .to_string(),
        )]);
        let mut conversation = Conversation::new(GuidedMode::SideQuest);
        conversation.push_user("I want to be braver");

        let reply = conversation.reply(&provider).unwrap();
        let structured = reply.structured.unwrap();
        assert_eq!(structured.title(), Some("Talk to a stranger"));
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(*provider.seen.borrow(), vec![2]);
    }

    #[test]
    fn test_malformed_reply_has_no_record() {
        let provider = ScriptedProvider::new(vec![Ok("```json\n{not json}\n```".to_string())]);
        let mut conversation = Conversation::new(GuidedMode::Story);
        conversation.push_user("hi");

        let reply = conversation.reply(&provider).unwrap();
        assert!(reply.structured.is_none());
        assert_eq!(reply.text, "```json\n{not json}\n```");
    }

    #[test]
    fn test_provider_error_leaves_history_unchanged() {
        let provider =
            ScriptedProvider::new(vec![Err(JournalError::Chat("rate limited".to_string()))]);
        let mut conversation = Conversation::new(GuidedMode::Story);
        conversation.push_user("hi");

        assert!(matches!(
            conversation.reply(&provider),
            Err(JournalError::Chat(_))
        ));
        assert_eq!(conversation.messages().len(), 2);
    }

    #[test]
    fn test_draft_fills_missing_type_from_mode() {
        let provider = ScriptedProvider::new(vec![Ok(
            "```json\n{\"title\": \"Ten push-ups\", \"goal\": \"Move daily\"}\n```".to_string(),
        )]);
        let mut conversation = Conversation::new(GuidedMode::ActionChallenge);
        conversation.push_user("I sit too much");
        conversation.reply(&provider).unwrap();

        let draft = conversation.draft("What will you change?").unwrap();
        assert_eq!(draft.kind, EntryKind::Action);
        match draft.body {
            EntryBody::Structured(content) => {
                assert_eq!(content.kind(), Some(EntryKind::Action));
                assert_eq!(content.title(), Some("Ten push-ups"));
            }
            other => panic!("expected structured body, got {:?}", other),
        }
    }

    #[test]
    fn test_draft_keeps_payload_type() {
        let provider = ScriptedProvider::new(vec![Ok(
            "```json\n{\"title\": \"A tale\", \"type\": \"story\"}\n```".to_string(),
        )]);
        let mut conversation = Conversation::new(GuidedMode::JournalChallenge);
        conversation.push_user("tell me a story");
        conversation.reply(&provider).unwrap();

        let draft = conversation.draft("").unwrap();
        match draft.body {
            EntryBody::Structured(content) => assert_eq!(content.kind(), Some(EntryKind::Story)),
            other => panic!("expected structured body, got {:?}", other),
        }
    }

    #[test]
    fn test_draft_from_prose_reply() {
        let provider = ScriptedProvider::new(vec![Ok("That sounds like a good day.".to_string())]);
        let mut conversation = Conversation::new(GuidedMode::JournalChallenge);
        conversation.push_user("Today was fine");
        conversation.reply(&provider).unwrap();

        let draft = conversation.draft("How was today?").unwrap();
        assert_eq!(
            draft.body,
            EntryBody::Text("That sounds like a good day.".to_string())
        );
        assert_eq!(draft.kind, EntryKind::Journal);
        assert_eq!(draft.prompt, "How was today?");
    }

    #[test]
    fn test_draft_without_reply_fails() {
        let conversation = Conversation::new(GuidedMode::Story);
        assert!(matches!(
            conversation.draft(""),
            Err(JournalError::Validation(_))
        ));
    }

    #[test]
    fn test_chat_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
