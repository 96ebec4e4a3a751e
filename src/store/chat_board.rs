// src/store/chat_board.rs

use std::collections::HashMap;

use crate::{
    models::chat::{ChatLog, ChatMessage, Sender},
    store::PracticeKey,
};

/// Identifies one opening of a chat log. A log that was cleared and opened
/// again gets a new id, so a reply queued for the old log can tell.
pub type ThreadId = u64;

#[derive(Debug)]
struct Thread {
    id: ThreadId,
    log: ChatLog,
}

/// Tutor chats, one per question of a practice set.
#[derive(Debug, Default)]
pub struct ChatBoard {
    logs: HashMap<PracticeKey, HashMap<String, Thread>>,
    opened: ThreadId,
}

impl ChatBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The chat for a question, opened with the greeting if it does not exist yet.
    fn thread_mut(&mut self, key: &PracticeKey, question_id: &str) -> &mut Thread {
        let opened = &mut self.opened;
        self.logs
            .entry(key.clone())
            .or_default()
            .entry(question_id.to_string())
            .or_insert_with(|| {
                *opened += 1;
                Thread {
                    id: *opened,
                    log: ChatLog::new(),
                }
            })
    }

    pub fn messages(&mut self, key: &PracticeKey, question_id: &str) -> Vec<ChatMessage> {
        self.thread_mut(key, question_id).log.messages().to_vec()
    }

    /// Appends a message, opening the chat if needed. Returns the thread the
    /// message landed in.
    pub fn post(
        &mut self,
        key: &PracticeKey,
        question_id: &str,
        sender: Sender,
        text: String,
    ) -> (ThreadId, ChatMessage) {
        let thread = self.thread_mut(key, question_id);
        (thread.id, thread.log.push(sender, text))
    }

    /// Appends a reply only while `thread` is still the open chat for the
    /// question. Never opens a chat.
    pub fn reply(
        &mut self,
        key: &PracticeKey,
        question_id: &str,
        thread: ThreadId,
        sender: Sender,
        text: String,
    ) -> Option<ChatMessage> {
        let current = self.logs.get_mut(key)?.get_mut(question_id)?;
        if current.id != thread {
            return None;
        }
        Some(current.log.push(sender, text))
    }

    /// True while any chat of the practice set is open.
    pub fn has_set(&self, key: &PracticeKey) -> bool {
        self.logs.contains_key(key)
    }

    /// Drops every chat of a practice set. Used after renumbering, when question ids move.
    pub fn clear_set(&mut self, key: &PracticeKey) {
        if self.logs.remove(key).is_some() {
            tracing::debug!("Cleared tutor chats for {:?}", key);
        }
    }

    /// Drops every chat matching `predicate`, e.g. all sets of a removed year.
    pub fn clear_where(&mut self, predicate: impl Fn(&PracticeKey) -> bool) {
        self.logs.retain(|key, _| !predicate(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;

    fn key() -> PracticeKey {
        PracticeKey {
            subject_id: "physics".into(),
            year: "2023".into(),
            question_type: QuestionType::Mcq,
        }
    }

    #[test]
    fn test_chats_are_per_question() {
        let mut board = ChatBoard::new();
        board.post(&key(), "mcq-q1", Sender::User, "hello".into());
        assert_eq!(board.messages(&key(), "mcq-q1").len(), 2);
        assert_eq!(board.messages(&key(), "mcq-q2").len(), 1);
    }

    #[test]
    fn test_clear_set_resets_to_greeting() {
        let mut board = ChatBoard::new();
        board.post(&key(), "mcq-q1", Sender::User, "hello".into());
        board.clear_set(&key());
        assert_eq!(board.messages(&key(), "mcq-q1").len(), 1);
    }

    #[test]
    fn test_reply_after_clear_is_dropped() {
        let mut board = ChatBoard::new();
        let (thread, _) = board.post(&key(), "mcq-q1", Sender::User, "hello".into());
        board.clear_where(|k| k.subject_id == "physics");

        let reply = board.reply(&key(), "mcq-q1", thread, Sender::Ai, "late".into());
        assert!(reply.is_none());
        assert!(!board.has_set(&key()));
    }

    #[test]
    fn test_reply_skips_a_reopened_chat() {
        let mut board = ChatBoard::new();
        let (old, _) = board.post(&key(), "mcq-q1", Sender::User, "first".into());
        board.clear_set(&key());
        let (new, _) = board.post(&key(), "mcq-q1", Sender::User, "second".into());
        assert_ne!(old, new);

        assert!(board.reply(&key(), "mcq-q1", old, Sender::Ai, "late".into()).is_none());
        assert!(board.reply(&key(), "mcq-q1", new, Sender::Ai, "ok".into()).is_some());
        assert_eq!(board.messages(&key(), "mcq-q1").len(), 3);
    }

    #[test]
    fn test_clear_where_matches_subject() {
        let mut board = ChatBoard::new();
        board.post(&key(), "mcq-q1", Sender::User, "hello".into());
        board.clear_where(|k| k.subject_id == "physics");
        assert_eq!(board.messages(&key(), "mcq-q1").len(), 1);
    }
}
