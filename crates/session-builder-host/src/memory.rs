//! In-memory host
//!
//! Keeps the open documents in a list and answers prompts from a scripted
//! queue. Every interaction is recorded so callers can inspect it afterwards.

use parking_lot::Mutex;
use std::collections::{HashSet, VecDeque};

use crate::document::OpenDocument;
use crate::editor::Editor;
use crate::error::HostError;
use crate::prompt::{InputRequest, Message, MessageLevel, PickRequest, Prompter};
use crate::Result;

/// Scripted reply to the next prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Input(Option<String>),
    Pick(Option<usize>),
    Confirm(bool),
}

#[derive(Default)]
pub struct MemoryHost {
    documents: Mutex<Vec<OpenDocument>>,
    unopenable: Mutex<HashSet<String>>,
    opened: Mutex<Vec<String>>,
    answers: Mutex<VecDeque<Answer>>,
    prompts: Mutex<Vec<String>>,
    messages: Mutex<Vec<Message>>,
    close_all_calls: Mutex<usize>,
    save_all_calls: Mutex<usize>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<OpenDocument>) -> Self {
        let host = Self::new();
        *host.documents.lock() = documents;
        host
    }

    /// Queue replies for upcoming prompts, in order
    pub fn answer(&self, answers: impl IntoIterator<Item = Answer>) {
        self.answers.lock().extend(answers);
    }

    /// Make `open_document` fail for `path`, as if the file had been deleted
    pub fn make_unopenable(&self, path: impl Into<String>) {
        self.unopenable.lock().insert(path.into());
    }

    pub fn set_documents(&self, documents: Vec<OpenDocument>) {
        *self.documents.lock() = documents;
    }

    /// Paths passed to successful `open_document` calls
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }

    /// Prompt and placeholder texts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn messages_at(&self, level: MessageLevel) -> Vec<String> {
        self.messages
            .lock()
            .iter()
            .filter(|m| m.level == level)
            .map(|m| m.text.clone())
            .collect()
    }

    pub fn close_all_calls(&self) -> usize {
        *self.close_all_calls.lock()
    }

    pub fn save_all_calls(&self) -> usize {
        *self.save_all_calls.lock()
    }

    /// Scripted replies nobody asked for
    pub fn pending_answers(&self) -> usize {
        self.answers.lock().len()
    }

    fn next_answer(&self, asked: &str) -> Option<Answer> {
        self.prompts.lock().push(asked.to_string());
        let answer = self.answers.lock().pop_front();
        if answer.is_none() {
            tracing::debug!(prompt = %asked, "No scripted answer, treating as dismissed");
        }
        answer
    }
}

impl Editor for MemoryHost {
    fn open_documents(&self) -> Vec<OpenDocument> {
        self.documents.lock().clone()
    }

    fn open_document(&self, path: &str) -> Result<()> {
        if self.unopenable.lock().contains(path) {
            return Err(HostError::OpenFailed {
                path: path.to_string(),
                reason: "file does not exist".to_string(),
            });
        }

        let document = OpenDocument::file(path)?;
        self.documents.lock().push(document);
        self.opened.lock().push(path.to_string());
        Ok(())
    }

    fn close_all(&self) -> Result<()> {
        self.documents.lock().clear();
        *self.close_all_calls.lock() += 1;
        Ok(())
    }

    fn save_all(&self) -> Result<()> {
        for document in self.documents.lock().iter_mut() {
            if !document.is_untitled {
                document.is_dirty = false;
            }
        }
        *self.save_all_calls.lock() += 1;
        Ok(())
    }
}

impl Prompter for MemoryHost {
    fn input(&self, request: &InputRequest) -> Option<String> {
        match self.next_answer(&request.prompt)? {
            Answer::Input(value) => value,
            other => {
                tracing::warn!(?other, prompt = %request.prompt, "Scripted answer does not fit an input box");
                None
            }
        }
    }

    fn pick(&self, request: &PickRequest) -> Option<usize> {
        match self.next_answer(&request.placeholder)? {
            Answer::Pick(index) => index.filter(|i| *i < request.options.len()),
            other => {
                tracing::warn!(?other, prompt = %request.placeholder, "Scripted answer does not fit a picker");
                None
            }
        }
    }

    fn confirm(&self, message: &str, action: &str) -> bool {
        match self.next_answer(message) {
            Some(Answer::Confirm(confirmed)) => confirmed,
            Some(other) => {
                tracing::warn!(?other, prompt = %message, action, "Scripted answer does not fit a confirmation");
                false
            }
            None => false,
        }
    }

    fn notify(&self, message: Message) {
        self.messages.lock().push(message);
    }
}
