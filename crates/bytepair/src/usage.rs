//! # Usage Estimation
//!
//! Token counting for chat-style requests, used to estimate request cost.
//!
//! A message is counted as its role name immediately followed by its content;
//! a conversation as the concatenation of its messages, in order.

use crate::{errors::BpeResult, tokenizer::Gpt2Tokenizer, types::TokenType};

/// The author role of a chat message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::EnumIter,
    strum::Display,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MessageRole {
    /// Instructions to the model.
    System,

    /// The end user.
    User,

    /// The model.
    Assistant,

    /// A tool result.
    Tool,
}

impl MessageRole {
    /// The lowercase role name.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// A role-tagged chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChatMessage {
    /// The author role.
    pub role: MessageRole,

    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a new message.
    pub fn new<S: Into<String>>(
        role: MessageRole,
        content: S,
    ) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// A [`MessageRole::System`] message.
    pub fn system<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::System, content)
    }

    /// A [`MessageRole::User`] message.
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// A [`MessageRole::Assistant`] message.
    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::Assistant, content)
    }

    /// A [`MessageRole::Tool`] message.
    pub fn tool<S: Into<String>>(content: S) -> Self {
        Self::new(MessageRole::Tool, content)
    }
}

/// Count the tokens of a conversation.
///
/// ## Returns
/// The token count of the concatenation of ``role + content`` over `messages`.
pub fn count_message_tokens<T: TokenType>(
    tokenizer: &Gpt2Tokenizer<T>,
    messages: &[ChatMessage],
) -> BpeResult<usize> {
    let mut text = String::new();
    for message in messages {
        text.push_str(message.role.as_str());
        text.push_str(&message.content);
    }
    tokenizer.token_count(&text)
}

/// Count the tokens of the concatenation of `texts`.
pub fn count_text_tokens<T, S>(
    tokenizer: &Gpt2Tokenizer<T>,
    texts: &[S],
) -> BpeResult<usize>
where
    T: TokenType,
    S: AsRef<str>,
{
    let text: String = texts.iter().map(AsRef::as_ref).collect();
    tokenizer.token_count(&text)
}
