//! Message intake filtering.

use chat_core::{ChatMessage, UserId};

/// Outcome of intake evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intake {
    /// The message addresses the bot; carries the cleaned prompt.
    Accepted { prompt: String },
    /// The message is not for the bot. Nothing is sent back - not even
    /// an error.
    Ignored { reason: &'static str },
}

/// Decides whether an inbound message addresses the bot.
///
/// A message is accepted when its content starts with the bot's mention
/// prefix, or when it is a reply to a bot-authored message. Messages
/// authored by any bot account are rejected unconditionally.
#[derive(Debug, Clone)]
pub struct IntakeFilter {
    bot_id: UserId,
    mention_prefix: String,
}

impl IntakeFilter {
    pub fn new(bot_id: UserId) -> Self {
        Self {
            bot_id,
            mention_prefix: format!("<@{}>", bot_id),
        }
    }

    /// The literal token that addresses the bot.
    pub fn mention_prefix(&self) -> &str {
        &self.mention_prefix
    }

    /// Evaluate an inbound message.
    pub fn evaluate(&self, message: &ChatMessage) -> Intake {
        if message.author.is_bot {
            return Intake::Ignored {
                reason: "authored by a bot",
            };
        }

        let mentioned = message.content.starts_with(&self.mention_prefix);
        let replies_to_bot = message
            .reference
            .map(|r| r.author_id == self.bot_id)
            .unwrap_or(false);

        if !mentioned && !replies_to_bot {
            return Intake::Ignored {
                reason: "not addressed to the bot",
            };
        }

        let prompt = strip_leading_prefix(&message.content, &self.mention_prefix);
        if prompt.is_empty() {
            // A bare mention with no request is not actionable
            return Intake::Ignored {
                reason: "empty prompt",
            };
        }

        Intake::Accepted {
            prompt: prompt.to_string(),
        }
    }
}

/// Strip only a literal leading prefix, then left-trim.
///
/// Never a global substring replacement: a mention quoted elsewhere in
/// the body must survive untouched.
pub(crate) fn strip_leading_prefix<'a>(content: &'a str, prefix: &str) -> &'a str {
    content
        .strip_prefix(prefix)
        .unwrap_or(content)
        .trim_start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::{Author, ChannelId, ChannelInfo, MessageId, MessageRef};
    use chrono::DateTime;

    const BOT: UserId = UserId(42);

    fn message(author: Author, content: &str) -> ChatMessage {
        ChatMessage::new(
            MessageId(1),
            author,
            ChannelInfo::direct(ChannelId(5)),
            content,
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn test_accepts_leading_mention_and_strips_it() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::user(UserId(1), "ada"), "<@42>   what is rust?");

        assert_eq!(
            filter.evaluate(&msg),
            Intake::Accepted {
                prompt: "what is rust?".to_string()
            }
        );
    }

    #[test]
    fn test_accepts_reply_to_bot_without_mention() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::user(UserId(1), "ada"), "and then?").with_reference(
            MessageRef {
                id: MessageId(9),
                author_id: BOT,
            },
        );

        assert_eq!(
            filter.evaluate(&msg),
            Intake::Accepted {
                prompt: "and then?".to_string()
            }
        );
    }

    #[test]
    fn test_rejects_bot_authors_even_when_mentioned() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::bot(UserId(7), "otherbot"), "<@42> hello");

        assert!(matches!(filter.evaluate(&msg), Intake::Ignored { .. }));
    }

    #[test]
    fn test_rejects_self_authored_messages() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::bot(BOT, "quill"), "<@42> echo");

        assert!(matches!(filter.evaluate(&msg), Intake::Ignored { .. }));
    }

    #[test]
    fn test_ignores_mention_that_is_not_leading() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::user(UserId(1), "ada"), "hey <@42> hi");

        assert_eq!(
            filter.evaluate(&msg),
            Intake::Ignored {
                reason: "not addressed to the bot"
            }
        );
    }

    #[test]
    fn test_ignores_bare_mention() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::user(UserId(1), "ada"), "<@42>   ");

        assert_eq!(
            filter.evaluate(&msg),
            Intake::Ignored {
                reason: "empty prompt"
            }
        );
    }

    #[test]
    fn test_quoted_mentions_survive_in_the_prompt() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(
            Author::user(UserId(1), "ada"),
            "<@42> what does <@42> mean?",
        );

        assert_eq!(
            filter.evaluate(&msg),
            Intake::Accepted {
                prompt: "what does <@42> mean?".to_string()
            }
        );
    }

    #[test]
    fn test_reply_to_non_bot_is_ignored() {
        let filter = IntakeFilter::new(BOT);
        let msg = message(Author::user(UserId(1), "ada"), "sure").with_reference(MessageRef {
            id: MessageId(9),
            author_id: UserId(2),
        });

        assert!(matches!(filter.evaluate(&msg), Intake::Ignored { .. }));
    }
}
