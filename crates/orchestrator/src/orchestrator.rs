//! The responder: one bounded tool-call loop per triggering message.

use std::sync::Arc;

use chat_core::{
    AttachmentFetcher, ChatGateway, ChatMessage, CompletionRequest, CompletionService,
    ConversationHistory, HistoryQuery, ToolCall, ToolSpec,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::assembler::ContextAssembler;
use crate::config::ResponderConfig;
use crate::dispatcher::ReplyDispatcher;
use crate::error::OrchestrateError;
use crate::expander::HistoryExpander;
use crate::intake::{Intake, IntakeFilter};
use crate::selector::{ModelSelector, ModelTier};
use crate::typing::TypingSignal;

/// Total completion attempts per cycle.
pub const MAX_ATTEMPTS: usize = 3;

/// Messages fetched ahead of the trigger to seed the working history.
pub const SEED_PRECEDING: usize = 5;

/// Name of the history-expansion tool.
pub const GET_MESSAGES_TOOL: &str = "get_messages";

/// The tool offered on non-final attempts.
pub fn get_messages_tool() -> ToolSpec {
    ToolSpec {
        name: GET_MESSAGES_TOOL.to_string(),
        description: "Fetch older messages from the current channel when the visible \
                      history is not enough to answer. Request only as many as you need."
            .to_string(),
        parameters: json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "maximum": 20,
                    "description": "How many older messages to fetch."
                }
            },
            "required": ["limit"],
            "additionalProperties": false
        }),
        strict: true,
    }
}

/// Arguments of a `get_messages` call.
#[derive(Debug, Deserialize)]
struct GetMessagesArgs {
    limit: i64,
}

/// Outcome of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// A final answer was delivered.
    Answered { chunks: usize },
    /// The message did not address the bot; nothing was sent.
    Ignored,
    /// Orchestration failed; an error reply was sent (or attempted).
    Failed { error: String },
}

/// Drives one response cycle per triggering message.
///
/// Each cycle's state - working history, attempt counter, selected tier -
/// is local to that call, so cycles for different messages may interleave
/// freely at the collaborator suspension points without sharing anything.
pub struct Responder<G, C, F> {
    gateway: Arc<G>,
    completion: Arc<C>,
    intake: IntakeFilter,
    assembler: ContextAssembler<F>,
    selector: ModelSelector<C>,
    expander: HistoryExpander<G>,
    dispatcher: ReplyDispatcher<G>,
    bot_name: String,
}

impl<G, C, F> Responder<G, C, F>
where
    G: ChatGateway + 'static,
    C: CompletionService,
    F: AttachmentFetcher,
{
    pub fn new(
        gateway: Arc<G>,
        completion: Arc<C>,
        fetcher: Arc<F>,
        config: ResponderConfig,
    ) -> Self {
        Self {
            intake: IntakeFilter::new(config.bot_id),
            assembler: ContextAssembler::new(config.bot_id, fetcher),
            selector: ModelSelector::new(completion.clone(), config.classifier_model),
            expander: HistoryExpander::new(gateway.clone()),
            dispatcher: ReplyDispatcher::new(gateway.clone()),
            bot_name: config.bot_name,
            gateway,
            completion,
        }
    }

    /// Handle one inbound message end to end.
    ///
    /// Messages that do not address the bot are dropped silently. A
    /// failed cycle reports its user-facing reason back into the channel;
    /// nothing is left hanging without either an answer or an error
    /// reply.
    pub async fn handle_message(&self, message: ChatMessage) -> Handled {
        match self.intake.evaluate(&message) {
            Intake::Accepted { prompt } => {
                debug!("accepted prompt: {}", prompt);
            }
            Intake::Ignored { reason } => {
                debug!("ignoring message {}: {}", message.id, reason);
                return Handled::Ignored;
            }
        }

        info!(
            "responding to message {} from {}",
            message.id, message.author.name
        );

        match self.run_cycle(&message).await {
            Ok(answer) => match self.dispatcher.deliver(&message, &answer).await {
                Ok(chunks) => Handled::Answered { chunks },
                Err(e) => {
                    warn!("failed to deliver answer: {}", e);
                    Handled::Failed {
                        error: e.to_string(),
                    }
                }
            },
            Err(e) => {
                warn!("response cycle failed: {}", e);
                let user_text = e.user_text();
                if let Err(send_err) = self.dispatcher.deliver(&message, &user_text).await {
                    warn!("failed to deliver error reply: {}", send_err);
                }
                Handled::Failed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Run one full response cycle and return the terminal answer text.
    async fn run_cycle(&self, trigger: &ChatMessage) -> Result<String, OrchestrateError> {
        let history = self.seed_history(trigger).await?;
        let tier = self.select_tier(trigger).await?;

        // Scoped: stops on every exit path below, including errors
        let _typing = TypingSignal::start(self.gateway.clone(), trigger.channel.id);

        self.attempt_loop(trigger, history, tier).await
    }

    /// Seed the working history: the trigger plus the messages
    /// immediately preceding it (or preceding its reply target).
    async fn seed_history(
        &self,
        trigger: &ChatMessage,
    ) -> Result<ConversationHistory, OrchestrateError> {
        let anchor = trigger
            .reference
            .map(|r| r.id)
            .unwrap_or(trigger.id);

        let preceding = self
            .gateway
            .fetch_history(
                trigger.channel.id,
                HistoryQuery::before(anchor, SEED_PRECEDING),
            )
            .await?;

        let mut history = ConversationHistory::from_messages(preceding);
        history.merge([trigger.clone()]);

        debug!("seeded history with {} message(s)", history.len());
        Ok(history)
    }

    /// One classification call on the trigger alone; reused across
    /// attempts.
    async fn select_tier(&self, trigger: &ChatMessage) -> Result<ModelTier, OrchestrateError> {
        let turn = self.assembler.message_turn(trigger).await;
        self.selector.select(vec![turn]).await
    }

    /// The bounded attempt loop.
    ///
    /// The `get_messages` tool is offered by inclusion on attempts 0 and
    /// 1 and withheld by omission on the final attempt, which forces a
    /// terminal answer: a tool the service was never offered cannot be
    /// requested back.
    async fn attempt_loop(
        &self,
        trigger: &ChatMessage,
        mut history: ConversationHistory,
        tier: ModelTier,
    ) -> Result<String, OrchestrateError> {
        let instructions = self.system_preamble(trigger);

        for attempt in 0..MAX_ATTEMPTS {
            let input = self.assembler.assemble(&history).await;
            let final_attempt = attempt + 1 == MAX_ATTEMPTS;
            let tools = if final_attempt {
                Vec::new()
            } else {
                vec![get_messages_tool()]
            };

            debug!(
                attempt,
                history_len = history.len(),
                tools_offered = tools.len(),
                "issuing completion call"
            );

            let output = self
                .completion
                .create(CompletionRequest {
                    model: tier.as_str().to_string(),
                    instructions: instructions.clone(),
                    input,
                    tools,
                })
                .await?;

            if output.is_terminal() {
                info!("terminal answer on attempt {}", attempt);
                return Ok(output.text);
            }

            if final_attempt {
                // The tool was withheld, so a non-terminal response here
                // is a service fault; fall through to the failure exit
                break;
            }

            let limits = requested_limits(&output.tool_calls);
            if limits.is_empty() {
                warn!("tool calls carried no usable request; retrying with current history");
                continue;
            }

            let fetched = self
                .expander
                .expand(&mut history, trigger.channel.id, &limits)
                .await?;
            info!(
                "attempt {}: honored {} tool call(s), fetched {} message(s)",
                attempt,
                limits.len(),
                fetched
            );
        }

        Err(OrchestrateError::Exhausted(MAX_ATTEMPTS))
    }

    /// The fixed system preamble for every completion call of a cycle.
    fn system_preamble(&self, trigger: &ChatMessage) -> String {
        let guild = trigger
            .channel
            .guild_name
            .as_deref()
            .unwrap_or("Direct Message");
        let channel = trigger.channel.name.as_deref().unwrap_or("Direct Message");

        format!(
            "You are {name}, a helpful assistant in a chat. You are answering in \
             \"{channel}\" ({guild}). Each message below carries a from/time header; \
             answer the most recent request. If the visible history is not enough to \
             answer, call {tool} to fetch older messages, requesting the minimum you \
             need; otherwise answer directly.",
            name = self.bot_name,
            channel = channel,
            guild = guild,
            tool = GET_MESSAGES_TOOL,
        )
    }
}

/// Extract the clamped fetch limits out of a response's tool calls.
///
/// Every `get_messages` call is honored, in order. Calls for unknown
/// tools or with unparseable arguments are dropped with a warning -
/// possible only if the service ignores the strict schema.
fn requested_limits(tool_calls: &[ToolCall]) -> Vec<usize> {
    tool_calls
        .iter()
        .filter_map(|call| {
            if call.name != GET_MESSAGES_TOOL {
                warn!("service requested unknown tool: {}", call.name);
                return None;
            }
            match serde_json::from_value::<GetMessagesArgs>(call.arguments.clone()) {
                Ok(args) => Some(crate::expander::clamp_limit(args.limit)),
                Err(e) => {
                    warn!("discarding malformed {} arguments: {}", GET_MESSAGES_TOOL, e);
                    None
                }
            }
        })
        .collect()
}
