//! RoadmapBot: main loop, message dispatch and roadmap delivery.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::channels::{ChannelManager, IncomingMessage, OutgoingResponse, StatusUpdate};
use crate::config::BotSettings;
use crate::conversation::{AnswerOutcome, Answers, ConversationEngine, SessionStore};
use crate::error::{ChannelError, ConversationError, Error};
use crate::locale::Messages;
use crate::roadmap::ResponseAggregator;

use super::command::Command;
use super::locks::SessionLocks;

/// Connects channels to the questionnaire and the roadmap aggregator.
pub struct RoadmapBot {
    settings: BotSettings,
    store: Arc<dyn SessionStore>,
    engine: ConversationEngine,
    aggregator: ResponseAggregator,
    channels: ChannelManager,
    locks: SessionLocks,
}

impl RoadmapBot {
    pub fn new(
        settings: BotSettings,
        store: Arc<dyn SessionStore>,
        aggregator: ResponseAggregator,
        channels: ChannelManager,
    ) -> Self {
        let engine = ConversationEngine::new(Arc::clone(&store), settings.locale);
        Self {
            settings,
            store,
            engine,
            aggregator,
            channels,
            locks: SessionLocks::new(),
        }
    }

    fn messages(&self) -> &'static Messages {
        self.settings.locale.messages()
    }

    // ── Main loop ───────────────────────────────────────────────────

    /// Run until Ctrl+C or until every channel stream ends.
    ///
    /// Each message is handled on its own task; `SessionLocks` keeps
    /// messages of one conversation in order. Handlers still running at
    /// shutdown are awaited before the channels close.
    pub async fn run(self: Arc<Self>) -> Result<(), Error> {
        let mut message_stream = self.channels.start_all().await?;

        let pruner = {
            let bot = Arc::clone(&self);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(bot.settings.prune_interval);
                interval.tick().await; // Skip immediate first tick
                loop {
                    interval.tick().await;
                    let sessions = bot.store.prune_idle(bot.settings.session_idle_timeout).await;
                    let locks = bot.locks.prune();
                    if sessions > 0 {
                        info!(sessions, locks, "Pruned idle sessions");
                    }
                }
            })
        };

        info!(
            "Bot {} ready and listening on {}",
            self.settings.name,
            self.channels.names().join(", ")
        );

        let mut handlers = JoinSet::new();

        loop {
            let message = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, shutting down...");
                    break;
                }
                Some(joined) = handlers.join_next() => {
                    log_handler_panic(joined);
                    continue;
                }
                msg = message_stream.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            info!("All channel streams ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            let bot = Arc::clone(&self);
            handlers.spawn(async move {
                if let Err(e) = bot.handle_message(&message).await {
                    error!(
                        message_id = %message.id,
                        channel = %message.channel,
                        "Error handling message: {e}"
                    );
                }
            });
        }

        if !handlers.is_empty() {
            info!(pending = handlers.len(), "Waiting for in-flight messages");
        }
        while let Some(joined) = handlers.join_next().await {
            log_handler_panic(joined);
        }

        pruner.abort();
        self.channels.shutdown_all().await;
        Ok(())
    }

    // ── Dispatch ────────────────────────────────────────────────────

    /// Handle one incoming message, replying on its channel.
    pub async fn handle_message(&self, msg: &IncomingMessage) -> Result<(), Error> {
        let key = msg.conversation_key();
        let _guard = self.locks.acquire(&key).await;
        let m = self.messages();
        debug!(message_id = %msg.id, session = %key, "Handling message");

        match Command::parse(&msg.content) {
            Command::Start => {
                info!(session = %key, "Starting questionnaire");
                let first = self.engine.start(&key).await;
                self.reply(msg, m.welcome).await?;
                self.reply(msg, first).await?;
            }
            Command::Cancel => {
                self.engine.reset(&key).await;
                self.reply(msg, m.cancelled).await?;
            }
            Command::Help => {
                self.reply(msg, m.help).await?;
            }
            Command::Answer(text) => match self.engine.submit_answer(&key, &text).await {
                Ok(AnswerOutcome::NextQuestion { prompt, .. }) => {
                    self.reply(msg, prompt).await?;
                }
                Ok(AnswerOutcome::Complete { answers }) => {
                    self.deliver_roadmap(msg, &key, &answers).await?;
                }
                Err(ConversationError::InvalidState { .. }) => {
                    debug!(session = %key, "Answer outside an active questionnaire");
                    self.reply(msg, m.restart_hint).await?;
                }
            },
        }
        Ok(())
    }

    /// Generate and send the roadmap, then reset the session whatever happened.
    async fn deliver_roadmap(
        &self,
        msg: &IncomingMessage,
        key: &str,
        answers: &Answers,
    ) -> Result<(), Error> {
        let outcome = self.generate_and_send(msg, answers).await;

        self.engine.reset(key).await;
        let done = self.reply(msg, self.messages().done).await;

        outcome?;
        done?;
        Ok(())
    }

    async fn generate_and_send(
        &self,
        msg: &IncomingMessage,
        answers: &Answers,
    ) -> Result<(), ChannelError> {
        let m = self.messages();
        self.reply(msg, m.analyzing).await?;
        if let Err(e) = self
            .channels
            .send_status(msg, StatusUpdate::Thinking("generating roadmap".into()))
            .await
        {
            warn!("Failed to send typing status: {e}");
        }

        match self.aggregator.aggregate(answers).await {
            Ok(report) => self.reply(msg, &report.render()).await,
            Err(e) => {
                error!(session = %msg.conversation_key(), "Roadmap generation failed: {e}");
                self.reply(msg, m.apology).await
            }
        }
    }

    async fn reply(&self, msg: &IncomingMessage, text: &str) -> Result<(), ChannelError> {
        self.channels
            .respond(msg, OutgoingResponse::text(text))
            .await
    }
}

fn log_handler_panic(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!("Message handler task failed: {e}");
    }
}
