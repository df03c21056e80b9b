//! Session orchestrator.
//!
//! Owns the conversation log, the credential, and the reference context,
//! and sequences one send at a time through routing and reveal.

use std::sync::Arc;

use book_context::ReferenceLoader;
use chat_core::{greeting, ChatMessage, IdGenerator, MessageId, Role, APOLOGY, XIAOLIN_SYSTEM_PROMPT};
use chrono::Utc;
use credential_store::{CredentialStorage, CredentialStore, Result as CredentialResult};
use futures::StreamExt;
use gemini_client::ModelClient;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::events::{MessageUpdate, SessionUpdate};
use crate::log::ConversationLog;
use crate::phase::SessionPhase;
use crate::router;
use crate::typewriter::Typewriter;

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Outcome of a send attempt. Rejections are silent no-ops by contract:
/// nothing about the session changes and no error surfaces to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted,
    /// Empty or whitespace-only input.
    EmptyInput,
    /// A previous send is still in flight.
    Busy,
}

struct SessionState {
    log: ConversationLog,
    credential: Option<String>,
    book_context: Option<String>,
    book_loaded: bool,
    phase: SessionPhase,
    /// Cancelled by `clear_messages`; child of the session root token.
    epoch: CancellationToken,
}

/// A single linear conversation with the assistant.
///
/// At most one send is in flight at a time, enforced by the phase check at
/// entry. All failure modes are absorbed here: a failed remote call becomes
/// the apology reply, a failed context load leaves the context empty.
pub struct ChatSession<S: CredentialStorage> {
    id: Uuid,
    state: Arc<RwLock<SessionState>>,
    ids: IdGenerator,
    store: CredentialStore<S>,
    model: Arc<dyn ModelClient>,
    typewriter: Typewriter,
    events: broadcast::Sender<SessionUpdate>,
    root: CancellationToken,
    inflight: Mutex<Option<JoinHandle<()>>>,
}

impl<S: CredentialStorage> ChatSession<S> {
    /// Create a session: resolve the credential, start the background
    /// reference-context load, and seed the greeting.
    pub async fn new(
        store: CredentialStore<S>,
        loader: Arc<dyn ReferenceLoader>,
        model: Arc<dyn ModelClient>,
    ) -> Self {
        let ids = IdGenerator::new();
        let credential = store.get().await;
        let seed = ChatMessage::assistant(ids.next_id(), greeting(credential.is_some()));

        let root = CancellationToken::new();
        let state = Arc::new(RwLock::new(SessionState {
            log: ConversationLog::seeded(seed),
            credential,
            book_context: None,
            book_loaded: false,
            phase: SessionPhase::Idle,
            epoch: root.child_token(),
        }));

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        spawn_context_load(Arc::clone(&state), loader, root.clone());

        Self {
            id: Uuid::new_v4(),
            state,
            ids,
            store,
            model,
            typewriter: Typewriter::default(),
            events,
            root,
            inflight: Mutex::new(None),
        }
    }

    /// Override the reveal cadence.
    pub fn with_typewriter(mut self, typewriter: Typewriter) -> Self {
        self.typewriter = typewriter;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Accept a user utterance, or silently reject it.
    ///
    /// On acceptance the user message and an empty assistant placeholder
    /// are appended immediately; routing and reveal run on a background
    /// task and the call returns without waiting for them.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return SendOutcome::EmptyInput;
        }
        if self.root.is_cancelled() {
            return SendOutcome::Busy;
        }

        let (placeholder_id, credential, book_context, epoch) = {
            let mut st = self.state.write().await;
            if !st.phase.accepts_input() {
                tracing::debug!(phase = ?st.phase, "send rejected, a send is already in flight");
                return SendOutcome::Busy;
            }

            let user = ChatMessage::user(self.ids.next_id(), trimmed);
            let user_id = user.id.clone();
            st.log.append(user);
            self.emit(
                st.phase,
                None,
                Some(MessageUpdate::Created {
                    message_id: user_id,
                    role: Role::User,
                }),
            );

            let placeholder = ChatMessage::assistant_placeholder(self.ids.next_id());
            let placeholder_id = placeholder.id.clone();
            st.log.append(placeholder);
            self.emit(
                st.phase,
                None,
                Some(MessageUpdate::Created {
                    message_id: placeholder_id.clone(),
                    role: Role::Assistant,
                }),
            );

            let previous = st.phase;
            st.phase = SessionPhase::Sending;
            self.emit(st.phase, Some(previous), None);

            (
                placeholder_id,
                st.credential.clone(),
                st.book_context.clone(),
                st.epoch.clone(),
            )
        };

        let task = tokio::spawn(run_send_pipeline(
            Arc::clone(&self.state),
            self.events.clone(),
            self.id,
            Arc::clone(&self.model),
            self.typewriter,
            placeholder_id,
            trimmed.to_string(),
            credential,
            book_context,
            epoch,
        ));
        *self.inflight.lock().await = Some(task);

        SendOutcome::Accepted
    }

    /// Reset the log to a single fresh greeting, from any phase.
    ///
    /// An in-flight remote call is not aborted mid-request; its eventual
    /// resolution is dropped by the cancelled epoch token and the log's
    /// id-existence guard.
    pub async fn clear_messages(&self) {
        let mut st = self.state.write().await;

        st.epoch.cancel();
        st.epoch = self.root.child_token();

        let seed = ChatMessage::assistant(self.ids.next_id(), greeting(st.credential.is_some()));
        let seed_id = seed.id.clone();
        st.log.reset(seed);

        let previous = st.phase;
        st.phase = SessionPhase::Idle;

        self.emit(
            st.phase,
            Some(previous),
            Some(MessageUpdate::Reset { seed_id }),
        );
    }

    /// Write a credential through to the store; blank input clears it.
    /// Valid from any phase; never touches the log or in-flight work.
    pub async fn update_api_key(&self, value: &str) -> CredentialResult<()> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            self.store.clear().await?;
            self.state.write().await.credential = None;
            tracing::info!("credential cleared");
        } else {
            self.store.set(trimmed).await?;
            self.state.write().await.credential = Some(trimmed.to_string());
            tracing::info!("credential updated");
        }

        Ok(())
    }

    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.log.snapshot()
    }

    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    pub async fn is_pending(&self) -> bool {
        self.state.read().await.phase.is_pending()
    }

    pub async fn is_revealing(&self) -> bool {
        self.state.read().await.phase.is_revealing()
    }

    pub async fn api_key(&self) -> Option<String> {
        self.state.read().await.credential.clone()
    }

    pub async fn is_book_loaded(&self) -> bool {
        self.state.read().await.book_loaded
    }

    pub fn system_prompt(&self) -> &'static str {
        XIAOLIN_SYSTEM_PROMPT
    }

    /// Subscribe to structured session updates.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionUpdate> {
        self.events.subscribe()
    }

    /// Await the tracked send pipeline, if one is running.
    pub async fn wait_until_idle(&self) {
        let task = self.inflight.lock().await.take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    /// Stop all background work for this session.
    pub fn shutdown(&self) {
        self.root.cancel();
    }

    fn emit(
        &self,
        phase: SessionPhase,
        previous_phase: Option<SessionPhase>,
        message_update: Option<MessageUpdate>,
    ) {
        emit_update(&self.events, self.id, phase, previous_phase, message_update);
    }
}

impl<S: CredentialStorage> Drop for ChatSession<S> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

fn emit_update(
    events: &broadcast::Sender<SessionUpdate>,
    session_id: Uuid,
    phase: SessionPhase,
    previous_phase: Option<SessionPhase>,
    message_update: Option<MessageUpdate>,
) {
    // No subscribers is fine.
    let _ = events.send(SessionUpdate {
        session_id,
        phase,
        previous_phase,
        message_update,
        timestamp: Utc::now(),
    });
}

fn spawn_context_load(
    state: Arc<RwLock<SessionState>>,
    loader: Arc<dyn ReferenceLoader>,
    root: CancellationToken,
) {
    tokio::spawn(async move {
        tokio::select! {
            _ = root.cancelled() => {}
            loaded = loader.load() => match loaded {
                Ok(text) => {
                    let mut st = state.write().await;
                    st.book_context = Some(text);
                    st.book_loaded = true;
                    tracing::info!("reference context ready");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "reference context unavailable, continuing without it");
                }
            }
        }
    });
}

#[allow(clippy::too_many_arguments)]
async fn run_send_pipeline(
    state: Arc<RwLock<SessionState>>,
    events: broadcast::Sender<SessionUpdate>,
    session_id: Uuid,
    model: Arc<dyn ModelClient>,
    typewriter: Typewriter,
    placeholder_id: MessageId,
    user_text: String,
    credential: Option<String>,
    book_context: Option<String>,
    epoch: CancellationToken,
) {
    let reply = match router::route(
        model.as_ref(),
        credential.as_deref(),
        book_context.as_deref(),
        &user_text,
        &epoch,
    )
    .await
    {
        Ok((text, source)) => {
            tracing::debug!(?source, chars = text.chars().count(), "reply resolved");
            text
        }
        Err(err) => {
            tracing::warn!(error = %err, "remote call failed, substituting apology");
            APOLOGY.to_string()
        }
    };

    // The log may have been reset while the source was resolving.
    {
        let mut st = state.write().await;
        if epoch.is_cancelled() || !st.log.contains(&placeholder_id) {
            return;
        }
        let previous = st.phase;
        st.phase = SessionPhase::Revealing;
        emit_update(&events, session_id, st.phase, Some(previous), None);
    }

    let steps = typewriter.reveal(reply);
    tokio::pin!(steps);

    loop {
        let prefix = tokio::select! {
            _ = epoch.cancelled() => return,
            step = steps.next() => match step {
                Some(prefix) => prefix,
                None => break,
            },
        };

        let mut st = state.write().await;
        if epoch.is_cancelled() || !st.log.update_content(&placeholder_id, prefix.clone()) {
            return;
        }
        emit_update(
            &events,
            session_id,
            st.phase,
            None,
            Some(MessageUpdate::ContentDelta {
                message_id: placeholder_id.clone(),
                accumulated: prefix,
            }),
        );
    }

    let mut st = state.write().await;
    if epoch.is_cancelled() {
        return;
    }

    let previous = st.phase;
    st.phase = SessionPhase::Idle;

    let message_update = st
        .log
        .get(&placeholder_id)
        .cloned()
        .map(|final_message| MessageUpdate::Completed {
            message_id: placeholder_id,
            final_message,
        });
    emit_update(&events, session_id, st.phase, Some(previous), message_update);
}
