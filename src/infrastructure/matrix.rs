//! # Matrix Session Adapter
//!
//! Implements the `SessionClient` trait for the Matrix protocol using `matrix_sdk`.
//! Also owns login (restoring or persisting the saved session) and the
//! listener that turns room messages into `InboundEvent`s for the router.

use anyhow::{Context, Result};
use async_trait::async_trait;
use matrix_sdk::{
    Client, LoopCtrl, SessionMeta,
    authentication::{SessionTokens, matrix::MatrixSession},
    config::SyncSettings,
    room::Room,
    ruma::{
        EventId, OwnedEventId, OwnedUserId, RoomId, UserId,
        events::{
            reaction::ReactionEventContent,
            relation::{Annotation, InReplyTo},
            room::{
                member::{MembershipState, StrippedRoomMemberEvent},
                message::{
                    MessageType, OriginalSyncRoomMessageEvent, Relation, RoomMessageEventContent,
                },
            },
        },
    },
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::application::router::CommandRouter;
use crate::domain::config::MatrixConfig;
use crate::domain::error::SessionError;
use crate::domain::traits::SessionClient;
use crate::domain::types::{InboundEvent, ThreadProfile, UserProfile};
use crate::strings::logs;

const SYNC_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Access token and device info persisted between runs.
#[derive(Debug, Serialize, Deserialize)]
struct SavedSession {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user_id: String,
    device_id: String,
}

#[derive(Clone)]
pub struct MatrixService {
    client: Client,
}

impl MatrixService {
    /// Restores the session stored at `session_file`, or logs in with the
    /// configured password and stores the new session there.
    pub async fn login(config: &MatrixConfig, session_file: &Path) -> Result<Self> {
        let client = Client::builder()
            .homeserver_url(&config.homeserver)
            .build()
            .await
            .context("Failed to build Matrix client")?;

        if let Some(saved) = load_session(session_file)? {
            restore(&client, saved).await?;
        } else {
            let response = client
                .matrix_auth()
                .login_username(&config.username, &config.password)
                .initial_device_display_name("yue")
                .send()
                .await
                .context("Login failed")?;

            save_session(
                session_file,
                &SavedSession {
                    access_token: response.access_token.clone(),
                    refresh_token: response.refresh_token.clone(),
                    user_id: response.user_id.to_string(),
                    device_id: response.device_id.to_string(),
                },
            )?;
            tracing::info!("{}", logs::logged_in(response.user_id.as_str()));
        }

        if let Some(name) = &config.display_name
            && let Err(e) = client.account().set_display_name(Some(name.as_str())).await
        {
            tracing::warn!("Failed to set display name: {}", e);
        }

        Ok(Self { client })
    }

    /// Installs the message and invite handlers, then syncs for the life of
    /// the process. Each message is dispatched on its own task.
    pub async fn listen(&self, router: Arc<CommandRouter>) -> Result<()> {
        let start_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or_default();

        self.client
            .add_event_handler(move |ev: OriginalSyncRoomMessageEvent, room: Room| {
                let router = router.clone();
                async move {
                    if u64::from(ev.origin_server_ts.get()) < start_ms {
                        return;
                    }
                    if ev.sender == room.own_user_id() {
                        return;
                    }
                    let event = to_inbound(&ev, room.room_id().as_str());
                    tracing::info!(
                        "Received message from {} in {}",
                        event.sender_id,
                        event.thread_id
                    );
                    tokio::spawn(async move {
                        router.dispatch(event).await;
                    });
                }
            });

        self.client
            .add_event_handler(|ev: StrippedRoomMemberEvent, room: Room| async move {
                if ev.content.membership != MembershipState::Invite {
                    return;
                }
                if let Err(e) = room.join().await {
                    tracing::warn!("Failed to join {} after invite: {}", room.room_id(), e);
                }
            });

        tracing::info!("{}", logs::SYNC_LOOP_START);
        self.sync_forever(SYNC_RETRY_DELAY).await
    }

    /// Syncs until the process ends. A failed sync is logged and retried
    /// after `retry_delay`; it never stops the listener.
    async fn sync_forever(&self, retry_delay: Duration) -> Result<()> {
        self.client
            .sync_with_result_callback(SyncSettings::default(), |result| async move {
                if let Err(e) = result {
                    tracing::error!("Sync failed, retrying in {:?}: {}", retry_delay, e);
                    tokio::time::sleep(retry_delay).await;
                }
                Ok(LoopCtrl::Continue)
            })
            .await
            .context("Sync loop terminated")
    }

    fn room(&self, thread_id: &str) -> Result<Room, SessionError> {
        let room_id = RoomId::parse(thread_id).map_err(|e| invalid(thread_id, e))?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| SessionError::UnknownThread(thread_id.to_string()))
    }
}

/// Builds the router's view of a Matrix room message.
fn to_inbound(ev: &OriginalSyncRoomMessageEvent, room_id: &str) -> InboundEvent {
    let body = match &ev.content.msgtype {
        MessageType::Text(t) => Some(t.body.clone()),
        MessageType::Notice(n) => Some(n.body.clone()),
        MessageType::Emote(e) => Some(e.body.clone()),
        _ => None,
    };
    let metadata = serde_json::json!({
        "msgtype": ev.content.msgtype.msgtype(),
        "origin_server_ts": u64::from(ev.origin_server_ts.get()),
    });
    InboundEvent::new(ev.sender.as_str(), room_id, ev.event_id.as_str(), body).with_metadata(metadata)
}

fn invalid(id: &str, err: impl std::fmt::Display) -> SessionError {
    SessionError::InvalidId {
        id: id.to_string(),
        reason: err.to_string(),
    }
}

fn parse_user(user_id: &str) -> Result<OwnedUserId, SessionError> {
    UserId::parse(user_id).map_err(|e| invalid(user_id, e))
}

fn parse_event(message_id: &str) -> Result<OwnedEventId, SessionError> {
    EventId::parse(message_id).map_err(|e| invalid(message_id, e))
}

fn request(err: impl std::fmt::Display) -> SessionError {
    SessionError::Request(err.to_string())
}

#[async_trait]
impl SessionClient for MatrixService {
    async fn send_message(
        &self,
        text: &str,
        thread_id: &str,
        reply_to: Option<&str>,
    ) -> Result<(), SessionError> {
        let room = self.room(thread_id)?;
        let mut content = RoomMessageEventContent::text_markdown(text);
        if let Some(message_id) = reply_to {
            content.relates_to = Some(Relation::Reply {
                in_reply_to: InReplyTo::new(parse_event(message_id)?),
            });
        }
        tracing::info!("Bot sending message to {}: {}", thread_id, text);
        room.send(content).await.map(|_| ()).map_err(request)
    }

    async fn set_reaction(
        &self,
        emoji: &str,
        message_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError> {
        let room = self.room(thread_id)?;
        let content =
            ReactionEventContent::new(Annotation::new(parse_event(message_id)?, emoji.to_string()));
        room.send(content).await.map(|_| ()).map_err(request)
    }

    async fn add_user_to_group(&self, user_id: &str, thread_id: &str) -> Result<(), SessionError> {
        let room = self.room(thread_id)?;
        room.invite_user_by_id(&parse_user(user_id)?)
            .await
            .map_err(request)
    }

    async fn remove_user_from_group(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError> {
        let room = self.room(thread_id)?;
        room.kick_user(&parse_user(user_id)?, None)
            .await
            .map_err(request)
    }

    async fn user_profile(&self, user_id: &str, thread_id: &str) -> Result<UserProfile, SessionError> {
        let room = self.room(thread_id)?;
        let member = room
            .get_member_no_sync(&parse_user(user_id)?)
            .await
            .map_err(request)?;
        Ok(UserProfile {
            display_name: member.and_then(|m| m.display_name().map(str::to_string)),
        })
    }

    async fn thread_profile(&self, thread_id: &str) -> Result<ThreadProfile, SessionError> {
        let room = self.room(thread_id)?;
        Ok(ThreadProfile {
            name: room.name(),
            member_count: room.joined_members_count(),
        })
    }
}

async fn restore(client: &Client, saved: SavedSession) -> Result<()> {
    let session = MatrixSession {
        meta: SessionMeta {
            user_id: saved.user_id.parse().context("invalid stored user_id")?,
            device_id: saved.device_id.clone().into(),
        },
        tokens: SessionTokens {
            access_token: saved.access_token,
            refresh_token: saved.refresh_token,
        },
    };
    client
        .restore_session(session)
        .await
        .context("Failed to restore session")?;
    tracing::info!("{}", logs::session_restored(&saved.user_id));
    Ok(())
}

fn load_session(path: &Path) -> Result<Option<SavedSession>> {
    if !path.exists() {
        return Ok(None);
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("reading session file at {}", path.display()))?;
    let session = serde_json::from_str(&data).context("parsing session JSON")?;
    Ok(Some(session))
}

fn save_session(path: &Path, session: &SavedSession) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(session)?;
    std::fs::write(path, data)
        .with_context(|| format!("writing session file at {}", path.display()))?;
    Ok(())
}
