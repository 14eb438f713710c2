//! In-memory fakes of the session client and storage for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::domain::error::{SessionError, StoreError};
use crate::domain::traits::{SessionClient, Store};
use crate::domain::types::{ThreadProfile, ThreadRecord, UserProfile, UserRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCall {
    Send {
        text: String,
        thread_id: String,
        reply_to: Option<String>,
    },
    React {
        emoji: String,
        message_id: String,
        thread_id: String,
    },
    Add {
        user_id: String,
        thread_id: String,
    },
    Kick {
        user_id: String,
        thread_id: String,
    },
}

/// Records outbound actions. Profile lookups are counted, not recorded.
#[derive(Default)]
pub struct RecordingSession {
    calls: Mutex<Vec<SessionCall>>,
    lookups: AtomicUsize,
    failing: bool,
}

impl RecordingSession {
    /// Every primitive returns an error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<SessionCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn profile_lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn record(&self, call: SessionCall) -> Result<(), SessionError> {
        if self.failing {
            return Err(SessionError::Request("offline".into()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl SessionClient for RecordingSession {
    async fn send_message(
        &self,
        text: &str,
        thread_id: &str,
        reply_to: Option<&str>,
    ) -> Result<(), SessionError> {
        self.record(SessionCall::Send {
            text: text.into(),
            thread_id: thread_id.into(),
            reply_to: reply_to.map(str::to_string),
        })
    }

    async fn set_reaction(
        &self,
        emoji: &str,
        message_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError> {
        self.record(SessionCall::React {
            emoji: emoji.into(),
            message_id: message_id.into(),
            thread_id: thread_id.into(),
        })
    }

    async fn add_user_to_group(&self, user_id: &str, thread_id: &str) -> Result<(), SessionError> {
        self.record(SessionCall::Add {
            user_id: user_id.into(),
            thread_id: thread_id.into(),
        })
    }

    async fn remove_user_from_group(
        &self,
        user_id: &str,
        thread_id: &str,
    ) -> Result<(), SessionError> {
        self.record(SessionCall::Kick {
            user_id: user_id.into(),
            thread_id: thread_id.into(),
        })
    }

    async fn user_profile(&self, user_id: &str, _thread_id: &str) -> Result<UserProfile, SessionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(SessionError::Request("offline".into()));
        }
        Ok(UserProfile {
            display_name: Some(format!("{user_id} display")),
        })
    }

    async fn thread_profile(&self, thread_id: &str) -> Result<ThreadProfile, SessionError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(SessionError::Request("offline".into()));
        }
        Ok(ThreadProfile {
            name: Some(format!("{thread_id} name")),
            member_count: 2,
        })
    }
}

/// Map-backed store counting successful inserts.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserRecord>>,
    threads: Mutex<HashMap<String, ThreadRecord>>,
    user_inserts: AtomicUsize,
    thread_inserts: AtomicUsize,
    broken: AtomicBool,
}

impl MemoryStore {
    pub fn user_inserts(&self) -> usize {
        self.user_inserts.load(Ordering::SeqCst)
    }

    pub fn thread_inserts(&self) -> usize {
        self.thread_inserts.load(Ordering::SeqCst)
    }

    /// While broken, every call fails with an I/O error.
    pub fn set_broken(&self, broken: bool) {
        self.broken.store(broken, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::other("disk gone")));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        self.check()?;
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn add_user(&self, record: UserRecord) -> Result<bool, StoreError> {
        self.check()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&record.id) {
            return Ok(false);
        }
        users.insert(record.id.clone(), record);
        self.user_inserts.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn get_thread(&self, id: &str) -> Result<Option<ThreadRecord>, StoreError> {
        self.check()?;
        Ok(self.threads.lock().unwrap().get(id).cloned())
    }

    async fn add_thread(&self, record: ThreadRecord) -> Result<bool, StoreError> {
        self.check()?;
        let mut threads = self.threads.lock().unwrap();
        if threads.contains_key(&record.id) {
            return Ok(false);
        }
        threads.insert(record.id.clone(), record);
        self.thread_inserts.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

/// Context for invoking a command directly, as `@alice:x` in `!room:x`.
pub fn command_context(
    session: std::sync::Arc<RecordingSession>,
    args: &[&str],
) -> crate::application::registry::CommandContext {
    let event = crate::domain::types::InboundEvent::new("@alice:x", "!room:x", "$msg", None);
    crate::application::registry::CommandContext {
        api: session.clone(),
        interaction: crate::application::interaction::Interaction::new(session, &event),
        event,
        args: args.iter().map(|a| a.to_string()).collect(),
        prefix: ":".to_string(),
        commands: vec!["add".to_string(), "ping".to_string()].into(),
    }
}
