//! Mock implementations for testing the notification fan-out

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use sendy_shared::config::PolicyConfig;

use crate::domain::entities::delivery_log::DeliveryLogEntry;
use crate::domain::entities::user::{ApprovalStatus, UserRole, UserSnapshot};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{ConfigSource, DeliveryLog, UserDirectory};
use crate::services::notify::{EmailTransport, PushMessage, PushTransport};

/// Build a user snapshot with sensible defaults for tests
pub fn user(id: &str, role: UserRole) -> UserSnapshot {
    UserSnapshot {
        id: id.to_string(),
        role,
        approval: ApprovalStatus::Approved,
        phone: Some("+212600000000".to_string()),
        business_name: None,
        display_name: Some(format!("user-{}", id)),
        city: None,
        push_token: Some(format!("token-{}", id)),
        has_pending_image_change: false,
    }
}

// Mock user directory for testing
pub struct MockDirectory {
    pub users: Arc<Mutex<Vec<UserSnapshot>>>,
    pub should_fail: bool,
}

impl MockDirectory {
    pub fn new(users: Vec<UserSnapshot>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            should_fail: true,
        }
    }
}

#[async_trait]
impl UserDirectory for MockDirectory {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<UserSnapshot>> {
        if self.should_fail {
            return Err(DomainError::internal("directory unavailable"));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_approved_delivery(
        &self,
        city: Option<&str>,
    ) -> DomainResult<Vec<UserSnapshot>> {
        if self.should_fail {
            return Err(DomainError::internal("directory unavailable"));
        }
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.is_approved_delivery())
            .filter(|u| match city {
                Some(city) => u.city.as_deref() == Some(city),
                None => true,
            })
            .cloned()
            .collect())
    }
}

// Mock push transport for testing
pub struct MockPush {
    pub delivered: Arc<Mutex<Vec<(String, PushMessage)>>>,
    pub fail_tokens: HashSet<String>,
    pub attempts: AtomicUsize,
}

impl MockPush {
    pub fn new() -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail_tokens: HashSet::new(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn failing_for(tokens: &[&str]) -> Self {
        Self {
            delivered: Arc::new(Mutex::new(Vec::new())),
            fail_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn delivered(&self) -> Vec<(String, PushMessage)> {
        self.delivered.lock().unwrap().clone()
    }

    pub fn delivered_tokens(&self) -> Vec<String> {
        self.delivered
            .lock()
            .unwrap()
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PushTransport for MockPush {
    async fn send(&self, token: &str, message: &PushMessage) -> Result<(), String> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_tokens.contains(token) {
            return Err("push transport error".to_string());
        }
        self.delivered
            .lock()
            .unwrap()
            .push((token.to_string(), message.clone()));
        Ok(())
    }
}

// Mock email transport for testing
pub struct MockEmail {
    pub sent: Arc<Mutex<Vec<(Vec<String>, String, String)>>>,
    pub should_fail: bool,
}

impl MockEmail {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent(&self) -> Vec<(Vec<String>, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailTransport for MockEmail {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        html_body: &str,
    ) -> Result<(), String> {
        if self.should_fail {
            return Err("email transport error".to_string());
        }
        self.sent.lock().unwrap().push((
            recipients.to_vec(),
            subject.to_string(),
            html_body.to_string(),
        ));
        Ok(())
    }
}

// Mock delivery log for testing
pub struct MockLog {
    pub entries: Arc<Mutex<Vec<DeliveryLogEntry>>>,
}

impl MockLog {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn entries(&self) -> Vec<DeliveryLogEntry> {
        self.entries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DeliveryLog for MockLog {
    async fn append(&self, entry: DeliveryLogEntry) -> DomainResult<()> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

// Static config source for testing
pub struct StaticSource {
    pub config: PolicyConfig,
}

#[async_trait]
impl ConfigSource for StaticSource {
    async fn fetch(&self) -> DomainResult<PolicyConfig> {
        Ok(self.config.clone())
    }
}
