use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::types::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthStateChange {
    pub event: AuthChangeEvent,
    pub session: Option<Session>,
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(u64, UnboundedSender<AuthStateChange>)>,
}

impl ListenerRegistry {
    fn register(&mut self, sender: UnboundedSender<AuthStateChange>) -> u64 {
        self.next_id += 1;
        self.listeners.push((self.next_id, sender));
        self.next_id
    }

    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    pub(crate) fn broadcast(&mut self, change: &AuthStateChange) {
        self.listeners
            .retain(|(_, sender)| sender.unbounded_send(change.clone()).is_ok());
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

pub(crate) fn subscribe(
    registry: &Rc<RefCell<ListenerRegistry>>,
) -> (AuthSubscription, AuthEvents) {
    let (sender, receiver) = unbounded();
    let id = registry.borrow_mut().register(sender);
    (
        AuthSubscription {
            id,
            registry: Rc::downgrade(registry),
        },
        AuthEvents { receiver },
    )
}

/// Disposal handle of a session-change listener.
///
/// `unsubscribe` consumes the handle so it can only run once; dropping the
/// handle detaches the listener as well. Either way the paired
/// [`AuthEvents`] stream ends after the events already queued.
pub struct AuthSubscription {
    id: u64,
    registry: Weak<RefCell<ListenerRegistry>>,
}

impl AuthSubscription {
    pub fn unsubscribe(self) {
        self.detach();
    }

    fn detach(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.detach();
    }
}

pub struct AuthEvents {
    receiver: UnboundedReceiver<AuthStateChange>,
}

impl AuthEvents {
    pub async fn next(&mut self) -> Option<AuthStateChange> {
        self.receiver.next().await
    }

    /// Next queued event without waiting; `None` when nothing is pending.
    pub fn try_next(&mut self) -> Option<AuthStateChange> {
        self.receiver.try_next().ok().flatten()
    }
}
