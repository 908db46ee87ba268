use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::contact::{sort_by_name, Contact, SortOrder};
use crate::service::{ApiError, ContactService, DeleteOutcome};

/// Client-side replica of the server's contact collection.
///
/// All mutations are confirm-then-apply: the store sends the request, waits
/// for the server's answer, and only then touches the local list. A failed
/// call leaves the list untouched. Refreshes replace the list wholesale with
/// whatever the server returned, so overlapping refreshes resolve to
/// whichever response was applied last.
///
/// Cloning is cheap and every clone shares the same state. Subscribers watch
/// a revision counter that bumps once per visible change.
#[derive(Clone)]
pub struct ContactStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    service: Arc<dyn ContactService>,
    state: Mutex<StoreState>,
    revision: watch::Sender<u64>,
    poller: Mutex<Option<JoinHandle<()>>>,
}

struct StoreState {
    contacts: Vec<Contact>,
    sort: SortOrder,
}

impl ContactStore {
    pub fn new(service: Arc<dyn ContactService>, sort: SortOrder) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                service,
                state: Mutex::new(StoreState {
                    contacts: Vec::new(),
                    sort,
                }),
                revision,
                poller: Mutex::new(None),
            }),
        }
    }

    // === Reads ===

    /// Watch the revision counter; it bumps on every visible list change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// A copy of the current list, in its current display order.
    pub fn snapshot(&self) -> Vec<Contact> {
        self.inner.lock_state().contacts.clone()
    }

    pub fn sort_order(&self) -> SortOrder {
        self.inner.lock_state().sort
    }

    // === Sync ===

    /// Fetch the collection and replace the local list with it, sorted under
    /// the current order. Returns the new contact count.
    pub async fn refresh(&self) -> Result<usize, ApiError> {
        self.inner.refresh().await
    }

    // === Mutation ===

    /// Create a contact on the server, then append the record the server
    /// returned. The new entry keeps its end-of-list position until the next
    /// refresh or sort change.
    pub async fn create(&self, contact: Contact) -> Result<Contact, ApiError> {
        let created = self.inner.service.create_contact(&contact).await?;
        {
            let mut state = self.inner.lock_state();
            state.contacts.push(created.clone());
        }
        self.inner.bump();
        debug!("created contact {}", created.id);
        Ok(created)
    }

    /// Update a contact on the server, then replace the local entry with the
    /// record the server returned, keeping its position. Returns `None` when
    /// the entry is no longer in the local list; a refresh already removed
    /// it, and the server's answer is dropped rather than re-inserted.
    pub async fn update(&self, contact: Contact) -> Result<Option<Contact>, ApiError> {
        let updated = self.inner.service.update_contact(&contact).await?;
        let applied = {
            let mut state = self.inner.lock_state();
            match state.contacts.iter_mut().find(|c| c.id == updated.id) {
                Some(entry) => {
                    *entry = updated.clone();
                    true
                }
                None => false,
            }
        };
        if applied {
            self.inner.bump();
            debug!("updated contact {}", updated.id);
            Ok(Some(updated))
        } else {
            warn!("update for {} arrived after it left the list", updated.id);
            Ok(None)
        }
    }

    /// Delete a contact on the server. Only a confirmed `204` removes the
    /// local entry; a `404` means someone else already deleted it, and the
    /// stale local copy stays until the next refresh clears it.
    pub async fn delete(&self, id: &str) -> Result<DeleteOutcome, ApiError> {
        let outcome = self.inner.service.delete_contact(id).await?;
        if outcome == DeleteOutcome::Deleted {
            {
                let mut state = self.inner.lock_state();
                state.contacts.retain(|c| c.id != id);
            }
            self.inner.bump();
            debug!("deleted contact {}", id);
        } else {
            warn!("delete: contact {} was already gone on the server", id);
        }
        Ok(outcome)
    }

    // === Sorting ===

    /// Re-sort the list under `order`. A no-op when the order is unchanged.
    pub fn set_sort_order(&self, order: SortOrder) {
        {
            let mut state = self.inner.lock_state();
            if state.sort == order {
                return;
            }
            state.sort = order;
            sort_by_name(&mut state.contacts, order);
        }
        self.inner.bump();
    }

    /// Flip between ascending and descending; returns the new order.
    pub fn toggle_sort(&self) -> SortOrder {
        let order = self.sort_order().toggled();
        self.set_sort_order(order);
        order
    }

    // === Polling ===

    /// Refresh now and then every `interval` until stopped. Calling this
    /// again replaces the running schedule, so the interval can be changed
    /// live. `interval` must be non-zero.
    ///
    /// The task only weakly references the store: dropping the last store
    /// handle stops polling on its own.
    pub fn start_polling(&self, interval: Duration) {
        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else { break };
                match inner.refresh().await {
                    Ok(count) => debug!("poll: refreshed {} contacts", count),
                    Err(err) => warn!("poll: refresh failed: {}", err),
                }
            }
        });

        let mut poller = self.inner.lock_poller();
        if let Some(old) = poller.replace(handle) {
            old.abort();
        }
        debug!("polling every {:?}", interval);
    }

    /// Stop the periodic refresh. An in-flight request is abandoned; if its
    /// response was already being applied, that apply completes.
    pub fn stop_polling(&self) {
        if let Some(handle) = self.inner.lock_poller().take() {
            handle.abort();
            debug!("polling stopped");
        }
    }

    pub fn is_polling(&self) -> bool {
        self.inner
            .lock_poller()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl StoreInner {
    // A poisoned lock only means some thread panicked mid-call; the list
    // under it is replaced wholesale and stays structurally valid.
    fn lock_state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_poller(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.poller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    async fn refresh(&self) -> Result<usize, ApiError> {
        let mut contacts = self.service.list_contacts().await?;
        let count = contacts.len();
        {
            let mut state = self.lock_state();
            sort_by_name(&mut contacts, state.sort);
            state.contacts = contacts;
        }
        self.bump();
        Ok(count)
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let poller = self.poller.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = poller.take() {
            handle.abort();
        }
    }
}
