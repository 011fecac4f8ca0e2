//! Thinking indicators for requests still in flight.

use std::collections::HashMap;

use echo_core::chat::RequestId;

/// One indicator per outstanding request, so overlapping requests each
/// clear their own.
#[derive(Debug)]
pub struct InFlight<T> {
    live: HashMap<RequestId, T>,
}

impl<T> Default for InFlight<T> {
    fn default() -> Self {
        Self {
            live: HashMap::new(),
        }
    }
}

impl<T> InFlight<T> {
    /// Track `indicator` for `id`, handing back any it replaces.
    pub fn insert(&mut self, id: RequestId, indicator: T) -> Option<T> {
        self.live.insert(id, indicator)
    }

    /// Stop tracking `id` and return its indicator.
    pub fn take(&mut self, id: RequestId) -> Option<T> {
        self.live.remove(&id)
    }
}
