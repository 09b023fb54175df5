//! Latest-request-wins bookkeeping for overlapping loads.
//!
//! Every load is issued a [`Ticket`] tagged with the query it was made for.
//! When results arrive out of order, only the ticket issued last is
//! accepted; anything older is dropped instead of overwriting newer state.

use chrono::NaiveDate;

/// What a day load was asked for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayQuery {
    pub date: NaiveDate,
    pub staff_id: Option<String>,
}

impl DayQuery {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            staff_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    seq: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
pub struct LatestOnly<K> {
    next_seq: u64,
    current: Option<Ticket<K>>,
}

impl<K: Clone + PartialEq + std::fmt::Debug> LatestOnly<K> {
    pub fn new() -> Self {
        Self {
            next_seq: 0,
            current: None,
        }
    }

    /// Start a request for `key`, superseding any request still in flight.
    pub fn issue(&mut self, key: K) -> Ticket<K> {
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            key,
        };
        self.current = Some(ticket.clone());
        ticket
    }

    /// Hand back a finished request's value if it is still the latest one.
    pub fn accept<T>(&mut self, ticket: &Ticket<K>, value: T) -> Option<T> {
        match &self.current {
            Some(current) if current == ticket => {
                self.current = None;
                Some(value)
            }
            _ => {
                tracing::debug!(key = ?ticket.key, "discarding stale response");
                None
            }
        }
    }

    /// Key of the request still in flight, if any.
    pub fn pending(&self) -> Option<&K> {
        self.current.as_ref().map(Ticket::key)
    }
}

impl<K: Clone + PartialEq + std::fmt::Debug> Default for LatestOnly<K> {
    fn default() -> Self {
        Self::new()
    }
}
