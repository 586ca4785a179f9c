pub mod use_bulk_search;
pub mod use_live_feeds;
pub mod use_notifications;
pub mod use_phone_search;
pub mod use_proxies;

use std::rc::Rc;

/// Load state of a one-shot fetch.
#[derive(Clone, PartialEq, Debug)]
pub enum DataState<T> {
    Loading,
    Loaded(Rc<T>),
    Error(String),
}

impl<T> DataState<T> {
    /// Returns true if the state is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, DataState::Loading)
    }

    /// Returns the data if it is loaded
    pub fn data(&self) -> Option<&Rc<T>> {
        match self {
            DataState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}
