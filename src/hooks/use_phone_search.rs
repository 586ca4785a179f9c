use crate::models::error::AppError;
use crate::models::search::PhoneInfo;
use crate::services::actions::{AdminActions, PhoneSearchOutcome};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq, Debug)]
pub enum SearchState {
    Idle,
    Searching,
    Found(Rc<PhoneInfo>),
    NotFound(String),
    Failed(String),
}

impl SearchState {
    pub fn is_searching(&self) -> bool {
        matches!(self, SearchState::Searching)
    }
}

#[derive(Clone, PartialEq)]
pub struct PhoneSearchHandle {
    pub state: SearchState,
    pub search: Callback<String>,
}

#[hook]
pub fn use_phone_search(actions: AdminActions) -> PhoneSearchHandle {
    let state = use_state(|| SearchState::Idle);

    let search = {
        let state = state.clone();
        Callback::from(move |phone: String| {
            let state = state.clone();
            let actions = actions.clone();
            let previous = (*state).clone();
            state.set(SearchState::Searching);

            spawn_local(async move {
                let next = match actions.search_phone(&phone).await {
                    Ok(PhoneSearchOutcome::Found(info)) => SearchState::Found(Rc::new(info)),
                    Ok(PhoneSearchOutcome::NotFound(reason)) => SearchState::NotFound(reason),
                    // Rejected locally; the warning is already on screen
                    Err(AppError::Validation(_)) => previous,
                    Err(e) => SearchState::Failed(e.to_string()),
                };
                state.set(next);
            });
        })
    };

    PhoneSearchHandle {
        state: (*state).clone(),
        search,
    }
}
