use crate::models::error::AppError;
use crate::models::search::BulkSearchResponse;
use crate::services::bulk::BulkSubmitter;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq, Debug)]
pub enum BulkState {
    Idle,
    Running,
    Done(Rc<BulkSearchResponse>),
    Failed(String),
}

impl BulkState {
    pub fn is_running(&self) -> bool {
        matches!(self, BulkState::Running)
    }

    pub fn data(&self) -> Option<&Rc<BulkSearchResponse>> {
        match self {
            BulkState::Done(response) => Some(response),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct BulkSearchHandle {
    pub state: BulkState,
    pub submit: Callback<String>,
}

#[hook]
pub fn use_bulk_search(submitter: BulkSubmitter) -> BulkSearchHandle {
    let state = use_state(|| BulkState::Idle);

    let submit = {
        let state = state.clone();
        Callback::from(move |input: String| {
            if submitter.is_running() {
                return;
            }
            let state = state.clone();
            let submitter = submitter.clone();
            let previous = (*state).clone();
            state.set(BulkState::Running);

            spawn_local(async move {
                let next = match submitter.submit(&input).await {
                    Ok(response) => BulkState::Done(Rc::new(response)),
                    Err(AppError::Validation(_)) => previous,
                    Err(e) => BulkState::Failed(e.to_string()),
                };
                state.set(next);
            });
        })
    };

    BulkSearchHandle {
        state: (*state).clone(),
        submit,
    }
}
