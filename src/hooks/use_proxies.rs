use crate::hooks::DataState;
use crate::models::proxies::Proxy;
use crate::services::actions::AdminActions;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct ProxiesHandle {
    pub state: DataState<Vec<Proxy>>,
    pub reload: Callback<()>,
}

/// Loads the proxy list on mount and whenever `reload` is emitted.
#[hook]
pub fn use_proxies(actions: AdminActions) -> ProxiesHandle {
    let state = use_state(|| DataState::Loading);
    let trigger = use_state(|| 0u32); // Reload trigger

    {
        let state = state.clone();
        use_effect_with(*trigger, move |_| {
            spawn_local(async move {
                match actions.list_proxies().await {
                    Ok(proxies) => state.set(DataState::Loaded(Rc::new(proxies))),
                    Err(e) => state.set(DataState::Error(e.to_string())),
                }
            });

            || () // Cleanup
        });
    }

    let reload = Callback::from(move |()| trigger.set(*trigger + 1));

    ProxiesHandle {
        state: (*state).clone(),
        reload,
    }
}
