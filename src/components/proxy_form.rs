use crate::components::form::{FormMode, bind_checkbox, bind_text};
use crate::models::error::AppError;
use crate::models::proxies::ProxyDraft;
use crate::services::AppServices;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProxyFormProps {
    pub services: AppServices,
    pub mode: FormMode,
    pub on_saved: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(ProxyForm)]
pub fn proxy_form(props: &ProxyFormProps) -> Html {
    let draft = use_state(ProxyDraft::new);
    let saving = use_state(|| false);

    {
        let draft = draft.clone();
        let actions = props.services.actions();
        use_effect_with(props.mode, move |mode| {
            match *mode {
                FormMode::Create => draft.set(ProxyDraft::new()),
                FormMode::Edit(id) => spawn_local(async move {
                    if let Ok(proxy) = actions.get_proxy(id).await {
                        draft.set(ProxyDraft::from_proxy(&proxy));
                    }
                }),
            }
            || ()
        });
    }

    let on_submit = {
        let draft = draft.clone();
        let saving = saving.clone();
        let actions = props.services.actions();
        let notifier = props.services.notifier.clone();
        let on_saved = props.on_saved.clone();
        let mode = props.mode;
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let payload = match draft.to_payload() {
                Ok(payload) => payload,
                Err(AppError::Validation(message)) => {
                    notifier.warning(message);
                    return;
                }
                Err(e) => {
                    notifier.warning(e.to_string());
                    return;
                }
            };

            let saving = saving.clone();
            let actions = actions.clone();
            let on_saved = on_saved.clone();
            saving.set(true);
            spawn_local(async move {
                let saved = match mode {
                    FormMode::Create => actions.create_proxy(&payload).await.is_ok(),
                    FormMode::Edit(id) => actions.update_proxy(id, &payload).await.is_ok(),
                };
                saving.set(false);
                if saved {
                    on_saved.emit(());
                }
            });
        })
    };

    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    html! {
        <form class="record-form" onsubmit={on_submit}>
            <h3>{props.mode.title("proxy")}</h3>
            <input class="form-control" placeholder="Name" value={draft.name.clone()}
                oninput={bind_text(&draft, |d, v| d.name = v)} />
            <input class="form-control" placeholder="Host" value={draft.host.clone()}
                oninput={bind_text(&draft, |d, v| d.host = v)} />
            <input class="form-control" placeholder="Port" inputmode="numeric" value={draft.port.clone()}
                oninput={bind_text(&draft, |d, v| d.port = v)} />
            <input class="form-control" placeholder="Username" value={draft.username.clone()}
                oninput={bind_text(&draft, |d, v| d.username = v)} />
            <input class="form-control" type="password" placeholder="Password" value={draft.password.clone()}
                oninput={bind_text(&draft, |d, v| d.password = v)} />
            <label>
                <input type="checkbox" checked={draft.is_active}
                    onchange={bind_checkbox(&draft, |d, v| d.is_active = v)} />
                {" Active"}
            </label>
            <div class="actions">
                <button type="submit" class="btn btn-primary" disabled={*saving}>{"Save"}</button>
                <button type="button" class="btn btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
            </div>
        </form>
    }
}
