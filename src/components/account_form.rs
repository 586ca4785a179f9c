use crate::components::form::{FormMode, bind_checkbox, bind_text};
use crate::models::accounts::AccountDraft;
use crate::models::error::AppError;
use crate::services::AppServices;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AccountFormProps {
    pub services: AppServices,
    pub mode: FormMode,
    pub on_saved: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Add/edit form. Editing loads the account first and prefills the fields.
#[function_component(AccountForm)]
pub fn account_form(props: &AccountFormProps) -> Html {
    let draft = use_state(AccountDraft::new);
    let saving = use_state(|| false);

    {
        let draft = draft.clone();
        let actions = props.services.actions();
        use_effect_with(props.mode, move |mode| {
            match *mode {
                FormMode::Create => draft.set(AccountDraft::new()),
                FormMode::Edit(id) => spawn_local(async move {
                    if let Ok(account) = actions.get_account(id).await {
                        draft.set(AccountDraft::from_account(&account));
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
            let payload = match mode {
                FormMode::Create => draft.to_create_payload(),
                FormMode::Edit(_) => Ok(draft.to_payload()),
            };
            let payload = match payload {
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
                    FormMode::Create => actions.create_account(&payload).await.is_ok(),
                    FormMode::Edit(id) => actions.update_account(id, &payload).await.is_ok(),
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

    let token_hint = match props.mode {
        FormMode::Create => "Token",
        FormMode::Edit(_) => "Token (leave blank to keep)",
    };

    html! {
        <form class="record-form" onsubmit={on_submit}>
            <h3>{props.mode.title("account")}</h3>
            <input class="form-control" placeholder="Name" value={draft.name.clone()}
                oninput={bind_text(&draft, |d, v| d.name = v)} />
            <input class="form-control" placeholder={token_hint} value={draft.token.clone()}
                oninput={bind_text(&draft, |d, v| d.token = v)} />
            <input class="form-control" placeholder="Device ID" value={draft.device_id.clone()}
                oninput={bind_text(&draft, |d, v| d.device_id = v)} />
            <input class="form-control" placeholder="Player ID" value={draft.player_id.clone()}
                oninput={bind_text(&draft, |d, v| d.player_id = v)} />
            <input class="form-control" placeholder="Notes" value={draft.notes.clone()}
                oninput={bind_text(&draft, |d, v| d.notes = v)} />
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
