use crate::components::account_form::AccountForm;
use crate::components::form::FormMode;
use crate::components::status::Status;
use crate::models::accounts::{Account, AccountPayload};
use crate::services::AppServices;
use crate::utils::format::{format_number, format_success_rate};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AccountsTableProps {
    pub services: AppServices,
    pub accounts: Option<Rc<Vec<Account>>>,
    /// Fired after a successful create, edit, toggle or delete.
    pub on_changed: Callback<()>,
}

/// Live account list with add/edit forms.
#[function_component(AccountsTable)]
pub fn accounts_table(props: &AccountsTableProps) -> Html {
    let editing = use_state(|| None::<FormMode>);

    let open = |mode: FormMode| {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(mode)))
    };
    let on_saved = {
        let editing = editing.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |()| {
            editing.set(None);
            on_changed.emit(());
        })
    };
    let on_cancel = {
        let editing = editing.clone();
        Callback::from(move |()| editing.set(None))
    };

    let form = match *editing {
        Some(mode) => html! {
            <AccountForm services={props.services.clone()} {mode} on_saved={on_saved} on_cancel={on_cancel} />
        },
        None => html! {
            <button class="btn btn-sm btn-primary" onclick={open(FormMode::Create)}>{"Add Account"}</button>
        },
    };

    let Some(accounts) = &props.accounts else {
        return html! { <Status loading=true label="Loading accounts..." /> };
    };

    if accounts.is_empty() {
        return html! {
            <div class="accounts">
                {form}
                <p class="empty">{"No accounts configured"}</p>
            </div>
        };
    }

    let actions = props.services.actions();
    let rows = accounts.iter().map(|account| {
        let id = account.id;
        let toggle = {
            let actions = actions.clone();
            let on_changed = props.on_changed.clone();
            let activate = !account.is_active;
            Callback::from(move |_: MouseEvent| {
                let actions = actions.clone();
                let on_changed = on_changed.clone();
                let payload = AccountPayload {
                    is_active: Some(activate),
                    ..Default::default()
                };
                spawn_local(async move {
                    if actions.update_account(id, &payload).await.is_ok() {
                        on_changed.emit(());
                    }
                });
            })
        };
        let delete = {
            let actions = actions.clone();
            let on_changed = props.on_changed.clone();
            let name = account.display_name().to_string();
            Callback::from(move |_: MouseEvent| {
                if !gloo::dialogs::confirm(&format!("Delete account {name}?")) {
                    return;
                }
                let actions = actions.clone();
                let on_changed = on_changed.clone();
                spawn_local(async move {
                    if actions.delete_account(id).await.is_ok() {
                        on_changed.emit(());
                    }
                });
            })
        };

        let state = if account.is_banned {
            ("badge bg-danger", "Banned")
        } else if account.is_active {
            ("badge bg-success", "Active")
        } else {
            ("badge bg-secondary", "Inactive")
        };

        html! {
            <tr key={id}>
                <td>{id.to_string()}</td>
                <td>{account.display_name()}</td>
                <td><span class={state.0}>{state.1}</span></td>
                <td>{format_number(account.requests_today)}</td>
                <td>{format_success_rate(account.success_rate)}</td>
                <td>{account.remaining_requests.map_or_else(|| "-".to_string(), format_number)}</td>
                <td class="actions">
                    <button class="btn btn-sm btn-outline-secondary" onclick={open(FormMode::Edit(id))}>{"Edit"}</button>
                    <button class="btn btn-sm btn-outline-primary" onclick={toggle}>
                        {if account.is_active { "Deactivate" } else { "Activate" }}
                    </button>
                    <button class="btn btn-sm btn-outline-danger" onclick={delete}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    html! {
        <div class="accounts">
            {form}
            <table class="table table-sm">
                <thead>
                    <tr>
                        <th>{"ID"}</th>
                        <th>{"Name"}</th>
                        <th>{"Status"}</th>
                        <th>{"Requests"}</th>
                        <th>{"Success"}</th>
                        <th>{"Remaining"}</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>{for rows}</tbody>
            </table>
        </div>
    }
}
