use crate::components::form::FormMode;
use crate::components::proxy_form::ProxyForm;
use crate::components::status::Status;
use crate::hooks::DataState;
use crate::hooks::use_proxies::use_proxies;
use crate::services::AppServices;
use crate::utils::format::{format_duration, format_success_rate};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProxiesTableProps {
    pub services: AppServices,
}

#[function_component(ProxiesTable)]
pub fn proxies_table(props: &ProxiesTableProps) -> Html {
    let actions = props.services.actions();
    let proxies = use_proxies(actions.clone());
    let editing = use_state(|| None::<FormMode>);

    let open = |mode: FormMode| {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(mode)))
    };
    let form = match *editing {
        Some(mode) => {
            let on_saved = {
                let editing = editing.clone();
                let reload = proxies.reload.clone();
                Callback::from(move |()| {
                    editing.set(None);
                    reload.emit(());
                })
            };
            let on_cancel = {
                let editing = editing.clone();
                Callback::from(move |()| editing.set(None))
            };
            html! {
                <ProxyForm services={props.services.clone()} {mode} on_saved={on_saved} on_cancel={on_cancel} />
            }
        }
        None => html! {},
    };

    let proxies_list = match &proxies.state {
        DataState::Loading => return html! { <Status loading=true label="Loading proxies..." /> },
        DataState::Error(e) => return html! { <Status error={e.clone()} /> },
        DataState::Loaded(list) => list.clone(),
    };

    let rows = proxies_list.iter().map(|proxy| {
        let id = proxy.id;
        let on_test = {
            let actions = actions.clone();
            let reload = proxies.reload.clone();
            Callback::from(move |_: MouseEvent| {
                let actions = actions.clone();
                let reload = reload.clone();
                spawn_local(async move {
                    if actions.test_proxy(id).await.is_ok() {
                        reload.emit(());
                    }
                });
            })
        };
        let on_delete = {
            let actions = actions.clone();
            let reload = proxies.reload.clone();
            let address = proxy.address();
            Callback::from(move |_: MouseEvent| {
                if !gloo::dialogs::confirm(&format!("Delete proxy {address}?")) {
                    return;
                }
                let actions = actions.clone();
                let reload = reload.clone();
                spawn_local(async move {
                    if actions.delete_proxy(id).await.is_ok() {
                        reload.emit(());
                    }
                });
            })
        };

        let working = if proxy.is_working {
            ("badge bg-success", "Working")
        } else {
            ("badge bg-warning", "Failing")
        };
        let response = proxy
            .average_response_time
            .map_or_else(|| "-".to_string(), |secs| format_duration(secs * 1_000.0));

        html! {
            <tr key={id}>
                <td>{proxy.name.clone().unwrap_or_default()}</td>
                <td><code>{proxy.address()}</code></td>
                <td>{proxy.proxy_type.clone().unwrap_or_else(|| "http".to_string())}</td>
                <td><span class={working.0}>{working.1}</span></td>
                <td>{format_success_rate(proxy.success_rate)}</td>
                <td>{response}</td>
                <td class="actions">
                    <button class="btn btn-sm btn-outline-secondary" onclick={open(FormMode::Edit(id))}>{"Edit"}</button>
                    <button class="btn btn-sm btn-outline-primary" onclick={on_test}>{"Test"}</button>
                    <button class="btn btn-sm btn-outline-danger" onclick={on_delete}>{"Delete"}</button>
                </td>
            </tr>
        }
    });

    let on_refresh = {
        let reload = proxies.reload.clone();
        Callback::from(move |_: MouseEvent| reload.emit(()))
    };

    html! {
        <div class="proxies">
            <button class="btn btn-sm btn-primary" onclick={open(FormMode::Create)}>{"Add Proxy"}</button>
            <button class="btn btn-sm btn-secondary" onclick={on_refresh}>{"Refresh"}</button>
            {form}
            if proxies_list.is_empty() {
                <p class="empty">{"No proxies configured"}</p>
            } else {
                <table class="table table-sm">
                    <thead>
                        <tr>
                            <th>{"Name"}</th>
                            <th>{"Address"}</th>
                            <th>{"Type"}</th>
                            <th>{"State"}</th>
                            <th>{"Success"}</th>
                            <th>{"Avg Response"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>{for rows}</tbody>
                </table>
            }
        </div>
    }
}
