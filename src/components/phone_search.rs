use crate::hooks::use_phone_search::{SearchState, use_phone_search};
use crate::services::AppServices;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PhoneSearchProps {
    pub services: AppServices,
}

#[function_component(PhoneSearch)]
pub fn phone_search(props: &PhoneSearchProps) -> Html {
    let handle = use_phone_search(props.services.actions());
    let input_ref = use_node_ref();

    let on_submit = {
        let input_ref = input_ref.clone();
        let search = handle.search.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                search.emit(input.value());
            }
        })
    };

    let searching = handle.state.is_searching();

    html! {
        <div class="phone-search">
            <form onsubmit={on_submit}>
                <input ref={input_ref} type="tel" class="form-control" placeholder="Phone number" />
                <button type="submit" class="btn btn-primary" disabled={searching}>
                    {if searching { "Searching..." } else { "Search" }}
                </button>
            </form>
            {
                match &handle.state {
                    SearchState::Idle | SearchState::Searching => html! {},
                    SearchState::Found(info) => html! {
                        <dl class="search-result">
                            <dt>{"Number"}</dt><dd>{info.phone_number.clone().unwrap_or_default()}</dd>
                            <dt>{"Name"}</dt><dd>{info.name.clone().unwrap_or_else(|| "Unknown".to_string())}</dd>
                            <dt>{"Carrier"}</dt><dd>{info.carrier.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>{"Country"}</dt><dd>{info.country.clone().unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>{"Spam"}</dt><dd>{if info.is_spam { "Yes" } else { "No" }}</dd>
                        </dl>
                    },
                    SearchState::NotFound(reason) => html! {
                        <div class="alert alert-secondary">{"No result: "}{reason.clone()}</div>
                    },
                    SearchState::Failed(msg) => html! {
                        <div class="alert alert-danger">{msg.clone()}</div>
                    },
                }
            }
        </div>
    }
}
