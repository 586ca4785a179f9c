use crate::config::Config;
use crate::hooks::use_bulk_search::{BulkState, use_bulk_search};
use crate::models::search::BulkSearchResponse;
use crate::services::AppServices;
use crate::utils::format::{format_duration, format_success_rate};
use web_sys::HtmlTextAreaElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BulkSearchProps {
    pub services: AppServices,
}

#[function_component(BulkSearch)]
pub fn bulk_search(props: &BulkSearchProps) -> Html {
    let handle = use_bulk_search(props.services.bulk_submitter());
    let input_ref = use_node_ref();

    let on_submit = {
        let input_ref = input_ref.clone();
        let submit = handle.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if let Some(input) = input_ref.cast::<HtmlTextAreaElement>() {
                submit.emit(input.value());
            }
        })
    };

    let running = handle.state.is_running();

    html! {
        <div class="bulk-search">
            <form onsubmit={on_submit}>
                <textarea
                    ref={input_ref}
                    class="form-control"
                    rows="8"
                    placeholder={format!("One phone number per line (max {})", Config::BULK_SEARCH_CAP)}
                />
                <button type="submit" class="btn btn-primary" disabled={running}>
                    {if running { "Searching..." } else { "Start Bulk Search" }}
                </button>
            </form>
            {
                match &handle.state {
                    BulkState::Idle => html! {},
                    BulkState::Running => html! {
                        <div class="status loading">
                            <div class="spinner"></div>
                            <p>{"Bulk search in progress..."}</p>
                        </div>
                    },
                    BulkState::Done(response) => bulk_results(response),
                    BulkState::Failed(msg) => html! {
                        <div class="alert alert-danger">{"Bulk search failed: "}{msg.clone()}</div>
                    },
                }
            }
        </div>
    }
}

fn bulk_results(response: &BulkSearchResponse) -> Html {
    html! {
        <div class="bulk-results">
            <div class="summary-grid">
                <div class="summary-item">
                    <h3>{"Searched"}</h3>
                    <p class="summary-value">{response.total_searched.to_string()}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Found"}</h3>
                    <p class="summary-value">{response.successful_results.to_string()}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Failed"}</h3>
                    <p class="summary-value">{response.failed_searches.to_string()}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Success Rate"}</h3>
                    <p class="summary-value">{format_success_rate(response.success_rate())}</p>
                </div>
            </div>
            <table class="table table-sm">
                <thead>
                    <tr>
                        <th>{"Number"}</th>
                        <th>{"Name"}</th>
                        <th>{"Carrier"}</th>
                        <th>{"Time"}</th>
                        <th>{"Result"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        response.results.iter().map(|item| {
                            let info = item.data.clone().unwrap_or_default();
                            html! {
                                <tr class={classes!((!item.success).then_some("table-warning"))}>
                                    <td>{item.phone_number.clone()}</td>
                                    <td>{info.name.unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{info.carrier.unwrap_or_else(|| "-".to_string())}</td>
                                    <td>{format_duration(item.response_time * 1_000.0)}</td>
                                    <td>
                                        if item.success {
                                            {"Found"}
                                        } else {
                                            {item.error.clone().unwrap_or_else(|| "Not found".to_string())}
                                        }
                                    </td>
                                </tr>
                            }
                        }).collect::<Html>()
                    }
                </tbody>
            </table>
        </div>
    }
}
