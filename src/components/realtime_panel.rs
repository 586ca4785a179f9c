use crate::components::status::Status;
use crate::models::sessions::RealtimeStatus;
use crate::utils::format::{format_duration, format_number, format_success_rate};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RealtimePanelProps {
    pub status: Option<Rc<RealtimeStatus>>,
}

#[function_component(RealtimePanel)]
pub fn realtime_panel(props: &RealtimePanelProps) -> Html {
    let Some(status) = &props.status else {
        return html! { <Status loading=true label="Waiting for live status..." /> };
    };

    let response = status
        .average_response_time
        .map_or_else(|| "-".to_string(), |secs| format_duration(secs * 1_000.0));
    let system = status.system_status.clone().unwrap_or_else(|| "unknown".to_string());

    html! {
        <div class="realtime-panel">
            <div class="summary-grid">
                <div class="summary-item">
                    <h3>{"Active Sessions"}</h3>
                    <p class="summary-value">{format_number(status.active_sessions)}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Successful (5 min)"}</h3>
                    <p class="summary-value">{format_number(status.recent_successes())}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Avg Response"}</h3>
                    <p class="summary-value">{response}</p>
                </div>
                <div class="summary-item">
                    <h3>{"Success Rate"}</h3>
                    <p class="summary-value">{format_success_rate(status.success_rate)}</p>
                </div>
            </div>
            <p class="realtime-meta">
                {"System: "}{system}
                if let Some(timestamp) = &status.timestamp {
                    {" · updated "}{timestamp.clone()}
                }
            </p>
        </div>
    }
}
