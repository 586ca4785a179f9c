use crate::components::status::Status;
use crate::models::sessions::SessionStatistics;
use crate::utils::format::{format_duration, format_number};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatsCardsProps {
    pub stats: Option<Rc<SessionStatistics>>,
}

#[function_component(StatsCards)]
pub fn stats_cards(props: &StatsCardsProps) -> Html {
    let Some(stats) = &props.stats else {
        return html! { <Status loading=true label="Loading statistics..." /> };
    };

    let cards = [
        ("Total Sessions", format_number(stats.total_sessions)),
        ("Successful", format_number(stats.successful_sessions)),
        ("Failed", format_number(stats.failed_sessions)),
        ("Success Rate", format!("{:.1}%", stats.success_rate)),
        ("Avg Response", format_duration(stats.average_response_time * 1_000.0)),
        ("Contacts Found", format_number(stats.contacts_found)),
        ("Spam Detected", format_number(stats.spam_numbers_detected)),
        ("Unique Numbers", format_number(stats.unique_phone_numbers)),
    ];

    html! {
        <div class="summary-grid">
            {
                cards.into_iter().map(|(title, value)| html! {
                    <div class="summary-item">
                        <h3>{title}</h3>
                        <p class="summary-value">{value}</p>
                    </div>
                }).collect::<Html>()
            }
        </div>
    }
}
