use yew::prelude::*;

use trud_admin::components::{
    AccountsTable, BulkSearch, Navigation, NotificationHost, PhoneSearch, ProxiesTable,
    RealtimePanel, StatsCards, Status, SystemTools,
};
use trud_admin::hooks::use_live_feeds::use_live_feeds;
use trud_admin::services::AppServices;
use trud_admin::services::feeds::{PageContext, PageRole};

#[derive(Properties, PartialEq)]
struct ShellProps {
    services: AppServices,
}

#[function_component(AdminShell)]
fn admin_shell(props: &ShellProps) -> Html {
    let page = use_state(PageContext::default);
    let live = use_live_feeds(&props.services, *page);

    let on_select = {
        let page = page.clone();
        Callback::from(move |role: PageRole| page.set(PageContext::new(role)))
    };

    let services = props.services.clone();
    let content = match page.role {
        PageRole::Dashboard => html! {
            <>
                <section class="data-section">
                    <h2>{"Session Statistics"}</h2>
                    <StatsCards stats={live.state.stats.clone()} />
                </section>
                <section class="tools-section">
                    <h2>{"System"}</h2>
                    <SystemTools services={services.clone()} on_changed={live.refresh.clone()} />
                </section>
            </>
        },
        PageRole::Sessions => html! {
            <section class="data-section">
                <h2>{"Live Sessions"}</h2>
                <RealtimePanel status={live.state.realtime.clone()} />
            </section>
        },
        PageRole::Accounts => html! {
            <section class="data-section">
                <h2>{"Accounts"}</h2>
                <AccountsTable services={services.clone()} accounts={live.state.accounts.clone()}
                    on_changed={live.refresh.clone()} />
            </section>
        },
        PageRole::Search => html! {
            <>
                <section class="search-section">
                    <h2>{"Phone Search"}</h2>
                    <PhoneSearch services={services.clone()} />
                </section>
                <section class="search-section">
                    <h2>{"Bulk Search"}</h2>
                    <BulkSearch services={services.clone()} />
                </section>
            </>
        },
        PageRole::Proxies => html! {
            <section class="data-section">
                <h2>{"Proxies"}</h2>
                <ProxiesTable services={services.clone()} />
            </section>
        },
        PageRole::Other => html! {},
    };

    html! {
        <div class="app-container">
            <header class="app-header">
                <h1>{"Trud Admin"}</h1>
                <Navigation current={page.role} {on_select} />
            </header>

            <main class="app-main">
                {content}
            </main>

            <NotificationHost notifier={services.notifier.clone()} />

            <style>
                {include_str!("style.css")}
            </style>
        </div>
    }
}

#[function_component(App)]
fn app() -> Html {
    let services = use_memo((), |_| AppServices::browser());

    match &*services {
        Ok(services) => html! { <AdminShell services={services.clone()} /> },
        Err(e) => html! { <Status error={e.to_string()} /> },
    }
}

fn main() {
    trud_admin::logger::init();
    yew::Renderer::<App>::new().render();
}
