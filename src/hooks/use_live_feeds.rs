use crate::models::accounts::Account;
use crate::models::sessions::{RealtimeStatus, SessionStatistics};
use crate::services::AppServices;
use crate::services::feeds::{LiveUpdate, PageContext, UpdateSink, start_page_feeds};
use gloo::events::EventListener;
use std::rc::Rc;
use yew::prelude::*;

/// Latest data from each live feed. `None` until the first tick lands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LiveState {
    pub stats: Option<Rc<SessionStatistics>>,
    pub realtime: Option<Rc<RealtimeStatus>>,
    pub accounts: Option<Rc<Vec<Account>>>,
    pub updates: u64,
}

pub enum LiveAction {
    Update(LiveUpdate),
    Reset,
}

impl Reducible for LiveState {
    type Action = LiveAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let update = match action {
            LiveAction::Reset => return Rc::new(Self::default()),
            LiveAction::Update(update) => update,
        };

        let mut next = (*self).clone();
        next.updates += 1;
        match update {
            LiveUpdate::Stats(stats) => next.stats = Some(Rc::new(stats)),
            LiveUpdate::Realtime(status) => next.realtime = Some(Rc::new(status)),
            LiveUpdate::Accounts(accounts) => next.accounts = Some(Rc::new(accounts)),
        }
        Rc::new(next)
    }
}

/// Live state plus a way to re-fetch it right away.
#[derive(Clone)]
pub struct LiveFeedsHandle {
    pub state: UseReducerHandle<LiveState>,
    /// Restarts the page's feeds, which ticks each of them immediately.
    pub refresh: Callback<()>,
}

fn update_sink(dispatcher: UseReducerDispatcher<LiveState>) -> UpdateSink {
    Rc::new(move |update| dispatcher.dispatch(LiveAction::Update(update)))
}

/// Runs the feeds `ctx` declares for as long as the page shows it.
///
/// Switching to another context stops the previous page's feeds first.
/// Unloading the page stops every feed.
#[hook]
pub fn use_live_feeds(services: &AppServices, ctx: PageContext) -> LiveFeedsHandle {
    let state = use_reducer(LiveState::default);

    {
        let services = services.clone();
        let dispatcher = state.dispatcher();
        use_effect_with(ctx, move |ctx| {
            dispatcher.dispatch(LiveAction::Reset);

            let sink = update_sink(dispatcher);
            let names = start_page_feeds(&services.scheduler, &services.client, *ctx, sink);

            let scheduler = services.scheduler.clone();
            move || {
                for name in names {
                    scheduler.stop_polling(name);
                }
            }
        });
    }

    {
        let scheduler = services.scheduler.clone();
        use_effect_with((), move |_| {
            let listener = web_sys::window().map(|window| {
                EventListener::new(&window, "beforeunload", move |_| {
                    scheduler.stop_all_polling();
                })
            });
            move || drop(listener)
        });
    }

    let refresh = {
        let services = services.clone();
        let dispatcher = state.dispatcher();
        Callback::from(move |()| {
            start_page_feeds(
                &services.scheduler,
                &services.client,
                ctx,
                update_sink(dispatcher.clone()),
            );
        })
    };

    LiveFeedsHandle { state, refresh }
}
