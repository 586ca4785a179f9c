use crate::config::Config;
use crate::models::sessions::ExportFormat;
use crate::services::AppServices;
use crate::services::actions::parse_days;
use crate::utils::download::save_file;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SystemToolsProps {
    pub services: AppServices,
    /// Fired after a cleanup or restart succeeds.
    pub on_changed: Callback<()>,
}

/// Export, cleanup and restart controls.
#[function_component(SystemTools)]
pub fn system_tools(props: &SystemToolsProps) -> Html {
    let actions = props.services.actions();
    let days = use_state(|| Config::EXPORT_DAYS.to_string());

    let on_days = {
        let days = days.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            days.set(input.value());
        })
    };

    let export = |format: ExportFormat| {
        let actions = actions.clone();
        let notifier = props.services.notifier.clone();
        let days = days.clone();
        Callback::from(move |_: MouseEvent| {
            let days = match parse_days(&days) {
                Ok(days) => days,
                Err(e) => {
                    notifier.warning(e.to_string());
                    return;
                }
            };
            let actions = actions.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                if let Ok(file) = actions.export_sessions(format, days).await {
                    if let Err(e) = save_file(&file) {
                        notifier.error(format!("Download failed: {e}"));
                    }
                }
            });
        })
    };

    let on_cleanup = {
        let actions = actions.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |_: MouseEvent| {
            let prompt = format!(
                "Delete sessions older than {} days? This cannot be undone.",
                Config::CLEANUP_DAYS
            );
            if !gloo::dialogs::confirm(&prompt) {
                return;
            }
            let actions = actions.clone();
            let on_changed = on_changed.clone();
            spawn_local(async move {
                if actions.cleanup_sessions(Config::CLEANUP_DAYS).await.is_ok() {
                    on_changed.emit(());
                }
            });
        })
    };

    let on_restart = {
        let actions = actions.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |_: MouseEvent| {
            if !gloo::dialogs::confirm("Restart the system?") {
                return;
            }
            let actions = actions.clone();
            let on_changed = on_changed.clone();
            spawn_local(async move {
                if actions.restart_system().await.is_ok() {
                    on_changed.emit(());
                }
            });
        })
    };

    html! {
        <div class="system-tools">
            <label class="export-days">
                {"Export last "}
                <input class="form-control form-control-sm" type="number" min="1"
                    value={(*days).clone()} oninput={on_days} />
                {" days"}
            </label>
            <button class="btn btn-outline-secondary" onclick={export(ExportFormat::Json)}>{"Export JSON"}</button>
            <button class="btn btn-outline-secondary" onclick={export(ExportFormat::Csv)}>{"Export CSV"}</button>
            <button class="btn btn-outline-warning" onclick={on_cleanup}>{"Cleanup Old Sessions"}</button>
            <button class="btn btn-outline-danger" onclick={on_restart}>{"Restart System"}</button>
        </div>
    }
}
