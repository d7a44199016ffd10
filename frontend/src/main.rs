use chrono::NaiveDate;
use monthpicker_core::date_utils::format_for_display;
use monthpicker_core::{DateFormat, Theme};
use monthpicker_web::services::logging::Logger;
use monthpicker_web::MonthPickerField;
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let theme = use_state(|| Theme::Dark);
    let format = use_state(|| DateFormat::MonthDdCommaYyyy);
    let disabled = use_state(|| false);
    let selected = use_state(|| Option::<NaiveDate>::None);
    let error = use_state(|| Option::<String>::None);

    let on_date_change = {
        let selected = selected.clone();
        Callback::from(move |date: NaiveDate| {
            Logger::info_with_component("demo", &format!("📅 Selected {date}"));
            selected.set(Some(date));
        })
    };

    let on_error = {
        let error = error.clone();
        Callback::from(move |message: String| error.set(Some(message)))
    };

    let toggle_theme = {
        let theme = theme.clone();
        Callback::from(move |_: MouseEvent| {
            theme.set(match *theme {
                Theme::Dark => Theme::Light,
                Theme::Light => Theme::Dark,
            });
        })
    };

    let cycle_format = {
        let format = format.clone();
        Callback::from(move |_: MouseEvent| {
            let position = DateFormat::ALL.iter().position(|f| f == &*format).unwrap_or(0);
            format.set(DateFormat::ALL[(position + 1) % DateFormat::ALL.len()]);
        })
    };

    let toggle_disabled = {
        let disabled = disabled.clone();
        Callback::from(move |_: MouseEvent| disabled.set(!*disabled))
    };

    let selected_text = match *selected {
        Some(date) => format_for_display(&date, *format),
        None => "Nothing selected yet".to_string(),
    };

    html! {
        <main class="demo">
            <h1>{"Month picker"}</h1>
            <div class="demo-controls">
                <button onclick={toggle_theme}>{format!("Theme: {}", *theme)}</button>
                <button onclick={cycle_format}>{format!("Format: {}", *format)}</button>
                <button onclick={toggle_disabled}>
                    { if *disabled { "Enable" } else { "Disable" } }
                </button>
            </div>
            <MonthPickerField
                theme={*theme}
                format={*format}
                disabled={*disabled}
                close_on_select={true}
                on_date_change={on_date_change}
                on_error={on_error}
            />
            <p class="demo-selected">{selected_text}</p>
            if let Some(message) = &*error {
                <p class="demo-error">{message}</p>
            }
        </main>
    }
}

fn main() {
    Logger::init("debug");
    yew::Renderer::<App>::new().render();
}
