use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use monthpicker_core::{DateCallback, DateFormat, PickerConfig, Theme};
use web_sys::HtmlElement;
use yew::prelude::*;

use crate::handle::PickerHandle;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct MonthPickerFieldProps {
    /// Initial selection, or None for today. Only read on mount.
    #[prop_or_default]
    pub start_date: Option<NaiveDate>,
    #[prop_or_default]
    pub theme: Theme,
    #[prop_or_default]
    pub format: DateFormat,
    #[prop_or_default]
    pub close_on_select: bool,
    #[prop_or_default]
    pub only_show_current_month: bool,
    #[prop_or_default]
    pub align_picker_middle: bool,
    #[prop_or_default]
    pub disabled: bool,
    /// Called with every newly selected date
    pub on_date_change: Callback<NaiveDate>,
    /// Called with the message when the picker could not be mounted
    #[prop_or_default]
    pub on_error: Option<Callback<String>>,
}

/// Mounts a month picker into its own `div` and keeps it in sync with the props.
#[function_component(MonthPickerField)]
pub fn month_picker_field(props: &MonthPickerFieldProps) -> Html {
    let root_ref = use_node_ref();
    let handle = use_mut_ref(|| None::<PickerHandle>);

    // The picker keeps one callback for its whole life; it forwards to
    // whatever `on_date_change` the latest render passed in.
    let on_date_change = use_mut_ref(|| props.on_date_change.clone());
    *on_date_change.borrow_mut() = props.on_date_change.clone();

    {
        let root_ref = root_ref.clone();
        let handle = handle.clone();
        let on_date_change = on_date_change.clone();
        let on_error = props.on_error.clone();
        let config = PickerConfig {
            start_date: props.start_date,
            theme: props.theme.as_str().to_string(),
            format: props.format.as_str().to_string(),
            close_on_select: props.close_on_select,
            only_show_current_month: props.only_show_current_month,
            align_picker_middle: props.align_picker_middle,
        };
        let disabled = props.disabled;

        use_effect_with((), move |_| {
            if let Some(root) = root_ref.cast::<HtmlElement>() {
                let forward: DateCallback = Rc::new(move |date: NaiveDate| {
                    let callback = on_date_change.borrow().clone();
                    callback.emit(date);
                });

                match PickerHandle::mount(root, &config, vec![forward]) {
                    Ok(mounted) => {
                        if disabled {
                            mounted.update(|picker| picker.disable());
                        }
                        Logger::info_with_component("MonthPickerField", "mounted");
                        *handle.borrow_mut() = Some(mounted);
                    }
                    Err(err) => {
                        Logger::warn_with_component("MonthPickerField", &err.to_string());
                        if let Some(on_error) = &on_error {
                            on_error.emit(err.to_string());
                        }
                    }
                }
            }

            move || {
                if let Some(mounted) = handle.borrow_mut().take() {
                    mounted.update(|picker| picker.destroy());
                }
            }
        });
    }

    {
        let handle = handle.clone();
        let deps = (
            props.theme,
            props.format,
            props.close_on_select,
            props.only_show_current_month,
            props.align_picker_middle,
            props.disabled,
        );

        use_effect_with(deps, move |deps| {
            sync_props(&handle, *deps);
            || ()
        });
    }

    html! {
        <div class="month-picker-field" ref={root_ref} />
    }
}

type SyncedProps = (Theme, DateFormat, bool, bool, bool, bool);

/// Setters are ignored while disabled, so re-enable before applying them.
fn sync_props(handle: &Rc<RefCell<Option<PickerHandle>>>, deps: SyncedProps) {
    let (theme, format, close_on_select, only_show_current_month, align_picker_middle, disabled) = deps;
    let Some(mounted) = handle.borrow().clone() else {
        return;
    };

    mounted.update(|picker| {
        picker.enable();
        picker.set_theme(theme.as_str());
        picker.set_format(format.as_str());
        picker.set_close_on_select(close_on_select);
        picker.set_only_show_current_month(only_show_current_month);
        picker.set_align_picker_middle(align_picker_middle);
        if disabled {
            picker.disable();
        }
    });
}
