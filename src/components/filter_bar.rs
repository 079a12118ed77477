//! Filter Bar Component
//!
//! Month, day and completion selectors over the task list.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::filter::{day_options, month_options, CompletionAvailability, CompletionFilter};
use crate::models::{parse_date, MonthKey, DATE_FORMAT};
use crate::store::{store_update_filters, BoardStateStoreFields};

#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_app_context();
    let board = ctx.board;

    let months = Memo::new(move |_| board.tasks().with(|tasks| month_options(tasks)));
    // Selection is driven per option so a freshly built list keeps it
    let selected_month = move || board.filters().with(|f| f.month());
    let selected_day = move || board.filters().with(|f| f.day());
    let days = Memo::new(move |_| {
        let month = board.filters().with(|f| f.month());
        month
            .map(|m| board.tasks().with(|tasks| day_options(tasks, m)))
            .unwrap_or_default()
    });
    let availability = Memo::new(move |_| board.tasks().with(|tasks| CompletionAvailability::of(tasks)));

    let on_month = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let month = value.parse::<MonthKey>().ok();
        store_update_filters(&board, |f| f.select_month(month));
    };

    let on_day = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        let day = parse_date(&value).ok();
        store_update_filters(&board, |f| {
            f.select_day(day);
        });
    };

    let on_completion = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        if let Ok(completion) = value.parse::<CompletionFilter>() {
            store_update_filters(&board, |f| f.set_completion(completion));
        }
    };

    view! {
        <div class="filter-bar">
            <label>
                "Month"
                <select name="month" on:change=on_month>
                    <option value="" prop:selected=move || selected_month().is_none()>"All months"</option>
                    <For
                        each=move || months.get()
                        key=|month| *month
                        children=move |month| {
                            let value = month.to_string();
                            let label = value.clone();
                            view! {
                                <option value=value prop:selected=move || selected_month() == Some(month)>
                                    {label}
                                </option>
                            }
                        }
                    />
                </select>
            </label>

            <label>
                "Day"
                <select
                    name="day"
                    disabled=move || !board.filters().with(|f| f.day_enabled())
                    on:change=on_day
                >
                    <option value="" prop:selected=move || selected_day().is_none()>"All days"</option>
                    <For
                        each=move || days.get()
                        key=|day| day.date
                        children=move |day| {
                            let date = day.date;
                            view! {
                                <option
                                    value=date.format(DATE_FORMAT).to_string()
                                    prop:selected=move || selected_day() == Some(date)
                                >
                                    {day.label}
                                </option>
                            }
                        }
                    />
                </select>
            </label>

            <label>
                "Status"
                <select name="completion" on:change=on_completion>
                    {CompletionFilter::ALL.into_iter().map(|filter| view! {
                        <option
                            value=filter.as_str()
                            disabled=move || !availability.get().allows(filter)
                            prop:selected=move || board.filters().with(|f| f.completion()) == filter
                        >
                            {filter.label()}
                        </option>
                    }).collect_view()}
                </select>
            </label>

            <Show when=move || board.filters().with(|f| f.is_active())>
                <button
                    class="clear-filters-btn"
                    on:click=move |_| store_update_filters(&board, |f| *f = Default::default())
                >
                    "Clear filters"
                </button>
            </Show>
        </div>
    }
}
