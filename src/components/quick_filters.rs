//! Quick Filter Panels

use leptos::prelude::*;

use crate::admin::filters::{date_range_url, status_url, DateRange, StatusFilter, DATE_RANGES, STATUS_FILTERS};
use crate::dom;
use crate::error::UiResult;

fn go(target: UiResult<String>) {
    match target {
        Ok(url) => dom::navigate(&url),
        Err(e) => log::warn!("[ADMIN] quick filter: {}", e),
    }
}

fn apply_status(filter: StatusFilter) {
    if let Some(href) = dom::location_href() {
        go(status_url(&href, &filter));
    }
}

fn apply_range(range: DateRange) {
    if let Some(href) = dom::location_href() {
        go(date_range_url(&href, &range, chrono::Utc::now().date_naive()));
    }
}

#[component]
pub fn QuickStatusFilters() -> impl IntoView {
    view! {
        <div class="quick-filters">
            <h3>"🚀 Filtros Rápidos"</h3>
            <div class="quick-filter-buttons">
                {STATUS_FILTERS
                    .into_iter()
                    .map(|filter| {
                        view! {
                            <button
                                type="button"
                                class="button quick-filter"
                                on:click=move |_| apply_status(filter)
                            >
                                {filter.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn QuickDateFilters() -> impl IntoView {
    view! {
        <div class="quick-date-filters">
            <h3>"📅 Período"</h3>
            <div class="quick-date-buttons">
                {DATE_RANGES
                    .into_iter()
                    .map(|range| {
                        view! {
                            <button
                                type="button"
                                class="button quick-date"
                                on:click=move |_| apply_range(range)
                            >
                                {range.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
