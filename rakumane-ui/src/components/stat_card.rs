//! Stat Card Component
//!
//! A labelled headline figure on the dashboard.

use leptos::*;

#[component]
pub fn StatCard(
    #[prop(into)]
    label: String,
    /// Already formatted value
    #[prop(into)]
    value: Signal<String>,
    #[prop(into, optional)]
    icon: Option<String>,
    /// Optional caption under the value
    #[prop(into, optional)]
    caption: Option<Signal<String>>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700">
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {icon.map(|i| view! { <span class="text-xl">{i}</span> })}
            </div>

            <div class="text-3xl font-bold mt-2">{move || value.get()}</div>

            {caption.map(|c| view! {
                <div class="text-gray-500 text-xs mt-2">{move || c.get()}</div>
            })}
        </div>
    }
}

/// Progress bar for the goal achievement rate
#[component]
pub fn ProgressBar(
    /// 0 to 100
    #[prop(into)]
    percent: Signal<f64>,
) -> impl IntoView {
    view! {
        <div class="w-full h-2 bg-gray-700 rounded-full mt-3 overflow-hidden">
            <div
                class="h-2 bg-primary-500 rounded-full transition-all duration-500"
                style=move || format!("width: {:.1}%", percent.get().clamp(0.0, 100.0))
            />
        </div>
    }
}
