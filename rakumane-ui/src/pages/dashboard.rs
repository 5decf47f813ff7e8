//! Dashboard Page
//!
//! Month-to-date sales, goal progress, daily revenue and the
//! product ranking. Refreshes every five minutes.

use gloo_timers::callback::Interval;
use leptos::*;

use crate::api;
use crate::components::{CardSkeleton, Chart, ProgressBar, SettingsDialog, StatCard};
use crate::state::dashboard::{
    format_currency, top_products, DashboardView, SettingsForm, MSG_FETCH_FAILED,
    REFRESH_INTERVAL_MS,
};

#[component]
pub fn Dashboard() -> impl IntoView {
    // Bumped to refetch the summary
    let version = create_rw_signal(0u64);
    let settings = create_rw_signal(SettingsForm::default());

    let summary = create_local_resource(
        move || version.get(),
        |_| async move { api::fetch_sales().await },
    );

    let interval = Interval::new(REFRESH_INTERVAL_MS, move || {
        version.update(|v| *v += 1);
    });
    on_cleanup(move || drop(interval));

    let data = Signal::derive(move || summary.get().and_then(|r| r.ok()));
    let view_model = create_memo(move |_| {
        let result = summary.get();
        settings.with(|f| DashboardView::from_result(result.as_ref(), &f.goal))
    });

    let failed = move || view_model.with(|v| v.failed);
    let revenue = Signal::derive(move || view_model.with(|v| v.revenue.clone()));
    let sales = Signal::derive(move || view_model.with(|v| v.sales.clone()));
    let goal = Signal::derive(move || view_model.with(|v| v.goal.clone()));
    let rate = Signal::derive(move || view_model.with(|v| v.rate));
    let rate_text = Signal::derive(move || view_model.with(|v| v.rate_text()));
    let daily = Signal::derive(move || {
        data.with(|d| d.as_ref().map(|s| s.daily_sales.clone()).unwrap_or_default())
    });

    let on_saved = Callback::new(move |_| version.update(|v| *v += 1));

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"売上ダッシュボード"</h1>
                    <p class="text-gray-400 mt-1">"今月のGumroad売上"</p>
                </div>

                <div class="flex space-x-2">
                    <button
                        on:click=move |_| version.update(|v| *v += 1)
                        class="px-4 py-2 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    >
                        "更新"
                    </button>
                    <button
                        on:click=move |_| settings.update(|f| f.open = true)
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium"
                    >
                        "設定"
                    </button>
                </div>
            </div>

            <Show when=failed>
                <div class="p-4 bg-yellow-900/50 border border-yellow-700 rounded-lg text-yellow-300">
                    {MSG_FETCH_FAILED}
                </div>
            </Show>

            {move || if summary.loading().get() && data.with(|d| d.is_none()) {
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <CardSkeleton />
                        <CardSkeleton />
                        <CardSkeleton />
                    </div>
                }.into_view()
            } else {
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <StatCard label="今月の売上" value=revenue icon="💴" />
                        <StatCard label="販売件数" value=sales icon="🛒" />
                        <div>
                            <StatCard label="目標達成率" value=rate_text icon="🎯" caption=goal />
                            <ProgressBar percent=rate />
                        </div>
                    </div>
                }.into_view()
            }}

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"日別売上"</h2>
                <Chart data=daily />
            </section>

            <section class="bg-gray-800 rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"商品別ランキング"</h2>
                <Ranking data=data />
            </section>

            <SettingsDialog form=settings on_saved=on_saved />
        </div>
    }
}

/// Badge color for the top three ranks
fn rank_class(rank: usize) -> &'static str {
    match rank {
        1 => "bg-yellow-500 text-gray-900",
        2 => "bg-gray-300 text-gray-900",
        3 => "bg-orange-600 text-white",
        _ => "bg-gray-700 text-gray-300",
    }
}

#[component]
fn Ranking(data: Signal<Option<api::types::DashboardSummary>>) -> impl IntoView {
    view! {
        <div class="space-y-2">
            {move || {
                let top = data.with(|d| top_products(d.as_ref()));
                if top.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"今月の販売はまだありません"</p>
                    }.into_view()
                } else {
                    top.into_iter().enumerate().map(|(i, product)| {
                        let rank = i + 1;
                        view! {
                            <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                <div class="flex items-center space-x-3">
                                    <span class=format!(
                                        "w-7 h-7 rounded-full flex items-center justify-center text-sm font-bold {}",
                                        rank_class(rank)
                                    )>
                                        {rank}
                                    </span>
                                    <span>{product.product_name}</span>
                                    <span class="text-gray-400 text-sm">{format!("{}件", product.count)}</span>
                                </div>
                                <span class="font-semibold">{format_currency(product.revenue)}</span>
                            </div>
                        }
                    }).collect_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_top_three_are_highlighted() {
        assert_ne!(rank_class(1), rank_class(4));
        assert_ne!(rank_class(2), rank_class(3));
        assert_eq!(rank_class(4), rank_class(5));
    }
}
