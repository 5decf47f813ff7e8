//! Generator Page
//!
//! Listing form, candidate names with copy actions, and the
//! content download / publish flow.

use leptos::*;

use crate::api;
use crate::api::types::Category;
use crate::browser;
use crate::components::InlineLoading;
use crate::state::generator::{names_text, tags_text, GeneratorState, GUMROAD_NEW_PRODUCT_URL};
use crate::state::global::{use_global_state, GlobalState};

#[component]
pub fn Generator() -> impl IntoView {
    let state = use_global_state();
    let form = create_rw_signal(GeneratorState::default());
    let generating = create_rw_signal(false);
    let writing = create_rw_signal(false);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if generating.get_untracked() {
            return;
        }

        let req = match form.with_untracked(|f| f.listing_request()) {
            Ok(req) => req,
            Err(msg) => {
                state.show_error(msg);
                return;
            }
        };

        generating.set(true);
        spawn_local(async move {
            match api::generate(&req).await {
                Ok(listing) => form.update(|f| f.accept_listing(listing)),
                Err(e) => state.show_error(&format!("生成に失敗しました: {}", e)),
            }
            generating.set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"商品生成"</h1>
                <p class="text-gray-400 mt-1">"カテゴリとターゲットから販売ページの素材を作成します"</p>
            </div>

            <section class="bg-gray-800 rounded-xl p-6">
                <form on:submit=submit class="space-y-4">
                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"カテゴリ"</label>
                        <select
                            on:change=move |ev| {
                                if let Some(category) = Category::from_value(&event_target_value(&ev)) {
                                    form.update(|f| f.category = category);
                                }
                            }
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        >
                            {Category::ALL.into_iter().map(|c| view! {
                                <option
                                    value=c.as_str()
                                    selected=move || form.with(|f| f.category == c)
                                >
                                    {c.label()}
                                </option>
                            }).collect_view()}
                        </select>
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"ターゲット層"</label>
                        <input
                            type="text"
                            placeholder="例: 副業を始めたい会社員"
                            prop:value=move || form.with(|f| f.target.clone())
                            on:input=move |ev| form.update(|f| f.target = event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"補足（任意）"</label>
                        <textarea
                            rows="3"
                            prop:value=move || form.with(|f| f.notes.clone())
                            on:input=move |ev| form.update(|f| f.notes = event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <button
                        type="submit"
                        disabled=move || generating.get()
                        class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                               rounded-lg font-medium transition-colors flex items-center justify-center space-x-2"
                    >
                        {move || if generating.get() {
                            view! { <InlineLoading /> <span>"生成中..."</span> }.into_view()
                        } else {
                            view! { <span>"生成する"</span> }.into_view()
                        }}
                    </button>
                </form>
            </section>

            <Show when=move || form.with(|f| f.listing.is_some())>
                <ListingResult form=form writing=writing />
            </Show>
        </div>
    }
}

/// Copy `text` and report the outcome in a toast
fn copy_with_toast(state: GlobalState, text: String, label: &'static str) {
    spawn_local(async move {
        match browser::copy_to_clipboard(&text).await {
            Ok(()) => state.show_success(&format!("{}をコピーしました", label)),
            Err(e) => state.show_error(&e),
        }
    });
}

#[component]
fn CopyButton(
    #[prop(into)]
    text: Signal<String>,
    label: &'static str,
) -> impl IntoView {
    let state = use_global_state();

    view! {
        <button
            type="button"
            on:click=move |_| copy_with_toast(state, text.get_untracked(), label)
            class="text-sm px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg"
        >
            "コピー"
        </button>
    }
}

#[component]
fn ListingResult(form: RwSignal<GeneratorState>, writing: RwSignal<bool>) -> impl IntoView {
    let state = use_global_state();

    let names = Signal::derive(move || {
        form.with(|f| f.listing.as_ref().map(|l| l.product_names.clone()).unwrap_or_default())
    });
    let names_copy = Signal::derive(move || {
        form.with(|f| f.listing.as_ref().map(names_text).unwrap_or_default())
    });
    let description = Signal::derive(move || {
        form.with(|f| f.listing.as_ref().map(|l| l.description.clone()).unwrap_or_default())
    });
    let tags = Signal::derive(move || {
        form.with(|f| f.listing.as_ref().map(tags_text).unwrap_or_default())
    });
    let price = move || form.with(|f| f.listing.as_ref().map(|l| l.suggested_price).unwrap_or(0));

    let write_content = move |_| {
        if writing.get_untracked() {
            return;
        }
        let req = match form.with_untracked(|f| f.content_request()) {
            Ok(req) => req,
            Err(msg) => {
                state.show_error(msg);
                return;
            }
        };

        writing.set(true);
        spawn_local(async move {
            match api::generate_content(&req).await {
                Ok(content) => {
                    form.update(|f| f.content = Some(content));
                    state.show_success("コンテンツを生成しました");
                }
                Err(e) => state.show_error(&format!("コンテンツ生成に失敗しました: {}", e)),
            }
            writing.set(false);
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-6">
            <div>
                <div class="flex items-center justify-between mb-2">
                    <h2 class="text-xl font-semibold">"商品名候補"</h2>
                    <CopyButton text=names_copy label="商品名" />
                </div>
                <div class="space-y-2">
                    {move || names.get().into_iter().map(|name| {
                        let value = name.clone();
                        let checked = name.clone();
                        view! {
                            <label class="flex items-center space-x-3 p-3 bg-gray-700 rounded-lg cursor-pointer">
                                <input
                                    type="radio"
                                    name="product-name"
                                    prop:checked=move || form.with(|f| f.selected_name == checked)
                                    on:change=move |_| form.update(|f| f.selected_name = value.clone())
                                />
                                <span>{name}</span>
                            </label>
                        }
                    }).collect_view()}
                </div>
            </div>

            <div>
                <div class="flex items-center justify-between mb-2">
                    <h2 class="text-xl font-semibold">"説明文"</h2>
                    <CopyButton text=description label="説明文" />
                </div>
                <p class="whitespace-pre-wrap text-gray-300">{move || description.get()}</p>
            </div>

            <div class="flex items-center justify-between">
                <div>
                    <span class="text-gray-400 text-sm">"推奨価格"</span>
                    <div class="text-2xl font-bold">{move || format!("{}円", price())}</div>
                </div>
            </div>

            <div>
                <div class="flex items-center justify-between mb-2">
                    <h2 class="text-xl font-semibold">"タグ"</h2>
                    <CopyButton text=tags label="タグ" />
                </div>
                <p class="text-gray-300">{move || tags.get()}</p>
            </div>

            <button
                type="button"
                on:click=write_content
                disabled=move || writing.get()
                class="w-full py-3 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                       rounded-lg font-medium transition-colors flex items-center justify-center space-x-2"
            >
                {move || if writing.get() {
                    view! { <InlineLoading /> <span>"コンテンツ生成中..."</span> }.into_view()
                } else {
                    view! { <span>"コンテンツを生成"</span> }.into_view()
                }}
            </button>

            <Show when=move || form.with(|f| f.content.is_some())>
                <ContentResult form=form />
            </Show>
        </section>
    }
}

#[component]
fn ContentResult(form: RwSignal<GeneratorState>) -> impl IntoView {
    let state = use_global_state();

    let body = Signal::derive(move || {
        form.with(|f| f.content.as_ref().map(|c| c.content.clone()).unwrap_or_default())
    });

    let download = move |_| {
        let file = form.with_untracked(|f| f.content.clone());
        if let Some(file) = file {
            match browser::download_markdown(&file.filename, &file.content) {
                Ok(()) => state.show_success(&format!("{} を保存しました", file.filename)),
                Err(e) => state.show_error(&e),
            }
        }
    };

    let publish = move |_| {
        let Some(summary) = form.with_untracked(|f| f.publish_summary()) else {
            return;
        };
        // Popup blockers only allow opening inside the click handler
        browser::open_in_new_tab(GUMROAD_NEW_PRODUCT_URL);
        spawn_local(async move {
            match browser::copy_to_clipboard(&summary).await {
                Ok(()) => state.show_success("出品情報をコピーしました。Gumroadに貼り付けてください"),
                Err(e) => state.show_error(&e),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-xl font-semibold">"コンテンツ"</h2>
                <div class="flex space-x-2">
                    <CopyButton text=body label="コンテンツ" />
                    <button
                        type="button"
                        on:click=download
                        class="text-sm px-3 py-1 bg-gray-700 hover:bg-gray-600 rounded-lg"
                    >
                        "ダウンロード"
                    </button>
                    <button
                        type="button"
                        on:click=publish
                        class="text-sm px-3 py-1 bg-primary-600 hover:bg-primary-700 rounded-lg"
                    >
                        "Gumroadに出品"
                    </button>
                </div>
            </div>
            <pre class="whitespace-pre-wrap bg-gray-900 rounded-lg p-4 text-sm text-gray-300 max-h-96 overflow-y-auto">
                {move || body.get()}
            </pre>
        </div>
    }
}
