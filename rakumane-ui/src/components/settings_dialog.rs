//! Settings Dialog
//!
//! Modal capturing the Gumroad token and monthly goal.

use leptos::*;

use crate::api;
use crate::state::dashboard::SettingsForm;
use crate::state::global::use_global_state;

#[component]
pub fn SettingsDialog(
    form: RwSignal<SettingsForm>,
    /// Called once after a successful save
    #[prop(into)]
    on_saved: Callback<()>,
) -> impl IntoView {
    let state = use_global_state();

    let save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if form.with_untracked(|f| f.pending) {
            return;
        }

        let mut settings = None;
        let mut invalid = None;
        form.update(|f| match f.begin_save() {
            Ok(s) => settings = Some(s),
            Err(msg) => invalid = Some(msg),
        });

        if let Some(msg) = invalid {
            state.show_error(msg);
            return;
        }
        let Some(settings) = settings else {
            return;
        };

        spawn_local(async move {
            let result = api::save_settings(&settings).await;
            let mut refetch = false;
            form.update(|f| refetch = f.finish_save(result.is_ok()));

            match result {
                Ok(()) => {
                    state.show_success("設定を保存しました");
                    if refetch {
                        on_saved.call(());
                    }
                }
                Err(e) => state.show_error(&format!("設定の保存に失敗しました: {}", e)),
            }
        });
    };

    let close = move |_| form.update(|f| f.open = false);

    view! {
        <Show when=move || form.with(|f| f.open)>
            <div class="fixed inset-0 z-40 bg-black/60 flex items-center justify-center">
                <form
                    on:submit=save
                    class="bg-gray-800 rounded-xl p-6 w-full max-w-md space-y-4 border border-gray-700"
                >
                    <h2 class="text-xl font-semibold">"Gumroad設定"</h2>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"アクセストークン"</label>
                        <input
                            type="password"
                            prop:value=move || form.with(|f| f.token.clone())
                            on:input=move |ev| form.update(|f| f.token = event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div>
                        <label class="block text-sm text-gray-400 mb-2">"月間目標（円）"</label>
                        <input
                            type="number"
                            min="1"
                            prop:value=move || form.with(|f| f.goal.clone())
                            on:input=move |ev| form.update(|f| f.goal = event_target_value(&ev))
                            class="w-full bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                    </div>

                    <div class="flex justify-end space-x-2">
                        <button
                            type="button"
                            on:click=close
                            class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg"
                        >
                            "キャンセル"
                        </button>
                        <button
                            type="submit"
                            disabled=move || form.with(|f| f.pending)
                            class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if form.with(|f| f.pending) { "保存中..." } else { "保存" }}
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
