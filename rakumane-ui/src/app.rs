//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::{Nav, Toast};
use crate::pages::{Dashboard, Generator};
use crate::state::global::{provide_global_state, use_global_state};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_global_state();

    // One health probe per page load
    let state = use_global_state();
    spawn_local(async move {
        match api::check_health().await {
            Ok(health) => {
                state.api_online.set(Some(true));
                state.api_version.set(Some(health.version));
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("API health check failed: {}", e).into());
                state.api_online.set(Some(false));
            }
        }
    });

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=Generator />
                        <Route path="/dashboard" view=Dashboard />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <Footer />

                <Toast />
            </div>
        </Router>
    }
}

/// Footer showing whether the API answered
#[component]
fn Footer() -> impl IntoView {
    let state = use_global_state();

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                <div class="flex items-center space-x-2">
                    {move || match state.api_online.get() {
                        Some(true) => view! {
                            <span class="flex items-center space-x-1 text-green-400">
                                <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                <span>"API接続中"</span>
                            </span>
                        }.into_view(),
                        Some(false) => view! {
                            <span class="flex items-center space-x-1 text-red-400">
                                <span class="w-2 h-2 bg-red-400 rounded-full" />
                                <span>"APIに接続できません"</span>
                            </span>
                        }.into_view(),
                        None => view! {
                            <span class="text-gray-400">"確認中..."</span>
                        }.into_view(),
                    }}
                </div>

                <div class="text-gray-400">
                    {move || state.api_version.get()
                        .map(|v| format!("v{}", v))
                        .unwrap_or_default()}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"ページが見つかりません"</h1>
            <p class="text-gray-400 mb-6">"URLを確認してください。"</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "商品生成へ戻る"
            </A>
        </div>
    }
}
