//! App shell: resolves the shop scope, loads the relations snapshot,
//! and mounts the admin screen.

use gloo::console;
use relata_api_models::RelationsResponse;
use yew::prelude::*;

use crate::features::admin::api::fetch_relations;
use crate::features::admin::view::AdminControls;
use crate::features::relations::view::RelationList;

/// Shop used when the embedding page provides no `shop` parameter, so
/// local development works against the seeded backend.
const DEFAULT_SHOP: &str = "demo.myshopify.com";

fn shop_from_location() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("shop"))
        .filter(|shop| !shop.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SHOP.to_string())
}

fn backend_base_url() -> String {
    let from_query = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
        .and_then(|params| params.get("backend"));
    if let Some(base) = from_query {
        return base;
    }
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[function_component(RelataApp)]
fn relata_app() -> Html {
    let shop = use_memo(|_| shop_from_location(), ());
    let base_url = use_memo(|_| backend_base_url(), ());
    let snapshot = use_state(|| None::<RelationsResponse>);
    let load_failed = use_state(|| false);

    {
        let snapshot = snapshot.clone();
        let load_failed = load_failed.clone();
        let shop = shop.clone();
        let base_url = base_url.clone();
        use_effect_with_deps(
            move |_| {
                yew::platform::spawn_local(async move {
                    match fetch_relations(&base_url, &shop).await {
                        Ok(response) => snapshot.set(Some(response)),
                        Err(err) => {
                            console::error!(format!("failed to load relations: {err}"));
                            load_failed.set(true);
                        }
                    }
                });
                || ()
            },
            (),
        );
    }

    let body = match snapshot.as_ref() {
        Some(response) => html! {
            <>
                <header class="flex justify-between items-center mb-4">
                    <h1 class="text-2xl font-semibold">
                        {"Parent & Child Collection Relations"}
                    </h1>
                    <AdminControls
                        base_url={AttrValue::from((*base_url).clone())}
                        shop={AttrValue::from((*shop).clone())}
                        plan={response.current_plan.clone()}
                    />
                </header>
                <RelationList
                    shop={AttrValue::from((*shop).clone())}
                    relations={response.relations.clone()}
                />
            </>
        },
        None if *load_failed => html! {
            <div class="alert alert-error" role="alert">
                {"Could not load collection relations. Refresh to try again."}
            </div>
        },
        None => html! {
            <div class="flex justify-center py-8">
                <span class="loading loading-spinner loading-lg" />
            </div>
        },
    };

    html! {
        <div class="container mx-auto max-w-4xl py-4 space-y-4">{body}</div>
    }
}

/// Mount the admin screen onto the document body.
pub fn run_app() {
    console_error_panic_hook::set_once();
    yew::Renderer::<RelataApp>::new().render();
}
