use dioxus::prelude::*;
use dioxus_router::Router;

use provider::Provider;
use services::AppServices;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Props, Clone)]
struct SmokeProps {
    ctx: AppContext,
}

impl PartialEq for SmokeProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn SmokeRoot(props: SmokeProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    rsx! { Router::<Route> {} }
}

fn render_home() -> String {
    let (provider, _backend) = Provider::in_memory();
    let ctx = AppContext::new(AppServices::with_defaults(&provider));
    let mut dom = VirtualDom::new_with_props(SmokeRoot, SmokeProps { ctx });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[tokio::test(flavor = "current_thread")]
async fn home_route_renders_the_app_chrome() {
    let html = render_home();
    assert!(html.contains("Exam Practice"), "missing title in {html}");
    assert!(html.contains("Subjects"), "missing nav in {html}");
    assert!(html.contains("History"), "missing nav in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_route_starts_in_the_loading_state() {
    let html = render_home();
    assert!(html.contains("Loading..."), "missing loading state in {html}");
}
