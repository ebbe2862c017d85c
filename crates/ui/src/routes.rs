use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{ExamView, HistoryView, HomeView};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/exam/:exam_type/:subject/:year", ExamView)]
        Exam { exam_type: String, subject: String, year: i32 },
        #[route("/history", HistoryView)] History {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Topbar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Topbar() -> Element {
    rsx! {
        nav { class: "topbar",
            h1 { "Exam Practice" }
            ul {
                li { Link { to: Route::Home {}, "Subjects" } }
                li { Link { to: Route::History {}, "History" } }
            }
        }
    }
}
