use dioxus::prelude::*;
use dioxus_router::Link;

use provider::UserIdentity;
use services::UpgradeOutcome;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SubjectCardVm, map_subject_cards};

#[derive(Clone, Debug, PartialEq)]
struct HomeData {
    cards: Vec<SubjectCardVm>,
    identity: Option<UserIdentity>,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let upgrade = ctx.upgrade();
    let mut notice = use_signal(|| None::<String>);

    let mut resource = {
        let exam = ctx.exam();
        let auth = ctx.auth();
        use_resource(move || {
            let exam = exam.clone();
            let auth = auth.clone();
            async move {
                let identity = auth
                    .current_user()
                    .await
                    .map_err(|_| ViewError::LoadFailed)?;
                let subjects = exam
                    .list_subjects()
                    .await
                    .map_err(|_| ViewError::LoadFailed)?;
                let is_premium = identity.as_ref().is_some_and(|user| user.is_premium);
                Ok(HomeData {
                    cards: map_subject_cards(&subjects, is_premium),
                    identity,
                })
            }
        })
    };

    let state = view_state_from_resource(&resource);
    let price_label = format!("Go Premium (₦{})", upgrade.config().amount_minor / 100);

    rsx! {
        div { class: "page",
            h2 { "Subjects" }

            if let Some(message) = notice() {
                p { class: "notice", "{message}" }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
                ViewState::Ready(data) => rsx! {
                    match data.identity.clone() {
                        None => rsx! {
                            p { class: "account",
                                "Browsing as a guest. Sign in to take exams and go premium."
                            }
                        },
                        Some(user) if user.is_premium => rsx! {
                            p { class: "account", "Signed in as {user.email} · Premium" }
                        },
                        Some(user) => rsx! {
                            div { class: "account",
                                span { "Signed in as {user.email}" }
                                button {
                                    class: "upgrade",
                                    onclick: {
                                        let upgrade = upgrade.clone();
                                        move |_| {
                                            let upgrade = upgrade.clone();
                                            let user = user.clone();
                                            spawn(async move {
                                                match upgrade.upgrade(&user).await {
                                                    Ok(UpgradeOutcome::Upgraded { .. }) => {
                                                        notice.set(Some(
                                                            "You are premium now. Every subject is unlocked.".into(),
                                                        ));
                                                        resource.restart();
                                                    }
                                                    Ok(UpgradeOutcome::Cancelled) => {}
                                                    Err(_) => notice.set(Some(
                                                        "The upgrade did not go through. Please try again.".into(),
                                                    )),
                                                }
                                            });
                                        }
                                    },
                                    "{price_label}"
                                }
                            }
                        },
                    }

                    if data.cards.is_empty() {
                        p { "No subjects yet. Check back soon." }
                    } else {
                        ul { class: "subject-grid",
                            for card in data.cards {
                                SubjectCard { card }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn SubjectCard(card: SubjectCardVm) -> Element {
    rsx! {
        li { class: "subject-card",
            span { class: "subject-exam", "{card.exam_label}" }
            h3 { "{card.name}" }
            p { class: "subject-detail", "{card.detail}" }
            if card.locked {
                span { class: "locked", "Premium" }
            } else {
                Link { class: "start-link", to: card.route.clone(), "Start" }
            }
        }
    }
}
