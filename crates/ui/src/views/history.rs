use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AttemptCardVm, map_attempt_cards};

const RECENT_LIMIT: u32 = 10;

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();

    let resource = {
        let auth = ctx.auth();
        let attempts = ctx.attempts();
        use_resource(move || {
            let auth = auth.clone();
            let attempts = attempts.clone();
            async move {
                let Some(user) = auth
                    .current_user()
                    .await
                    .map_err(|_| ViewError::LoadFailed)?
                else {
                    return Err(ViewError::AuthRequired);
                };
                attempts
                    .refresh(user.id, RECENT_LIMIT)
                    .await
                    .map_err(|_| ViewError::LoadFailed)?;
                let recent = attempts.recent().map_err(|_| ViewError::LoadFailed)?;
                Ok(map_attempt_cards(&recent))
            }
        })
    };

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "History" }

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
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No attempts yet. Take an exam to see it here." }
                    } else {
                        ul { class: "attempt-list",
                            for card in cards {
                                AttemptCard { card }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
fn AttemptCard(card: AttemptCardVm) -> Element {
    rsx! {
        li { class: "attempt-card",
            span { class: "attempt-title", "{card.title}" }
            span { class: "attempt-score", "{card.score_label}" }
            p { "{card.detail}" }
            span { class: "attempt-date", "{card.completed_label}" }
        }
    }
}
