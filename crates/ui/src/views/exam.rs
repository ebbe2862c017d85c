use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use dioxus::core::Task;
use dioxus::prelude::*;
use dioxus_router::Link;

use exam_core::model::{ExamSelection, ExamType};
use provider::UserId;
use services::{ExamServiceError, SessionTicker};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{ExamVm, OptionVm, format_elapsed};

const SAVE_FAILED_NOTICE: &str = "Could not save this attempt. Your results are still shown.";

#[derive(Clone, Debug, PartialEq)]
struct QuestionScreen {
    progress: String,
    countdown: String,
    time_up: bool,
    prompt: String,
    options: Vec<OptionVm>,
    can_advance: bool,
    can_retreat: bool,
    is_last: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct ReviewRow {
    prompt: String,
    chosen: String,
    correct: String,
    explanation: String,
    is_correct: bool,
}

#[derive(Clone, Debug, PartialEq)]
struct ResultsScreen {
    percent: u8,
    grade: &'static str,
    correct_label: String,
    elapsed_label: String,
    reviews: Vec<ReviewRow>,
}

enum Screen {
    Loading,
    Error(ViewError),
    Question(QuestionScreen),
    Results(ResultsScreen),
}

#[component]
pub fn ExamView(exam_type: String, subject: String, year: i32) -> Element {
    let ctx = use_context::<AppContext>();
    let exam = ctx.exam();

    let vm = use_signal(|| None::<ExamVm>);
    let mut load_error = use_signal(|| None::<ViewError>);
    let mut user_id = use_signal(|| None::<UserId>);
    let mut save_notice = use_signal(|| None::<String>);
    let mut saved = use_signal(|| false);
    let mut ticker = use_signal(SessionTicker::new);
    let mut tick_task = use_signal(|| None::<Task>);

    // One session per mount; the route carries the full selection.
    {
        let exam = Arc::clone(&exam);
        let auth = ctx.auth();
        let subject = subject.clone();
        let parsed = ExamType::from_str(&exam_type).ok();
        use_future(move || {
            let exam = Arc::clone(&exam);
            let auth = Arc::clone(&auth);
            let subject = subject.clone();
            let mut vm = vm;
            async move {
                let Some(exam_type) = parsed else {
                    load_error.set(Some(ViewError::NotFound));
                    return;
                };
                let identity = match auth.require_user().await {
                    Ok(identity) => identity,
                    Err(ExamServiceError::AuthRequired) => {
                        load_error.set(Some(ViewError::AuthRequired));
                        return;
                    }
                    Err(_) => {
                        load_error.set(Some(ViewError::LoadFailed));
                        return;
                    }
                };
                user_id.set(Some(identity.id));

                let selection = ExamSelection::new(exam_type, subject, year);
                match exam.start_exam(selection, &identity).await {
                    Ok(session) => {
                        vm.set(Some(ExamVm::new(session)));
                        start_ticker(vm, ticker, tick_task);
                    }
                    Err(ExamServiceError::NoQuestions) => {
                        load_error.set(Some(ViewError::NotFound));
                    }
                    Err(_) => load_error.set(Some(ViewError::LoadFailed)),
                }
            }
        });
    }

    // Persist once per run, as soon as the session completes; a failed save
    // is a notice, never a rollback of the results on screen.
    {
        let exam = Arc::clone(&exam);
        use_effect(move || {
            let completed = vm.read().as_ref().is_some_and(ExamVm::is_completed);
            if !completed || saved() {
                return;
            }
            saved.set(true);
            ticker.write().stop();
            if let Some(task) = tick_task.take() {
                task.cancel();
            }
            let Some(user) = user_id.peek().as_ref().copied() else {
                return;
            };
            let session = vm.peek().as_ref().map(|v| v.session().clone());
            let exam = Arc::clone(&exam);
            spawn(async move {
                if let Some(session) = session {
                    if exam.save_attempt(user, &session).await.is_err() {
                        save_notice.set(Some(SAVE_FAILED_NOTICE.to_string()));
                    }
                }
            });
        });
    }

    use_drop(move || {
        ticker.write().stop();
        if let Some(task) = tick_task.take() {
            task.cancel();
        }
    });

    let screen = if let Some(err) = load_error() {
        Screen::Error(err)
    } else {
        match vm.read().as_ref() {
            None => Screen::Loading,
            Some(v) if v.is_completed() => Screen::Results(results_screen(v)),
            Some(v) => Screen::Question(question_screen(v)),
        }
    };

    let mut vm = vm;
    let on_retake = move |_| {
        saved.set(false);
        save_notice.set(None);
        if let Some(v) = vm.write().as_mut() {
            v.retake(Utc::now());
        }
        start_ticker(vm, ticker, tick_task);
    };

    rsx! {
        div { class: "page exam",
            match screen {
                Screen::Loading => rsx! {
                    p { "Loading..." }
                },
                Screen::Error(err) => rsx! {
                    div { class: "exam-error",
                        p { class: "error", "{err.message()}" }
                        Link { to: Route::Home {}, "Back to subjects" }
                    }
                },
                Screen::Question(screen) => rsx! {
                    div { class: "exam-header",
                        span { class: "progress", "{screen.progress}" }
                        span {
                            class: if screen.time_up { "countdown expired" } else { "countdown" },
                            "{screen.countdown}"
                        }
                    }

                    if screen.time_up {
                        p { class: "notice", "Time's up for this question — moving on." }
                    }

                    div { class: "question-card",
                        p { class: "prompt", "{screen.prompt}" }
                        ul { class: "options",
                            for option in screen.options {
                                li {
                                    button {
                                        class: if option.selected { "option selected" } else { "option" },
                                        disabled: screen.time_up,
                                        onclick: move |_| {
                                            if let Some(v) = vm.write().as_mut() {
                                                v.select(option.label);
                                            }
                                        },
                                        span { class: "option-label", "{option.label}" }
                                        "{option.text}"
                                    }
                                }
                            }
                        }
                    }

                    div { class: "exam-controls",
                        button {
                            class: "secondary",
                            disabled: !screen.can_retreat,
                            onclick: move |_| {
                                if let Some(v) = vm.write().as_mut() {
                                    v.previous();
                                }
                            },
                            "Previous"
                        }
                        button {
                            disabled: !screen.can_advance,
                            onclick: move |_| {
                                if let Some(v) = vm.write().as_mut() {
                                    v.next(Utc::now());
                                }
                            },
                            if screen.is_last { "Finish" } else { "Next" }
                        }
                    }
                },
                Screen::Results(screen) => rsx! {
                    div { class: "results-card",
                        h2 { "Results" }
                        if let Some(message) = save_notice() {
                            p { class: "notice", "{message}" }
                        }
                        p { class: "score", "{screen.percent}%" }
                        p { class: "grade", "{screen.grade}" }
                        p { class: "results-detail",
                            "{screen.correct_label} · {screen.elapsed_label}"
                        }
                        div { class: "results-actions",
                            button { onclick: on_retake, "Retake" }
                            Link { to: Route::Home {}, "Back to subjects" }
                        }
                    }

                    h3 { "Review" }
                    ul { class: "review-list",
                        for row in screen.reviews {
                            li {
                                class: if row.is_correct { "review correct" } else { "review incorrect" },
                                p { class: "prompt", "{row.prompt}" }
                                p { "Your answer: {row.chosen}" }
                                if !row.is_correct {
                                    p { "Correct answer: {row.correct}" }
                                }
                                if !row.explanation.is_empty() {
                                    p { class: "explanation", "{row.explanation}" }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}

/// Restart the 1 Hz tick stream, cancelling any live consumer first.
/// `SessionTicker::start` already cancels the producer task, so a session is
/// never driven by two timers.
fn start_ticker(
    mut vm: Signal<Option<ExamVm>>,
    mut ticker: Signal<SessionTicker>,
    mut tick_task: Signal<Option<Task>>,
) {
    let mut events = ticker.write().start();
    if let Some(task) = tick_task.take() {
        task.cancel();
    }
    let task = spawn(async move {
        while events.recv().await.is_some() {
            let mut completed = true;
            if let Some(v) = vm.write().as_mut() {
                v.tick(Utc::now());
                completed = v.is_completed();
            }
            if completed {
                break;
            }
        }
    });
    tick_task.set(Some(task));
}

fn question_screen(vm: &ExamVm) -> QuestionScreen {
    QuestionScreen {
        progress: vm.progress_label(),
        countdown: vm.countdown_label(),
        time_up: vm.time_up(),
        prompt: vm.prompt().to_owned(),
        options: vm.options(),
        can_advance: vm.can_advance(),
        can_retreat: vm.can_retreat(),
        is_last: vm.is_last_question(),
    }
}

fn results_screen(vm: &ExamVm) -> ResultsScreen {
    let report = vm.report();
    let elapsed_label = vm
        .session()
        .summary()
        .map_or_else(|_| "—".to_string(), |s| format_elapsed(s.elapsed_seconds()));

    ResultsScreen {
        percent: report.percentage(),
        grade: report.grade().label(),
        correct_label: format!(
            "{} / {} correct",
            report.correct_count(),
            report.total_questions()
        ),
        elapsed_label,
        reviews: report
            .reviews()
            .iter()
            .map(|review| ReviewRow {
                prompt: review.prompt.clone(),
                chosen: review
                    .chosen
                    .map_or_else(|| "Not answered".to_string(), |label| label.to_string()),
                correct: review.correct.to_string(),
                explanation: review.explanation.clone(),
                is_correct: review.is_correct,
            })
            .collect(),
    }
}
