use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Date;
use wasm_bindgen::JsCast;
use web_sys::{Element, MouseEvent, PointerEvent};
use yew::prelude::*;

use crate::input::{container_attr, parse_container_attr, PressGesture, PressResolution};
use crate::narration::Narrator;
use crate::persisted_store;
use kotobako_core::{
    ContainerId, ContentError, DrillCatalogEntry, Exercise, ExerciseAction, ExerciseEvent,
    GradeOutcome, GradeResult, Token, DRILL_CATALOG,
};

#[derive(Clone)]
pub(crate) struct NarratorHandle(pub(crate) Rc<Narrator>);

impl PartialEq for NarratorHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[function_component(App)]
pub(crate) fn app() -> Html {
    let narrator = use_memo((), |_| NarratorHandle(Rc::new(Narrator::new())));
    let settings = use_state(persisted_store::settings_blob);
    let score = use_state(|| persisted_store::progress_blob().score);

    narrator.0.set_enabled(settings.narration_enabled);
    narrator.0.set_rate(settings.narration_rate);
    apply_theme(settings.theme_mode);

    let on_graded = {
        let score = score.clone();
        Callback::from(move |(slug, result): (&'static str, GradeResult)| {
            let progress = persisted_store::update_progress_blob(|blob| {
                blob.record_completion(slug, result.correct_count);
            });
            score.set(progress.score);
        })
    };

    let on_toggle_narration = {
        let settings = settings.clone();
        Callback::from(move |_event: MouseEvent| {
            let next = persisted_store::update_settings_blob(|blob| {
                blob.narration_enabled = !blob.narration_enabled;
            });
            settings.set(next);
        })
    };

    let on_cycle_theme = {
        let settings = settings.clone();
        Callback::from(move |_event: MouseEvent| {
            let next = persisted_store::update_settings_blob(|blob| {
                blob.theme_mode = blob.theme_mode.next();
            });
            settings.set(next);
        })
    };

    let narrator_handle = (*narrator).clone();
    let narration_label = if settings.narration_enabled {
        "Narration: on"
    } else {
        "Narration: off"
    };

    html! {
        <main class="lesson">
            <header class="lesson-head">
                <h1>{ "Practice drills" }</h1>
                <span class="score">{ format!("Score: {}", *score) }</span>
                <button
                    class="narration-toggle"
                    disabled={!narrator.0.supported()}
                    onclick={on_toggle_narration}
                >
                    { narration_label }
                </button>
                <button class="theme-toggle" onclick={on_cycle_theme}>
                    { format!("Theme: {}", settings.theme_mode.dom_value()) }
                </button>
            </header>
            {
                for DRILL_CATALOG.iter().map(|entry| html! {
                    <DrillCard
                        key={entry.slug}
                        entry={entry}
                        narrator={narrator_handle.clone()}
                        on_graded={on_graded.clone()}
                    />
                })
            }
        </main>
    }
}

#[derive(Properties)]
pub(crate) struct DrillCardProps {
    pub(crate) entry: &'static DrillCatalogEntry,
    pub(crate) narrator: NarratorHandle,
    pub(crate) on_graded: Callback<(&'static str, GradeResult)>,
}

impl PartialEq for DrillCardProps {
    fn eq(&self, other: &Self) -> bool {
        self.entry.slug == other.entry.slug
            && self.narrator == other.narrator
            && self.on_graded == other.on_graded
    }
}

#[derive(Clone, PartialEq)]
enum Feedback {
    None,
    Hint(&'static str),
    Outcome(GradeOutcome),
}

#[function_component(DrillCard)]
pub(crate) fn drill_card(props: &DrillCardProps) -> Html {
    let entry = props.entry;
    let exercise: Rc<RefCell<Result<Exercise, ContentError>>> = use_mut_ref(|| {
        Exercise::from_def(entry.to_def()).inspect_err(|err| {
            gloo::console::warn!("drill content rejected:", entry.slug, err.to_string());
        })
    });
    let version = use_state(|| 0u32);
    let feedback = use_state(|| Feedback::None);
    let gesture: Rc<RefCell<Option<PressGesture>>> = use_mut_ref(|| None);

    let (snapshot, content_error) = {
        let guard = exercise.borrow();
        match &*guard {
            Ok(live) => (Some(live.snapshot()), None),
            Err(err) => (None, Some(err.to_string())),
        }
    };

    let Some(snapshot) = snapshot else {
        return html! {
            <section class="drill drill-broken">
                <h2>{ entry.title }</h2>
                <p class="feedback hint">
                    { format!("This drill could not be loaded: {}", content_error.unwrap_or_default()) }
                </p>
            </section>
        };
    };

    let apply: Rc<dyn Fn(ExerciseAction)> = {
        let exercise = exercise.clone();
        let version = version.clone();
        let feedback = feedback.clone();
        let narrator = props.narrator.clone();
        Rc::new(move |action: ExerciseAction| {
            let event = {
                let mut guard = exercise.borrow_mut();
                let Ok(live) = guard.as_mut() else {
                    return;
                };
                live.apply(action)
            };
            match &event {
                ExerciseEvent::Nothing => return,
                ExerciseEvent::Rejected(err) => {
                    gloo::console::warn!("move rejected:", err.to_string());
                }
                ExerciseEvent::SelectFirstHint => {
                    feedback.set(Feedback::Hint("Select a word first, then tap where it goes."));
                }
                ExerciseEvent::Armed(token) => {
                    let label = {
                        let guard = exercise.borrow();
                        guard.as_ref().ok().and_then(|live| {
                            live.tokens()
                                .iter()
                                .find(|entry| entry.id == *token)
                                .map(|entry| entry.label.clone())
                        })
                    };
                    if let Some(label) = label {
                        narrator.0.speak(&label);
                    }
                }
                ExerciseEvent::WasReset => {
                    feedback.set(Feedback::None);
                }
                _ => {}
            }
            version.set(version.wrapping_add(1));
        })
    };

    let on_check = {
        let exercise = exercise.clone();
        let feedback = feedback.clone();
        let on_graded = props.on_graded.clone();
        let slug = entry.slug;
        Callback::from(move |_event: MouseEvent| {
            let outcome = {
                let guard = exercise.borrow();
                guard.as_ref().ok().map(|live| live.grade())
            };
            let Some(outcome) = outcome else {
                return;
            };
            if let GradeOutcome::Graded(result) = outcome {
                if result.is_fully_correct {
                    on_graded.emit((slug, result));
                }
            }
            feedback.set(Feedback::Outcome(outcome));
        })
    };

    let on_reset = {
        let apply = apply.clone();
        Callback::from(move |_event: MouseEvent| {
            apply(ExerciseAction::Reset);
        })
    };

    let on_listen = {
        let narrator = props.narrator.clone();
        let lines = entry.narration;
        Callback::from(move |_event: MouseEvent| {
            narrator
                .0
                .speak_sequence(lines.iter().map(|line| line.to_string()).collect());
        })
    };

    let render_token = |token: &Token| -> Html {
        let armed = snapshot.armed == Some(token.id);
        let dragging = snapshot.dragging == Some(token.id);
        let on_pointer_down = {
            let gesture = gesture.clone();
            let token = token.id;
            Callback::from(move |event: PointerEvent| {
                event.prevent_default();
                if let Some(target) = event
                    .target()
                    .and_then(|target| target.dyn_into::<Element>().ok())
                {
                    let _ = target.set_pointer_capture(event.pointer_id());
                }
                *gesture.borrow_mut() = Some(PressGesture::new(
                    token,
                    event.pointer_id(),
                    f64::from(event.client_x()),
                    f64::from(event.client_y()),
                    Date::now(),
                ));
            })
        };
        let on_pointer_move = {
            let gesture = gesture.clone();
            let apply = apply.clone();
            Callback::from(move |event: PointerEvent| {
                let started = {
                    let mut slot = gesture.borrow_mut();
                    let Some(press) = slot.as_mut() else {
                        return;
                    };
                    if press.pointer_id() != event.pointer_id() {
                        return;
                    }
                    let crossed =
                        press.update(f64::from(event.client_x()), f64::from(event.client_y()));
                    if !press.is_dragging() {
                        return;
                    }
                    (crossed, press.token())
                };
                let (crossed, token) = started;
                if crossed {
                    apply(ExerciseAction::BeginDrag { token });
                }
                let container = container_under_point(
                    event.client_x() as f32,
                    event.client_y() as f32,
                );
                apply(ExerciseAction::DragHover { container });
            })
        };
        let on_pointer_up = {
            let gesture = gesture.clone();
            let apply = apply.clone();
            Callback::from(move |event: PointerEvent| {
                let press = {
                    let mut slot = gesture.borrow_mut();
                    match slot.as_ref() {
                        Some(press) if press.pointer_id() == event.pointer_id() => slot.take(),
                        _ => None,
                    }
                };
                let Some(press) = press else {
                    return;
                };
                match press.resolve(Date::now()) {
                    PressResolution::Tap => {
                        apply(ExerciseAction::TapToken {
                            token: press.token(),
                        });
                    }
                    PressResolution::DragEnd => {
                        let container = container_under_point(
                            event.client_x() as f32,
                            event.client_y() as f32,
                        );
                        match container {
                            Some(container) => apply(ExerciseAction::Drop { container }),
                            None => apply(ExerciseAction::CancelDrag),
                        }
                    }
                    PressResolution::Ignored => {}
                }
            })
        };
        let on_pointer_cancel = {
            let gesture = gesture.clone();
            let apply = apply.clone();
            Callback::from(move |_event: PointerEvent| {
                *gesture.borrow_mut() = None;
                apply(ExerciseAction::CancelDrag);
            })
        };
        // Keep the click from bubbling into the container's tap handler.
        let on_click = Callback::from(|event: MouseEvent| event.stop_propagation());
        html! {
            <button
                class={classes!(
                    "token",
                    armed.then_some("armed"),
                    dragging.then_some("dragging"),
                )}
                data-token={token.id.0.to_string()}
                onpointerdown={on_pointer_down}
                onpointermove={on_pointer_move}
                onpointerup={on_pointer_up}
                onpointercancel={on_pointer_cancel}
                onclick={on_click}
            >
                { &token.label }
            </button>
        }
    };

    let container_click = |container: ContainerId| -> Callback<MouseEvent> {
        let apply = apply.clone();
        Callback::from(move |_event: MouseEvent| {
            apply(ExerciseAction::TapContainer { container });
        })
    };

    let pool_hovered = snapshot.hovered == Some(ContainerId::Pool);
    html! {
        <section class="drill">
            <header class="drill-head">
                <h2>{ entry.title }</h2>
                <button class="listen" onclick={on_listen}>{ "Listen" }</button>
            </header>
            <p class="prompt">{ &snapshot.prompt }</p>
            <div
                class={classes!("pool", pool_hovered.then_some("hover"))}
                data-drop={container_attr(ContainerId::Pool)}
                onclick={container_click(ContainerId::Pool)}
            >
                { for snapshot.pool.iter().map(&render_token) }
            </div>
            <div class="zones">
                {
                    for snapshot.zones.iter().map(|zone_snapshot| {
                        let container = ContainerId::Zone(zone_snapshot.zone.id);
                        let hovered = snapshot.hovered == Some(container);
                        html! {
                            <div
                                class={classes!("zone", hovered.then_some("hover"))}
                                data-drop={container_attr(container)}
                                onclick={container_click(container)}
                            >
                                <span class="zone-label">{ &zone_snapshot.zone.label }</span>
                                { for zone_snapshot.tokens.iter().map(&render_token) }
                            </div>
                        }
                    })
                }
            </div>
            <footer class="drill-foot">
                <button class="check" onclick={on_check}>{ "Check" }</button>
                <button class="reset" onclick={on_reset}>{ "Try again" }</button>
                { feedback_view(&feedback) }
            </footer>
        </section>
    }
}

fn feedback_view(feedback: &Feedback) -> Html {
    match feedback {
        Feedback::None => html! {},
        Feedback::Hint(hint) => html! { <span class="feedback hint">{ *hint }</span> },
        Feedback::Outcome(GradeOutcome::NotAttempted) => html! {
            <span class="feedback hint">{ "Nothing to check yet. Place some words first." }</span>
        },
        Feedback::Outcome(GradeOutcome::Graded(result)) => {
            let class = if result.is_fully_correct {
                "feedback correct"
            } else {
                "feedback partial"
            };
            let line = if result.is_fully_correct {
                format!("All {} correct. Nice work!", result.total_count)
            } else {
                format!("{} of {} correct so far.", result.correct_count, result.total_count)
            };
            html! { <span class={class}>{ line }</span> }
        }
    }
}

fn apply_theme(mode: crate::persisted::ThemeMode) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };
    if root.set_attribute("data-theme", mode.dom_value()).is_err() {
        gloo::console::warn!("could not apply theme attribute");
    }
}

/// Topmost droppable under the pointer. The dragged token is styled
/// `pointer-events: none` while a drag is live, so the hit test sees through
/// it to the container underneath.
fn container_under_point(x: f32, y: f32) -> Option<ContainerId> {
    let document = web_sys::window()?.document()?;
    let element = document.element_from_point(x, y)?;
    let target = element.closest("[data-drop]").ok().flatten()?;
    let attr = target.get_attribute("data-drop")?;
    parse_container_attr(&attr)
}
