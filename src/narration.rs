use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, SpeechSynthesis, SpeechSynthesisUtterance};

pub(crate) const NARRATION_RATE_MIN: f32 = 0.5;
pub(crate) const NARRATION_RATE_MAX: f32 = 1.5;
pub(crate) const NARRATION_RATE_DEFAULT: f32 = 1.0;

/// Reads lesson lines aloud through the Web Speech API.
///
/// Playback is sequential: each line waits for the previous one to end or
/// error before it starts. Any new `speak`/`speak_sequence` call cancels
/// whatever is in flight; the generation counter keeps a stale sequence from
/// scheduling its remaining lines after it has been replaced. On hosts
/// without speech synthesis every call is a silent no-op.
pub(crate) struct Narrator {
    synth: Option<SpeechSynthesis>,
    generation: Rc<Cell<u64>>,
    enabled: Cell<bool>,
    rate: Cell<f32>,
}

impl Narrator {
    pub(crate) fn new() -> Self {
        let synth = web_sys::window().and_then(|window| window.speech_synthesis().ok());
        if synth.is_none() {
            gloo::console::warn!("speech synthesis unavailable, narration disabled");
        }
        Self {
            synth,
            generation: Rc::new(Cell::new(0)),
            enabled: Cell::new(true),
            rate: Cell::new(NARRATION_RATE_DEFAULT),
        }
    }

    pub(crate) fn supported(&self) -> bool {
        self.synth.is_some()
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.set(enabled);
        if !enabled {
            self.stop();
        }
    }

    pub(crate) fn set_rate(&self, rate: f32) {
        self.rate
            .set(rate.clamp(NARRATION_RATE_MIN, NARRATION_RATE_MAX));
    }

    pub(crate) fn speak(&self, text: &str) {
        self.speak_sequence(vec![text.to_string()]);
    }

    pub(crate) fn speak_sequence(&self, lines: Vec<String>) {
        let Some(synth) = self.synth.clone() else {
            return;
        };
        let generation = Rc::clone(&self.generation);
        let current = generation.get().wrapping_add(1);
        generation.set(current);
        synth.cancel();
        if !self.enabled.get() || lines.is_empty() {
            return;
        }
        let rate = self.rate.get();
        spawn_local(async move {
            for line in lines {
                if generation.get() != current {
                    return;
                }
                let Ok(utterance) = SpeechSynthesisUtterance::new_with_text(&line) else {
                    continue;
                };
                utterance.set_rate(rate);
                let finished = utterance_finished(&utterance);
                synth.speak(&utterance);
                let _ = wasm_bindgen_futures::JsFuture::from(finished).await;
            }
        });
    }

    /// Cancels in-flight playback without queueing anything new.
    pub(crate) fn stop(&self) {
        self.generation.set(self.generation.get().wrapping_add(1));
        if let Some(synth) = &self.synth {
            synth.cancel();
        }
    }
}

/// Resolves when the utterance ends, errors, or is cancelled. Errors resolve
/// rather than reject so a failed line never stalls the rest of a sequence.
fn utterance_finished(utterance: &SpeechSynthesisUtterance) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, _reject| {
        let resolve_end = resolve.clone();
        let on_end = Closure::once(move |_event: Event| {
            let _ = resolve_end.call0(&JsValue::NULL);
        });
        let on_error = Closure::once(move |_event: Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        utterance.set_onend(Some(on_end.as_ref().unchecked_ref()));
        utterance.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_end.forget();
        on_error.forget();
    })
}
