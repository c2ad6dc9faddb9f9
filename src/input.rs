use kotobako_core::{ContainerId, TokenId, ZoneId};

pub(crate) const TAP_MAX_DURATION_MS: f64 = 240.0;
pub(crate) const DRAG_SLOP_PX: f64 = 4.0;

/// How a finished press should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PressResolution {
    Tap,
    DragEnd,
    Ignored,
}

/// One pointer press on a token, from pointerdown to pointerup. Crossing the
/// slop radius turns the press into a drag; releasing quickly without moving
/// keeps it a tap. Exactly one modality wins per press.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PressGesture {
    token: TokenId,
    pointer_id: i32,
    start: (f64, f64),
    start_ms: f64,
    slop: f64,
    dragging: bool,
}

impl PressGesture {
    pub(crate) fn new(token: TokenId, pointer_id: i32, x: f64, y: f64, now_ms: f64) -> Self {
        Self {
            token,
            pointer_id,
            start: (x, y),
            start_ms: now_ms,
            slop: DRAG_SLOP_PX,
            dragging: false,
        }
    }

    pub(crate) fn token(&self) -> TokenId {
        self.token
    }

    pub(crate) fn pointer_id(&self) -> i32 {
        self.pointer_id
    }

    pub(crate) fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns true on the movement that first crosses the slop radius, so
    /// the caller starts the drag exactly once.
    pub(crate) fn update(&mut self, x: f64, y: f64) -> bool {
        if self.dragging {
            return false;
        }
        let dx = x - self.start.0;
        let dy = y - self.start.1;
        if dx * dx + dy * dy > self.slop * self.slop {
            self.dragging = true;
            return true;
        }
        false
    }

    pub(crate) fn resolve(&self, now_ms: f64) -> PressResolution {
        if self.dragging {
            return PressResolution::DragEnd;
        }
        let elapsed = (now_ms - self.start_ms).max(0.0);
        if elapsed <= TAP_MAX_DURATION_MS {
            return PressResolution::Tap;
        }
        PressResolution::Ignored
    }
}

/// `data-drop` attribute coding for droppable elements. The pointer layer
/// hit-tests with `elementFromPoint` and reads this attribute back.
pub(crate) fn container_attr(container: ContainerId) -> String {
    match container {
        ContainerId::Pool => "pool".to_string(),
        ContainerId::Zone(zone) => format!("zone:{}", zone.0),
    }
}

pub(crate) fn parse_container_attr(value: &str) -> Option<ContainerId> {
    if value == "pool" {
        return Some(ContainerId::Pool);
    }
    let index = value.strip_prefix("zone:")?;
    index.parse::<u32>().ok().map(|z| ContainerId::Zone(ZoneId(z)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn short_still_press_is_a_tap() {
        let gesture = PressGesture::new(TokenId(1), 7, 10.0, 10.0, 1000.0);
        assert_eq!(gesture.resolve(1080.0), PressResolution::Tap);
    }

    #[wasm_bindgen_test]
    fn press_within_window_is_a_tap() {
        let mut gesture = PressGesture::new(TokenId(1), 7, 10.0, 10.0, 1000.0);
        assert!(!gesture.update(11.0, 11.0));
        assert_eq!(gesture.resolve(1200.0), PressResolution::Tap);
    }

    #[wasm_bindgen_test]
    fn crossing_slop_becomes_a_drag_once() {
        let mut gesture = PressGesture::new(TokenId(1), 7, 10.0, 10.0, 1000.0);
        assert!(gesture.update(30.0, 10.0));
        assert!(gesture.is_dragging());
        assert!(!gesture.update(50.0, 10.0));
        assert_eq!(gesture.resolve(1050.0), PressResolution::DragEnd);
    }

    #[wasm_bindgen_test]
    fn long_still_press_is_ignored() {
        let gesture = PressGesture::new(TokenId(1), 7, 10.0, 10.0, 1000.0);
        assert_eq!(gesture.resolve(2000.0), PressResolution::Ignored);
    }

    #[wasm_bindgen_test]
    fn container_attr_round_trips() {
        assert_eq!(parse_container_attr("pool"), Some(ContainerId::Pool));
        assert_eq!(
            parse_container_attr(&container_attr(ContainerId::Zone(ZoneId(3)))),
            Some(ContainerId::Zone(ZoneId(3)))
        );
        assert_eq!(parse_container_attr("zone:"), None);
        assert_eq!(parse_container_attr("desk"), None);
    }
}
