//! Annotation message handlers
//!
//! Handles DrawMsg for the reference and pile rectangles.

use crate::annotations::state::{Slot, Step, Transition};
use crate::session::messages::{DrawAction, DrawMsg};
use crate::session::state::{PROMPT_OPEN, Session};

pub const PROMPT_REFERENCE: &str = "Draw rectangle around the reference object (known height).";
pub const PROMPT_PILE: &str =
    "Reference object drawn. Now draw rectangle around the clothes pile.";
pub const PROMPT_REDRAW_PILE: &str = "Draw rectangle around the clothes pile.";
pub const PROMPT_READY: &str =
    "Clothes pile drawn. Enter reference height (cm) and click Calculate.";

/// Status line for entering `step`
pub fn step_prompt(step: Step) -> &'static str {
    match step {
        Step::NoImage => PROMPT_OPEN,
        Step::AwaitingReference => PROMPT_REFERENCE,
        Step::AwaitingPile => PROMPT_PILE,
        Step::Ready => PROMPT_READY,
    }
}

/// Handle a DrawMsg, modifying session state
///
/// The caller is responsible for returning Task::none().
pub fn handle_draw_msg(session: &mut Session, msg: DrawMsg) {
    match msg {
        DrawMsg::Drag(action) => handle_drag(session, action),
        DrawMsg::RedrawPile => {
            if let Some(Transition::PileCleared) = session.annotation.redraw_pile() {
                session.message = PROMPT_REDRAW_PILE.to_string();
            }
        }
    }
}

fn handle_drag(session: &mut Session, action: DrawAction) {
    match action {
        DrawAction::Start(x, y) => {
            if let Some(Transition::Started(slot)) = session.annotation.start((x, y)) {
                log::debug!("Drawing {slot:?} rectangle from ({x}, {y})");
            }
        }
        DrawAction::Move(x, y) => {
            session.annotation.drag_to((x, y));
        }
        DrawAction::End(x, y) => {
            if let Some(Transition::Committed { slot, rect }) = session.annotation.end((x, y)) {
                log::debug!(
                    "Step {:?}: {slot:?} is {}x{} px",
                    session.annotation.step().counter(),
                    rect.width,
                    rect.height
                );
                session.message = match slot {
                    Slot::Reference => PROMPT_PILE,
                    Slot::Pile => PROMPT_READY,
                }
                .to_string();
            }
        }
    }
}
