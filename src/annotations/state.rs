//! Two-rectangle annotation state machine
//!
//! The user first drags a rectangle around the reference object, then one
//! around the pile. Exactly one gesture can be in flight, and only the slot
//! belonging to the current step accepts it.

use crate::domain::Rect;

/// Which of the two rectangles a gesture fills
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Reference,
    Pile,
}

impl Slot {
    /// Index of the slot in the rectangle pair (0 = reference, 1 = pile)
    pub fn index(self) -> usize {
        match self {
            Slot::Reference => 0,
            Slot::Pile => 1,
        }
    }
}

/// Drawing progress for the current photo
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Step {
    /// No photo loaded, all drag input is ignored
    #[default]
    NoImage,
    AwaitingReference,
    AwaitingPile,
    /// Both rectangles drawn
    Ready,
}

impl Step {
    /// Step counter: 0 = awaiting reference, 1 = awaiting pile, 2 = complete
    pub fn counter(self) -> Option<u8> {
        match self {
            Step::NoImage => None,
            Step::AwaitingReference => Some(0),
            Step::AwaitingPile => Some(1),
            Step::Ready => Some(2),
        }
    }

    /// Slot that accepts a new gesture in this step
    pub fn active_slot(self) -> Option<Slot> {
        match self {
            Step::AwaitingReference => Some(Slot::Reference),
            Step::AwaitingPile => Some(Slot::Pile),
            Step::NoImage | Step::Ready => None,
        }
    }
}

/// A drag gesture in flight, in native image pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    pub slot: Slot,
    pub anchor: (f32, f32),
    pub current: (f32, f32),
}

impl Gesture {
    /// Live preview of the rectangle being dragged
    pub fn preview(&self) -> Rect {
        Rect::from_drag(self.anchor, self.current)
    }
}

/// Observable result of feeding an event to the machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// A new photo was loaded; both slots cleared
    Reset,
    /// A gesture began for the slot
    Started(Slot),
    /// A gesture finished and its normalized rectangle was stored
    Committed { slot: Slot, rect: Rect },
    /// The pile slot was cleared for redrawing
    PileCleared,
}

/// Rectangle slots plus the current step and gesture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationMachine {
    step: Step,
    rects: [Option<Rect>; 2],
    gesture: Option<Gesture>,
}

impl AnnotationMachine {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn reference(&self) -> Option<Rect> {
        self.rects[Slot::Reference.index()]
    }

    pub fn pile(&self) -> Option<Rect> {
        self.rects[Slot::Pile.index()]
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether the pile can be discarded and redrawn
    pub fn can_redraw_pile(&self) -> bool {
        self.step != Step::NoImage && self.reference().is_some()
    }

    /// A new photo replaces the old one: clear everything and await the reference
    pub fn image_loaded(&mut self) -> Transition {
        self.rects = [None, None];
        self.gesture = None;
        self.step = Step::AwaitingReference;
        log::debug!("Annotation reset for new image");
        Transition::Reset
    }

    /// Pointer pressed at `point`
    ///
    /// Refused without a photo, once both rectangles exist, or while another
    /// gesture is still in flight.
    pub fn start(&mut self, point: (f32, f32)) -> Option<Transition> {
        if self.gesture.is_some() {
            return None;
        }
        let slot = self.step.active_slot()?;
        self.gesture = Some(Gesture {
            slot,
            anchor: point,
            current: point,
        });
        Some(Transition::Started(slot))
    }

    /// Pointer moved while a gesture is in flight; returns false if ignored
    pub fn drag_to(&mut self, point: (f32, f32)) -> bool {
        match self.gesture.as_mut() {
            Some(gesture) => {
                gesture.current = point;
                true
            }
            None => false,
        }
    }

    /// Pointer released: commit the normalized rectangle and advance the step
    pub fn end(&mut self, point: (f32, f32)) -> Option<Transition> {
        let mut gesture = self.gesture.take()?;
        gesture.current = point;
        let rect = gesture.preview();
        self.rects[gesture.slot.index()] = Some(rect);
        self.step = match gesture.slot {
            Slot::Reference => Step::AwaitingPile,
            Slot::Pile => Step::Ready,
        };
        log::debug!("Committed {:?} rectangle {:?}", gesture.slot, rect);
        Some(Transition::Committed {
            slot: gesture.slot,
            rect,
        })
    }

    /// Discard only the pile rectangle and await a new one
    pub fn redraw_pile(&mut self) -> Option<Transition> {
        if !self.can_redraw_pile() {
            return None;
        }
        self.rects[Slot::Pile.index()] = None;
        self.gesture = None;
        self.step = Step::AwaitingPile;
        Some(Transition::PileCleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drag(machine: &mut AnnotationMachine, from: (f32, f32), to: (f32, f32)) -> Option<Transition> {
        machine.start(from)?;
        machine.drag_to(((from.0 + to.0) / 2.0, (from.1 + to.1) / 2.0));
        machine.end(to)
    }

    fn ready_machine() -> AnnotationMachine {
        let mut machine = AnnotationMachine::default();
        machine.image_loaded();
        drag(&mut machine, (0.0, 0.0), (10.0, 20.0));
        drag(&mut machine, (50.0, 50.0), (80.0, 150.0));
        machine
    }

    #[test]
    fn test_ignores_input_without_image() {
        let mut machine = AnnotationMachine::default();
        assert_eq!(machine.start((1.0, 1.0)), None);
        assert!(!machine.drag_to((2.0, 2.0)));
        assert_eq!(machine.end((3.0, 3.0)), None);
        assert_eq!(machine.redraw_pile(), None);
        assert_eq!(machine.step(), Step::NoImage);
    }

    #[test]
    fn test_full_sequence() {
        let mut machine = AnnotationMachine::default();
        assert_eq!(machine.image_loaded(), Transition::Reset);
        assert_eq!(machine.step().counter(), Some(0));

        assert_eq!(machine.start((30.0, 40.0)), Some(Transition::Started(Slot::Reference)));
        assert!(machine.drag_to((0.0, 0.0)));
        assert_eq!(machine.gesture().unwrap().preview(), Rect::new(0.0, 0.0, 30.0, 40.0));
        assert_eq!(
            machine.end((10.0, 0.0)),
            Some(Transition::Committed {
                slot: Slot::Reference,
                rect: Rect::new(10.0, 0.0, 20.0, 40.0)
            })
        );
        assert_eq!(machine.step(), Step::AwaitingPile);
        assert!(!machine.is_drawing());

        let committed = drag(&mut machine, (100.0, 200.0), (60.0, 80.0));
        assert_eq!(
            committed,
            Some(Transition::Committed {
                slot: Slot::Pile,
                rect: Rect::new(60.0, 80.0, 40.0, 120.0)
            })
        );
        assert_eq!(machine.step(), Step::Ready);
        assert_eq!(machine.step().counter(), Some(2));
        assert!(machine.reference().is_some() && machine.pile().is_some());
    }

    #[test]
    fn test_committed_rects_are_never_negative() {
        let mut machine = AnnotationMachine::default();
        machine.image_loaded();
        drag(&mut machine, (90.0, 90.0), (10.0, 5.0));
        let rect = machine.reference().unwrap();
        assert!(rect.width >= 0.0 && rect.height >= 0.0);
        assert_eq!(rect, Rect::new(10.0, 5.0, 80.0, 85.0));
    }

    #[test]
    fn test_ready_ignores_new_drags() {
        let mut machine = ready_machine();
        let before = machine.clone();
        assert_eq!(machine.start((1.0, 1.0)), None);
        assert_eq!(machine.end((5.0, 5.0)), None);
        assert_eq!(machine, before);
    }

    #[test]
    fn test_second_start_refused_while_drawing() {
        let mut machine = AnnotationMachine::default();
        machine.image_loaded();
        machine.start((1.0, 1.0));
        assert_eq!(machine.start((50.0, 50.0)), None);
        assert_eq!(machine.gesture().unwrap().anchor, (1.0, 1.0));
    }

    #[test]
    fn test_redraw_pile_keeps_reference() {
        let mut machine = ready_machine();
        let reference = machine.reference();

        assert_eq!(machine.redraw_pile(), Some(Transition::PileCleared));
        assert_eq!(machine.step(), Step::AwaitingPile);
        assert_eq!(machine.pile(), None);
        assert_eq!(machine.reference(), reference);

        drag(&mut machine, (0.0, 0.0), (5.0, 7.0));
        assert_eq!(machine.pile(), Some(Rect::new(0.0, 0.0, 5.0, 7.0)));
        assert_eq!(machine.reference(), reference);
        assert_eq!(machine.step(), Step::Ready);
    }

    #[test]
    fn test_redraw_pile_needs_reference() {
        let mut machine = AnnotationMachine::default();
        machine.image_loaded();
        assert!(!machine.can_redraw_pile());
        assert_eq!(machine.redraw_pile(), None);
        assert_eq!(machine.step(), Step::AwaitingReference);
    }

    #[test]
    fn test_redraw_abandons_gesture() {
        let mut machine = AnnotationMachine::default();
        machine.image_loaded();
        drag(&mut machine, (0.0, 0.0), (10.0, 10.0));
        machine.start((20.0, 20.0));
        machine.redraw_pile();
        assert!(!machine.is_drawing());
    }

    #[test]
    fn test_new_image_clears_both() {
        let mut machine = ready_machine();
        machine.image_loaded();
        assert_eq!(machine.reference(), None);
        assert_eq!(machine.pile(), None);
        assert_eq!(machine.step(), Step::AwaitingReference);
    }
}
