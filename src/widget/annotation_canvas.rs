//! AnnotationCanvas widget for drawing the reference and pile rectangles
//!
//! This widget handles:
//! - Rendering committed rectangles as outlines over the photo
//! - Rendering the in-progress rectangle preview
//! - Mouse events for starting/updating/completing a rectangle
//!
//! Rectangles arrive and leave in native image pixels; the widget maps
//! through its own bounds, so the photo may be drawn at any size.

use cosmic::{
    Element,
    iced::{Color, mouse},
    iced_core::{
        Background, Border, Clipboard, Layout, Length, Rectangle, Shell, Size, Widget, event,
        layout,
        renderer::Renderer as RendererTrait,
        widget::{Tree, tree},
    },
};

use crate::{
    annotations::state::Slot,
    config::ShapeColor,
    domain::{DisplayMapping, Rect},
    render::geometry::outline,
    session::messages::DrawAction,
};

/// Configuration for the annotation canvas
#[derive(Clone, Copy, Debug)]
pub struct AnnotationCanvasConfig {
    /// Native size of the photo in pixels
    pub image_size: (u32, u32),
    /// Size the photo is drawn at
    pub display_size: (f32, f32),
    /// Outline color of the reference rectangle
    pub reference_color: ShapeColor,
    /// Outline color of the pile rectangle
    pub pile_color: ShapeColor,
    /// Whether a new rectangle may be started
    pub accepting: bool,
    /// Whether a gesture is in flight
    pub drawing: bool,
}

/// AnnotationCanvas widget
pub struct AnnotationCanvas<'a, Msg> {
    reference: Option<Rect>,
    pile: Option<Rect>,
    /// Rectangle being dragged and the slot it will fill
    preview: Option<(Slot, Rect)>,
    config: AnnotationCanvasConfig,
    /// Event handler
    on_event: Option<Box<dyn Fn(DrawAction) -> Msg + 'a>>,
}

impl<'a, Msg> AnnotationCanvas<'a, Msg> {
    /// Create a new annotation canvas
    pub fn new(config: AnnotationCanvasConfig) -> Self {
        Self {
            reference: None,
            pile: None,
            preview: None,
            config,
            on_event: None,
        }
    }

    /// Set the committed reference rectangle
    pub fn reference(mut self, rect: Option<Rect>) -> Self {
        self.reference = rect;
        self
    }

    /// Set the committed pile rectangle
    pub fn pile(mut self, rect: Option<Rect>) -> Self {
        self.pile = rect;
        self
    }

    /// Set the rectangle being dragged
    pub fn preview(mut self, preview: Option<(Slot, Rect)>) -> Self {
        self.preview = preview;
        self
    }

    /// Set event handler
    pub fn on_event(mut self, handler: impl Fn(DrawAction) -> Msg + 'a) -> Self {
        self.on_event = Some(Box::new(handler));
        self
    }

    fn color_for(&self, slot: Slot) -> ShapeColor {
        match slot {
            Slot::Reference => self.config.reference_color,
            Slot::Pile => self.config.pile_color,
        }
    }

    fn mapping(&self, bounds: &Rectangle) -> DisplayMapping {
        DisplayMapping::new(self.config.image_size, (bounds.width, bounds.height))
    }

    /// Widget-local position to native image pixels, clamped to the photo
    fn to_image(&self, bounds: &Rectangle, x: f32, y: f32) -> (f32, f32) {
        let x = x.clamp(0.0, bounds.width);
        let y = y.clamp(0.0, bounds.height);
        self.mapping(bounds).to_image(x, y)
    }
}

impl<'a, Msg: Clone + 'static> Widget<Msg, cosmic::Theme, cosmic::Renderer>
    for AnnotationCanvas<'a, Msg>
{
    fn size(&self) -> Size<Length> {
        Size::new(
            Length::Fixed(self.config.display_size.0),
            Length::Fixed(self.config.display_size.1),
        )
    }

    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<()>()
    }

    fn state(&self) -> tree::State {
        tree::State::None
    }

    fn children(&self) -> Vec<Tree> {
        vec![]
    }

    fn diff(&mut self, _tree: &mut Tree) {}

    fn layout(
        &self,
        _tree: &mut Tree,
        _renderer: &cosmic::Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let (w, h) = self.config.display_size;
        layout::Node::new(limits.resolve(
            Length::Fixed(w),
            Length::Fixed(h),
            Size::new(w, h),
        ))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut cosmic::Renderer,
        _theme: &cosmic::Theme,
        _style: &cosmic::iced_core::renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let mapping = self.mapping(&bounds);

        let committed = [(Slot::Reference, self.reference), (Slot::Pile, self.pile)];
        for (slot, rect) in committed {
            if let Some(rect) = rect {
                let on_screen = mapping.to_display(rect).translate(bounds.x, bounds.y);
                self.draw_rect_stroke(renderer, on_screen, self.color_for(slot).into());
            }
        }

        if let Some((slot, rect)) = self.preview {
            let on_screen = mapping.to_display(rect).translate(bounds.x, bounds.y);
            let color = self.color_for(slot).with_alpha(outline::PREVIEW_ALPHA);
            self.draw_rect_stroke(renderer, on_screen, color);
        }
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: cosmic::iced_core::Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &cosmic::Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Msg>,
        _viewport: &Rectangle,
    ) -> event::Status {
        let Some(on_event) = &self.on_event else {
            return event::Status::Ignored;
        };

        let bounds = layout.bounds();

        match event {
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if self.config.accepting
                    && !self.config.drawing
                    && let Some(pos) = cursor.position_in(bounds)
                {
                    let (x, y) = self.to_image(&bounds, pos.x, pos.y);
                    shell.publish(on_event(DrawAction::Start(x, y)));
                    return event::Status::Captured;
                }
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if self.config.drawing {
                    let (x, y) =
                        self.to_image(&bounds, position.x - bounds.x, position.y - bounds.y);
                    shell.publish(on_event(DrawAction::Move(x, y)));
                    return event::Status::Captured;
                }
            }
            cosmic::iced_core::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                if self.config.drawing
                    && let Some(pos) = cursor.position()
                {
                    // Released outside the photo still commits, clamped to its edge
                    let (x, y) = self.to_image(&bounds, pos.x - bounds.x, pos.y - bounds.y);
                    shell.publish(on_event(DrawAction::End(x, y)));
                    return event::Status::Captured;
                }
            }
            _ => {}
        }

        event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &cosmic::Renderer,
    ) -> mouse::Interaction {
        if (self.config.accepting || self.config.drawing) && cursor.is_over(layout.bounds()) {
            mouse::Interaction::Crosshair
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a, Msg: Clone + 'static> AnnotationCanvas<'a, Msg> {
    fn draw_rect_stroke(&self, renderer: &mut cosmic::Renderer, rect: Rect, color: Color) {
        let stroke_width = outline::THICKNESS;
        let half_stroke = stroke_width / 2.0;
        let inner_height = (rect.height - stroke_width).max(0.0);

        let edges = [
            // Top
            Rectangle {
                x: rect.x - half_stroke,
                y: rect.y - half_stroke,
                width: rect.width + stroke_width,
                height: stroke_width,
            },
            // Bottom
            Rectangle {
                x: rect.x - half_stroke,
                y: rect.bottom() - half_stroke,
                width: rect.width + stroke_width,
                height: stroke_width,
            },
            // Left
            Rectangle {
                x: rect.x - half_stroke,
                y: rect.y + half_stroke,
                width: stroke_width,
                height: inner_height,
            },
            // Right
            Rectangle {
                x: rect.right() - half_stroke,
                y: rect.y + half_stroke,
                width: stroke_width,
                height: inner_height,
            },
        ];

        for bounds in edges {
            renderer.fill_quad(
                cosmic::iced_core::renderer::Quad {
                    bounds,
                    border: Border::default(),
                    shadow: cosmic::iced_core::Shadow::default(),
                },
                Background::Color(color),
            );
        }
    }
}

impl<'a, Msg: Clone + 'static> From<AnnotationCanvas<'a, Msg>> for Element<'a, Msg> {
    fn from(canvas: AnnotationCanvas<'a, Msg>) -> Self {
        Self::new(canvas)
    }
}
