//! Timer-driven traffic light built from a composite object

use std::cell::Cell;
use std::rc::Rc;

use objwin::object::{CompositeObject, GraphicalObject, ObjectState, Paint};
use objwin::window::{ObjectWindowContext, ObjectWindowHandler, WindowCore};
use objwin::draw::stroke_font;
use objwin::{Canvas, Color, Stopwatch};
use tracing::{debug, info};

/// Cap height of the phase caption, in viewport units
const LABEL_HEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Red,
    RedYellow,
    Green,
    Yellow,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Red => Phase::RedYellow,
            Phase::RedYellow => Phase::Green,
            Phase::Green => Phase::Yellow,
            Phase::Yellow => Phase::Red,
        }
    }

    /// How long the phase is shown, in milliseconds
    pub fn duration_ms(self) -> u64 {
        match self {
            Phase::Red | Phase::Green => 3000,
            Phase::RedYellow | Phase::Yellow => 1000,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Red => "STOP",
            Phase::RedYellow => "READY",
            Phase::Green => "GO",
            Phase::Yellow => "CAUTION",
        }
    }

    fn lit(self, lamp: LampColor) -> bool {
        matches!(
            (self, lamp),
            (Phase::Red | Phase::RedYellow, LampColor::Red)
                | (Phase::RedYellow | Phase::Yellow, LampColor::Yellow)
                | (Phase::Green, LampColor::Green)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LampColor {
    Red,
    Yellow,
    Green,
}

impl LampColor {
    fn color(self, lit: bool) -> Color {
        match (self, lit) {
            (LampColor::Red, true) => Color::RED,
            (LampColor::Red, false) => Color::DARK_RED,
            (LampColor::Yellow, true) => Color::YELLOW,
            (LampColor::Yellow, false) => Color::new(0.4, 0.4, 0.0),
            (LampColor::Green, true) => Color::GREEN,
            (LampColor::Green, false) => Color::new(0.0, 0.35, 0.0),
        }
    }
}

/// One lamp, reading the shared phase when painted
struct Lamp {
    state: ObjectState,
    kind: LampColor,
    phase: Rc<Cell<Phase>>,
}

impl Paint for Lamp {
    fn paint(&self, canvas: &mut dyn Canvas) {
        let b = self.bounds();
        let c = b.center();
        canvas.set_color(Color::DARK_GRAY);
        canvas.fill_rectangle(b.left, b.bottom, b.width, b.height);
        canvas.set_color(self.kind.color(self.phase.get().lit(self.kind)));
        canvas.fill_circle(c.x, c.y, b.width.min(b.height) * 0.4);
    }
}

impl GraphicalObject for Lamp {
    fn state(&self) -> &ObjectState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut ObjectState {
        &mut self.state
    }
}

/// Three stacked lamps of side `size`, lower-left corner at (`left`, `bottom`)
pub fn traffic_light(left: f64, bottom: f64, size: f64, phase: Rc<Cell<Phase>>) -> CompositeObject {
    let mut light = CompositeObject::new();
    for (row, kind) in [LampColor::Green, LampColor::Yellow, LampColor::Red]
        .into_iter()
        .enumerate()
    {
        light.add(Box::new(Lamp {
            state: ObjectState::new(left, bottom + row as f64 * size, size, size),
            kind,
            phase: phase.clone(),
        }));
    }
    light
}

/// Advances the shared phase every time the window's timer fires
pub struct TrafficLightHandler {
    phase: Rc<Cell<Phase>>,
    cycle: Stopwatch,
}

impl TrafficLightHandler {
    pub fn new(phase: Rc<Cell<Phase>>) -> Self {
        Self {
            phase,
            cycle: Stopwatch::started(),
        }
    }

    /// Arm the first timer; later ones are re-armed from `timer_expired`
    pub fn arm(&self, core: &mut WindowCore) {
        core.start_timer(self.phase.get().duration_ms());
    }
}

impl ObjectWindowHandler for TrafficLightHandler {
    fn paint(&self, core: &WindowCore, canvas: &mut dyn Canvas) {
        core.draw_axes(canvas, 0.0, 0.0);

        // Phase caption centered under the light
        let label = self.phase.get().label();
        let vp = core.viewport();
        let x = vp.min_x + (vp.width() - stroke_font::text_width(label, LABEL_HEIGHT)) / 2.0;
        canvas.set_color(Color::BLACK);
        canvas.draw_text(x, vp.min_y + LABEL_HEIGHT, label, LABEL_HEIGHT);
    }

    fn timer_expired(&mut self, ctx: &mut ObjectWindowContext<'_>) {
        let next = self.phase.get().next();
        self.phase.set(next);
        debug!("Traffic light now {:?}", next);

        if next == Phase::Red {
            self.cycle.stop();
            info!("Traffic light cycle took {:?}", self.cycle.elapsed());
            self.cycle.reset();
            self.cycle.start();
        }

        ctx.core_mut().start_timer(next.duration_ms());
        ctx.repaint();
    }
}
