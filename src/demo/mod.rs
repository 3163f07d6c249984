//! Demo windows

pub mod shapes;
pub mod traffic_light;

use std::cell::Cell;
use std::rc::Rc;

use objwin::config::Config;
use objwin::platform::Platform;
use objwin::window::{ObjectWindow, Viewport, WindowCore};
use objwin::{Color, EventLoop, WindowId};

use shapes::{Circle, Rectangle, ShapesHandler, Star};
use traffic_light::{Phase, TrafficLightHandler};

/// Viewport of the shapes window, axes through the middle
const SHAPES_VIEWPORT: Viewport = Viewport {
    min_x: -10.0,
    max_x: 10.0,
    min_y: -10.0,
    max_y: 10.0,
};

/// Window with a few draggable shapes; right click adds more
pub fn open_shapes<P: Platform>(event_loop: &mut EventLoop<P>, config: &Config) -> objwin::Result<WindowId> {
    let spec = config
        .window
        .spec_for_viewport("objwin: shapes", SHAPES_VIEWPORT)?;
    let mut window = ObjectWindow::new(WindowCore::new(spec)?, ShapesHandler::default());

    window.add(Box::new(Rectangle::new(-7.0, 3.0, 4.0, 2.5, Color::LIGHT_BLUE)));
    window.add(Box::new(Circle::new(4.0, 4.0, 2.0, Color::RED)));
    window.add(Box::new(Star::new(-4.0, -4.0, 2.5, Color::YELLOW)));
    window.add(Box::new(Circle::new(5.0, -5.0, 1.5, Color::DARK_GREEN)));

    event_loop.open(Box::new(window))
}

/// Window showing a traffic light that changes on a timer
pub fn open_traffic_light<P: Platform>(
    event_loop: &mut EventLoop<P>,
    config: &Config,
) -> objwin::Result<WindowId> {
    let spec = config
        .window
        .spec_for_viewport("objwin: traffic light", Viewport::new(0.0, 3.0, 0.0, 5.0))?
        .position(config.window.x + config.window.longest_side + 20, config.window.y)
        .background(Color::LIGHT_GRAY);

    let phase = Rc::new(Cell::new(Phase::Red));
    let handler = TrafficLightHandler::new(phase.clone());
    let mut core = WindowCore::new(spec)?;
    handler.arm(&mut core);

    let mut window = ObjectWindow::new(core, handler);
    window.add(Box::new(traffic_light::traffic_light(1.0, 1.0, 1.0, phase)));

    event_loop.open(Box::new(window))
}
