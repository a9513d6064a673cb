use std::rc::Rc;

use falling_letters::domain::config::SimulationConfig;
use falling_letters::simulation::{DisplayImage, Simulation, Surface, Viewport};

struct Icon;

impl DisplayImage for Icon {
    fn is_ready(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct Canvas {
    frames: usize,
    drawn: Vec<(f32, f32)>,
}

impl Surface<Icon> for Canvas {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.frames += 1;
        self.drawn.clear();
    }

    fn draw_image(&mut self, _image: &Icon, x: f32, y: f32, _width: f32, _height: f32) {
        self.drawn.push((x, y));
    }
}

#[test]
fn three_bodies_fall_into_an_800x600_viewport() {
    let config = SimulationConfig::from_json(r#"{ "bodyCount": 3, "staggerMs": 150, "seed": 12345 }"#)
        .expect("config parses");
    let mut sim = Simulation::new(Viewport::new(800.0, 600.0), config, Rc::new(Icon))
        .expect("valid setup");
    let mut canvas = Canvas::default();

    sim.start(0.0).expect("starts");
    let mut now = 0.0;
    while now <= 500.0 {
        sim.tick(now);
        sim.render(&mut canvas);
        now += 10.0;
    }

    assert_eq!(sim.body_count(), 3);
    assert_eq!(canvas.drawn.len(), 3);
    for live in sim.live_bodies() {
        let body = sim.world().body(live.id).expect("live body is in the world");
        assert!(live.spawn_pos.y < 0.0);
        assert!(
            body.pos.y > live.spawn_pos.y,
            "body #{} did not fall: {} -> {}",
            live.index,
            live.spawn_pos.y,
            body.pos.y
        );
        assert!((-50.0..=850.0).contains(&body.pos.x), "x = {}", body.pos.x);
    }

    sim.stop();
    assert_eq!(sim.world().body_count(), 0);
}

#[test]
fn stopping_mid_spawn_never_inserts_late_bodies() {
    let config = SimulationConfig {
        body_count: 45,
        seed: Some(1),
        ..SimulationConfig::default()
    };
    let mut sim = Simulation::new(Viewport::new(1024.0, 768.0), config, Rc::new(Icon))
        .expect("valid setup");
    sim.start(1_000.0).expect("starts");
    sim.tick(1_300.0);
    let spawned = sim.body_count();
    assert_eq!(spawned, 3);

    sim.stop();
    for late in 0..100 {
        sim.tick(1_300.0 + late as f64 * 150.0);
    }
    assert_eq!(sim.body_count(), 0);
    assert_eq!(sim.world().body_count(), 0);
    assert_eq!(sim.pending_spawns(), 0);
}
