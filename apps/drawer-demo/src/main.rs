use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use drawerpose_core::{DefaultScheduler, Runtime, RuntimeHandle};
use drawerpose_drawer::{
    DialogHost, DrawerConfig, DrawerError, DrawerSnapshot, DrawerState, SnapPointSpec,
};
use drawerpose_foundation::{PointerEvent, Size};

const FRAME_NANOS: u64 = 16_666_667;
const DRAWER_HEIGHT: f32 = 600.0;
const VIEWPORT: Size = Size::new(390.0, 844.0);

struct ConsoleHost;

impl DialogHost for ConsoleHost {
    fn on_open_change(&self, open: bool) {
        println!("  host: open -> {open}");
    }

    fn set_scroll_lock(&self, locked: bool) {
        println!("  host: scroll lock -> {locked}");
    }
}

struct Session {
    runtime: Runtime,
    drawer: DrawerState,
    frame_nanos: u64,
    now_ms: u64,
}

impl Session {
    fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    fn run_frames(&mut self) -> usize {
        let mut frames = 0;
        while self.handle().has_frame_callbacks() && frames < 600 {
            self.frame_nanos += FRAME_NANOS;
            self.handle().drain_frame_callbacks(self.frame_nanos);
            frames += 1;
        }
        frames
    }

    fn drag(&mut self, from: f32, to: f32, steps: u32, step_ms: u64) {
        self.drawer
            .pointer_down(&PointerEvent::down(0.0, from).at_millis(self.now_ms), None);
        for step in 1..=steps {
            self.now_ms += step_ms;
            let y = from + (to - from) * step as f32 / steps as f32;
            self.drawer
                .pointer_move(&PointerEvent::moved(0.0, y).at_millis(self.now_ms));
        }
        self.drawer
            .pointer_up(&PointerEvent::up(0.0, to).at_millis(self.now_ms));
    }
}

fn print_snapshot(snapshot: &DrawerSnapshot) {
    let point = snapshot
        .geometry
        .active_snap_point
        .map(|point| point.to_string())
        .unwrap_or_else(|| "-".to_string());
    println!(
        "  translate {:7.1}  open {:5.1}%  state {:<9} dragging {:<5} snap {point}",
        snapshot.geometry.translate,
        snapshot.geometry.open_percentage * 100.0,
        snapshot.transition_state,
        snapshot.is_dragging,
    );
}

fn main() -> Result<(), DrawerError> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = DrawerConfig::new()
        .try_with_snap_points(["148px", "0.5", "1"])?
        .with_default_snap_point(SnapPointSpec::Pixels(148.0));
    let runtime = Runtime::new(Arc::new(DefaultScheduler));
    let drawer = DrawerState::new(config, runtime.handle(), Rc::new(ConsoleHost))?;
    drawer.set_size(DRAWER_HEIGHT)?;

    let updates = Rc::new(Cell::new(0usize));
    let _subscription = {
        let updates = Rc::clone(&updates);
        drawer.subscribe(move |snapshot| {
            let count = updates.get() + 1;
            updates.set(count);
            if count % 8 == 0 || snapshot.transition_state.is_idle() {
                print_snapshot(snapshot);
            }
        })
    };

    let mut session = Session {
        runtime,
        drawer,
        frame_nanos: 0,
        now_ms: 0,
    };

    println!("=== Drawerpose headless demo ===");
    println!("open to the peek height");
    session.drawer.open();
    println!("  settled after {} frames", session.run_frames());
    let bounds = session.drawer.geometry().bounds(VIEWPORT);
    println!(
        "  drawer covers y {:.0}..{:.0} of a {:.0}px viewport",
        bounds.y,
        bounds.y + bounds.height,
        VIEWPORT.height
    );

    println!("flick upward past the half-way point");
    session.drag(500.0, 300.0, 5, 12);
    println!("  settled after {} frames", session.run_frames());

    println!("slow drag back toward the peek height");
    session.drag(200.0, 420.0, 22, 40);
    println!("  settled after {} frames", session.run_frames());

    println!("close");
    session.drawer.close();
    println!("  settled after {} frames", session.run_frames());

    log::info!("demo produced {} drawer updates", updates.get());
    Ok(())
}
