//! Route Reveal Demo
//!
//! This example choreographs a small scene against an in-memory surface:
//! - A line reveal with a head marker tracing the route
//! - A camera fly-to that starts mid-reveal from the ambient view
//! - A pin pop and blink rings once the route is drawn
//!
//! Run with: cargo run -p mapreel_animation --example route_reveal

use mapreel_animation::{
    Blink, BlinkOpts, LineAnimation, LineOpts, MapViewAdjustment, MapViewOpts, Pop, PopOpts,
    Scheduler, run_to_completion,
};
use mapreel_core::{CameraState, FrameRate, LngLat, MemorySurface, RenderSurface};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let rate = FrameRate::new(30);
    let mut surface = MemorySurface::with_camera(CameraState {
        center: LngLat::new(-75.6975, 45.4115),
        zoom: 6.0,
        pitch: 0.0,
    });
    surface.set_layout_property("pin-icon", "icon-size", 0.0);

    let route = vec![
        LngLat::new(-75.70, 45.41),
        LngLat::new(-75.65, 45.43),
        LngLat::new(-75.60, 45.42),
        LngLat::new(-75.55, 45.46),
    ];

    let mut scheduler = Scheduler::new();
    scheduler.schedule(
        LineAnimation::new(
            LineOpts::new(0.0, "route", route)
                .seconds(3.0)
                .head_marker("route-head"),
            rate,
        )
        .unwrap(),
    );
    scheduler.schedule(MapViewAdjustment::new(
        MapViewOpts::new(1.0)
            .pan_to(LngLat::new(-75.55, 45.46))
            .zoom_to(10.0)
            .pitch_to(40.0)
            .seconds(2.0),
        rate,
    ));
    scheduler.schedule(Pop::new(PopOpts::new(3.1, "pin-icon"), rate).unwrap());
    scheduler.schedule(
        Blink::new(BlinkOpts::new(3.5, "route-head").rings(3), rate, &mut surface).unwrap(),
    );

    let frames = run_to_completion(&mut scheduler, &mut surface, None);

    println!("scene finished after {frames} frames");
    println!("route points drawn: {}", surface.path_point_count("route"));
    println!(
        "camera: center ({:.4}, {:.4}), zoom {:.1}, pitch {:.0}",
        surface.camera().center.lng,
        surface.camera().center.lat,
        surface.camera().zoom,
        surface.camera().pitch,
    );
}
