// Live loop: capture -> detect -> composite -> present, then a short pause.
// Toolbar buttons (or keys 0-4) pick the filter, S or the button saves a raw
// snapshot, ESC quits.

use clap::Parser;
use face_filter::config::Args;
use face_filter::detector::SeetaLandmarker;
use face_filter::draw::{Drawer, Toolbar, draw_text_5x7};
use face_filter::snapshot::{NativeSaveDialog, capture_and_save};
use face_filter::{Action, CameraCapture, Error, FilterBank, FrameBuffer, Session};
use log::{debug, info};
use std::time::{Duration, Instant};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    info!("Starting face-filter v{}", env!("CARGO_PKG_VERSION"));

    /* --- Assets, detector, camera, window --- */
    let bank = FilterBank::load(&args.filters_dir);
    let mut detector = SeetaLandmarker::from_model_file(&args.detector_model, args.detector_settings())?;

    let mut cam = CameraCapture::new(args.camera, args.width, args.height)?;
    let (w, h) = cam.resolution();
    info!("Camera {} streaming at {w}x{h}", args.camera);

    let toolbar = Toolbar::new(w as usize, h as usize);
    let mut drawer = Drawer::new("Face Filter App", toolbar.window_width(), toolbar.window_height())?;

    /* --- Reusable screen buffer: video on top, toolbar below --- */
    let mut screen = FrameBuffer::new(toolbar.window_width(), toolbar.window_height());
    let mut session = Session::new();
    let mut dialog = NativeSaveDialog;
    let delay = args.frame_delay();

    /* --- FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    /* ------------------------------ Main loop ------------------------------ */
    'running: while drawer.is_open() {
        /* 1) UI events from the previous present */
        for event in drawer.poll_events(&toolbar) {
            match session.handle(event) {
                Action::None => {}
                Action::SaveSnapshot => {
                    capture_and_save(&mut cam, &mut dialog);
                }
                Action::Exit => break 'running,
            }
        }

        /* 2) + 3) Fresh frame, then landmarks -> rect -> overlay for every face.
           A failed read skips this cycle; the window still pumps events. */
        let Some(frame) = session.cycle(&mut cam, &mut detector, &bank) else {
            drawer.pump();
            std::thread::sleep(delay);
            continue;
        };

        /* 4) Pack for display, draw toolbar + HUD, present */
        screen.blit_rgb(&frame, 0, 0);
        toolbar.render(&mut screen, &bank, session.filter());
        let hud = format!("FILTER: {} | {}", session.filter().name(), hud_fps_text);
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);
        drawer.present(&screen)?;

        /* 5) FPS (debug log + HUD once per second) */
        frames_this_second += 1;
        let now = Instant::now();
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!("FPS: {:.1}", fps);
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }

        std::thread::sleep(delay);
    }

    info!("Window closed, releasing camera");
    Ok(())
}
