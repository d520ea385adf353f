//! Canvas Toys entry point
//!
//! The browser build wires the game and paint canvases to pointer events and
//! `requestAnimationFrame`. The native build runs a short headless demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::Clamped;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, ImageData, KeyboardEvent,
        PointerEvent,
    };

    use canvas_toys::consts::{MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
    use canvas_toys::error::{CanvasError, Result};
    use canvas_toys::renderer::{LineStyle, Surface, draw_game, draw_pad};
    use canvas_toys::sim::{GameState, tick};
    use canvas_toys::{
        FrameDriver, FrameScheduler, MonthlyGallery, PaintPad, PixelBuffer, Rgba, Settings,
        CourtVariant, Simulation, Tool,
    };

    /// `Surface` over a canvas 2D context
    struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        fn new(canvas: HtmlCanvasElement) -> Result<Self> {
            let ctx = canvas
                .get_context("2d")
                .ok()
                .flatten()
                .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
                .ok_or(CanvasError::NoContext)?;
            Ok(Self { canvas, ctx })
        }

        fn width(&self) -> u32 {
            self.canvas.width()
        }

        fn height(&self) -> u32 {
            self.canvas.height()
        }

        /// Match the backing store to the displayed size
        fn fit_to_client(&self) {
            self.canvas.set_width(self.canvas.client_width().max(1) as u32);
            self.canvas.set_height(self.canvas.client_height().max(1) as u32);
        }

        /// Pointer event position in canvas pixels
        fn pointer_pos(&self, event: &PointerEvent) -> Vec2 {
            let sx = self.canvas.width() as f32 / self.canvas.client_width().max(1) as f32;
            let sy = self.canvas.height() as f32 / self.canvas.client_height().max(1) as f32;
            Vec2::new(event.offset_x() as f32 * sx, event.offset_y() as f32 * sy)
        }

        fn circle_path(&self, center: Vec2, radius: f32) {
            self.ctx.begin_path();
            let _ = self.ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            );
        }
    }

    impl Surface for CanvasSurface {
        fn size(&self) -> Vec2 {
            Vec2::new(self.width() as f32, self.height() as f32)
        }

        fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Rgba) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx
                .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }

        fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Rgba, width: f32) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.ctx
                .stroke_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
        }

        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.circle_path(center, radius);
            self.ctx.fill();
        }

        fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Rgba) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.begin_path();
            let _ = self.ctx.ellipse(
                center.x as f64,
                center.y as f64,
                radii.x as f64,
                radii.y as f64,
                0.0,
                0.0,
                std::f64::consts::TAU,
            );
            self.ctx.fill();
        }

        fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Rgba, width: f32) {
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(width as f64);
            self.circle_path(center, radius);
            self.ctx.stroke();
        }

        fn line(&mut self, from: Vec2, to: Vec2, color: Rgba, style: LineStyle) {
            let dash = js_sys::Array::new();
            if let Some([on, off]) = style.dash {
                dash.push(&JsValue::from_f64(on as f64));
                dash.push(&JsValue::from_f64(off as f64));
            }
            let _ = self.ctx.set_line_dash(&dash);
            self.ctx.set_stroke_style_str(&color.to_css());
            self.ctx.set_line_width(style.width as f64);
            self.ctx.set_line_cap(style.cap.as_str());
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.stroke();
            let _ = self.ctx.set_line_dash(&js_sys::Array::new());
        }

        fn text(&mut self, text: &str, pos: Vec2, color: Rgba, size_px: f32) {
            self.ctx.set_fill_style_str(&color.to_css());
            self.ctx.set_font(&format!("bold {}px sans-serif", size_px));
            self.ctx.set_text_align("center");
            let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
        }

        fn put_pixels(&mut self, origin: Vec2, pixels: &PixelBuffer) {
            match ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(pixels.as_bytes()),
                pixels.width(),
                pixels.height(),
            ) {
                Ok(data) => {
                    let _ = self
                        .ctx
                        .put_image_data(&data, origin.x as f64, origin.y as f64);
                }
                Err(e) => log::error!("Could not blit pixels: {:?}", e),
            }
        }
    }

    /// Game, paint pad and their canvases
    struct Scene {
        game: GameState,
        game_surface: CanvasSurface,
        pad: Option<(PaintPad, CanvasSurface)>,
    }

    impl Simulation for Scene {
        fn update(&mut self, dt: f32) {
            tick(&mut self.game, dt);
        }

        fn render(&mut self) {
            draw_game(&mut self.game_surface, &self.game);
            if let Some((pad, surface)) = &mut self.pad {
                if pad.take_dirty() {
                    draw_pad(surface, pad);
                }
            }
        }
    }

    /// Schedules frames with `requestAnimationFrame`
    struct RafScheduler {
        app: Weak<RefCell<App>>,
    }

    impl FrameScheduler for RafScheduler {
        fn request_frame(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let app = self.app.clone();
            let closure = Closure::once(move |time: f64| {
                if let Some(app) = app.upgrade() {
                    let mut app = app.borrow_mut();
                    let App { driver, scene, .. } = &mut *app;
                    driver.on_frame(time, scene);
                }
            });
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    struct App {
        driver: FrameDriver<RafScheduler>,
        scene: Scene,
        gallery: MonthlyGallery,
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    fn canvas_by_id(id: &str) -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Canvas Toys starting...");

        let settings = Settings::load();

        let game_canvas = canvas_by_id("game-canvas").ok_or(CanvasError::NoContext)?;
        let game_surface = CanvasSurface::new(game_canvas.clone())?;
        game_surface.fit_to_client();
        // `data-court` on the canvas overrides the saved court
        let court = game_canvas
            .get_attribute("data-court")
            .and_then(|v| CourtVariant::from_str(&v))
            .unwrap_or(settings.court);
        let tuning = if court == settings.court {
            settings.game_tuning()
        } else {
            court.tuning()
        };
        let game = GameState::with_tuning(
            court,
            tuning,
            game_surface.width(),
            game_surface.height(),
        )?;
        log::info!(
            "Court {} at {}x{}",
            court.as_str(),
            game_surface.width(),
            game_surface.height()
        );

        let pad = match canvas_by_id("paint-canvas") {
            Some(canvas) => {
                canvas.set_width(settings.pad_width);
                canvas.set_height(settings.pad_height);
                Some((PaintPad::from_settings(&settings)?, CanvasSurface::new(canvas)?))
            }
            None => {
                log::info!("No paint canvas on this page");
                None
            }
        };

        let app = Rc::new_cyclic(|weak| {
            RefCell::new(App {
                driver: FrameDriver::new(RafScheduler { app: weak.clone() }),
                scene: Scene {
                    game,
                    game_surface,
                    pad,
                },
                gallery: MonthlyGallery::load(),
            })
        });

        setup_game_input(&game_canvas, app.clone());
        setup_pad_input(app.clone());
        setup_pad_buttons(app.clone());
        setup_pad_palette(&settings, app.clone());
        setup_window_handlers(app.clone());

        app.borrow_mut().driver.start(now_ms());

        log::info!("Canvas Toys running!");
        Ok(())
    }

    fn setup_game_input(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        for name in ["pointerdown", "pointermove", "pointerup", "pointercancel"] {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut app = app.borrow_mut();
                let scene = &mut app.scene;
                let p = scene.game_surface.pointer_pos(&event);
                match event.type_().as_str() {
                    "pointerdown" => {
                        if scene.game.pointer_down(p) {
                            event.prevent_default();
                            // Keep receiving moves and the release off-canvas
                            let _ = target.set_pointer_capture(event.pointer_id());
                        }
                    }
                    "pointermove" => scene.game.pointer_move(p),
                    "pointerup" => {
                        scene.game.pointer_up();
                    }
                    _ => scene.game.pointer_cancel(),
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pad_input(app: Rc<RefCell<App>>) {
        let Some(canvas) = canvas_by_id("paint-canvas") else {
            return;
        };
        for name in [
            "pointerdown",
            "pointermove",
            "pointerup",
            "pointerleave",
            "pointercancel",
        ] {
            let app = app.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut app = app.borrow_mut();
                let Some((pad, surface)) = &mut app.scene.pad else {
                    return;
                };
                let p = surface.pointer_pos(&event);
                match event.type_().as_str() {
                    "pointerdown" => {
                        let _ = target.set_pointer_capture(event.pointer_id());
                        pad.pointer_down(p);
                    }
                    "pointermove" => pad.pointer_move(p),
                    // Captured pointers still report leave when released outside
                    "pointerleave" if target.has_pointer_capture(event.pointer_id()) => {}
                    _ => pad.pointer_up(),
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pad_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let buttons: [(&str, fn(&mut App)); 5] = [
            ("pad-brush", |app| set_tool(app, Tool::Brush)),
            ("pad-eraser", |app| set_tool(app, Tool::Eraser)),
            ("pad-fill", |app| set_tool(app, Tool::Fill)),
            ("pad-clear", |app| {
                if let Some((pad, _)) = &mut app.scene.pad {
                    pad.clear();
                }
            }),
            ("pad-submit", submit_drawing),
        ];

        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                action(&mut app.borrow_mut());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Color swatches `pad-swatch-{i}` and the `pad-size` slider
    fn setup_pad_palette(settings: &Settings, app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // A swatch's `data-color` overrides the saved palette entry
        let mut palette = settings.palette.clone();
        let mut swatches = Vec::new();
        for (i, color) in palette.iter_mut().enumerate() {
            let Some(swatch) = document.get_element_by_id(&format!("pad-swatch-{}", i)) else {
                continue;
            };
            if let Some(hex) = swatch.get_attribute("data-color") {
                match Rgba::from_hex(&hex) {
                    Some(custom) => *color = custom,
                    None => log::warn!("Swatch {} has bad color {:?}", i, hex),
                }
            }
            let _ = swatch.set_attribute("style", &format!("background-color: {}", color.to_hex()));
            swatches.push((i, swatch));
        }

        for (i, swatch) in swatches {
            let palette = palette.clone();
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Some((pad, _)) = &mut app.borrow_mut().scene.pad {
                    pad.select_swatch(&palette, i);
                }
            });
            let _ =
                swatch.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(slider) = document
            .get_element_by_id("pad-size")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        slider.set_min(&MIN_BRUSH_SIZE.to_string());
        slider.set_max(&MAX_BRUSH_SIZE.to_string());
        slider.set_value(&settings.brush_size.to_string());
        let input = slider.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some((pad, _)) = &mut app.borrow_mut().scene.pad {
                pad.set_brush_size(input.value_as_number() as f32);
                log::debug!("Brush size: {}", pad.brush_size());
            }
        });
        let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn set_tool(app: &mut App, tool: Tool) {
        if let Some((pad, _)) = &mut app.scene.pad {
            pad.tool = tool;
            log::debug!("Tool: {:?}", tool);
        }
    }

    fn submit_drawing(app: &mut App) {
        let author = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("author-name"))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        let name = author.as_ref().map(|input| input.value()).unwrap_or_default();

        let App { scene, gallery, .. } = app;
        let Some((pad, _)) = &mut scene.pad else {
            return;
        };
        if pad.submit(gallery, &name, js_sys::Date::now()) {
            if let Some(input) = author {
                input.set_value("");
            }
        }
    }

    fn setup_window_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keep the court matched to the canvas size
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut app = app.borrow_mut();
                let scene = &mut app.scene;
                scene.game_surface.fit_to_client();
                let (w, h) = (scene.game_surface.width(), scene.game_surface.height());
                scene.game.resize(w, h);
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // R restarts the game
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key().eq_ignore_ascii_case("r") {
                    app.borrow_mut().scene.game.reset_game();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Canvas Toys failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Toys (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    if let Err(e) = headless::run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use glam::Vec2;

    use canvas_toys::error::Result;
    use canvas_toys::gallery::days_until_reset;
    use canvas_toys::renderer::{DrawList, draw_game, draw_pad};
    use canvas_toys::sim::{GameState, tick};
    use canvas_toys::{
        CourtVariant, FrameDriver, FrameScheduler, ImageStore, MonthlyGallery, PaintPad, Rgba,
        Settings, Simulation, StopHandle, Tool,
    };

    /// Frames fire when the demo loop polls for them
    #[derive(Default)]
    struct PolledScheduler {
        pending: bool,
    }

    impl FrameScheduler for PolledScheduler {
        fn request_frame(&mut self) {
            self.pending = true;
        }
    }

    struct Demo {
        game: GameState,
        surface: DrawList,
        stop: StopHandle,
    }

    impl Simulation for Demo {
        fn update(&mut self, dt: f32) {
            tick(&mut self.game, dt);
            if self.game.is_ready() {
                self.stop.stop();
            }
        }

        fn render(&mut self) {
            self.surface.clear();
            draw_game(&mut self.surface, &self.game);
        }
    }

    fn now_ms() -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as f64)
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<()> {
        // Optional first argument picks the court
        let settings = match std::env::args().nth(1) {
            Some(arg) => match CourtVariant::from_str(&arg) {
                Some(court) => Settings::for_court(court),
                None => {
                    log::warn!("Unknown court {:?}, using saved settings", arg);
                    Settings::load()
                }
            },
            None => Settings::load(),
        };

        // One slingshot shot, pulled straight down from the ball
        let mut game = GameState::with_tuning(settings.court, settings.game_tuning(), 400, 400)?;
        let grab = game.ball.pos;
        game.pointer_down(grab);
        game.pointer_move(grab + Vec2::new(0.0, 200.0));
        match game.pointer_up() {
            Some(vel) => println!("Launched at ({:.0}, {:.0}) px/s", vel.x, vel.y),
            None => println!("Shot cancelled"),
        }

        let mut driver = FrameDriver::new(PolledScheduler::default());
        let mut demo = Demo {
            game,
            surface: DrawList::new(400.0, 400.0),
            stop: driver.stop_handle(),
        };

        let mut now = 0.0;
        let mut frames = 0;
        driver.start(now);
        while driver.scheduler().pending && frames < 600 {
            driver.scheduler_mut().pending = false;
            now += 1000.0 / 60.0;
            driver.on_frame(now, &mut demo);
            frames += 1;
        }
        println!(
            "Shot settled after {} frames, score {} / {} ({} draw calls in last frame)",
            frames,
            demo.game.score,
            demo.game.shots,
            demo.surface.commands.len()
        );

        // Paint a framed square, bucket-fill the inside, send it to the gallery
        let mut pad = PaintPad::from_settings(&settings)?;
        pad.color = Rgba::rgb(0x33, 0x66, 0xcc);
        let corners = [
            Vec2::new(100.0, 75.0),
            Vec2::new(300.0, 75.0),
            Vec2::new(300.0, 225.0),
            Vec2::new(100.0, 225.0),
        ];
        pad.pointer_down(corners[0]);
        for p in corners.iter().skip(1).chain(std::iter::once(&corners[0])) {
            pad.pointer_move(*p);
        }
        pad.pointer_up();
        pad.tool = Tool::Fill;
        pad.color = Rgba::rgb(0xff, 0xd2, 0x3f);
        pad.pointer_down(Vec2::new(200.0, 150.0));

        let (pad_w, pad_h) = (pad.buffer().width(), pad.buffer().height());
        let mut pad_surface = DrawList::new(pad_w as f32, pad_h as f32);
        draw_pad(&mut pad_surface, &pad);

        let mut gallery = MonthlyGallery::load();
        let now = now_ms();
        if pad.submit(&mut gallery, "Headless demo", now) {
            let items = gallery.list(now);
            println!(
                "Gallery holds {} drawing(s) for {}, resets in {} day(s)",
                items.len(),
                items.first().map(|i| i.month_key.as_str()).unwrap_or("-"),
                days_until_reset(now)
            );
        }

        Ok(())
    }
}
