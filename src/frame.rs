use crate::audio::{AudioService, SharedAudio};
use crate::{canvas2d, dom, overlay, render};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use studio_core::decor::Decor;
use studio_core::scene::LineVertex;
use studio_core::{Camera, Studio, CAMERA_MAX_FRAME_SEC};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

const RAIN_RGBA: [f32; 4] = [0.53, 0.81, 0.92, 0.3];

pub struct Surface2d {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
}

impl Surface2d {
    pub fn new(canvas: web::HtmlCanvasElement) -> Option<Self> {
        let ctx = dom::context_2d(&canvas)?;
        Some(Self { canvas, ctx })
    }

    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }
}

pub struct FrameContext<'a> {
    pub document: web::Document,
    pub studio: Rc<RefCell<Studio>>,
    pub audio: SharedAudio,
    pub decor: Rc<RefCell<Decor>>,

    pub studio_canvas: web::HtmlCanvasElement,
    pub decor_surface: Option<Surface2d>,
    pub snake_surface: Option<Surface2d>,
    pub gpu: Option<render::GpuState<'a>>,

    pub last_instant: Instant,
    pub menu_signature: Option<(usize, bool)>,
    pub rain_scratch: Vec<LineVertex>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(CAMERA_MAX_FRAME_SEC);
        self.last_instant = now;
        let now_ms = dom::now_ms();

        // controllers first so this frame draws their latest state
        let requests = {
            let mut studio = self.studio.borrow_mut();
            studio.tick(now_ms);
            studio.frame(dt_sec);
            studio.drain_cues()
        };
        for req in requests {
            AudioService::handle(&self.audio, req);
        }
        self.audio.borrow_mut().tick(now_ms);
        self.decor
            .borrow_mut()
            .frame(now_ms, f64::from(dt_sec) * 1000.0);

        self.sync_dom();
        self.draw_2d();
        self.draw_scene(dt_sec);
    }

    fn sync_dom(&mut self) {
        let studio = self.studio.borrow();
        let hint_visible = self.decor.borrow().hint.visible();
        overlay::sync(&self.document, &studio, hint_visible);

        let menu = studio.menu();
        let signature = menu
            .is_open()
            .then(|| (menu.selected(), menu.showing_details()));
        if signature != self.menu_signature {
            if signature.is_some() {
                overlay::render_menu(&self.document, menu);
            }
            self.menu_signature = signature;
        }
    }

    fn draw_2d(&self) {
        if let Some(s) = &self.decor_surface {
            let (w, h) = s.size();
            canvas2d::draw_decor(&s.ctx, &self.decor.borrow(), w, h);
        }
        if let Some(s) = &self.snake_surface {
            if let Some(game) = self.studio.borrow().snake() {
                let (w, h) = s.size();
                canvas2d::draw_snake(&s.ctx, game, w, h);
            }
        }
    }

    fn draw_scene(&mut self, dt_sec: f32) {
        let Some(g) = &mut self.gpu else {
            return;
        };
        g.resize_if_needed(self.studio_canvas.width(), self.studio_canvas.height());

        let pose = self.studio.borrow().camera();
        g.set_view_proj(Camera::from_pose(pose, g.aspect()).view_projection());

        self.rain_scratch.clear();
        for (top, bottom) in self.decor.borrow().rain.segments() {
            self.rain_scratch.push(LineVertex {
                position: top.to_array(),
                color: RAIN_RGBA,
            });
            self.rain_scratch.push(LineVertex {
                position: bottom.to_array(),
                color: RAIN_RGBA,
            });
        }
        g.set_rain(&self.rain_scratch);

        match g.render(dt_sec) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // reconfigure on the next resize check
                log::debug!("[gpu] surface lost; reconfiguring");
            }
            Err(e) => log::error!("[gpu] render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    room: &[LineVertex],
    rain_capacity: u32,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, room, rain_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}; continuing without the 3D scene", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
