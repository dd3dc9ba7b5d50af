use winit::window::WindowId;

use horloge_engine::coords::Viewport;
use horloge_engine::core::{App, AppControl, FrameCtx};
use horloge_engine::input::{Key, MouseButton};
use horloge_engine::render::shapes::circle::CircleRenderer;
use horloge_engine::render::shapes::rounded_rect::RoundedRectRenderer;
use horloge_engine::scene::DrawList;
use horloge_engine::window::CursorIcon;
use horloge_face::{Extent, Scheduler, Tunables};

use crate::paint;

/// Studio application: one scheduler, one draw list, two renderers.
///
/// The scheduler is created on the first usable viewport, so a window that
/// opens minimized simply waits.
pub struct ClockApp {
    tunables: Tunables,
    scheduler: Option<Scheduler>,

    draw_list: DrawList,
    circles: CircleRenderer,
    rects: RoundedRectRenderer,

    cursor: CursorIcon,
}

impl ClockApp {
    pub fn new(tunables: Tunables) -> Self {
        Self {
            tunables,
            scheduler: None,
            draw_list: DrawList::new(),
            circles: CircleRenderer::new(),
            rects: RoundedRectRenderer::new(),
            cursor: CursorIcon::Default,
        }
    }

    fn apply_viewport(&mut self, viewport: Viewport) {
        let extent = Extent::new(viewport.width, viewport.height);

        if let Some(scheduler) = self.scheduler.as_mut() {
            if let Err(e) = scheduler.resize(extent) {
                log::warn!("keeping previous layout: {e}");
            }
            return;
        }

        match Scheduler::new(self.tunables.clone(), extent) {
            Ok(mut scheduler) => {
                let spawned = scheduler.populate();
                log::info!("{} clock(s) on screen", spawned.len());
                self.scheduler = Some(scheduler);
            }
            Err(e) => log::warn!("clocks not started yet: {e}"),
        }
    }
}

impl App for ClockApp {
    fn on_resize(&mut self, _window_id: WindowId, viewport: Viewport) -> AppControl {
        self.apply_viewport(viewport);
        AppControl::Continue
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }

        self.draw_list.clear();

        if let Some(scheduler) = self.scheduler.as_mut() {
            if ctx.input_frame.key_pressed(Key::Space) {
                let resumed = scheduler.release();
                if resumed > 0 {
                    log::info!("released {resumed} clock(s)");
                }
            }

            // Clicks hit what was drawn last frame, before anything moves.
            for (x, y) in ctx.input_frame.clicks_of(MouseButton::Left) {
                let Some(id) = scheduler.select_at(x, y) else { continue };
                if let Some(clock) = scheduler.get(id) {
                    log::info!("clock {} selected at {}", id.0, clock.time());
                }
            }

            scheduler.frame(ctx.time.dt_ms());

            let hovering = ctx
                .input
                .pointer_pos
                .and_then(|(x, y)| scheduler.registry().hit_test(x, y, scheduler.config()))
                .is_some();
            let cursor = if hovering { CursorIcon::Pointer } else { CursorIcon::Default };
            if cursor != self.cursor {
                ctx.window.set_cursor(cursor);
                self.cursor = cursor;
            }

            paint::paint_scene(&mut self.draw_list, scheduler);
        }

        let (draw_list, circles, rects) = (&mut self.draw_list, &mut self.circles, &mut self.rects);
        ctx.render(paint::background(), |rctx, target| {
            // Faces first; hands and caps sit on top of them.
            circles.render(rctx, target, draw_list);
            rects.render(rctx, target, draw_list);
        })
    }
}
