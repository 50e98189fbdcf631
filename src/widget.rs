use crate::gesture::DragTracker;
use crate::graphics::{draw_line, draw_textured_triangle, fill_triangle};
use crate::loader::{FaceImage, FACE_LOADED};
use crate::math::apply_saturation;
use crate::renderer;
use crate::rotation::{Face, RotationState};
use crate::state::AppState;
use druid::kurbo::Point;
use druid::text::FontFamily;
use druid::widget::prelude::*;
use druid::{
    commands,
    piet::{InterpolationMode, Text, TextLayout, TextLayoutBuilder},
    Color, RenderContext, Widget,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Frame period of the idle spin timer
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Flat face colors shown until an image arrives
const FRONT_PLACEHOLDER: [u8; 3] = [178, 34, 34];
const BACK_PLACEHOLDER: [u8; 3] = [70, 130, 180];

/// The two face textures, each absent until its background load delivers
struct CardFaces {
    front: Option<Arc<FaceImage>>,
    back: Option<Arc<FaceImage>>,
}

/// 3D card widget
pub struct CardWidget {
    faces: CardFaces,
    /// Is the user currently dragging to spin the card?
    dragging: bool,
    /// Down-point of the active drag
    gesture_start: Point,
    /// Carried previous touch point for incremental spin deltas
    drag: DragTracker,
    /// Fractional flip angle accumulated by the idle spin
    spin_phase: f64,
    /// Degrees the idle spin advances per frame tick
    spin_step: f64,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl CardWidget {
    pub fn new(spin_duration: Duration) -> Self {
        let spin_step = 360.0 * FRAME_INTERVAL.as_secs_f64() / spin_duration.as_secs_f64().max(1e-3);
        CardWidget {
            faces: CardFaces {
                front: None,
                back: None,
            },
            dragging: false,
            gesture_start: Point::ZERO,
            drag: DragTracker::new(),
            spin_phase: 0.0,
            spin_step,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        }
    }

    fn face_image(&self, face: Face) -> Option<&Arc<FaceImage>> {
        match face {
            Face::Front => self.faces.front.as_ref(),
            Face::Back => self.faces.back.as_ref(),
        }
    }
}

impl Widget<AppState> for CardWidget {
    /// Handle events for the card widget
    fn event(&mut self, ctx: &mut EventCtx, event: &Event, data: &mut AppState, _env: &Env) {
        match event {
            Event::WindowConnected => {
                ctx.request_timer(FRAME_INTERVAL);
                // Request focus to receive keyboard events
                ctx.request_focus();
                self.spin_phase = data.rotation.y_axis() as f64;
            }
            Event::Timer(_) => {
                if !data.paused {
                    self.spin_phase = (self.spin_phase + self.spin_step).rem_euclid(360.0);
                    data.rotation.set_y_axis(self.spin_phase as i32);
                    ctx.request_paint();
                }
                ctx.request_timer(FRAME_INTERVAL);
            }
            Event::KeyDown(key_event) => {
                if let druid::keyboard_types::Key::Character(s) = &key_event.key {
                    match s.as_str() {
                        "d" | "D" => {
                            data.debug = !data.debug;
                            ctx.request_paint();
                        }
                        "p" | "P" => {
                            data.paused = !data.paused;
                            ctx.request_paint();
                        }
                        "r" | "R" => {
                            data.rotation = RotationState::new(0, 0);
                            self.spin_phase = 0.0;
                            ctx.request_paint();
                        }
                        "q" | "Q" => {
                            ctx.submit_command(commands::QUIT_APP);
                        }
                        _ => {}
                    }
                }
            }
            Event::MouseDown(mouse_event) => {
                self.dragging = true;
                self.gesture_start = mouse_event.pos;
                ctx.set_active(true); // Capture mouse events
            }
            Event::MouseMove(mouse_event) => {
                if self.dragging {
                    let size = ctx.size();
                    let center = (size.width / 2.0, size.height / 2.0);
                    let delta = self.drag.scroll(
                        (self.gesture_start.x, self.gesture_start.y),
                        (mouse_event.pos.x, mouse_event.pos.y),
                        center,
                    );
                    if let Some(angle) = delta {
                        data.rotation.spin_by(angle as i32);
                        ctx.request_paint();
                    }
                }
            }
            Event::MouseUp(_) => {
                if self.dragging {
                    self.dragging = false;
                    // Reset the carried point so the next drag doesn't jump
                    self.drag.finish();
                    ctx.set_active(false);
                }
            }
            Event::Command(command) => {
                if let Some(loaded) = command.get(FACE_LOADED) {
                    match loaded.face {
                        Face::Front => self.faces.front = Some(loaded.image.clone()),
                        Face::Back => self.faces.back = Some(loaded.image.clone()),
                    }
                    ctx.request_paint();
                }
            }
            _ => {}
        }
    }

    fn lifecycle(
        &mut self,
        _ctx: &mut LifeCycleCtx,
        _event: &LifeCycle,
        _data: &AppState,
        _env: &Env,
    ) {
    }

    fn update(&mut self, ctx: &mut UpdateCtx, old_data: &AppState, data: &AppState, _env: &Env) {
        // The saturation slider lives outside this widget; repaint whenever
        // any shared state changed.
        if !old_data.same(data) {
            ctx.request_paint();
        }
    }

    /// Determines the layout constraints for the card widget
    fn layout(
        &mut self,
        _layout_ctx: &mut LayoutCtx,
        bc: &BoxConstraints,
        _data: &AppState,
        _env: &Env,
    ) -> Size {
        bc.max()
    }

    /// Paint the card widget
    fn paint(&mut self, ctx: &mut PaintCtx, data: &AppState, _env: &Env) {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let size = ctx.size();
        let width = size.width as usize;
        let height = size.height as usize;
        if width == 0 || height == 0 {
            return;
        }

        // Create pixel buffer
        let mut pixel_data = vec![0u8; width * height * 4];

        let plan = renderer::project(&data.rotation, size.width, size.height);

        match self.face_image(plan.face) {
            Some(texture) => {
                // The quad as two triangles, sharing the first corner
                draw_textured_triangle(
                    &plan.vertices[0],
                    &plan.vertices[1],
                    &plan.vertices[2],
                    &mut pixel_data,
                    width,
                    height,
                    texture,
                    data.saturation,
                );
                draw_textured_triangle(
                    &plan.vertices[0],
                    &plan.vertices[2],
                    &plan.vertices[3],
                    &mut pixel_data,
                    width,
                    height,
                    texture,
                    data.saturation,
                );
            }
            None => {
                // No image yet: fill the perspective outline with the
                // face's flat color instead
                let corners = renderer::outline(&data.rotation, size.width, size.height);
                let base = match plan.face {
                    Face::Front => FRONT_PLACEHOLDER,
                    Face::Back => BACK_PLACEHOLDER,
                };
                let color = apply_saturation(base, data.saturation);
                fill_triangle(
                    corners[0], corners[1], corners[2], &mut pixel_data, width, height, color,
                );
                fill_triangle(
                    corners[0], corners[2], corners[3], &mut pixel_data, width, height, color,
                );
            }
        }

        if data.debug {
            // Trace the projected card edges
            for i in 0..4 {
                let from = plan.vertices[i].screen_position;
                let to = plan.vertices[(i + 1) % 4].screen_position;
                draw_line(
                    from[0],
                    from[1],
                    to[0],
                    to[1],
                    &mut pixel_data,
                    width,
                    height,
                    [255, 255, 255],
                );
            }
        }

        // Create and draw the image
        let image = ctx
            .make_image(
                width,
                height,
                &pixel_data,
                druid::piet::ImageFormat::RgbaSeparate,
            )
            .unwrap();
        ctx.draw_image(&image, size.to_rect(), InterpolationMode::NearestNeighbor);

        // Add debug info if debug mode is enabled
        if data.debug {
            let text = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            let text_layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 12.0)
                .text_color(Color::WHITE)
                .build()
                .unwrap();
            ctx.draw_text(&text_layout, (10.0, 10.0));

            // Draw angles and visible face
            let text = format!(
                "Flip: {}°, Spin: {}° ({:?})",
                data.rotation.y_axis(),
                data.rotation.z_axis(),
                plan.face
            );
            let text_layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 12.0)
                .text_color(Color::WHITE)
                .build()
                .unwrap();
            ctx.draw_text(&text_layout, (10.0, 30.0));

            // Draw saturation
            let text = format!("Saturation: {:.2}", data.saturation);
            let text_layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 12.0)
                .text_color(Color::WHITE)
                .build()
                .unwrap();
            ctx.draw_text(&text_layout, (10.0, 50.0));

            // Draw FPS
            let text = format!("FPS: {:.2}", self.fps);
            let text_layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 12.0)
                .text_color(Color::WHITE)
                .build()
                .unwrap();
            ctx.draw_text(&text_layout, (10.0, 70.0));
        }

        // Display 'Paused' if the idle spin is paused
        if data.paused {
            let text = "Paused";
            let text_layout = ctx
                .text()
                .new_text_layout(text)
                .font(FontFamily::SYSTEM_UI, 24.0)
                .text_color(Color::WHITE)
                .build()
                .unwrap();
            let text_size = text_layout.size();
            let pos = (
                (size.width - text_size.width) / 2.0,
                (size.height - text_size.height) / 2.0,
            );
            ctx.draw_text(&text_layout, pos);
        }
    }
}
