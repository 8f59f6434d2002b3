//! SDL2 display and keyboard input.
//!
//! The window only presents finished frames: a [`ColorBuffer`] is uploaded
//! into a streaming ARGB8888 texture and stretched over the canvas. Keyboard
//! state is sampled once per frame into an [`InputState`].

use sdl2::event::Event;
use sdl2::keyboard::{Keycode, Scancode};
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::render::{ColorBuffer, RenderTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
}

/// Keys held down during one frame.
///
/// | key   | field        |
/// |-------|--------------|
/// | A / D | `left` / `right` |
/// | W / S | `up` / `down` |
/// | ← / → | `turn_left` / `turn_right` |
/// | ↑ / ↓ | `look_up` / `look_down` |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub look_up: bool,
    pub look_down: bool,
}

impl InputState {
    /// Builds a snapshot from a "is this key down" query.
    pub fn from_pressed(pressed: impl Fn(Scancode) -> bool) -> Self {
        Self {
            left: pressed(Scancode::A),
            right: pressed(Scancode::D),
            up: pressed(Scancode::W),
            down: pressed(Scancode::S),
            turn_left: pressed(Scancode::Left),
            turn_right: pressed(Scancode::Right),
            look_up: pressed(Scancode::Up),
            look_down: pressed(Scancode::Down),
        }
    }
}

pub struct FrameLimiter {
    previous_frame_time: u64,
    frame_target_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, target_fps: u32) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
            frame_target_time: frame_target_time(target_fps),
        }
    }

    /// Sleeps off whatever is left of the current frame's time slot.
    pub fn wait(&mut self, window: &Window) {
        let elapsed = window.timer().ticks64().saturating_sub(self.previous_frame_time);
        if let Some(ms) = time_to_wait(elapsed, self.frame_target_time) {
            std::thread::sleep(std::time::Duration::from_millis(ms));
        }
        self.previous_frame_time = window.timer().ticks64();
    }
}

/// Milliseconds still to sleep, or `None` when the frame already ran long.
fn time_to_wait(elapsed: u64, frame_target_time: u64) -> Option<u64> {
    frame_target_time.checked_sub(elapsed).filter(|&ms| ms > 0)
}

/// Milliseconds per frame, never less than one.
fn frame_target_time(target_fps: u32) -> u64 {
    (1000 / u64::from(target_fps.max(1))).max(1)
}

pub struct Window {
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    // `texture` borrows from `texture_creator` and is declared first so it drops first.
    texture: sdl2::render::Texture<'static>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        let texture = Self::create_texture(&texture_creator, width, height)?;

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    fn create_texture(
        texture_creator: &sdl2::render::TextureCreator<sdl2::video::WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<sdl2::render::Texture<'static>, String> {
        // SAFETY: the creator is boxed, so its address is stable, and it is
        // owned by the same Window as the texture, which is dropped first.
        let texture_creator: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())
    }

    /// Drains pending events. Quit wins over resize.
    pub fn poll_events(&mut self) -> WindowEvent {
        let mut result = WindowEvent::None;
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => result = WindowEvent::Resize(w.max(1) as u32, h.max(1) as u32),
                _ => {}
            }
        }
        result
    }

    /// Current keyboard state; call after [`Window::poll_events`].
    pub fn input_state(&self) -> InputState {
        let keyboard = self.event_pump.keyboard_state();
        InputState::from_pressed(|scancode| keyboard.is_scancode_pressed(scancode))
    }

    pub fn present(&mut self, frame: &ColorBuffer) -> Result<(), String> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(format!(
                "frame is {}x{} but the window is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            ));
        }

        self.texture
            .update(None, frame.as_bytes(), (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), String> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pressed_is_idle() {
        assert_eq!(InputState::from_pressed(|_| false), InputState::default());
    }

    #[test]
    fn keys_map_to_their_actions() {
        let input = InputState::from_pressed(|sc| matches!(sc, Scancode::A | Scancode::Up));
        assert!(input.left);
        assert!(input.look_up);
        assert!(!input.right && !input.up && !input.down);
        assert!(!input.turn_left && !input.turn_right && !input.look_down);
    }

    #[test]
    fn frame_time_from_fps() {
        assert_eq!(frame_target_time(60), 16);
        assert_eq!(frame_target_time(0), 1000);
        assert_eq!(frame_target_time(5000), 1);
    }

    #[test]
    fn limiter_only_sleeps_off_the_remainder() {
        assert_eq!(time_to_wait(4, 16), Some(12));
        assert_eq!(time_to_wait(16, 16), None);
        assert_eq!(time_to_wait(40, 16), None);
    }
}
