use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};

use ssr::config::SceneConfig;
use ssr::window::{FrameLimiter, Window, WindowEvent};
use ssr::{ColorBuffer, Renderer};

/// Software renderer: textured meshes drawn on the CPU.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// RON scene file. Without one a spinning textured cube is shown.
    #[arg(short, long, value_name = "SCENE")]
    config: Option<PathBuf>,
}

fn main() -> ssr::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    let (mut models, spins): (Vec<_>, Vec<_>) = config.load_models()?.into_iter().unzip();
    let mut renderer = Renderer::new(config.load_texture()?);
    let mut camera = config.camera.build();

    let clear_color = config.window.clear_color;
    let mut window = Window::new(
        &config.window.title,
        config.window.width,
        config.window.height,
    )?;
    let mut frame = ColorBuffer::new(window.width(), window.height(), clear_color);
    let mut limiter = FrameLimiter::new(&window, config.window.target_fps);

    info!(
        "rendering {} model(s) at {}x{}, {} fps target",
        models.len(),
        window.width(),
        window.height(),
        config.window.target_fps
    );

    loop {
        match window.poll_events() {
            WindowEvent::Quit => break,
            WindowEvent::Resize(width, height) => {
                debug!("resized to {width}x{height}");
                window.resize(width, height)?;
                frame.resize(width, height, clear_color);
            }
            WindowEvent::None => {}
        }

        camera.update(&window.input_state());
        for (model, spin) in models.iter_mut().zip(&spins) {
            model.spin(*spin);
        }

        frame.clear(clear_color);
        renderer.render_scene(&models, &camera, &mut frame);
        window.present(&frame)?;

        limiter.wait(&window);
    }

    info!("exiting");
    Ok(())
}
