//! Softline demo: wireframe racing scene on a software framebuffer
//!
//! The platform side lives here: window, framebuffer ownership, resize
//! handling and presentation. Everything drawn goes through the renderer.

mod demo;

use anyhow::Context;
use macroquad::prelude as mq;
use softline::assets::load_texture_dir;
use softline::config::{load_config, ConfigError, RenderConfig};
use softline::logging::{init_logging, LoggingConfig};
use softline::rasterizer::{Framebuffer, Renderer, Vec2i};
use softline::VERSION;
use demo::DemoScene;

const CONFIG_PATH: &str = "softline.ron";

/// Config from disk, or defaults if there is no file
fn read_config() -> (RenderConfig, Option<ConfigError>) {
    match load_config(CONFIG_PATH) {
        Ok(config) => (config, None),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => (RenderConfig::default(), None),
        Err(e) => (RenderConfig::default(), Some(e)),
    }
}

fn window_conf() -> mq::Conf {
    let (config, _) = read_config();
    mq::Conf {
        window_title: format!("Softline v{}", VERSION),
        window_width: (config.width * config.window_scale) as i32,
        window_height: (config.height * config.window_scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

/// Framebuffer size for the current window
fn framebuffer_size(config: &RenderConfig) -> Vec2i {
    let scale = config.window_scale.max(1) as f32;
    Vec2i::new(
        ((mq::screen_width() / scale) as i32).max(1),
        ((mq::screen_height() / scale) as i32).max(1),
    )
}

fn present(fb: &Framebuffer) {
    let texture = mq::Texture2D::from_rgba8(fb.width as u16, fb.height as u16, fb.as_bytes());
    texture.set_filter(mq::FilterMode::Nearest);

    mq::draw_texture_ex(
        &texture,
        0.0,
        0.0,
        mq::WHITE,
        mq::DrawTextureParams {
            dest_size: Some(mq::vec2(mq::screen_width(), mq::screen_height())),
            ..Default::default()
        },
    );
}

async fn run(config: RenderConfig) -> anyhow::Result<()> {
    let size = framebuffer_size(&config);
    let mut renderer = Renderer::new(size).context("renderer init")?;
    renderer.set_clear_color(config.clear_color);
    let mut fb = Framebuffer::new(size.x as usize, size.y as usize);

    let scene = DemoScene::new(&mut renderer).context("demo scene textures")?;

    if let Some(dir) = &config.texture_dir {
        let loaded = load_texture_dir(&mut renderer, dir)
            .with_context(|| format!("loading textures from {}", dir.display()))?;
        log::info!("{} textures loaded from {}", loaded.len(), dir.display());
    }

    loop {
        if mq::is_key_pressed(mq::KeyCode::Escape) {
            break;
        }

        let size = framebuffer_size(&config);
        if size != renderer.size() {
            fb.resize(size.x as usize, size.y as usize);
            renderer.set_screen_size(size);
        }

        let time = mq::get_time() as f32;
        let mut frame = renderer.frame_prepare(&mut fb.pixels, fb.stride)?;
        scene.draw(&mut frame, time, config.camera_speed)?;
        frame.end();

        mq::clear_background(mq::BLACK);
        present(&fb);
        mq::next_frame().await;
    }

    Ok(())
}

#[macroquad::main(window_conf)]
async fn main() {
    let (config, config_err) = read_config();
    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
    });
    if let Some(e) = config_err {
        log::warn!("ignoring {}: {}", CONFIG_PATH, e);
    }

    log::info!("=== Softline v{} ===", VERSION);

    if let Err(e) = run(config).await {
        log::error!("fatal: {:#}", e);
        std::process::exit(1);
    }
}
