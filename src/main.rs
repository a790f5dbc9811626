use macroquad::prelude::*;
use tracing::info;

use beatrush::config::GameSettings;
use beatrush::scene::{AppContext, Scene, SceneTransition, StartMenuScene};
use beatrush::util::init_logging;

fn window_conf() -> Conf {
    Conf {
        window_title: "BeatRush".to_owned(),
        window_width: 1280,
        window_height: 720,
        fullscreen: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    if let Err(e) = init_logging(None, verbose) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    let settings = GameSettings::load();
    let mut ctx = AppContext::new(settings);
    let mut scenes: Vec<Box<dyn Scene>> = vec![Box::new(StartMenuScene::new())];

    info!("BeatRush started");

    while let Some(scene) = scenes.last_mut() {
        match scene.update(&mut ctx) {
            SceneTransition::None => {}
            SceneTransition::Push(next) => scenes.push(next),
            SceneTransition::Pop => {
                scenes.pop();
                if let Some(revealed) = scenes.last_mut() {
                    revealed.on_resume(&mut ctx);
                }
            }
            SceneTransition::Replace(next) => {
                scenes.pop();
                scenes.push(next);
            }
            SceneTransition::Quit => scenes.clear(),
        }

        if let Some(scene) = scenes.last() {
            scene.draw();
        }

        next_frame().await;
    }

    if let Err(e) = ctx.settings.save() {
        info!("Settings not saved: {e:#}");
    }
    info!("BeatRush exiting");
}
