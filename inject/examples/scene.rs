use fibre_inject::{resolve, Component, Container, Describe, InjectorConfig, Scene, Startup};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

trait Log {
  fn line(&self, message: &str);
}

struct ConsoleLog;
impl Log for ConsoleLog {
  fn line(&self, message: &str) {
    println!("[game] {message}");
  }
}

struct GameSettings {
  player_name: String,
  max_enemies: usize,
}

// --- Providers ---

struct SettingsProvider;
impl Component for SettingsProvider {
  fn describe(meta: &mut Describe<Self>) {
    meta.provide("provide_settings", |_this| {
      Some(GameSettings {
        player_name: "Ada".to_string(),
        max_enemies: 3,
      })
    });
  }
}

struct LogProvider;
impl Component for LogProvider {
  fn describe(meta: &mut Describe<Self>) {
    meta.provide_shared::<dyn Log>("provide_log", |_this| {
      let log: Rc<dyn Log> = Rc::new(ConsoleLog);
      Some(log)
    });
  }
}

// --- Consumers ---

#[derive(Default)]
struct Player {
  settings: Option<Rc<GameSettings>>,
}
impl Component for Player {
  fn describe(meta: &mut Describe<Self>) {
    meta.field("settings", |this, settings: Rc<GameSettings>| {
      this.settings = Some(settings)
    });
  }
}

#[derive(Default)]
struct Spawner {
  budget: usize,
  log: Option<Rc<dyn Log>>,
}
impl Component for Spawner {
  fn describe(meta: &mut Describe<Self>) {
    meta.method(
      "construct",
      |this, (settings, log): (Rc<GameSettings>, Rc<dyn Log>)| {
        this.budget = settings.max_enemies;
        log.line(&format!("spawner ready with {} enemies", this.budget));
        this.log = Some(log);
      },
    );
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
    .init();

  let config = match InjectorConfig::load_or_default(None) {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Invalid injector config: {e}");
      return;
    }
  };

  let mut scene = Scene::new();
  let player = scene.spawn(Player::default());
  let spawner = scene.spawn(Spawner::default());
  scene.spawn(SettingsProvider);
  scene.spawn(LogProvider);

  let mut container = Container::with_config(config);
  let mut startup = Startup::new();
  startup
    .add_fn("hud", 0, move |scene: &mut Scene| {
      if let Some(settings) = scene.get::<Player>(player).and_then(|p| p.settings.as_ref()) {
        println!("HUD: welcome, {}!", settings.player_name);
      }
      Ok(())
    })
    .add(&mut container);

  if let Err(e) = startup.run(&mut scene) {
    eprintln!("Startup failed: {e}");
    return;
  }
  drop(startup);

  let spawner = scene.get::<Spawner>(spawner).unwrap();
  assert_eq!(spawner.budget, 3);
  if let Some(log) = &spawner.log {
    log.line("startup complete");
  }
  resolve!(container, trait Log).line("resolved after startup");
}
