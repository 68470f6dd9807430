use fibre_inject::{
  maybe_resolve, resolve, Component, Container, Describe, Error, FieldPolicy, InjectorConfig, Scene,
  Startup,
};
use std::cell::RefCell;
use std::rc::Rc;

// --- Advanced Test Fixtures ---

trait Clock {
  fn now(&self) -> u64;
}

struct FixedClock(u64);
impl Clock for FixedClock {
  fn now(&self) -> u64 {
    self.0
  }
}

struct AudioSettings {
  volume: u8,
}

// A provider that keeps its own handle to what it supplies.
struct TimeProvider {
  clock: Rc<FixedClock>,
}
impl Component for TimeProvider {
  fn describe(meta: &mut Describe<Self>) {
    meta.provide_shared::<dyn Clock>("provide_clock", |this| {
      let clock: Rc<dyn Clock> = this.clock.clone();
      Some(clock)
    });
  }
}

#[derive(Default)]
struct Scheduler {
  clock: Option<Rc<dyn Clock>>,
}
impl Component for Scheduler {
  fn describe(meta: &mut Describe<Self>) {
    meta.field("clock", |this, clock: Rc<dyn Clock>| this.clock = Some(clock));
  }
}

// Both a provider and a consumer.
#[derive(Default)]
struct AudioSystem {
  started_at: Option<u64>,
}
impl Component for AudioSystem {
  fn describe(meta: &mut Describe<Self>) {
    meta
      .provide("provide_settings", |_this| Some(AudioSettings { volume: 80 }))
      .method("start", |this, clock: Rc<dyn Clock>| {
        this.started_at = Some(clock.now())
      });
  }
}

#[derive(Default)]
struct Mixer {
  volume: Option<u8>,
}
impl Component for Mixer {
  fn describe(meta: &mut Describe<Self>) {
    meta.method("bind", |this, (settings,): (Rc<AudioSettings>,)| {
      this.volume = Some(settings.volume)
    });
  }
}

// --- Advanced Tests ---

#[test]
fn test_trait_object_service_is_shared_with_its_provider() {
  // Arrange
  let clock = Rc::new(FixedClock(1234));
  let mut scene = Scene::new();
  scene.spawn(TimeProvider {
    clock: clock.clone(),
  });
  let scheduler = scene.spawn(Scheduler::default());
  let mut container = Container::new();

  // Act
  container.initialize(&mut scene).unwrap();

  // Assert
  let injected = scene.get::<Scheduler>(scheduler).unwrap().clock.clone().unwrap();
  assert_eq!(injected.now(), 1234);
  // test, provider, registry, consumer field and `injected` share one clock
  assert!(std::ptr::eq(
    Rc::as_ptr(&injected) as *const u8,
    Rc::as_ptr(&clock) as *const u8
  ));
  assert_eq!(Rc::strong_count(&clock), 5);
}

#[test]
fn test_component_can_provide_and_consume() {
  // Arrange
  let mut scene = Scene::new();
  let audio = scene.spawn(AudioSystem::default());
  let mixer = scene.spawn(Mixer::default());
  scene.spawn(TimeProvider {
    clock: Rc::new(FixedClock(55)),
  });
  let mut container = Container::new();

  // Act
  let report = container.initialize(&mut scene).unwrap();

  // Assert
  assert_eq!(scene.get::<AudioSystem>(audio).unwrap().started_at, Some(55));
  assert_eq!(scene.get::<Mixer>(mixer).unwrap().volume, Some(80));
  assert_eq!(report.scan.providers, 2);
  assert_eq!(report.inject.consumers, 2);
  assert_eq!(report.inject.methods, 2);
}

#[test]
fn test_strict_field_policy_aborts_on_unresolved_field() {
  // Arrange
  let config = InjectorConfig {
    unresolved_fields: FieldPolicy::Strict,
    ..InjectorConfig::default()
  };
  let mut scene = Scene::new();
  scene.spawn(Scheduler::default());
  let mut container = Container::with_config(config);

  // Act
  let err = container.initialize(&mut scene).unwrap_err();

  // Assert
  match err {
    Error::UnresolvedFieldDependency {
      service,
      consumer,
      field,
    } => {
      assert_eq!(service, "dyn Clock");
      assert_eq!(consumer, "Scheduler");
      assert_eq!(field, "clock");
    }
    other => panic!("unexpected error: {other:?}"),
  }
}

#[test]
fn test_custom_containers_are_isolated() {
  // Arrange
  let mut first_scene = Scene::new();
  first_scene.spawn(TimeProvider {
    clock: Rc::new(FixedClock(1)),
  });
  let mut second_scene = Scene::new();
  second_scene.spawn(TimeProvider {
    clock: Rc::new(FixedClock(2)),
  });
  let mut first = Container::new();
  let mut second = Container::new();

  // Act: the same provider type registers once in each container.
  first.initialize(&mut first_scene).unwrap();
  second.initialize(&mut second_scene).unwrap();

  // Assert
  assert_eq!(resolve!(first, trait Clock).now(), 1);
  assert_eq!(resolve!(second, trait Clock).now(), 2);
}

#[test]
fn test_maybe_resolve_after_pass() {
  // Arrange
  let mut scene = Scene::new();
  scene.spawn(AudioSystem::default());
  scene.spawn(TimeProvider {
    clock: Rc::new(FixedClock(0)),
  });
  let mut container = Container::new();
  container.initialize(&mut scene).unwrap();

  // Act & Assert
  assert_eq!(maybe_resolve!(container, AudioSettings).unwrap().volume, 80);
  assert!(maybe_resolve!(container, trait Clock).is_some());
  assert!(maybe_resolve!(container, String).is_none());
  assert!(maybe_resolve!(container.registry(), FixedClock).is_none());
}

#[test]
#[should_panic(expected = "Failed to resolve required service")]
fn test_resolve_panics_on_missing_service() {
  let container = Container::new();
  resolve!(container, AudioSettings);
}

// --- Startup Ordering ---

#[test]
fn test_container_runs_before_other_initializers() {
  // Arrange
  let mut scene = Scene::new();
  let scheduler = scene.spawn(Scheduler::default());
  scene.spawn(TimeProvider {
    clock: Rc::new(FixedClock(99)),
  });
  let mut container = Container::new();
  let log = RefCell::new(Vec::new());

  // Act: the container is added last but has the lowest execution order.
  {
    let mut startup = Startup::new();
    startup
      .add_fn("late_system", 10, |_scene: &mut Scene| {
        log.borrow_mut().push("late_system");
        Ok(())
      })
      .add_fn("game_clock_check", 0, |scene: &mut Scene| {
        let now = scene
          .get::<Scheduler>(scheduler)
          .and_then(|s| s.clock.as_ref())
          .map(|clock| clock.now());
        log.borrow_mut().push(if now == Some(99) {
          "clock_wired"
        } else {
          "clock_missing"
        });
        Ok(())
      })
      .add(&mut container);
    startup.run(&mut scene).unwrap();
  }

  // Assert
  assert_eq!(*log.borrow(), vec!["clock_wired", "late_system"]);
  assert_eq!(container.registry().len(), 1);
}

#[test]
fn test_startup_stops_at_first_failure() {
  // Arrange: the container fails because no one provides a clock.
  let mut scene = Scene::new();
  scene.spawn(AudioSystem::default());
  let mut container = Container::new();
  let ran = RefCell::new(false);

  // Act
  let result = {
    let mut startup = Startup::new();
    startup.add(&mut container).add_fn("after", 0, |_scene: &mut Scene| {
      *ran.borrow_mut() = true;
      Ok(())
    });
    startup.run(&mut scene)
  };

  // Assert
  assert!(matches!(
    result,
    Err(Error::UnresolvedMethodDependency { ref method, .. }) if method == "start"
  ));
  assert!(!*ran.borrow());
}

#[test]
fn test_initializer_errors_propagate() {
  let mut scene = Scene::new();
  let mut startup = Startup::new();
  startup.add_fn("loader", 0, |_scene: &mut Scene| {
    Err(Error::Initializer {
      name: "loader".into(),
      message: "level file missing".into(),
    })
  });

  let err = startup.run(&mut scene).unwrap_err();

  assert_eq!(err.to_string(), "Initializer 'loader' failed: level file missing");
}
