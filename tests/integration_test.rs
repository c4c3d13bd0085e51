use party_swarm::audio::{audio_channel, AudioCommand, StreamId};
use party_swarm::config::ScreenConfig;
use party_swarm::core::{ScreenError, ScreenPhase, SwarmScreen};
use party_swarm::depletion::RenderMode;
use party_swarm::platform::{InputEvent, KeyCode, MouseButton};
use party_swarm::render::{DrawCommand, SpriteId, TextAlign, TERMINAL_CAPTION, WIN_CAPTION};
use party_swarm::resources::{FsAssetLoader, UncheckedAssetLoader};

const FRAME: f32 = 1.0 / 60.0;

fn start_screen(population: usize) -> SwarmScreen {
    let mut config = ScreenConfig::default();
    config.swarm.population_size = population;
    let mut screen = SwarmScreen::load(&config, &mut UncheckedAssetLoader, None).unwrap();
    screen.start();
    screen
}

fn click(screen: &mut SwarmScreen) {
    screen.push_input(InputEvent::MouseButtonPressed {
        button: MouseButton::Left,
        x: 0.4,
        y: 0.6,
    });
    screen.push_input(InputEvent::MouseButtonReleased {
        button: MouseButton::Left,
        x: 0.4,
        y: 0.6,
    });
}

#[test]
fn test_hundred_clicks_reach_terminal_draw() {
    let mut screen = start_screen(100);
    for _ in 0..100 {
        click(&mut screen);
        screen.frame(FRAME);
    }

    assert_eq!(screen.counter().remaining(), 0);
    assert_eq!(screen.render_mode(), RenderMode::Terminal);

    let list = screen.frame(FRAME);
    // 只剩本体，没有任何分身
    assert_eq!(list.sprite_count(SpriteId::Character), 1);
    assert_eq!(list.sprite_count(SpriteId::CursorIdle), 1);

    let captions: Vec<_> = list
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { align, text, .. } => Some((*align, *text)),
            _ => None,
        })
        .collect();
    assert_eq!(
        captions,
        vec![
            (TextAlign::Centre, TERMINAL_CAPTION),
            (TextAlign::Centre, WIN_CAPTION)
        ]
    );
}

#[test]
fn test_simulation_continues_after_depletion() {
    let mut screen = start_screen(2);
    click(&mut screen);
    screen.frame(FRAME);
    click(&mut screen);
    screen.frame(FRAME);
    assert_eq!(screen.render_mode(), RenderMode::Terminal);

    let before = screen.pool().clone();
    for _ in 0..10 {
        screen.frame(FRAME);
    }
    assert_ne!(before.particles(), screen.pool().particles());
    assert!(screen.stats().fixed_steps > 0);
}

#[test]
fn test_counter_never_underflows() {
    let mut screen = start_screen(100);
    for _ in 0..1000 {
        click(&mut screen);
        screen.frame(0.0);
    }
    assert_eq!(screen.counter().remaining(), 0);
    assert_eq!(screen.counter().initial(), 100);
}

#[test]
fn test_held_pointer_decrements_once() {
    let mut screen = start_screen(10);
    for _ in 0..5 {
        screen.push_input(InputEvent::MouseButtonPressed {
            button: MouseButton::Left,
            x: 0.5,
            y: 0.5,
        });
        screen.frame(FRAME);
    }
    assert_eq!(screen.counter().remaining(), 9);
    assert!(screen.pointer().is_pressed());

    let list = screen.frame(FRAME);
    assert_eq!(list.sprite_count(SpriteId::CursorPressed), 1);
}

#[test]
fn test_resample_every_sixty_fixed_steps() {
    let mut screen = start_screen(16);
    for _ in 0..59 {
        screen.tick();
    }
    assert_eq!(screen.tick_counter().wraps(), 0);
    let before = screen.pool().clone();

    screen.tick();
    assert_eq!(screen.tick_counter().wraps(), 1);
    assert_eq!(screen.tick_counter().value(), 0);
    assert_ne!(before.particles(), screen.pool().particles());
    for p in screen.pool().iter() {
        assert!((-1.0..1.0).contains(&p.linear_coeff));
        assert!((0.0..0.2).contains(&p.linear_offset));
        assert!((-250..250).contains(&p.screen_offset_x));
        assert!((-250..250).contains(&p.screen_offset_y));
    }

    for _ in 0..120 {
        screen.tick();
    }
    assert_eq!(screen.tick_counter().wraps(), 3);
}

#[test]
fn test_paused_screen_only_draws() {
    let mut screen = start_screen(4);
    screen.pause();
    assert_eq!(screen.phase(), ScreenPhase::Paused);

    let before = screen.pool().clone();
    click(&mut screen);
    for _ in 0..30 {
        screen.frame(FRAME);
    }
    assert_eq!(before.particles(), screen.pool().particles());
    assert_eq!(screen.stats().fixed_steps, 0);
    assert_eq!(screen.stats().frames, 30);
    assert_eq!(screen.counter().remaining(), 4);
}

#[test]
fn test_escape_requests_termination() {
    let mut screen = start_screen(4);
    screen.push_input(InputEvent::KeyPressed {
        key: KeyCode::Space,
    });
    screen.frame(FRAME);
    assert!(!screen.termination_requested());

    screen.push_input(InputEvent::KeyPressed {
        key: KeyCode::Escape,
    });
    screen.frame(FRAME);
    assert!(screen.termination_requested());
    screen.unload();
}

#[test]
fn test_spray_stream_follows_clicks() {
    let (queue, receiver) = audio_channel();
    let config = ScreenConfig::default();
    let mut screen = SwarmScreen::load(&config, &mut UncheckedAssetLoader, Some(queue)).unwrap();
    screen.start();
    receiver.drain();

    click(&mut screen);
    screen.frame(FRAME);
    assert_eq!(
        receiver.drain(),
        vec![
            AudioCommand::SetStreamPlaying {
                stream: StreamId::Spray,
                playing: true
            },
            AudioCommand::SetStreamPlaying {
                stream: StreamId::Spray,
                playing: false
            },
        ]
    );
}

#[test]
fn test_missing_assets_fail_load() {
    let mut config = ScreenConfig::default();
    config.assets.root = std::env::temp_dir()
        .join("party_swarm_no_such_assets")
        .to_string_lossy()
        .into_owned();
    let result = SwarmScreen::load(&config, &mut FsAssetLoader, None);
    assert!(matches!(result, Err(ScreenError::ResourceLoad(_))));
}
