use firefighter::compute::create_world;
use firefighter::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(GameStatus::Running, GameStatus::Running);
    assert_ne!(GameStatus::Running, GameStatus::GameOver);
    assert_eq!(Anchor::default(), Anchor::Center);
    assert_ne!(Anchor::Center, Anchor::MidBottom);

    let sprite = Sprite::new(10.0, 20.0);
    assert_eq!(sprite.clone(), sprite);
}

#[test]
fn input_key_from_label() {
    assert_eq!(InputKey::from_label("left"), InputKey::Left);
    assert_eq!(InputKey::from_label("right"), InputKey::Right);
    assert_eq!(InputKey::from_label("space"), InputKey::Space);
    assert_eq!(InputKey::from_label("up"), InputKey::Other);
    assert_eq!(InputKey::from_label("LEFT"), InputKey::Other);
}

#[test]
fn sprite_size_follows_scale() {
    let mut s = Sprite::new(48.0, 24.0);
    assert_eq!(s.width(), 48.0);
    assert_eq!(s.height(), 24.0);
    s.scale_x = 0.5;
    s.scale_y = 2.0;
    assert_eq!(s.width(), 24.0);
    assert_eq!(s.height(), 48.0);
}

#[test]
fn centre_anchor_bounds() {
    let s = Sprite {
        x: 100.0,
        y: 50.0,
        ..Sprite::new(20.0, 10.0)
    };
    let b = s.bounds();
    assert_eq!(b.left, 90.0);
    assert_eq!(b.right, 110.0);
    assert_eq!(b.top, 45.0);
    assert_eq!(b.bottom, 55.0);
}

#[test]
fn mid_bottom_anchor_grows_upward() {
    let mut s = Sprite {
        x: 100.0,
        y: 600.0,
        anchor: Anchor::MidBottom,
        ..Sprite::new(48.0, 48.0)
    };
    let before = s.bounds();
    assert_eq!(before.bottom, 600.0);
    assert_eq!(before.top, 552.0);

    s.scale_x = 2.0;
    s.scale_y = 2.0;
    let after = s.bounds();
    // Base stays on the ground, top rises
    assert_eq!(after.bottom, 600.0);
    assert_eq!(after.top, 504.0);
    assert_eq!(after.left, 52.0);
    assert_eq!(after.right, 148.0);
}

#[test]
fn world_clone_is_independent() {
    let original = create_world(800.0, 600.0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.copter.x = 99.0;
    cloned.score = 999;
    cloned.drops.push(Sprite::new(24.0, 24.0));
    cloned.counter.text = "changed".to_string();

    assert_eq!(original.copter.x, 400.0);
    assert_eq!(original.score, 0);
    assert!(original.drops.is_empty());
    assert_eq!(original.counter.text, "Score: 0");
}
