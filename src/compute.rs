/// Game-logic systems.
///
/// Every system takes the `World` by mutable reference and runs to
/// completion.  `tick` calls them in a fixed order once per frame and
/// `handle_key` routes keypresses between frames.  Side effects are limited
/// to the world itself and the injected RNG.

use std::collections::HashSet;

use log::{debug, info};
use rand::Rng;

use crate::entities::{Anchor, GameStatus, InputKey, Label, Sprite, World};

// ── Tuning ───────────────────────────────────────────────────────────────────

/// Horizontal helicopter speed, in world units per frame.
pub const COPTER_SPEED: i32 = 5;
pub const COPTER_SIZE: f64 = 48.0;

pub const WATER_DROP_SPEED: f64 = 5.0;
pub const WATER_DROP_RADIUS: f64 = 12.0;

pub const FIRE_SIZE: f64 = 48.0;
pub const FIRE_INITIAL_SCALE: f64 = 0.1;
pub const FIRE_GROWTH: f64 = 0.01;
/// Never more than this many fires burn at once.
pub const MAX_FIRES: usize = 5;
/// A fire spawns when a uniform draw from `0..=FIRE_SPAWN_ODDS` hits zero.
pub const FIRE_SPAWN_ODDS: u32 = 50;
/// A fire wider than this (as a scale factor) ends the game.
pub const BIG_FIRE_SCALE: f64 = 5.0;

const SCORE_LABEL_Y: f64 = 8.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the starting world for a screen of the given logical size.
pub fn create_world(width: f64, height: f64) -> World {
    World {
        copter: create_copter(width, height),
        copter_speed: COPTER_SPEED,
        drops: Vec::new(),
        fires: Vec::new(),
        score: 0,
        counter: Label {
            x: width / 4.0,
            y: SCORE_LABEL_Y,
            text: score_text(0),
        },
        status: GameStatus::Running,
        frame: 0,
        width,
        height,
    }
}

/// The helicopter starts mid-screen at a third of the height, facing right.
pub fn create_copter(width: f64, height: f64) -> Sprite {
    Sprite {
        x: width / 2.0,
        y: height / 3.0,
        flip_x: true,
        ..Sprite::new(COPTER_SIZE, COPTER_SIZE)
    }
}

pub fn create_water_drop() -> Sprite {
    Sprite::new(WATER_DROP_RADIUS * 2.0, WATER_DROP_RADIUS * 2.0)
}

/// A small fire standing on the bottom edge at column `x`.
pub fn create_fire(x: f64, height: f64) -> Sprite {
    Sprite {
        x,
        y: height,
        scale_x: FIRE_INITIAL_SCALE,
        scale_y: FIRE_INITIAL_SCALE,
        anchor: Anchor::MidBottom,
        ..Sprite::new(FIRE_SIZE, FIRE_SIZE)
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

pub fn advance_helicopter(world: &mut World) {
    world.copter.x += world.copter_speed as f64;
}

/// Turn the helicopter around once it has flown strictly past either edge.
pub fn bounce_helicopter(world: &mut World) {
    if world.copter.x > world.width {
        head_left(world);
    } else if world.copter.x < 0.0 {
        head_right(world);
    }
}

pub fn head_left(world: &mut World) {
    world.copter_speed = -COPTER_SPEED;
    world.copter.flip_x = false;
}

pub fn head_right(world: &mut World) {
    world.copter_speed = COPTER_SPEED;
    world.copter.flip_x = true;
}

pub fn handle_direction_key(world: &mut World, key: InputKey) {
    match key {
        InputKey::Left => head_left(world),
        InputKey::Right => head_right(world),
        _ => {}
    }
}

pub fn advance_water_drops(world: &mut World) {
    for drop in &mut world.drops {
        drop.y += WATER_DROP_SPEED;
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Put `bottom` directly under the centre of `top`.
pub fn move_below(bottom: &mut Sprite, top: &Sprite) {
    bottom.y = top.y + top.height() / 2.0;
    bottom.x = top.x;
}

/// Release a water drop under the helicopter when Space is pressed.
pub fn spawn_water_drop(world: &mut World, key: InputKey) {
    if key != InputKey::Space {
        return;
    }
    let mut drop = create_water_drop();
    move_below(&mut drop, &world.copter);
    world.drops.push(drop);
}

/// Maybe light a new fire somewhere along the bottom edge.
pub fn spawn_fire(world: &mut World, rng: &mut impl Rng) {
    if world.fires.len() >= MAX_FIRES || rng.gen_range(0..=FIRE_SPAWN_ODDS) != 0 {
        return;
    }
    let x = rng.gen_range(0..=world.width as i32) as f64;
    debug!("frame {}: fire spawned at x={}", world.frame, x);
    world.fires.push(create_fire(x, world.height));
}

// ── Growth ───────────────────────────────────────────────────────────────────

pub fn grow_fires(world: &mut World) {
    for fire in &mut world.fires {
        fire.scale_x += FIRE_GROWTH;
        fire.scale_y += FIRE_GROWTH;
    }
}

// ── Collision & cleanup ──────────────────────────────────────────────────────

/// Strict AABB test: boxes that only share an edge do not overlap.
pub fn bounding_box_overlap(a: &Sprite, b: &Sprite) -> bool {
    let (a, b) = (a.bounds(), b.bounds());
    a.left < b.right && a.right > b.left && a.top < b.bottom && a.bottom > b.top
}

/// Put out every fire touched by a drop and use up the drop.
///
/// Pairs are tested against the collections as they were at the start of the
/// pass, so a drop sitting on two fires scores twice but is removed once.
pub fn resolve_collisions(world: &mut World) {
    let mut spent_drops = HashSet::new();
    let mut doused_fires = HashSet::new();
    let mut hits = 0;

    for (di, drop) in world.drops.iter().enumerate() {
        for (fi, fire) in world.fires.iter().enumerate() {
            if bounding_box_overlap(drop, fire) {
                spent_drops.insert(di);
                doused_fires.insert(fi);
                hits += 1;
            }
        }
    }

    if hits == 0 {
        return;
    }
    debug!(
        "frame {}: {} hit(s), {} drop(s) and {} fire(s) removed",
        world.frame,
        hits,
        spent_drops.len(),
        doused_fires.len()
    );
    world.score += hits;
    remove_indices(&mut world.drops, &spent_drops);
    remove_indices(&mut world.fires, &doused_fires);
}

/// Drop every element whose index is in `doomed`, keeping the rest in order.
fn remove_indices<T>(items: &mut Vec<T>, doomed: &HashSet<usize>) {
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed.contains(&index);
        index += 1;
        keep
    });
}

/// Remove drops that have reached the bottom of the screen.
pub fn cull_fallen_drops(world: &mut World) {
    let height = world.height;
    world.drops.retain(|drop| drop.y < height);
}

// ── Score & game over ────────────────────────────────────────────────────────

pub fn score_text(score: u32) -> String {
    format!("Score: {}", score)
}

pub fn game_over_text(score: u32) -> String {
    format!("GAME OVER! Your score was {}", score)
}

pub fn refresh_score_label(world: &mut World) {
    world.counter.text = score_text(world.score);
}

pub fn there_are_big_fires(world: &World) -> bool {
    world.fires.iter().any(|fire| fire.scale_x > BIG_FIRE_SCALE)
}

pub fn flash_game_over(world: &mut World) {
    world.counter.text = game_over_text(world.score);
}

/// Move to `GameOver` if any fire has grown too big.  Returns `true` on the
/// frame the transition happens.
pub fn check_game_over(world: &mut World) -> bool {
    if world.status == GameStatus::GameOver || !there_are_big_fires(world) {
        return false;
    }
    flash_game_over(world);
    world.status = GameStatus::GameOver;
    info!(
        "game over after {} frames, final score {}",
        world.frame, world.score
    );
    true
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

/// Route a keypress to the direction and water-drop handlers.  Ignored once
/// the game is over.
pub fn handle_key(world: &mut World, key: InputKey) {
    if world.status == GameStatus::GameOver {
        return;
    }
    handle_direction_key(world, key);
    spawn_water_drop(world, key);
}

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(world: &mut World, rng: &mut impl Rng) {
    if world.status == GameStatus::GameOver {
        return;
    }
    world.frame += 1;

    advance_helicopter(world);
    bounce_helicopter(world);
    advance_water_drops(world);

    spawn_fire(world, rng);
    grow_fires(world);

    resolve_collisions(world);
    cull_fallen_drops(world);

    refresh_score_label(world);
    check_game_over(world);
}
