/// All game entity types — pure data plus box geometry, no game rules.
///
/// Coordinates are logical world units with the origin at the top-left
/// corner and `y` growing downward.  The renderer maps them onto whatever
/// terminal size it finds.

// ── Sprite geometry ───────────────────────────────────────────────────────────

/// Which point of a sprite's bounding box its `(x, y)` position refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Anchor {
    #[default]
    Center,
    /// Horizontal centre of the bottom edge.  Scaling grows the box upward.
    MidBottom,
}

/// An axis-aligned box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

/// A drawable game object: the helicopter, a water drop or a fire.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub x: f64,
    pub y: f64,
    /// Unscaled size.
    pub base_width: f64,
    pub base_height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub anchor: Anchor,
    /// `true` when the sprite is mirrored horizontally (the helicopter is
    /// drawn facing right).
    pub flip_x: bool,
}

impl Sprite {
    /// A centre-anchored sprite at the origin with unit scale.
    pub fn new(base_width: f64, base_height: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            base_width,
            base_height,
            scale_x: 1.0,
            scale_y: 1.0,
            anchor: Anchor::Center,
            flip_x: false,
        }
    }

    pub fn width(&self) -> f64 {
        self.base_width * self.scale_x
    }

    pub fn height(&self) -> f64 {
        self.base_height * self.scale_y
    }

    /// Current bounding box, resolved from position, scale and anchor.
    pub fn bounds(&self) -> Bounds {
        let (w, h) = (self.width(), self.height());
        let left = self.x - w / 2.0;
        let top = match self.anchor {
            Anchor::Center => self.y - h / 2.0,
            Anchor::MidBottom => self.y - h,
        };
        Bounds {
            left,
            top,
            right: left + w,
            bottom: top + h,
        }
    }
}

/// On-screen text, used for the score readout.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKey {
    Left,
    Right,
    Space,
    /// Anything else.  Every handler ignores it.
    Other,
}

impl InputKey {
    /// Parse a named key as reported by hosts that dispatch key labels
    /// (`"left"`, `"right"`, `"space"`).
    pub fn from_label(label: &str) -> Self {
        match label {
            "left" => InputKey::Left,
            "right" => InputKey::Right,
            "space" => InputKey::Space,
            _ => InputKey::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Owned by the game loop and handed to every
/// system by mutable reference.
#[derive(Clone, Debug)]
pub struct World {
    pub copter: Sprite,
    /// Signed horizontal speed; its magnitude never changes.
    pub copter_speed: i32,
    pub drops: Vec<Sprite>,
    pub fires: Vec<Sprite>,
    pub score: u32,
    /// Score readout, rewritten every frame and on game over.
    pub counter: Label,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f64,
    pub height: f64,
}
