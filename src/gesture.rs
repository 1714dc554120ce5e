//! Pinch-gesture interpretation: hand landmarks in, aim point and
//! cooldown-gated fire event out.

use crate::config::GameConfig;
use crate::entities::AimPoint;

/// Landmarks per detected hand (MediaPipe hand topology).
pub const LANDMARK_COUNT: usize = 21;
/// Thumb tip landmark index.
pub const THUMB_TIP: usize = 4;
/// Index fingertip landmark index — the aiming reticle.
pub const INDEX_TIP: usize = 8;

/// A landmark position normalized to [0,1]×[0,1] relative to the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormPoint {
    pub x: f64,
    pub y: f64,
}

/// One detected hand.  Only [`THUMB_TIP`] and [`INDEX_TIP`] are consumed by
/// the game, but the full set is carried so trackers stay drop-in.
#[derive(Clone, Debug)]
pub struct HandLandmarks {
    pub points: [NormPoint; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn index_tip(&self) -> NormPoint {
        self.points[INDEX_TIP]
    }

    pub fn thumb_tip(&self) -> NormPoint {
        self.points[THUMB_TIP]
    }
}

/// Per-frame gesture outcome handed to the tick function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FireControl {
    pub aim: Option<AimPoint>,
    pub fired: bool,
}

/// Interpret one frame's detection result.
///
/// No hand is a normal, silent state: no aim point, no fire.  With a hand,
/// the aim point is the index fingertip mapped to world pixels, and a fire
/// event is signaled when the fingertip–thumb distance drops below the pinch
/// threshold and the cooldown since `last_fire` has elapsed.  The caller
/// records `now` as the new `last_fire` when `fired` is set (see
/// [`crate::compute::tick`]).
pub fn interpret(
    hand: Option<&HandLandmarks>,
    last_fire: f64,
    now: f64,
    config: &GameConfig,
) -> FireControl {
    let Some(hand) = hand else {
        return FireControl::default();
    };

    let index = hand.index_tip();
    let thumb = hand.thumb_tip();

    let aim = AimPoint {
        x: index.x as f32 * config.world_width,
        y: index.y as f32 * config.world_height,
    };

    let pinched = (index.x - thumb.x).hypot(index.y - thumb.y) < config.pinch_threshold;
    let fired = pinched && now - last_fire > config.fire_cooldown;

    FireControl {
        aim: Some(aim),
        fired,
    }
}
