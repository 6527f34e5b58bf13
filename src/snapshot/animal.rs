//! The wild animal row as delivered by the subscription.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::snapshot::TagRepr;
use crate::snapshot::species::AnimalSpecies;

/// Authoritative clock value in microseconds since the Unix epoch.
///
/// Accepts either a bare integer or the SDK's
/// `{"__timestamp_micros_since_unix_epoch__": n}` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "TimestampRepr")]
pub struct ServerTimestamp(pub i64);

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Micros(i64),
    Wrapped {
        #[serde(rename = "__timestamp_micros_since_unix_epoch__")]
        micros: i64,
    },
}

impl From<TimestampRepr> for ServerTimestamp {
    fn from(repr: TimestampRepr) -> Self {
        match repr {
            TimestampRepr::Micros(micros) => ServerTimestamp(micros),
            TimestampRepr::Wrapped { micros } => ServerTimestamp(micros),
        }
    }
}

impl ServerTimestamp {
    pub const NONE: ServerTimestamp = ServerTimestamp(0);

    pub fn from_millis(ms: i64) -> Self {
        ServerTimestamp(ms * 1000)
    }

    pub fn micros(&self) -> i64 {
        self.0
    }

    /// Zero is the backend's "never" value.
    pub fn is_set(&self) -> bool {
        self.0 > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "TagRepr")]
pub enum AnimalState {
    Idle,
    Patrolling,
    Chasing,
    Attacking,
    Fleeing,
    Hiding,
    Burrowed,
    Investigating,
    Alert,
    Following,
    Protecting,
    Flying,
    FlyingChase,
    Grounded,
    Scavenging,
    Stealing,
    Swimming,
    SwimmingChase,
    Stalking,
    AttackingStructure,
    Despawning,
    Unknown,
}

impl AnimalState {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Idle" => Self::Idle,
            "Patrolling" => Self::Patrolling,
            "Chasing" => Self::Chasing,
            "Attacking" => Self::Attacking,
            "Fleeing" => Self::Fleeing,
            "Hiding" => Self::Hiding,
            "Burrowed" => Self::Burrowed,
            "Investigating" => Self::Investigating,
            "Alert" => Self::Alert,
            "Following" => Self::Following,
            "Protecting" => Self::Protecting,
            "Flying" => Self::Flying,
            "FlyingChase" => Self::FlyingChase,
            "Grounded" => Self::Grounded,
            "Scavenging" => Self::Scavenging,
            "Stealing" => Self::Stealing,
            "Swimming" => Self::Swimming,
            "SwimmingChase" => Self::SwimmingChase,
            "Stalking" => Self::Stalking,
            "AttackingStructure" => Self::AttackingStructure,
            "Despawning" => Self::Despawning,
            _ => Self::Unknown,
        }
    }
}

impl From<TagRepr> for AnimalState {
    fn from(repr: TagRepr) -> Self {
        AnimalState::from_tag(&repr.into_tag())
    }
}

/// Facing direction as sent by the server (8-way).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacingDirection {
    Up,
    #[default]
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl FacingDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        let dir = match raw.trim().to_ascii_lowercase().as_str() {
            "up" => Self::Up,
            "down" => Self::Down,
            "left" => Self::Left,
            "right" => Self::Right,
            "up_left" | "up-left" | "upleft" => Self::UpLeft,
            "up_right" | "up-right" | "upright" => Self::UpRight,
            "down_left" | "down-left" | "downleft" => Self::DownLeft,
            "down_right" | "down-right" | "downright" => Self::DownRight,
            _ => return None,
        };
        Some(dir)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up_left",
            Self::UpRight => "up_right",
            Self::DownLeft => "down_left",
            Self::DownRight => "down_right",
        }
    }

    /// Collapse to four directions; diagonals take their horizontal component.
    pub fn to_cardinal(&self) -> CardinalDirection {
        match self {
            Self::Up => CardinalDirection::Up,
            Self::Down => CardinalDirection::Down,
            Self::Left | Self::UpLeft | Self::DownLeft => CardinalDirection::Left,
            Self::Right | Self::UpRight | Self::DownRight => CardinalDirection::Right,
        }
    }
}

impl From<String> for FacingDirection {
    fn from(raw: String) -> Self {
        FacingDirection::parse(&raw).unwrap_or_default()
    }
}

impl From<FacingDirection> for String {
    fn from(dir: FacingDirection) -> Self {
        dir.as_str().to_string()
    }
}

/// Four-way direction used to pick sprite rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CardinalDirection {
    #[default]
    Down,
    Right,
    Left,
    Up,
}

/// Normalize any backend direction string; unrecognized strings face down.
pub fn normalize_direction(raw: &str) -> CardinalDirection {
    FacingDirection::parse(raw)
        .map(|dir| dir.to_cardinal())
        .unwrap_or(CardinalDirection::Down)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WildAnimalSnapshot {
    pub id: u64,
    pub species: AnimalSpecies,
    pub pos_x: f32,
    pub pos_y: f32,
    #[serde(default)]
    pub facing_direction: FacingDirection,
    #[serde(default)]
    pub is_flying: bool,
    pub state: AnimalState,
    #[serde(default)]
    pub state_change_time: ServerTimestamp,
    #[serde(default)]
    pub last_hit_time: Option<ServerTimestamp>,
    pub health: f32,
    #[serde(default)]
    pub heart_effect_until: Option<ServerTimestamp>,
    #[serde(default)]
    pub crying_effect_until: Option<ServerTimestamp>,
    #[serde(default)]
    pub held_item_name: Option<String>,
}

impl WildAnimalSnapshot {
    /// Minimal live animal at a position; mostly useful for tests and demos.
    pub fn new(id: u64, species: AnimalSpecies, pos_x: f32, pos_y: f32) -> Self {
        Self {
            id,
            species,
            pos_x,
            pos_y,
            facing_direction: FacingDirection::Down,
            is_flying: false,
            state: AnimalState::Idle,
            state_change_time: ServerTimestamp::NONE,
            last_hit_time: None,
            health: 100.0,
            heart_effect_until: None,
            crying_effect_until: None,
            held_item_name: None,
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.pos_x, self.pos_y)
    }

    pub fn is_burrowed(&self) -> bool {
        self.state == AnimalState::Burrowed
    }

    /// Last hit time, with the backend's zero value folded into `None`.
    pub fn active_hit_time(&self) -> Option<ServerTimestamp> {
        self.last_hit_time.filter(|t| t.is_set())
    }
}
