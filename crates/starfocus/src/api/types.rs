use serde::{Deserialize, Serialize};

/// Rung of the fixed entity hierarchy the camera is centred on.
///
/// Declaration order is the hierarchy order, so `Universe < Galaxy < ... < Moon`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusLevel {
    #[default]
    Universe,
    Galaxy,
    SolarSystem,
    Planet,
    Moon,
}

impl FocusLevel {
    pub const ALL: [FocusLevel; 5] = [
        FocusLevel::Universe,
        FocusLevel::Galaxy,
        FocusLevel::SolarSystem,
        FocusLevel::Planet,
        FocusLevel::Moon,
    ];

    /// One level toward Universe. `None` at the root.
    pub fn parent(self) -> Option<FocusLevel> {
        match self {
            FocusLevel::Universe => None,
            FocusLevel::Galaxy => Some(FocusLevel::Universe),
            FocusLevel::SolarSystem => Some(FocusLevel::Galaxy),
            FocusLevel::Planet => Some(FocusLevel::SolarSystem),
            FocusLevel::Moon => Some(FocusLevel::Planet),
        }
    }

    /// One level away from Universe. `None` at the leaf.
    pub fn child(self) -> Option<FocusLevel> {
        match self {
            FocusLevel::Universe => Some(FocusLevel::Galaxy),
            FocusLevel::Galaxy => Some(FocusLevel::SolarSystem),
            FocusLevel::SolarSystem => Some(FocusLevel::Planet),
            FocusLevel::Planet => Some(FocusLevel::Moon),
            FocusLevel::Moon => None,
        }
    }

    /// Depth in the hierarchy (Universe = 0).
    pub fn depth(self) -> u32 {
        self as u32
    }

    /// Inverse of [`FocusLevel::depth`], used by the FFI bridge.
    pub fn from_depth(depth: u32) -> Option<FocusLevel> {
        Self::ALL.get(depth as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            FocusLevel::Universe => "universe",
            FocusLevel::Galaxy => "galaxy",
            FocusLevel::SolarSystem => "solar_system",
            FocusLevel::Planet => "planet",
            FocusLevel::Moon => "moon",
        }
    }
}

impl std::fmt::Display for FocusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A focus request that arrived while a transition was in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingNavigation {
    pub target_level: FocusLevel,
    pub target_id: String,
}

impl PendingNavigation {
    pub fn new(target_level: FocusLevel, target_id: impl Into<String>) -> Self {
        Self {
            target_level,
            target_id: target_id.into(),
        }
    }
}
