use crate::BuildStatus;

/// Colour token a badge is tinted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    Neutral,
    Pending,
    Green,
    Red,
}

impl StatusColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            StatusColor::Neutral => (160, 160, 160),
            StatusColor::Pending => (249, 115, 22),
            StatusColor::Green => (34, 197, 94),
            StatusColor::Red => (225, 29, 72),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusColor::Neutral => "neutral",
            StatusColor::Pending => "pending",
            StatusColor::Green => "green",
            StatusColor::Red => "red",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Symbol name; an asset name on macOS, a system symbol elsewhere.
    pub icon: &'static str,
    pub color: StatusColor,
}

const UNKNOWN: Badge = Badge {
    icon: "questionmark.circle",
    color: StatusColor::Neutral,
};
const RUNNING: Badge = Badge {
    icon: "arrow.triangle.2.circlepath",
    color: StatusColor::Pending,
};
const SUCCEEDED: Badge = Badge {
    icon: "checkmark.circle",
    color: StatusColor::Green,
};
const FAILED: Badge = Badge {
    icon: "xmark.circle",
    color: StatusColor::Red,
};

pub fn badge_for(status: BuildStatus) -> Badge {
    match status {
        BuildStatus::Unknown => UNKNOWN,
        BuildStatus::Running => RUNNING,
        BuildStatus::Succeeded => SUCCEEDED,
        BuildStatus::Failed => FAILED,
    }
}
