//! Update-check state and its mapping onto the four page regions

/// Outcome of a finished update check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCheckResult {
    /// A newer version is published
    UpdateAvailable(String),
    /// The running version is the latest (or newer, or unparseable)
    UpToDate,
    /// The fetch failed
    Error,
}

/// State of the update checker owned by a view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UpdateCheckState {
    #[default]
    Idle,
    Checking,
    UpdateAvailable(String),
    UpToDate,
    Error,
}

impl UpdateCheckState {
    pub fn is_checking(&self) -> bool {
        matches!(self, UpdateCheckState::Checking)
    }

    /// The region shown for this state
    pub fn region(&self) -> Region {
        match self {
            UpdateCheckState::Idle | UpdateCheckState::Checking => Region::Checking,
            UpdateCheckState::UpdateAvailable(_) => Region::Available,
            UpdateCheckState::UpToDate => Region::UpToDate,
            UpdateCheckState::Error => Region::Error,
        }
    }
}

impl From<UpdateCheckResult> for UpdateCheckState {
    fn from(result: UpdateCheckResult) -> Self {
        match result {
            UpdateCheckResult::UpdateAvailable(latest) => UpdateCheckState::UpdateAvailable(latest),
            UpdateCheckResult::UpToDate => UpdateCheckState::UpToDate,
            UpdateCheckResult::Error => UpdateCheckState::Error,
        }
    }
}

/// One of the four mutually exclusive page regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Checking,
    Available,
    UpToDate,
    Error,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Checking,
        Region::Available,
        Region::UpToDate,
        Region::Error,
    ];

    /// CSS class of the element carrying this region
    pub fn class_name(&self) -> &'static str {
        match self {
            Region::Checking => "update-checker",
            Region::Available => "update-available",
            Region::UpToDate => "no-update",
            Region::Error => "update-error",
        }
    }
}

/// Visibility of every region for one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visibility {
    shown: Region,
    latest_version: Option<String>,
}

impl Visibility {
    pub fn is_shown(&self, region: Region) -> bool {
        self.shown == region
    }

    pub fn shown(&self) -> Region {
        self.shown
    }

    /// Version text for the "available" region, if shown
    pub fn latest_version(&self) -> Option<&str> {
        self.latest_version.as_deref()
    }

    /// (class name, hidden) pairs in page order
    pub fn classes(&self) -> Vec<(&'static str, bool)> {
        Region::ALL
            .iter()
            .map(|region| (region.class_name(), !self.is_shown(*region)))
            .collect()
    }
}

/// Map a state onto region visibility. The single place regions are decided.
pub fn render(state: &UpdateCheckState) -> Visibility {
    let latest_version = match state {
        UpdateCheckState::UpdateAvailable(latest) => Some(latest.clone()),
        _ => None,
    };

    Visibility {
        shown: state.region(),
        latest_version,
    }
}
