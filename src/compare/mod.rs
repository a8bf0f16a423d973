use tracing::{debug, info};

/// Most hostels that can be compared side by side
pub const MAX_COMPARE: usize = 3;

/// Fewest hostels a comparison needs
pub const MIN_COMPARE: usize = 2;

pub const LIMIT_REACHED_NOTICE: &str = "You can only compare up to 3 hostels side-by-side.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    #[default]
    Normal,
    Compare,
}

/// What a tap on a hostel did to the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Selection was full; nothing changed
    LimitReached,
    /// Not in compare mode; nothing changed
    Ignored,
}

impl ToggleOutcome {
    /// Message the UI should show, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ToggleOutcome::LimitReached => Some(LIMIT_REACHED_NOTICE),
            _ => None,
        }
    }
}

/// Destination that renders a side-by-side comparison
pub trait CompareView {
    /// `ids` is the comma-joined selection in tap order
    fn open_compare(&mut self, ids: &str);
}

/// Bounded, ordered selection of hostels picked for comparison
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSetController {
    mode: CompareMode,
    selected: Vec<String>,
}

impl SelectionSetController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CompareMode {
        self.mode
    }

    pub fn is_comparing(&self) -> bool {
        self.mode == CompareMode::Compare
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s == id)
    }

    /// Flip between normal and compare mode. Either way the selection starts empty.
    pub fn toggle_compare_mode(&mut self) -> CompareMode {
        self.mode = match self.mode {
            CompareMode::Normal => CompareMode::Compare,
            CompareMode::Compare => CompareMode::Normal,
        };
        self.selected.clear();
        debug!("Compare mode now {:?}", self.mode);
        self.mode
    }

    pub fn toggle_select(&mut self, id: &str) -> ToggleOutcome {
        if !self.is_comparing() {
            return ToggleOutcome::Ignored;
        }

        if let Some(pos) = self.selected.iter().position(|s| s == id) {
            self.selected.remove(pos);
            ToggleOutcome::Removed
        } else if self.selected.len() < MAX_COMPARE {
            self.selected.push(id.to_string());
            ToggleOutcome::Added
        } else {
            debug!("Rejected {}: compare selection is full", id);
            ToggleOutcome::LimitReached
        }
    }

    /// Drop `id` from the selection in any mode, e.g. after it was unfavourited
    pub fn remove_member(&mut self, id: &str) -> bool {
        let before = self.selected.len();
        self.selected.retain(|s| s != id);
        self.selected.len() != before
    }

    pub fn can_launch(&self) -> bool {
        self.selected.len() >= MIN_COMPARE
    }

    /// Comma-joined ids for the comparison view, once enough are selected
    pub fn compare_param(&self) -> Option<String> {
        self.can_launch().then(|| self.selected.join(","))
    }

    /// Hand the selection to `view`. Returns false without calling it when
    /// fewer than two hostels are selected.
    pub fn launch_compare<V: CompareView + ?Sized>(&self, view: &mut V) -> bool {
        match self.compare_param() {
            Some(ids) => {
                info!("Opening comparison for {}", ids);
                view.open_compare(&ids);
                true
            }
            None => false,
        }
    }
}
