//! Tabs and input modes
//!
//! Only one mode is active at a time; it decides how keys are handled and
//! which overlay, if any, is drawn on top of the current tab.

/// The dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Performance,
    Processes,
    Services,
    Network,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Performance, Tab::Processes, Tab::Services, Tab::Network];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Performance => "Performance",
            Tab::Processes => "Processes",
            Tab::Services => "Services",
            Tab::Network => "Network",
        }
    }

    /// Zero-based position in the tab bar
    pub fn index(&self) -> usize {
        match self {
            Tab::Performance => 0,
            Tab::Processes => 1,
            Tab::Services => 2,
            Tab::Network => 3,
        }
    }

    /// Tab for a number key ('1'..='4').
    pub fn from_digit(c: char) -> Option<Tab> {
        let n = c.to_digit(10)? as usize;
        Tab::ALL.get(n.checked_sub(1)?).copied()
    }

    /// Cycles through all tabs.
    pub fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }

    /// True for tabs whose rows respond to the search term.
    pub fn is_searchable(&self) -> bool {
        matches!(self, Tab::Processes | Tab::Services)
    }
}

/// The current input mode of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Browsing the current tab
    #[default]
    Normal,

    /// Typing a search term
    SearchInput,

    /// Action menu for the selected target
    ActionMenu,

    /// Terminate confirmation dialog - waiting for Y/N
    ConfirmKill,
}

impl ViewMode {
    #[inline]
    pub fn is_search_input(&self) -> bool {
        matches!(self, ViewMode::SearchInput)
    }

    #[inline]
    pub fn is_action_menu(&self) -> bool {
        matches!(self, ViewMode::ActionMenu)
    }

    #[inline]
    pub fn is_confirm_kill(&self) -> bool {
        matches!(self, ViewMode::ConfirmKill)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Network.next(), Tab::Performance);
        assert_eq!(Tab::Performance.prev(), Tab::Network);
        assert_eq!(Tab::Processes.next(), Tab::Services);
    }

    #[test]
    fn test_tab_from_digit() {
        assert_eq!(Tab::from_digit('1'), Some(Tab::Performance));
        assert_eq!(Tab::from_digit('4'), Some(Tab::Network));
        assert_eq!(Tab::from_digit('0'), None);
        assert_eq!(Tab::from_digit('5'), None);
        assert_eq!(Tab::from_digit('x'), None);
    }
}
