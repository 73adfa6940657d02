//! Application view routing

/// Application view/route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home, // Tool catalog
    Tabs, // Open screens
}
