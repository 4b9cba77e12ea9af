use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SidebarState {
  #[default]
  Expanded,
  Collapsed,
}

impl SidebarState {
  pub const EXPANDED_WIDTH_PX: u16 = 256;
  pub const COLLAPSED_WIDTH_PX: u16 = 80;

  pub fn toggle(self) -> Self {
    match self {
      SidebarState::Expanded => SidebarState::Collapsed,
      SidebarState::Collapsed => SidebarState::Expanded,
    }
  }

  pub fn width_px(self) -> u16 {
    match self {
      SidebarState::Expanded => Self::EXPANDED_WIDTH_PX,
      SidebarState::Collapsed => Self::COLLAPSED_WIDTH_PX,
    }
  }

  pub fn width_class(self) -> &'static str {
    match self {
      SidebarState::Expanded => "w-64",
      SidebarState::Collapsed => "w-20",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      SidebarState::Expanded => "expanded",
      SidebarState::Collapsed => "collapsed",
    }
  }

  /// Unknown values fall back to the expanded sidebar.
  pub fn parse(value: Option<&str>) -> Self {
    match value {
      Some("collapsed") => SidebarState::Collapsed,
      _ => SidebarState::Expanded,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

impl Theme {
  pub fn toggle(self) -> Self {
    match self {
      Theme::Light => Theme::Dark,
      Theme::Dark => Theme::Light,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }

  pub fn parse(value: Option<&str>) -> Self {
    match value {
      Some("dark") => Theme::Dark,
      _ => Theme::Light,
    }
  }
}
