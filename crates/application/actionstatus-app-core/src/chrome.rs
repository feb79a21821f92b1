//! Per-platform navigation chrome: which toolbar items a list screen shows and
//! how they behave. Front ends pick a variant once at startup.

use crate::app_core::AppCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS / AppKit.
    Mac,
    /// iOS and iPadOS.
    Touch,
    /// tvOS.
    Tv,
}

impl Platform {
    #[cfg(target_os = "ios")]
    pub fn current() -> Self {
        Platform::Touch
    }

    #[cfg(target_os = "tvos")]
    pub fn current() -> Self {
        Platform::Tv
    }

    // Desktop targets other than macOS get the macOS layout.
    #[cfg(not(any(target_os = "ios", target_os = "tvos")))]
    pub fn current() -> Self {
        Platform::Mac
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationStyle {
    Stack,
    Default,
}

/// Where icon names are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Images bundled with the app, looked up by name.
    Asset,
    /// Platform system symbols.
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Add,
    ToggleEditing,
}

impl ToolbarAction {
    pub fn command(self) -> AppCommand {
        match self {
            ToolbarAction::Add => AppCommand::AddRepo,
            ToolbarAction::ToggleEditing => AppCommand::ToggleEditing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarItem {
    pub action: ToolbarAction,
    pub icon: &'static str,
    pub enabled: bool,
    pub visible: bool,
}

pub const ADD_ICON: &str = "plus.circle";
pub const EDIT_ICON: &str = "pencil.circle";
pub const EDITING_ICON: &str = "pencil.circle.fill";

pub trait NavigationChrome: Send + Sync {
    fn platform(&self) -> Platform;

    /// Navigation bar title, if the platform shows one.
    fn title(&self) -> Option<&'static str> {
        None
    }

    fn navigation_style(&self) -> NavigationStyle;

    fn image_source(&self) -> ImageSource {
        ImageSource::System
    }

    /// Whether the list's edit mode is driven by the controller's flag.
    fn binds_edit_mode(&self) -> bool {
        false
    }

    fn leading_items(&self, _editing: bool) -> Vec<ToolbarItem> {
        Vec::new()
    }

    fn trailing_items(&self, _editing: bool) -> Vec<ToolbarItem> {
        Vec::new()
    }

    fn edit_toggle_icon(&self, editing: bool) -> &'static str {
        if editing {
            EDITING_ICON
        } else {
            EDIT_ICON
        }
    }
}

pub struct MacChrome;

impl NavigationChrome for MacChrome {
    fn platform(&self) -> Platform {
        Platform::Mac
    }

    fn navigation_style(&self) -> NavigationStyle {
        NavigationStyle::Default
    }

    fn image_source(&self) -> ImageSource {
        ImageSource::Asset
    }
}

pub struct TouchChrome;

impl NavigationChrome for TouchChrome {
    fn platform(&self) -> Platform {
        Platform::Touch
    }

    fn title(&self) -> Option<&'static str> {
        Some(actionstatus_config::APP_TITLE)
    }

    fn navigation_style(&self) -> NavigationStyle {
        NavigationStyle::Stack
    }

    fn binds_edit_mode(&self) -> bool {
        true
    }

    // Adding is only offered while editing.
    fn leading_items(&self, editing: bool) -> Vec<ToolbarItem> {
        vec![ToolbarItem {
            action: ToolbarAction::Add,
            icon: ADD_ICON,
            enabled: editing,
            visible: editing,
        }]
    }

    fn trailing_items(&self, editing: bool) -> Vec<ToolbarItem> {
        vec![ToolbarItem {
            action: ToolbarAction::ToggleEditing,
            icon: self.edit_toggle_icon(editing),
            enabled: true,
            visible: true,
        }]
    }
}

pub struct TvChrome;

impl NavigationChrome for TvChrome {
    fn platform(&self) -> Platform {
        Platform::Tv
    }

    fn navigation_style(&self) -> NavigationStyle {
        NavigationStyle::Stack
    }
}

pub fn chrome_for(platform: Platform) -> Box<dyn NavigationChrome> {
    match platform {
        Platform::Mac => Box::new(MacChrome),
        Platform::Touch => Box::new(TouchChrome),
        Platform::Tv => Box::new(TvChrome),
    }
}
