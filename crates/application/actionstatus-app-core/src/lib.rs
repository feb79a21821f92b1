pub mod app_core;
mod async_runtime;
pub mod chrome;
pub mod controller;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod ports;
pub mod refresh;
pub mod status_source;
pub mod viewmodel;

pub use actionstatus_core::{BuildStatus, Repo, RepoEdit, RepoId, StatusUpdate};
pub use app_core::*;
pub use chrome::{chrome_for, NavigationChrome, Platform, ToolbarAction, ToolbarItem};
pub use controller::RepoListController;
pub use domain::{
    AppSettings, AppState, BootState, RefreshRunId, RefreshState, Warning, WarningKind,
};
pub use error::ListError;
pub use ports::*;
pub use status_source::HttpStatusSource;
pub use viewmodel::*;
