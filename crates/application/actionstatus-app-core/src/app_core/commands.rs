use actionstatus_core::{RepoEdit, RepoId};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Boot
    LoadInitialState,

    // List editing
    /// Toolbar add: appends a repo and selects it.
    AddRepo,
    RemoveAt(Vec<usize>),
    RemoveRepo(RepoId),
    EditRepo { id: RepoId, edit: RepoEdit },

    // Selection / edit mode
    Select(Option<RepoId>),
    TapRow(RepoId),
    SetEditing(bool),
    ToggleEditing,

    // Status
    Refresh,
    /// The list became visible.
    Appeared,
}
