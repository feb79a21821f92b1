use actionstatus_app_core::chrome::{chrome_for, NavigationChrome, Platform, ToolbarItem};
use actionstatus_app_core::persistence::FilePersistence;
use actionstatus_app_core::{
    list_vm, AppSettings, AppState, AppStore, HttpStatusSource, ListError, RepoListController,
    RepoListVm, WarningKind,
};
use actionstatus_core::{Repo, RepoEdit};
use anyhow::{Context, Result};
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

pub type Controller = RepoListController<FilePersistence, HttpStatusSource>;

const REPORT_GRACE: Duration = Duration::from_secs(1);

fn persistence(state_dir: Option<&Utf8Path>) -> FilePersistence {
    state_dir.map(FilePersistence::at).unwrap_or_default()
}

/// Builds a controller over the on-disk list and loads it.
pub fn open_controller(
    state_dir: Option<&Utf8Path>,
    base_url: Option<String>,
) -> Result<Controller> {
    let mut settings = persistence(state_dir).load_settings()?;
    if let Some(url) = base_url {
        settings.github_base_url = url;
    }
    let source = HttpStatusSource::from_settings(&settings)?;

    let mut controller = RepoListController::new(
        AppStore::new(AppState::default()),
        persistence(state_dir),
        source,
    );
    controller.load()?;
    Ok(controller)
}

pub fn print_list(vm: &RepoListVm) {
    for (ix, row) in vm.rows.iter().enumerate() {
        let checked = row
            .last_checked_human
            .as_deref()
            .map(|t| format!(" (checked {t})"))
            .unwrap_or_default();
        println!(
            "{:>3}  [{:<8}] {:<28} {}{}",
            ix, row.status_label, row.icon, row.name, checked
        );
    }
    if let Some(warning) = &vm.warning {
        println!(":: Warning: {warning}");
    }
    println!("{}", vm.footer);
}

pub fn cmd_list(controller: &Controller) -> RepoListVm {
    list_vm(&controller.state())
}

pub fn cmd_add(
    controller: &mut Controller,
    name: Option<String>,
    owner: Option<String>,
    workflow: Option<String>,
) -> Result<Repo> {
    let repo = controller.add();
    let edit = RepoEdit {
        name,
        owner,
        workflow,
    };
    let repo = controller.edit(repo.id, edit)?;
    report_unsaved(controller);
    Ok(repo)
}

pub fn cmd_edit(controller: &mut Controller, index: usize, edit: RepoEdit) -> Result<Repo> {
    let state = controller.state();
    let id = state
        .repos
        .get(index)
        .map(|r| r.id)
        .ok_or(ListError::InvalidIndex {
            index,
            len: state.repos.len(),
        })?;
    let repo = controller.edit(id, edit)?;
    report_unsaved(controller);
    Ok(repo)
}

pub fn cmd_remove(controller: &mut Controller, indices: &[usize]) -> Result<Vec<Repo>> {
    let removed = controller
        .remove(indices)
        .context("Nothing was removed")?;
    report_unsaved(controller);
    Ok(removed)
}

/// Refreshes all statuses with `timeout` as the refresh deadline and waits
/// for the result.
pub async fn cmd_refresh(
    controller: &mut Controller,
    timeout: Duration,
    show_progress: bool,
) -> Result<RepoListVm> {
    let pb = if show_progress {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    } else {
        ProgressBar::hidden()
    };

    let count = controller.state().repos.len();
    pb.set_message(format!("Checking {count} repos..."));

    controller.set_refresh_deadline(timeout);
    controller.refresh();
    // The worker reports its own timeout; allow time for that event to arrive.
    let deadline = Instant::now() + timeout + REPORT_GRACE;
    loop {
        controller.tick();
        if !controller.is_refreshing() {
            break;
        }
        if Instant::now() >= deadline {
            pb.finish_and_clear();
            anyhow::bail!("Refresh did not finish within {}s", timeout.as_secs());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    match controller.last_refresh() {
        Ok(()) => pb.finish_with_message("Refresh complete."),
        Err(e) => pb.finish_with_message(e.to_string()),
    }
    Ok(list_vm(&controller.state()))
}

fn describe_item(item: &ToolbarItem) -> String {
    let mut flags = Vec::new();
    if !item.enabled {
        flags.push("disabled");
    }
    if !item.visible {
        flags.push("hidden");
    }
    if flags.is_empty() {
        format!("{:?} ({})", item.action, item.icon)
    } else {
        format!("{:?} ({}) [{}]", item.action, item.icon, flags.join(", "))
    }
}

/// Text description of the navigation chrome a platform shows.
pub fn cmd_chrome(platform: Platform, editing: bool) -> String {
    let chrome: Box<dyn NavigationChrome> = chrome_for(platform);
    let items = |list: Vec<ToolbarItem>| {
        if list.is_empty() {
            "-".to_string()
        } else {
            list.iter().map(describe_item).collect::<Vec<_>>().join(", ")
        }
    };

    [
        format!("platform:   {:?}", chrome.platform()),
        format!("title:      {}", chrome.title().unwrap_or("-")),
        format!("navigation: {:?}", chrome.navigation_style()),
        format!("images:     {:?}", chrome.image_source()),
        format!("edit mode:  {}", if chrome.binds_edit_mode() { "bound" } else { "unbound" }),
        format!("leading:    {}", items(chrome.leading_items(editing))),
        format!("trailing:   {}", items(chrome.trailing_items(editing))),
    ]
    .join("\n")
}

pub fn cmd_settings(
    state_dir: Option<&Utf8Path>,
    github_url: Option<String>,
    concurrency: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<AppSettings> {
    let store = persistence(state_dir);
    let mut settings = store.load_settings()?;
    let changed = github_url.is_some() || concurrency.is_some() || timeout_secs.is_some();

    if let Some(url) = github_url {
        settings.github_base_url = url;
    }
    if let Some(n) = concurrency {
        settings.refresh_concurrency = actionstatus_config::clamp_concurrency(n);
    }
    if let Some(secs) = timeout_secs {
        settings.request_timeout_secs = secs.max(1);
    }
    if changed {
        store.save_settings(&settings)?;
    }
    Ok(settings)
}

fn report_unsaved(controller: &Controller) {
    let state = controller.state();
    if let Some(w) = state.warning.filter(|w| w.kind == WarningKind::Save) {
        eprintln!(":: Warning: {}", w.message);
    }
}
