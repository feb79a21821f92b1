use actionstatus_core::{badge_for, merge_statuses, BuildStatus, Repo, StatusColor, StatusUpdate};
use std::collections::HashSet;

#[test]
fn every_status_maps_to_a_distinct_non_empty_badge() {
    let mut icons = HashSet::new();
    let mut colors = HashSet::new();
    for status in BuildStatus::ALL {
        let badge = badge_for(status);
        assert!(!badge.icon.is_empty(), "{status:?} has no icon");
        icons.insert(badge.icon);
        colors.insert(badge.color);
    }
    assert_eq!(icons.len(), BuildStatus::ALL.len());
    assert_eq!(colors.len(), BuildStatus::ALL.len());
}

#[test]
fn success_is_green_and_failure_is_red() {
    assert_eq!(badge_for(BuildStatus::Succeeded).color, StatusColor::Green);
    assert_eq!(badge_for(BuildStatus::Failed).color, StatusColor::Red);
    assert_eq!(badge_for(BuildStatus::Unknown).color, StatusColor::Neutral);
    assert_eq!(badge_for(BuildStatus::Running).color, StatusColor::Pending);
}

#[test]
fn merge_only_touches_reported_ids() {
    let a = Repo::new("a", "org", "Tests");
    let b = Repo::new("b", "org", "Tests");
    let mut repos = vec![a.clone(), b.clone()];

    let stranger = Repo::new("gone", "org", "Tests");
    let now = chrono::Utc::now();
    let touched = merge_statuses(
        &mut repos,
        &[
            StatusUpdate {
                id: a.id,
                status: BuildStatus::Succeeded,
            },
            StatusUpdate {
                id: stranger.id,
                status: BuildStatus::Failed,
            },
        ],
        now,
    );

    assert_eq!(touched, vec![a.id]);
    assert_eq!(repos[0].id, a.id);
    assert_eq!(repos[0].status, BuildStatus::Succeeded);
    assert_eq!(repos[0].last_checked, Some(now));
    assert_eq!(repos[1].id, b.id);
    assert_eq!(repos[1].status, BuildStatus::Unknown);
    assert!(repos[1].last_checked.is_none());
}
