use vcpkit_ui::{Control, Menu, RecentFilesMenu, StalePolicy};

use crate::common::{harness, Call};

fn paths(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
}

fn snapshot(menu: &RecentFilesMenu) -> Vec<(String, bool, Option<String>)> {
    menu.entries()
        .iter()
        .map(|e| (e.text(), e.is_visible(), e.data()))
        .collect()
}

#[test]
fn notification_with_two_files_and_capacity_five() {
    let h = harness("xyz", 5);
    let menu = Menu::new("menuRecentFiles", "Recent");
    let recent = RecentFilesMenu::install(&menu, &h.ctx, StalePolicy::Retain);
    recent.rebuild(&paths(&["/1.ngc", "/2.ngc", "/3.ngc", "/4.ngc"]));
    let before = snapshot(&recent);

    h.status.set_recent_files(paths(&["/a/b.ngc", "/c/d.ngc"]));
    h.ctx.dispatcher.pump();

    let entries = recent.entries();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0].text(), "&1 b.ngc");
    assert_eq!(entries[0].data().as_deref(), Some("/a/b.ngc"));
    assert!(entries[0].is_visible());
    assert_eq!(entries[1].text(), "&2 d.ngc");
    assert_eq!(entries[1].data().as_deref(), Some("/c/d.ngc"));
    assert!(entries[1].is_visible());
    assert_eq!(snapshot(&recent)[2..], before[2..]);
}

#[test]
fn empty_rebuild_changes_nothing() {
    let h = harness("xyz", 5);
    let menu = Menu::new("menuRecentFiles", "Recent");
    let recent = RecentFilesMenu::install(&menu, &h.ctx, StalePolicy::Retain);
    recent.rebuild(&paths(&["/x/one.ngc", "/x/two.ngc"]));
    let before = snapshot(&recent);

    recent.rebuild(&[]);
    assert_eq!(snapshot(&recent), before);
    assert_eq!(recent.visible_count(), 2);
}

#[test]
fn full_list_shows_every_entry() {
    let h = harness("xyz", 5);
    let menu = Menu::new("menuRecentFiles", "Recent");
    let recent = RecentFilesMenu::install(&menu, &h.ctx, StalePolicy::Retain);
    let long = "/very/long/directory/name/that/would/never/fit/in/a/menu";
    let list: Vec<String> = (1..=5).map(|i| format!("{}/part_{}.ngc", long, i)).collect();

    recent.rebuild(&list);

    for (i, entry) in recent.entries().iter().enumerate() {
        assert!(entry.is_visible());
        assert_eq!(entry.text(), format!("&{} part_{}.ngc", i + 1, i + 1));
        assert_eq!(entry.data().as_ref(), Some(&list[i]));
    }
}

#[test]
fn visible_entries_never_exceed_capacity() {
    let h = harness("xyz", 3);
    let menu = Menu::new("menuRecentFiles", "Recent");
    menu.add_action(Control::new("designer_entry"));
    let recent = RecentFilesMenu::install(&menu, &h.ctx, StalePolicy::Retain);
    recent.rebuild(&paths(&["/a", "/b", "/c", "/d", "/e"]));

    assert_eq!(menu.len(), 3);
    assert_eq!(recent.visible_count(), 3);
}

#[test]
fn seeded_list_is_shown_at_install() {
    let h = harness("xyz", 5);
    h.status.set_recent_files(paths(&["/shop/bracket.ngc"]));
    let menu = Menu::new("menuRecentFiles", "Recent");
    let recent = RecentFilesMenu::install(&menu, &h.ctx, StalePolicy::Retain);

    assert_eq!(recent.entries()[0].text(), "&1 bracket.ngc");
    recent.entries()[0].trigger();
    assert_eq!(
        h.commands.take(),
        vec![Call::Load("/shop/bracket.ngc".into(), true)]
    );
}
