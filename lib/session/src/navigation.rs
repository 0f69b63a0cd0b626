//! Role-gated side navigation.
//!
//! The menu is a static, ordered list of [`MenuItem`] descriptors. Each
//! render computes a [`MenuEntry`] per descriptor from the current
//! [`RoleSet`] and keeps only the visible ones. Order is significant and
//! duplicates are legal: two entries may share a label or a path when they
//! target disjoint audiences, and filtering is strictly per entry.

use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleSet};

/// Who may see a menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to every authenticated user.
    Everyone,
    /// Visible when the role set grants at least one of these roles.
    AnyOf(Vec<Role>),
}

impl Visibility {
    /// Evaluates the predicate against a role set.
    #[must_use]
    pub fn allows(&self, roles: &RoleSet) -> bool {
        match self {
            Self::Everyone => true,
            Self::AnyOf(required) => {
                let caps = roles.capabilities();
                required.iter().any(|role| caps.has(*role))
            }
        }
    }
}

/// Static descriptor of one navigable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub icon: String,
    pub path: String,
    pub visibility: Visibility,
}

impl MenuItem {
    /// Creates an item visible to everyone.
    #[must_use]
    pub fn new(label: &str, icon: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            path: path.to_string(),
            visibility: Visibility::Everyone,
        }
    }

    /// Restricts the item to users holding any of `roles`.
    #[must_use]
    pub fn for_roles(mut self, roles: &[Role]) -> Self {
        self.visibility = Visibility::AnyOf(roles.to_vec());
        self
    }
}

/// A menu item resolved for the current role set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub icon: String,
    pub path: String,
    pub visible: bool,
}

/// The ordered menu descriptor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Navigation {
    items: Vec<MenuItem>,
}

impl Navigation {
    /// Creates a navigation model from descriptors in display order.
    #[must_use]
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    /// The dashboard's side menu.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::new(vec![
            MenuItem::new("Dashboard", "home", "/dashboard"),
            MenuItem::new("Projects", "folder", "/dashboard/project").for_roles(&[Role::Admin]),
            MenuItem::new("Projects", "folder", "/dashboard/project").for_roles(&[Role::Student]),
            MenuItem::new("Groups", "users", "/dashboard/group"),
            MenuItem::new("Instructors", "user-check", "/dashboard/instructor")
                .for_roles(&[Role::Admin]),
            MenuItem::new("Messages", "message-circle", "/dashboard/messages")
                .for_roles(&[Role::Instructor, Role::Student]),
            MenuItem::new("Notifications", "bell", "/dashboard/notifications"),
            MenuItem::new("Profile", "user", "/dashboard/profile"),
        ])
    }

    /// Returns the descriptors in declaration order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Resolves every descriptor against `roles`, visible or not.
    #[must_use]
    pub fn entries(&self, roles: &RoleSet) -> Vec<MenuEntry> {
        self.items
            .iter()
            .map(|item| MenuEntry {
                label: item.label.clone(),
                icon: item.icon.clone(),
                path: item.path.clone(),
                visible: item.visibility.allows(roles),
            })
            .collect()
    }

    /// Returns the visible entries for `roles`, in declaration order.
    #[must_use]
    pub fn visible_entries(&self, roles: &RoleSet) -> Vec<MenuEntry> {
        self.entries(roles)
            .into_iter()
            .filter(|entry| entry.visible)
            .collect()
    }
}

/// Finds the entry whose path equals `path` exactly.
///
/// Returns `None` when nothing matches; no entry is highlighted then.
#[must_use]
pub fn select<'a>(entries: &'a [MenuEntry], path: &str) -> Option<&'a MenuEntry> {
    entries.iter().find(|entry| entry.path == path)
}

/// Filtered menu plus the currently selected entry.
///
/// Call [`NavigationState::mount`] when the menu is (re)mounted or the role
/// set may have changed, and [`NavigationState::navigate`] on every location
/// change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    entries: Vec<MenuEntry>,
    selected: Option<usize>,
}

impl NavigationState {
    /// Filters `navigation` for `roles` and selects the entry for `path`.
    #[must_use]
    pub fn mount(navigation: &Navigation, roles: &RoleSet, path: &str) -> Self {
        let mut state = Self {
            entries: navigation.visible_entries(roles),
            selected: None,
        };
        state.navigate(path);
        state
    }

    /// Recomputes the selection for a new location.
    pub fn navigate(&mut self, path: &str) {
        self.selected = self.entries.iter().position(|entry| entry.path == path);
    }

    /// Returns the visible entries.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Returns the selected entry, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&MenuEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    /// Returns the index of the selected entry within [`Self::entries`].
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }
}
