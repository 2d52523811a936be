use indexmap::IndexMap;

use crate::model::{ContainerUpdate, ResourceId};

use super::item::Row;

/// Confirmed updates grouped by resource, in menu order.
pub type Selection = IndexMap<ResourceId, Vec<ContainerUpdate>>;

/// Rows plus cursor. The cursor indexes the selectable rows only.
#[derive(Clone, Debug)]
pub struct MenuState {
    rows: Vec<Row>,
    selectable: Vec<usize>,
    cursor: usize,
}

impl MenuState {
    pub fn new(rows: Vec<Row>) -> Self {
        let selectable = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_selectable())
            .map(|(idx, _)| idx)
            .collect();
        Self { rows, selectable, cursor: 0 }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn selectable_count(&self) -> usize {
        self.selectable.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Row index the cursor is on, if anything is selectable.
    pub fn cursor_row(&self) -> Option<usize> {
        self.selectable.get(self.cursor).copied()
    }

    pub fn cursor_down(&mut self) {
        let count = self.selectable_count();
        if count > 0 {
            self.cursor = (self.cursor + 1) % count;
        }
    }

    pub fn cursor_up(&mut self) {
        let count = self.selectable_count();
        if count > 0 {
            self.cursor = (self.cursor + count - 1) % count;
        }
    }

    pub fn toggle_selected(&mut self) {
        if let Some(idx) = self.cursor_row() {
            self.rows[idx].toggle();
        }
    }

    /// Every still-selected update, keyed by its resource.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new();
        for row in self.rows.iter().filter(|row| row.is_selected()) {
            if let Some(update) = row.update() {
                selection.entry(row.id.clone()).or_default().push(update.clone());
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::item::RowKind;
    use crate::model::ReleaseStatus;

    fn change(id: &str, container: &str) -> Row {
        Row {
            id: id.parse().unwrap(),
            status: ReleaseStatus::Success,
            kind: RowKind::Change {
                update: ContainerUpdate {
                    container: container.into(),
                    current: "img:1".parse().unwrap(),
                    target: "img:2".parse().unwrap(),
                },
                selected: true,
            },
        }
    }

    fn info(id: &str) -> Row {
        Row {
            id: id.parse().unwrap(),
            status: ReleaseStatus::Failed,
            kind: RowKind::Info { error: Some("boom".into()) },
        }
    }

    fn sample() -> MenuState {
        MenuState::new(vec![
            info("default:deployment/a"),
            change("default:deployment/b", "app"),
            change("default:deployment/b", "sidecar"),
            info("default:deployment/c"),
            change("default:deployment/d", "web"),
        ])
    }

    #[test]
    fn counts_only_selectable_rows() {
        let state = sample();
        assert_eq!(state.rows().len(), 5);
        assert_eq!(state.selectable_count(), 3);
        assert_eq!(state.cursor_row(), Some(1));
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut state = sample();
        state.cursor_up();
        assert_eq!(state.cursor(), 2);
        assert_eq!(state.cursor_row(), Some(4));
        state.cursor_down();
        assert_eq!(state.cursor(), 0);
        state.cursor_down();
        assert_eq!(state.cursor_row(), Some(2));
    }

    #[test]
    fn toggle_targets_the_selectable_row_under_the_cursor() {
        let mut state = sample();
        state.cursor_down();
        state.cursor_down();
        state.toggle_selected();
        assert!(!state.rows()[4].is_selected());
        assert!(state.rows()[1].is_selected());
        assert!(state.rows()[2].is_selected());
    }

    #[test]
    fn selection_groups_by_resource_in_row_order() {
        let mut state = sample();
        state.cursor_down();
        state.toggle_selected();
        let selection = state.selection();
        let keys: Vec<String> = selection.keys().map(|id| id.to_string()).collect();
        assert_eq!(keys, vec!["default:deployment/b", "default:deployment/d"]);
        let b = &selection[&"default:deployment/b".parse::<ResourceId>().unwrap()];
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].container, "app");
    }

    #[test]
    fn deselecting_everything_leaves_an_empty_selection() {
        let mut state = sample();
        for _ in 0..state.selectable_count() {
            state.toggle_selected();
            state.cursor_down();
        }
        assert!(state.selection().is_empty());
    }

    #[test]
    fn navigation_without_selectable_rows_is_inert() {
        let mut state = MenuState::new(vec![info("default:deployment/a")]);
        state.cursor_down();
        state.cursor_up();
        state.toggle_selected();
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.cursor_row(), None);
    }
}
