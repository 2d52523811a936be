use crate::model::{ContainerUpdate, ReleaseStatus, ResourceId, ResultSet, Verbosity};

/// What a row carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowKind {
    /// Read-only line: a failure, or a resource with nothing to change.
    Info { error: Option<String> },
    /// One container update the user can keep or drop.
    Change { update: ContainerUpdate, selected: bool },
}

/// One line of the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: ResourceId,
    pub status: ReleaseStatus,
    pub kind: RowKind,
}

impl Row {
    pub fn is_selectable(&self) -> bool {
        matches!(self.kind, RowKind::Change { .. })
    }

    pub fn is_selected(&self) -> bool {
        matches!(self.kind, RowKind::Change { selected: true, .. })
    }

    pub fn update(&self) -> Option<&ContainerUpdate> {
        match &self.kind {
            RowKind::Change { update, .. } => Some(update),
            RowKind::Info { .. } => None,
        }
    }

    /// The update column: the change, the error, or nothing. Always a
    /// single table cell on a single line.
    pub fn description(&self) -> String {
        match &self.kind {
            RowKind::Change { update, .. } => single_line(&update.to_string()),
            RowKind::Info { error } => error.as_deref().map(single_line).unwrap_or_default(),
        }
    }

    /// Checkbox glyph; blank for rows that cannot be selected.
    pub fn checkbox(&self) -> &'static str {
        match self.kind {
            RowKind::Info { .. } => " ",
            RowKind::Change { selected: true, .. } => "\u{25c9}",
            RowKind::Change { selected: false, .. } => "\u{25ef}",
        }
    }

    /// Flip the selection of a change row; informational rows are left alone.
    pub fn toggle(&mut self) {
        if let RowKind::Change { selected, .. } = &mut self.kind {
            *selected = !*selected;
        }
    }
}

/// Newlines become `⏎`; tabs and other control characters become spaces.
fn single_line(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .chars()
        .map(|c| match c {
            '\n' => '\u{23ce}',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect()
}

/// Flatten a result set into menu rows, in resource order then container order.
///
/// Resources hidden at `verbosity` contribute no rows. A resource with
/// container updates yields one selected row per update; otherwise it yields
/// a single informational row carrying its error, if any.
pub fn build_rows(results: &ResultSet, verbosity: Verbosity) -> Vec<Row> {
    let mut rows = Vec::new();
    for (id, result) in results.iter() {
        if !verbosity.includes(result.status) {
            tracing::debug!(resource = %id, status = %result.status, "hidden at current verbosity");
            continue;
        }

        if result.per_container.is_empty() {
            rows.push(Row {
                id: id.clone(),
                status: result.status,
                kind: RowKind::Info { error: result.error().map(str::to_string) },
            });
            continue;
        }

        if result.error().is_some() {
            tracing::debug!(resource = %id, "error text dropped in favour of container updates");
        }
        rows.extend(result.per_container.iter().map(|update| Row {
            id: id.clone(),
            status: result.status,
            kind: RowKind::Change { update: update.clone(), selected: true },
        }));
    }
    rows
}
