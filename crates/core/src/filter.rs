//! Dynamic list of (metric, threshold) filter rows owned by one search form

use crate::metrics::MetricChoice;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Stable identity of a filter row
///
/// Issued by the owning [`MetricFilterList`] and never reused within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(u64);

impl RowId {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user-configured filter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub id: RowId,
    pub metric: MetricChoice,
    /// Raw percentage text as typed; not parsed at this layer
    pub threshold: String,
}

/// Ordered collection of filter rows; insertion order is display order
///
/// Every mutation that changes the rows bumps [`revision`](Self::revision),
/// which renderers compare against to decide whether to redraw.
#[derive(Debug, Clone, Default)]
pub struct MetricFilterList {
    rows: Vec<MetricRow>,
    next_id: u64,
    revision: u64,
}

impl MetricFilterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row with a fresh id and default metric/threshold
    pub fn add_row(&mut self) -> MetricRow {
        let row = MetricRow {
            id: RowId(self.next_id),
            metric: MetricChoice::default(),
            threshold: String::new(),
        };
        self.next_id += 1;
        self.rows.push(row.clone());
        self.revision += 1;
        debug!(row_id = %row.id, rows = self.rows.len(), "Added metric filter row");
        row
    }

    /// Remove the row with `id`; unknown ids are ignored
    pub fn remove_row(&mut self, id: RowId) {
        match self.position(id) {
            Some(index) => {
                self.rows.remove(index);
                self.revision += 1;
                debug!(row_id = %id, rows = self.rows.len(), "Removed metric filter row");
            }
            None => debug!(row_id = %id, "Ignoring removal of unknown metric filter row"),
        }
    }

    /// Update the given fields of the row with `id`; unknown ids are ignored
    pub fn update_row(&mut self, id: RowId, metric: Option<MetricChoice>, threshold: Option<String>) {
        let Some(index) = self.position(id) else {
            debug!(row_id = %id, "Ignoring update of unknown metric filter row");
            return;
        };
        if metric.is_none() && threshold.is_none() {
            return;
        }

        let row = &mut self.rows[index];
        if let Some(metric) = metric {
            row.metric = metric;
        }
        if let Some(threshold) = threshold {
            row.threshold = threshold;
        }
        self.revision += 1;
    }

    /// Snapshot of the rows in display order
    pub fn rows(&self) -> &[MetricRow] {
        &self.rows
    }

    pub fn get(&self, id: RowId) -> Option<&MetricRow> {
        self.rows.iter().find(|row| row.id == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every row; the id counter keeps counting
    pub fn clear(&mut self) {
        if !self.rows.is_empty() {
            self.rows.clear();
            self.revision += 1;
        }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn ids(list: &MetricFilterList) -> Vec<RowId> {
        list.rows().iter().map(|row| row.id).collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list = MetricFilterList::new();
        assert!(list.is_empty());
        assert_eq!(list.revision(), 0);
    }

    #[test]
    fn test_add_row_uses_defaults() {
        let mut list = MetricFilterList::new();
        let row = list.add_row();
        assert_eq!(row.metric, MetricChoice::Precision);
        assert_eq!(row.threshold, "");
        assert_eq!(list.rows(), &[row]);
    }

    #[test]
    fn test_remove_middle_row_keeps_order() {
        let mut list = MetricFilterList::new();
        let first = list.add_row().id;
        let second = list.add_row().id;
        let third = list.add_row().id;

        list.remove_row(second);

        assert_eq!(ids(&list), vec![first, third]);
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut list = MetricFilterList::new();
        let a = list.add_row().id;
        let b = list.add_row().id;
        list.remove_row(b);
        let c = list.add_row().id;

        assert_ne!(c, b);
        assert!(c > b);
        assert_eq!(ids(&list), vec![a, c]);
    }

    #[test]
    fn test_ids_unique_across_mixed_operations() {
        let mut list = MetricFilterList::new();
        let mut issued = HashSet::new();
        for step in 0..50u64 {
            let row = list.add_row();
            assert!(issued.insert(row.id), "id {} issued twice", row.id);
            if step % 3 == 0 {
                let victim = list.rows()[0].id;
                list.remove_row(victim);
            }
        }
        let live: HashSet<RowId> = ids(&list).into_iter().collect();
        assert_eq!(live.len(), list.len());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = MetricFilterList::new();
        list.add_row();
        let before = list.rows().to_vec();
        let revision = list.revision();

        list.remove_row(RowId(99));
        list.remove_row(RowId(99));

        assert_eq!(list.rows(), before.as_slice());
        assert_eq!(list.revision(), revision);
    }

    #[test]
    fn test_update_row_partial() {
        let mut list = MetricFilterList::new();
        let id = list.add_row().id;

        list.update_row(id, Some(MetricChoice::Recall), None);
        list.update_row(id, None, Some("10".to_string()));

        let row = list.get(id).unwrap();
        assert_eq!(row.metric, MetricChoice::Recall);
        assert_eq!(row.threshold, "10");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut list = MetricFilterList::new();
        list.add_row();
        let before = list.rows().to_vec();

        list.update_row(RowId(7), Some(MetricChoice::Auc), Some("5".to_string()));

        assert_eq!(list.rows(), before.as_slice());
    }

    #[test]
    fn test_clear_keeps_id_counter() {
        let mut list = MetricFilterList::new();
        let first = list.add_row().id;
        list.clear();
        assert!(list.is_empty());
        assert!(list.add_row().id > first);
    }
}
