//! Inner join of sales orders against the production plan, plus the
//! completion filter.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ReconcileConfig;
use crate::data::{Record, RecordSet};
use crate::errors::OrderNestError;
use crate::normalize::normalize_key;
use crate::types::{FieldName, OrderKey};

/// One order row paired with one matching, not-yet-complete plan row.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinedRecord {
    /// Normalized join key (never empty).
    pub key: OrderKey,
    /// The full sales order row.
    pub order: Record,
    /// Index of the matching row in the (unfiltered) plan set.
    pub plan_row: usize,
}

/// Row counts observed while reconciling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Order rows considered.
    pub order_rows: usize,
    /// Plan rows considered.
    pub plan_rows: usize,
    /// Plan rows dropped because their first column is blank.
    pub plan_rows_blank: usize,
    /// Joined (order, plan) pairs before the completion filter.
    pub joined: usize,
    /// Joined pairs dropped because the plan marks them complete.
    pub excluded_complete: usize,
}

/// Output of [`reconcile`].
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciliation {
    /// Surviving joined rows, order-row-major then plan-row order.
    pub rows: Vec<JoinedRecord>,
    /// Column names resolved from the configuration.
    pub columns: ResolvedColumns,
    /// Row counts for the run.
    pub stats: ReconcileStats,
}

/// Concrete column names chosen by a [`ReconcileConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedColumns {
    /// Order-key column in the sales export.
    pub order_key: FieldName,
    /// First column of the plan (the plan-side key).
    pub plan_key: FieldName,
    /// Completion-marker column in the plan.
    pub completion: FieldName,
}

impl ResolvedColumns {
    /// Resolve every selector up front so a bad configuration fails before any work.
    pub fn resolve(
        orders: &RecordSet,
        plan: &RecordSet,
        config: &ReconcileConfig,
    ) -> Result<Self, OrderNestError> {
        let order_key = config.order_key.resolve(orders)?.to_string();
        let plan_key = plan.column_at(0)?.to_string();
        let completion = config.completion.resolve(plan)?.to_string();
        Ok(Self {
            order_key,
            plan_key,
            completion,
        })
    }
}

/// Join `orders` to `plan` on the normalized key and drop completed rows.
///
/// Duplicate plan keys fan out: an order row is emitted once per matching
/// plan row. Rows whose key normalizes to the empty string never join.
pub fn reconcile(
    orders: &RecordSet,
    plan: &RecordSet,
    config: &ReconcileConfig,
) -> Result<Reconciliation, OrderNestError> {
    let columns = ResolvedColumns::resolve(orders, plan, config)?;
    let mut stats = ReconcileStats {
        order_rows: orders.len(),
        plan_rows: plan.len(),
        ..ReconcileStats::default()
    };

    let mut plan_index: HashMap<OrderKey, Vec<usize>> = HashMap::new();
    for (idx, row) in plan.rows().iter().enumerate() {
        let first = row.get(&columns.plan_key);
        if first.is_blank() {
            stats.plan_rows_blank += 1;
            continue;
        }
        let key = normalize_key(first);
        plan_index.entry(key).or_default().push(idx);
    }

    let mut rows = Vec::new();
    for order in orders.rows() {
        let key = normalize_key(order.get(&columns.order_key));
        if key.is_empty() {
            continue;
        }
        let Some(matches) = plan_index.get(&key) else {
            continue;
        };
        for &plan_row in matches {
            stats.joined += 1;
            if !plan.rows()[plan_row].get(&columns.completion).is_blank() {
                stats.excluded_complete += 1;
                continue;
            }
            rows.push(JoinedRecord {
                key: key.clone(),
                order: order.clone(),
                plan_row,
            });
        }
    }

    debug!(
        order_rows = stats.order_rows,
        plan_rows = stats.plan_rows,
        plan_rows_blank = stats.plan_rows_blank,
        joined = stats.joined,
        excluded_complete = stats.excluded_complete,
        retained = rows.len(),
        "reconciliation completed"
    );

    Ok(Reconciliation {
        rows,
        columns,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CompletionColumn, KeyColumn};
    use crate::data::CellValue;
    use crate::ingest::parse_record_set;

    fn orders(rows: &[(&str, &str)]) -> RecordSet {
        RecordSet::new(
            "orders",
            ["Sales Order", "Item"],
            rows.iter()
                .map(|(key, item)| vec![CellValue::from_raw(key), CellValue::from_raw(item)]),
        )
        .unwrap()
    }

    fn plan(rows: &[(&str, CellValue)]) -> RecordSet {
        RecordSet::new(
            "plan",
            ["Order", "Complete"],
            rows.iter()
                .map(|(key, done)| vec![CellValue::from_raw(key), done.clone()]),
        )
        .unwrap()
    }

    fn config() -> ReconcileConfig {
        ReconcileConfig {
            order_key: KeyColumn::First,
            completion: CompletionColumn::Named("Complete".into()),
        }
    }

    fn keys(result: &Reconciliation) -> Vec<&str> {
        result.rows.iter().map(|row| row.key.as_str()).collect()
    }

    #[test]
    fn joins_on_normalized_key() {
        let result = reconcile(
            &orders(&[(" so1 ", "a"), ("SO2", "b")]),
            &plan(&[("SO1", CellValue::Missing), ("so2  ", CellValue::Missing)]),
            &config(),
        )
        .unwrap();
        assert_eq!(keys(&result), vec!["SO1", "SO2"]);
        assert_eq!(result.columns.order_key, "Sales Order");
        assert_eq!(result.columns.plan_key, "Order");
    }

    #[test]
    fn empty_keys_never_join() {
        let result = reconcile(
            &orders(&[("", "a"), ("   ", "b"), ("SO1", "c")]),
            &plan(&[("", CellValue::Missing), ("SO1", CellValue::Missing)]),
            &config(),
        )
        .unwrap();
        assert_eq!(keys(&result), vec!["SO1"]);
        assert_eq!(result.stats.plan_rows_blank, 1);
    }

    #[test]
    fn completion_filter_keeps_only_blank_markers() {
        let result = reconcile(
            &orders(&[("A", ""), ("B", ""), ("C", ""), ("D", ""), ("E", "")]),
            &plan(&[
                ("A", CellValue::from("")),
                ("B", CellValue::from("  ")),
                ("C", CellValue::Missing),
                ("D", CellValue::from("X")),
                ("E", CellValue::from("2024-01-01")),
            ]),
            &config(),
        )
        .unwrap();
        assert_eq!(keys(&result), vec!["A", "B", "C"]);
        assert_eq!(result.stats.joined, 5);
        assert_eq!(result.stats.excluded_complete, 2);
    }

    #[test]
    fn null_spellings_in_plan_export_count_as_not_complete() {
        let plan = parse_record_set(
            "plan",
            b"Key,Done\nSO1,N/A\nSO2,NULL\nSO3,#N/A\nSO4,None\nSO5,<NA>\nSO6,n/a\nSO7,done\n",
        )
        .unwrap();
        let result = reconcile(
            &orders(&[
                ("SO1", ""),
                ("SO2", ""),
                ("SO3", ""),
                ("SO4", ""),
                ("SO5", ""),
                ("SO6", ""),
                ("SO7", ""),
            ]),
            &plan,
            &ReconcileConfig {
                order_key: KeyColumn::First,
                completion: CompletionColumn::Named("Done".into()),
            },
        )
        .unwrap();
        assert_eq!(keys(&result), vec!["SO1", "SO2", "SO3", "SO4", "SO5", "SO6"]);
        assert_eq!(result.stats.excluded_complete, 1);
    }

    #[test]
    fn duplicate_plan_keys_fan_out() {
        let result = reconcile(
            &orders(&[("SO1", "sign")]),
            &plan(&[
                ("SO1", CellValue::Missing),
                ("SO1", CellValue::Missing),
                ("SO1", CellValue::from("done")),
            ]),
            &config(),
        )
        .unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].plan_row, 0);
        assert_eq!(result.rows[1].plan_row, 1);
    }

    #[test]
    fn out_of_range_completion_position_is_a_configuration_error() {
        let err = reconcile(
            &orders(&[("SO1", "sign")]),
            &plan(&[("SO1", CellValue::Missing)]),
            &ReconcileConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OrderNestError::ColumnOutOfRange { index: 9, available: 2, .. }
        ));
    }

    #[test]
    fn unknown_order_key_column_is_a_configuration_error() {
        let config = ReconcileConfig {
            order_key: KeyColumn::Named("Order Number".into()),
            ..config()
        };
        let err = reconcile(
            &orders(&[("SO1", "sign")]),
            &plan(&[("SO1", CellValue::Missing)]),
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            OrderNestError::MissingColumn { column, .. } if column == "Order Number"
        ));
    }

    #[test]
    fn all_blank_plan_keys_yield_no_rows() {
        let result = reconcile(
            &orders(&[("SO1", "sign")]),
            &plan(&[("", CellValue::Missing), ("  ", CellValue::Missing)]),
            &config(),
        )
        .unwrap();
        assert!(result.rows.is_empty());
        assert_eq!(result.stats.plan_rows_blank, 2);
    }
}
