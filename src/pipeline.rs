//! One-shot driver: reconcile -> classify -> plan -> project.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::classify::{Category, Classifier};
use crate::config::ReconcileConfig;
use crate::data::RecordSet;
use crate::errors::OrderNestError;
use crate::planner::plan_sections;
use crate::reconcile::{ReconcileStats, reconcile};
use crate::report::{DisplayColumns, Report, build_report};

/// Result of a pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineOutput {
    /// Display-ready report.
    pub report: Report,
    /// Reconciliation counters for the run.
    pub stats: ReconcileStats,
}

/// Pure report builder over two in-memory record sets.
#[derive(Clone, Debug)]
pub struct OrderNest {
    config: ReconcileConfig,
    classifier: Classifier,
}

impl OrderNest {
    /// Builder with the standard classification rules.
    pub fn new(config: ReconcileConfig) -> Result<Self, OrderNestError> {
        Ok(Self::with_classifier(config, Classifier::standard()?))
    }

    /// Builder with a caller-supplied rule table.
    pub fn with_classifier(config: ReconcileConfig, classifier: Classifier) -> Self {
        Self { config, classifier }
    }

    /// Column selection in use.
    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    /// Run the full pipeline.
    ///
    /// Only configuration problems fail; they are detected before any row is
    /// processed, so a run either yields a complete report or nothing.
    pub fn run(
        &self,
        orders: &RecordSet,
        plan: &RecordSet,
    ) -> Result<PipelineOutput, OrderNestError> {
        let reconciliation = reconcile(orders, plan, &self.config).inspect_err(|err| {
            warn!(error = %err, "reconciliation configuration rejected");
        })?;
        let stats = reconciliation.stats;
        let display = DisplayColumns::resolve(orders, &reconciliation.columns.order_key);

        let classified = self.classifier.classify_all(reconciliation.rows);
        let mut per_category: BTreeMap<Category, usize> = BTreeMap::new();
        for record in &classified {
            *per_category.entry(record.category).or_insert(0) += 1;
        }
        for (category, count) in &per_category {
            debug!(category = category.id(), count, "classified records");
        }

        let sections = plan_sections(classified);
        let report = build_report(&sections, &display);

        info!(
            orders = stats.order_rows,
            plan = stats.plan_rows,
            excluded_complete = stats.excluded_complete,
            sections = report.sections.len(),
            rows = report.row_count(),
            "report built"
        );
        Ok(PipelineOutput { report, stats })
    }
}

/// Convenience wrapper: run the pipeline with the standard rules.
pub fn build_order_report(
    orders: &RecordSet,
    plan: &RecordSet,
    config: &ReconcileConfig,
) -> Result<Report, OrderNestError> {
    OrderNest::new(config.clone())?
        .run(orders, plan)
        .map(|output| output.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompletionColumn;
    use crate::data::CellValue;

    #[test]
    fn configuration_error_yields_no_report() {
        let orders = RecordSet::new(
            "orders",
            ["Sales Order", "Item"],
            vec![vec![CellValue::from("SO1"), CellValue::from("flat wrap")]],
        )
        .unwrap();
        let plan = RecordSet::new(
            "plan",
            ["Order", "Done"],
            vec![vec![CellValue::from("SO1"), CellValue::Missing]],
        )
        .unwrap();
        let config = ReconcileConfig {
            completion: CompletionColumn::Position(5),
            ..ReconcileConfig::default()
        };
        assert!(matches!(
            build_order_report(&orders, &plan, &config),
            Err(OrderNestError::ColumnOutOfRange { index: 5, .. })
        ));

        let ok = ReconcileConfig {
            completion: CompletionColumn::Position(1),
            ..ReconcileConfig::default()
        };
        let output = OrderNest::new(ok).unwrap().run(&orders, &plan).unwrap();
        assert_eq!(output.report.sections.len(), 1);
        assert_eq!(output.report.sections[0].title, "Flat Wrap");
        assert_eq!(output.stats.joined, 1);
    }
}
