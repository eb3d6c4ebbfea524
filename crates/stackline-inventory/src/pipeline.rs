//! End-to-end stacked view construction.
//!
//! `report -> label -> tag -> bucket -> resolve keys -> bind layers`
//!
//! The [`StackedChart`] owns its [`BucketIndex`]. Layers are a snapshot of the
//! keys present when they were resolved; after mutating the index through
//! [`StackedChart::index_mut`] call [`StackedChart::refresh_layers`] before
//! reading again. The `add_records` and `remove_where` helpers do this for you.

use serde::Serialize;
use stackline_core::Label;
use tracing::{debug, info};

use crate::bucketing::{BucketGroup, BucketIndex, RecordId};
use crate::error::InventoryResult;
use crate::reducer::CategorySumReducer;
use crate::report::InventoryReport;
use crate::stacking::{bind, resolve_group, StackKey, StackLayer};
use crate::tagging::tagged;
use crate::types::{Aggregate, KeySampling, Record, StackConfig};

/// One layer's height in every bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series {
    /// The layer's category key.
    pub key: StackKey,
    /// `(bucket label, height)` in bucket order.
    pub points: Vec<(Label, i64)>,
}

/// A labeled, bucketed and stacked view over one report.
#[derive(Debug)]
pub struct StackedChart {
    label: Label,
    report_type: String,
    views: Vec<String>,
    columns: Vec<String>,
    sampling: KeySampling,
    index: BucketIndex<Label, CategorySumReducer>,
    keys: Vec<StackKey>,
    layers: Vec<StackLayer>,
}

impl StackedChart {
    /// Builds a chart from a report.
    ///
    /// # Errors
    ///
    /// - `InventoryError::ReportFlagged` if the report is marked failed
    /// - `InventoryError::Core` if the request window is invalid; nothing is
    ///   tagged in that case
    /// - `InventoryError::LabelConflict` if a row arrives pre-labeled differently
    /// - `InventoryError::Overflow` if a category's running sum leaves `i64`
    pub fn build(report: InventoryReport, config: &StackConfig) -> InventoryResult<Self> {
        report.ensure_ok()?;
        let InventoryReport { request, data, .. } = report;

        let label = request.label(&config.labeler())?;
        debug!(
            from = request.from_date,
            to = request.to_date,
            label = %label,
            "labeled request window"
        );

        let records = tagged(data.records, &label)?;
        let mut index =
            BucketIndex::by_label(CategorySumReducer::new(config.missing_category_key.clone()));
        index.add(records)?;

        let mut chart = Self {
            label,
            report_type: request.report_type,
            views: request.views,
            columns: data.columns,
            sampling: config.key_sampling,
            index,
            keys: Vec::new(),
            layers: Vec::new(),
        };
        chart.refresh_layers();

        info!(
            label = %chart.label,
            records = chart.index.record_count(),
            layers = chart.layers.len(),
            "built stacked chart"
        );
        Ok(chart)
    }

    /// Parses a JSON report and builds a chart from it.
    pub fn from_json(json: &str, config: &StackConfig) -> InventoryResult<Self> {
        Self::build(InventoryReport::from_json(json)?, config)
    }

    /// Returns the run's bucket label.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Returns the request type.
    #[must_use]
    pub fn report_type(&self) -> &str {
        &self.report_type
    }

    /// Returns the requested views, unchanged.
    #[must_use]
    pub fn views(&self) -> &[String] {
        &self.views
    }

    /// Returns the report's column descriptions, unchanged.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the owned bucket index.
    #[must_use]
    pub fn index(&self) -> &BucketIndex<Label, CategorySumReducer> {
        &self.index
    }

    /// Returns the bucket index for direct mutation.
    ///
    /// Call [`refresh_layers`](Self::refresh_layers) once mutation is done.
    pub fn index_mut(&mut self) -> &mut BucketIndex<Label, CategorySumReducer> {
        &mut self.index
    }

    /// Returns the bucket-group query.
    #[must_use]
    pub fn group(&self) -> Vec<BucketGroup<'_, Label, Aggregate>> {
        self.index.group()
    }

    /// Returns the resolved stack keys.
    #[must_use]
    pub fn keys(&self) -> &[StackKey] {
        &self.keys
    }

    /// Returns the bound layers.
    #[must_use]
    pub fn layers(&self) -> &[StackLayer] {
        &self.layers
    }

    /// Re-resolves stack keys and rebinds layers from the current index.
    pub fn refresh_layers(&mut self) {
        self.keys = resolve_group(&self.index.group(), self.sampling);
        self.layers = bind(&self.keys);
        debug!(keys = ?self.keys, sampling = ?self.sampling, "resolved stack keys");
    }

    /// Tags records with this chart's label, adds them and refreshes layers.
    ///
    /// # Errors
    ///
    /// Fails like [`BucketIndex::add`]; the chart is unchanged in that case.
    pub fn add_records(&mut self, records: Vec<Record>) -> InventoryResult<Vec<RecordId>> {
        let records = tagged(records, &self.label)?;
        let ids = self.index.add(records)?;
        self.refresh_layers();
        Ok(ids)
    }

    /// Removes matching records and refreshes layers.
    ///
    /// # Errors
    ///
    /// Fails like [`BucketIndex::remove_where`]; the chart is unchanged in
    /// that case.
    pub fn remove_where<P>(&mut self, predicate: P) -> InventoryResult<Vec<Record>>
    where
        P: FnMut(&Record) -> bool,
    {
        let removed = self.index.remove_where(predicate)?;
        self.refresh_layers();
        Ok(removed)
    }

    /// Returns every layer's height per bucket.
    #[must_use]
    pub fn series(&self) -> Vec<Series> {
        let group = self.index.group();
        self.layers
            .iter()
            .map(|layer| Series {
                key: layer.key().clone(),
                points: layer.heights(&group),
            })
            .collect()
    }

    /// Tears the chart down, handing back its index.
    #[must_use]
    pub fn into_index(self) -> BucketIndex<Label, CategorySumReducer> {
        self.index
    }
}
