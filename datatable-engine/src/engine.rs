//! FILENAME: datatable-engine/src/engine.rs
//! Data Table Calculation Engine.
//!
//! Turns flat report rows into the display table a `DataTableDefinition`
//! describes:
//!
//! 1. Resolve the configured field names against the catalog.
//! 2. Filter, then stably sort the rows by the group columns.
//! 3. Cascade: aggregate the deepest level from the sorted rows, then each
//!    coarser level from the previous level's output rows. Deriving level
//!    k from level k+1 instead of from the raw rows is only correct
//!    because every aggregate function is re-aggregatable.
//! 4. Assemble the level summaries into a tree, inserting a synthetic
//!    "Total" child under every node at a subtotal depth.
//! 5. Count leaves per subtree.
//! 6. Flatten the tree into display rows, one per leaf: repeated group
//!    labels merge via row spans taken from the leaf counts, total labels
//!    stretch via column spans taken from the remaining depth, and a
//!    grand-total row (when requested) closes the table.

use std::cmp::Ordering;

use log::{debug, trace};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use report_model::{Aggregate, Field, RawRow, Value};

use crate::definition::DataTableDefinition;
use crate::error::ReportError;
use crate::filter::apply_filters;
use crate::view::{DataCell, DataRow, DataTableView};

// ============================================================================
// TREE NODES
// ============================================================================

/// Longest group prefix kept inline; reports rarely nest deeper.
type GroupPrefix = SmallVec<[Value; 4]>;

/// Index of the root node in the arena.
const ROOT: usize = 0;

/// One node of the group tree.
///
/// Nodes live in an index arena; `parent` and `children` are arena indices,
/// never owning pointers, so the back-references cannot form ownership
/// cycles.
#[derive(Debug)]
struct TreeNode {
    parent: Option<usize>,
    children: Vec<usize>,
    /// Group-key values fixed from the root down to this node.
    group_prefix: GroupPrefix,
    /// Aggregated measure values at this node.
    values: Vec<Value>,
    /// 0 for the root, 1..=group count for real levels.
    depth: usize,
    /// Group columns not yet fixed at this node, plus one: total labels
    /// stretch across exactly this many columns.
    remaining_depth: usize,
    /// Synthetic subtotal leaf: the parent's aggregate re-labeled "Total".
    is_total: bool,
    /// Leaves in this subtree, filled by a post-order pass.
    leaf_count: usize,
}

// ============================================================================
// CALCULATOR
// ============================================================================

/// Builds the data table for one report request.
///
/// Equivalent to `DataTableCalculator::new(definition, fields)?` followed
/// by `calculate(rows)`; use the two-step form when resolution and
/// execution happen at different times.
pub fn calculate_data_table(
    definition: &DataTableDefinition,
    fields: &[Field],
    rows: Vec<RawRow>,
) -> Result<DataTableView, ReportError> {
    DataTableCalculator::new(definition, fields)?.calculate(rows)
}

/// One-shot calculator for a single report request.
///
/// Construction resolves and validates the definition against the field
/// catalog; `calculate` runs the pipeline. All state is request-local.
pub struct DataTableCalculator<'a> {
    definition: &'a DataTableDefinition,
    fields: &'a [Field],
    /// Catalog positions of the group fields, in definition order.
    group_indices: Vec<usize>,
    /// Catalog positions of the aggregate fields, in definition order.
    aggregate_indices: Vec<usize>,
    /// Aggregate function per measure, aligned with `aggregate_indices`.
    functions: Vec<Aggregate>,
    /// Depths (1-based group positions) that get a subtotal row.
    total_depths: Vec<usize>,
}

impl<'a> DataTableCalculator<'a> {
    /// Resolves the definition against the catalog. Every configuration
    /// error is raised here, before any row is touched.
    pub fn new(
        definition: &'a DataTableDefinition,
        fields: &'a [Field],
    ) -> Result<Self, ReportError> {
        let by_name: FxHashMap<&str, usize> = fields
            .iter()
            .enumerate()
            .map(|(index, field)| (field.name.as_str(), index))
            .collect();

        let mut group_indices = Vec::with_capacity(definition.groups.len());
        for name in &definition.groups {
            let index = *by_name
                .get(name.as_str())
                .ok_or_else(|| ReportError::FieldNotFound(name.clone()))?;
            group_indices.push(index);
        }

        let mut aggregate_indices = Vec::with_capacity(definition.aggregates.len());
        let mut functions = Vec::with_capacity(definition.aggregates.len());
        for name in &definition.aggregates {
            let index = *by_name
                .get(name.as_str())
                .ok_or_else(|| ReportError::FieldNotFound(name.clone()))?;
            let function = fields[index]
                .default_aggregate
                .ok_or_else(|| ReportError::NoAggregateFunction(name.clone()))?;
            aggregate_indices.push(index);
            functions.push(function);
        }

        // Totals resolve against the group list: a subtotal only makes
        // sense at a grouping depth.
        let mut total_depths = Vec::with_capacity(definition.totals.len());
        for name in &definition.totals {
            let position = definition
                .groups
                .iter()
                .position(|group| group == name)
                .ok_or_else(|| ReportError::TotalNotGrouped(name.clone()))?;
            total_depths.push(position + 1);
        }

        Ok(DataTableCalculator {
            definition,
            fields,
            group_indices,
            aggregate_indices,
            functions,
            total_depths,
        })
    }

    /// Runs the full pipeline over `rows`.
    pub fn calculate(&self, rows: Vec<RawRow>) -> Result<DataTableView, ReportError> {
        let rows = apply_filters(rows, self.fields, &self.definition.filters);
        debug!(
            "calculating data table over {} rows ({} groups, {} aggregates)",
            rows.len(),
            self.group_indices.len(),
            self.aggregate_indices.len()
        );

        let rows = self.sort_rows(rows)?;
        let levels = self.cascade(rows);
        let mut nodes = self.build_tree(&levels);
        count_leaves(&mut nodes, ROOT);
        Ok(self.build_view(&nodes))
    }

    // ------------------------------------------------------------------------
    // SORTING
    // ------------------------------------------------------------------------

    /// Stable ascending sort by each group column, left to right; ties keep
    /// input order. The first pair of values without a mutual order is
    /// remembered and aborts the calculation once the sort has finished.
    fn sort_rows(&self, mut rows: Vec<RawRow>) -> Result<Vec<RawRow>, ReportError> {
        let mut conflict: Option<ReportError> = None;
        rows.sort_by(|a, b| {
            for &column in &self.group_indices {
                match a[column].partial_cmp(&b[column]) {
                    Some(Ordering::Equal) => continue,
                    Some(order) => return order,
                    None => {
                        if conflict.is_none() {
                            conflict = Some(ReportError::IncomparableValues {
                                column,
                                left: a[column].type_name(),
                                right: b[column].type_name(),
                            });
                        }
                        return Ordering::Equal;
                    }
                }
            }
            Ordering::Equal
        });

        match conflict {
            Some(error) => Err(error),
            None => Ok(rows),
        }
    }

    // ------------------------------------------------------------------------
    // CASCADE
    // ------------------------------------------------------------------------

    /// Produces one level summary per depth, shallowest first.
    ///
    /// The deepest level is aggregated from the sorted raw rows; every
    /// coarser level re-aggregates the previous level's output, whose shape
    /// is group columns followed by aggregate columns. Note the one-past
    /// offset when shrinking: with k group columns left, the input rows
    /// still carry k + 1 group columns, so the aggregates start at k + 1.
    fn cascade(&self, rows: Vec<RawRow>) -> Vec<Vec<RawRow>> {
        let aggregate_count = self.aggregate_indices.len();
        let mut group_indices = self.group_indices.clone();
        let mut aggregate_indices = self.aggregate_indices.clone();

        let mut levels: Vec<Vec<RawRow>> = Vec::with_capacity(group_indices.len() + 1);
        levels.push(summarize_level(
            &rows,
            &group_indices,
            &aggregate_indices,
            &self.functions,
        ));
        // The raw rows are spent once the deepest level exists.
        drop(rows);

        while !group_indices.is_empty() {
            let kept = group_indices.len() - 1;
            group_indices = (0..kept).collect();
            aggregate_indices = (kept + 1..kept + 1 + aggregate_count).collect();

            let previous = levels.last().map(Vec::as_slice).unwrap_or_default();
            trace!(
                "re-aggregating {} rows down to {} group columns",
                previous.len(),
                kept
            );
            let summary = summarize_level(
                previous,
                &group_indices,
                &aggregate_indices,
                &self.functions,
            );
            levels.push(summary);
        }

        levels.reverse();
        levels
    }

    // ------------------------------------------------------------------------
    // TREE ASSEMBLY
    // ------------------------------------------------------------------------

    /// Builds the group tree from the level summaries, top-down.
    ///
    /// The root carries the whole-table aggregates only when a grand total
    /// was requested (an empty input leaves them empty either way).
    fn build_tree(&self, levels: &[Vec<RawRow>]) -> Vec<TreeNode> {
        let group_count = self.group_indices.len();
        let root_values = if self.definition.has_grand_total {
            levels
                .first()
                .and_then(|level| level.first())
                .cloned()
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut nodes = vec![TreeNode {
            parent: None,
            children: Vec::new(),
            group_prefix: GroupPrefix::new(),
            values: root_values,
            depth: 0,
            remaining_depth: group_count + 1,
            is_total: false,
            leaf_count: 0,
        }];

        if group_count > 0 {
            self.grow(&mut nodes, ROOT, levels);
        }
        nodes
    }

    /// Attaches the children of one parent node: the subtotal child first
    /// (when the parent sits at a subtotal depth), then one child per
    /// summary row extending the parent's prefix, recursing while real
    /// levels remain below.
    fn grow(&self, nodes: &mut Vec<TreeNode>, parent: usize, levels: &[Vec<RawRow>]) {
        let depth = nodes[parent].depth + 1;
        let remaining = nodes[parent].remaining_depth - 1;
        let prefix = nodes[parent].group_prefix.clone();

        if self.total_depths.contains(&nodes[parent].depth) {
            let index = nodes.len();
            let total = TreeNode {
                parent: Some(parent),
                children: Vec::new(),
                group_prefix: prefix.clone(),
                values: nodes[parent].values.clone(),
                depth,
                remaining_depth: remaining,
                is_total: true,
                leaf_count: 0,
            };
            nodes.push(total);
            nodes[parent].children.push(index);
        }

        for row in &levels[depth] {
            let extends_parent = prefix
                .iter()
                .enumerate()
                .all(|(slot, value)| row[slot] == *value);
            if !extends_parent {
                continue;
            }

            let index = nodes.len();
            let child = TreeNode {
                parent: Some(parent),
                children: Vec::new(),
                group_prefix: row[..depth].iter().cloned().collect(),
                values: row[depth..].to_vec(),
                depth,
                remaining_depth: remaining,
                is_total: false,
                leaf_count: 0,
            };
            nodes.push(child);
            nodes[parent].children.push(index);

            if depth < self.group_indices.len() {
                self.grow(nodes, index, levels);
            }
        }
    }

    // ------------------------------------------------------------------------
    // FLATTENING
    // ------------------------------------------------------------------------

    /// Flattens the counted tree into display rows.
    fn build_view(&self, nodes: &[TreeNode]) -> DataTableView {
        let mut rows = Vec::with_capacity(nodes[ROOT].leaf_count + 1);
        self.emit_rows(nodes, ROOT, &mut rows);
        DataTableView {
            rows,
            group_count: self.group_indices.len(),
            aggregate_count: self.aggregate_indices.len(),
        }
    }

    /// Emits one display row per leaf, depth-first, then the grand-total
    /// row once the traversal returns to a root that carries values.
    fn emit_rows(&self, nodes: &[TreeNode], index: usize, rows: &mut Vec<DataRow>) {
        let node = &nodes[index];
        if node.children.is_empty() && node.depth != 0 {
            let mut cells: Vec<DataCell> = Vec::new();
            if node.is_total {
                cells.push(DataCell::subtotal(node.remaining_depth as u32));
            } else {
                cells.push(DataCell::group(last_component(node)));
            }

            // A group label belongs on the first row of its block only:
            // follow the first-child chain upward, collecting each
            // ancestor's label with a row span covering its whole subtree.
            let mut current = index;
            while let Some(parent) = nodes[current].parent {
                let ancestor = &nodes[parent];
                if ancestor.depth == 0 || ancestor.children[0] != current {
                    break;
                }
                cells.push(
                    DataCell::group(last_component(ancestor))
                        .with_row_span(ancestor.leaf_count as u32),
                );
                current = parent;
            }
            cells.reverse();

            cells.extend(node.values.iter().cloned().map(DataCell::aggregate));
            rows.push(DataRow { cells });
        }

        for &child in &node.children {
            self.emit_rows(nodes, child, rows);
        }

        if node.parent.is_none() && !node.values.is_empty() {
            let span = self.group_indices.len().max(1) as u32;
            let mut cells = vec![DataCell::grand_total(span)];
            cells.extend(node.values.iter().cloned().map(DataCell::aggregate));
            rows.push(DataRow { cells });
        }
    }
}

// ============================================================================
// LEVEL AGGREGATION
// ============================================================================

/// Aggregates `rows` into one output row per distinct group-key tuple.
///
/// `rows` must already be sorted by the group columns; a run break is
/// detected whenever the tuple changes. Output rows carry the group values
/// first, then one aggregate per measure. Null measure values are skipped
/// outright rather than folded in as the seed, so a group whose measure
/// column is entirely null aggregates to null, not to zero.
fn summarize_level(
    rows: &[RawRow],
    group_indices: &[usize],
    aggregate_indices: &[usize],
    functions: &[Aggregate],
) -> Vec<RawRow> {
    let mut summaries: Vec<RawRow> = Vec::new();
    let mut current: Option<RawRow> = None;

    for row in rows {
        let starts_new_group = match current.as_ref() {
            Some(summary) => group_indices
                .iter()
                .enumerate()
                .any(|(slot, &column)| summary[slot] != row[column]),
            None => true,
        };
        if starts_new_group {
            if let Some(finished) = current.take() {
                summaries.push(finished);
            }
            let mut summary: RawRow = group_indices
                .iter()
                .map(|&column| row[column].clone())
                .collect();
            summary.resize(group_indices.len() + functions.len(), Value::Null);
            current = Some(summary);
        }

        if let Some(summary) = current.as_mut() {
            for (slot, function) in functions.iter().enumerate() {
                let value = &row[aggregate_indices[slot]];
                if value.is_null() {
                    continue;
                }
                let target = group_indices.len() + slot;
                let accumulator = if summary[target].is_null() {
                    function.seed()
                } else {
                    std::mem::replace(&mut summary[target], Value::Null)
                };
                summary[target] = function.combine(accumulator, value);
            }
        }
    }

    if let Some(finished) = current.take() {
        summaries.push(finished);
    }
    summaries
}

// ============================================================================
// TREE HELPERS
// ============================================================================

/// Fills `leaf_count` for the subtree at `index`: one for a childless
/// node, summed upward otherwise. Subtotal leaves weigh one like any
/// other leaf.
fn count_leaves(nodes: &mut [TreeNode], index: usize) -> usize {
    if nodes[index].children.is_empty() {
        nodes[index].leaf_count = 1;
        return 1;
    }
    let children: SmallVec<[usize; 8]> = nodes[index].children.iter().copied().collect();
    let mut total = 0;
    for child in children {
        total += count_leaves(nodes, child);
    }
    nodes[index].leaf_count = total;
    total
}

/// The last group-key component a node fixed; null when the prefix is
/// empty.
fn last_component(node: &TreeNode) -> Value {
    node.group_prefix.last().cloned().unwrap_or(Value::Null)
}

// ============================================================================
// TESTS
// ============================================================================
