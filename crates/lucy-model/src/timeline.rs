//! [`Timelines`]: a stack of rows, each holding value segments.

use lucy_core::{
  Error, Result, RowId,
  timeline::{Color, Row, Segment, TimelineSnapshot},
};

use crate::Model;

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineChange {
  RowAdded(RowId),
  SegmentAppended { row: RowId, index: usize },
}

/// Rows are displayed top to bottom in the order they were added.
#[derive(Debug, Default)]
pub struct Timelines {
  rows:    Vec<Row>,
  pending: Vec<TimelineChange>,
}

impl Model for Timelines {
  type Change = TimelineChange;

  fn take_changes(&mut self) -> Vec<TimelineChange> {
    std::mem::take(&mut self.pending)
  }
}

impl Timelines {
  pub fn new() -> Self { Self::default() }

  pub fn add_row(&mut self, name: impl Into<String>) -> RowId {
    let id = RowId(self.rows.len() as u64);
    self.rows.push(Row {
      id,
      name: name.into(),
      width: 0,
      segments: Vec::new(),
    });
    self.pending.push(TimelineChange::RowAdded(id));
    id
  }

  /// Append a segment. Overlapping or out-of-order segments are accepted.
  pub fn append_segment(
    &mut self,
    row: RowId,
    start: i64,
    end: i64,
    label: impl Into<String>,
    color: Color,
  ) -> Result<()> {
    if start > end {
      return Err(Error::InvalidSegment { start, end });
    }
    let r = self.row_mut(row).ok_or(Error::UnknownEntity(row.into()))?;
    r.width = r.width.max(end);
    r.segments.push(Segment { start, end, label: label.into(), color });
    let index = r.segments.len() - 1;
    self.pending.push(TimelineChange::SegmentAppended { row, index });
    Ok(())
  }

  fn row_mut(&mut self, id: RowId) -> Option<&mut Row> {
    usize::try_from(id.0).ok().and_then(|i| self.rows.get_mut(i))
  }

  pub fn row(&self, id: RowId) -> Option<&Row> {
    usize::try_from(id.0).ok().and_then(|i| self.rows.get(i))
  }

  pub fn rows(&self) -> &[Row] { &self.rows }

  /// Label of the first segment on `row` covering `t`.
  pub fn label_at(&self, row: RowId, t: i64) -> Result<Option<&str>> {
    let r = self.row(row).ok_or(Error::UnknownEntity(row.into()))?;
    Ok(
      r.segments
        .iter()
        .find(|s| s.contains(t))
        .map(|s| s.label.as_str()),
    )
  }

  pub fn snapshot(&self) -> TimelineSnapshot {
    TimelineSnapshot { rows: self.rows.clone() }
  }
}
