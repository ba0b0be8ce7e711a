//! Disk-scheduling step generators
//!
//! All policies share `DiskTrace`, which owns the working request list and
//! head position for one run and clones them into every step. Boundary
//! stops (SCAN and C-SCAN) move the head and count toward seek distance but
//! never toward requests served.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod cscan;
pub mod fcfs;
pub mod look;
pub mod scan;
pub mod sstf;

pub use self::cscan::CScan;
pub use self::fcfs::Fcfs;
pub use self::look::Look;
pub use self::scan::Scan;
pub use self::sstf::Sstf;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::algorithm::step::{StepRecorder, StepSequence};
use crate::algorithm::traits::{check_len, check_range, AlgorithmError, StepState};
use crate::config::InputLimits;

/// Head sweep direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward cylinder 0
    Left,
    /// Toward cylinder `disk_size - 1`
    Right,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

/// Scheduling problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskInput {
    /// Number of cylinders; valid positions are `0..disk_size`
    pub disk_size: u32,
    /// Initial head position
    pub head: u32,
    /// Pending request cylinders in arrival order
    pub requests: Vec<u32>,
    /// Initial sweep direction (ignored by FCFS and SSTF)
    pub direction: Direction,
}

/// One pending request as seen at a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskRequest {
    pub position: u32,
    pub processed: bool,
    /// Served at this very step
    pub current: bool,
}

/// What the head stopped for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopKind {
    Start,
    Request,
    Boundary,
}

/// Disk snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskState {
    pub head: u32,
    pub previous_head: u32,
    pub requests: Vec<DiskRequest>,
    pub stop: StopKind,
    pub direction: Option<Direction>,
    /// Distance moved to reach this stop
    pub seek_distance: u32,
    /// Distance moved since the start, boundary stops included
    pub total_seek: u64,
    /// Requests served so far
    pub served: usize,
    /// Cylinders of served requests, in service order
    pub order: Vec<u32>,
}

impl StepState for DiskState {
    fn is_decision_point(&self) -> bool {
        self.stop == StopKind::Boundary
    }
}

pub(crate) fn validate_disk_input(input: &DiskInput, limits: &InputLimits) -> Result<(), AlgorithmError> {
    check_range("disk_size", input.disk_size as f64, 1.0, limits.max_disk_size as f64)?;
    let max_position = (input.disk_size - 1) as f64;
    check_range("head", input.head as f64, 0.0, max_position)?;
    check_len("requests", input.requests.len(), 1, limits.max_disk_requests)?;
    for &position in &input.requests {
        check_range("request", position as f64, 0.0, max_position)?;
    }
    Ok(())
}

/// Working state for one scheduling run
pub(crate) struct DiskTrace {
    disk_size: u32,
    head: u32,
    requests: Vec<DiskRequest>,
    direction: Option<Direction>,
    total_seek: u64,
    served: usize,
    order: Vec<u32>,
    recorder: StepRecorder<DiskState>,
}

impl DiskTrace {
    pub(crate) fn new(input: &DiskInput, direction: Option<Direction>) -> Self {
        Self {
            disk_size: input.disk_size,
            head: input.head,
            requests: input
                .requests
                .iter()
                .map(|&position| DiskRequest { position, processed: false, current: false })
                .collect(),
            direction,
            total_seek: 0,
            served: 0,
            order: Vec::new(),
            recorder: StepRecorder::with_capacity(input.requests.len() + 3),
        }
    }

    pub(crate) fn head(&self) -> u32 {
        self.head
    }

    pub(crate) fn last_cylinder(&self) -> u32 {
        self.disk_size - 1
    }

    pub(crate) fn requests(&self) -> &[DiskRequest] {
        &self.requests
    }

    /// Indices of unserved requests strictly on one side of the head,
    /// ordered in the direction of travel away from it
    pub(crate) fn pending_toward(&self, direction: Direction) -> Vec<usize> {
        let head = self.head;
        let mut side: Vec<usize> = (0..self.requests.len())
            .filter(|&i| {
                let r = &self.requests[i];
                !r.processed
                    && match direction {
                        Direction::Left => r.position < head,
                        Direction::Right => r.position > head,
                    }
            })
            .collect();
        // Stable sort keeps arrival order among equal cylinders
        match direction {
            Direction::Right => side.sort_by_key(|&i| self.requests[i].position),
            Direction::Left => side.sort_by_key(|&i| std::cmp::Reverse(self.requests[i].position)),
        }
        side
    }

    /// Sweep order from the head toward the far end of `direction`
    pub(crate) fn sweep_from(&self, direction: Direction, from: u32) -> Vec<usize> {
        let mut side: Vec<usize> = (0..self.requests.len())
            .filter(|&i| !self.requests[i].processed)
            .collect();
        match direction {
            Direction::Right => {
                side.retain(|&i| self.requests[i].position >= from);
                side.sort_by_key(|&i| self.requests[i].position);
            }
            Direction::Left => {
                side.retain(|&i| self.requests[i].position <= from);
                side.sort_by_key(|&i| std::cmp::Reverse(self.requests[i].position));
            }
        }
        side
    }

    /// Mark requests sitting under the head as served without moving
    pub(crate) fn absorb_at_head(&mut self) -> usize {
        let head = self.head;
        let mut absorbed = 0;
        for request in self.requests.iter_mut().filter(|r| !r.processed && r.position == head) {
            request.processed = true;
            self.order.push(request.position);
            absorbed += 1;
        }
        self.served += absorbed;
        absorbed
    }

    pub(crate) fn start(&mut self, annotation: String) {
        self.push(StopKind::Start, self.head, 0, annotation);
    }

    /// Move to and serve request `index`
    pub(crate) fn serve(&mut self, index: usize) {
        let from = self.head;
        let to = self.requests[index].position;
        let distance = from.abs_diff(to);
        self.move_head(to);

        for request in &mut self.requests {
            request.current = false;
        }
        let request = &mut self.requests[index];
        request.processed = true;
        request.current = true;
        self.served += 1;
        self.order.push(to);

        let annotation = format!(
            "Serve cylinder {}: head {} -> {}, seek {} (total {})",
            to,
            from,
            to,
            distance,
            self.total_seek + distance as u64
        );
        self.push(StopKind::Request, from, distance, annotation);
    }

    /// Move to a disk edge without serving anything
    pub(crate) fn boundary(&mut self, cylinder: u32, next_direction: Direction, reason: &str) {
        let from = self.head;
        let distance = from.abs_diff(cylinder);
        self.move_head(cylinder);
        self.direction = Some(next_direction);
        for request in &mut self.requests {
            request.current = false;
        }
        let annotation = format!(
            "{}: head {} -> {}, seek {}; continue {}",
            reason, from, cylinder, distance, next_direction
        );
        self.push(StopKind::Boundary, from, distance, annotation);
    }

    pub(crate) fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    pub(crate) fn finish(self, algorithm: &str) -> StepSequence<DiskState> {
        log::debug!(
            "{}: served {} requests, total seek {}, {} steps",
            algorithm,
            self.served,
            self.total_seek,
            self.recorder.len()
        );
        self.recorder.finish()
    }

    fn move_head(&mut self, to: u32) {
        if to > self.head {
            self.direction = Some(Direction::Right);
        } else if to < self.head {
            self.direction = Some(Direction::Left);
        }
        self.head = to;
    }

    fn push(&mut self, stop: StopKind, previous_head: u32, distance: u32, annotation: String) {
        self.total_seek += distance as u64;
        self.recorder.record(
            DiskState {
                head: self.head,
                previous_head,
                requests: self.requests.clone(),
                stop,
                direction: self.direction,
                seek_distance: distance,
                total_seek: self.total_seek,
                served: self.served,
                order: self.order.clone(),
            },
            annotation,
        );
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn input(requests: Vec<u32>) -> DiskInput {
        DiskInput { disk_size: 200, head: 50, requests, direction: Direction::Right }
    }

    #[test]
    fn test_validate_rejects_out_of_range_request() {
        let limits = InputLimits::default();
        assert!(validate_disk_input(&input(vec![10, 199]), &limits).is_ok());
        assert!(matches!(
            validate_disk_input(&input(vec![10, 200]), &limits),
            Err(AlgorithmError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_head_outside_disk() {
        let limits = InputLimits::default();
        let mut bad = input(vec![10]);
        bad.head = 250;
        assert!(validate_disk_input(&bad, &limits).is_err());
    }

    #[test]
    fn test_validate_rejects_empty_requests() {
        let limits = InputLimits::default();
        assert!(matches!(
            validate_disk_input(&input(vec![]), &limits),
            Err(AlgorithmError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_pending_toward_orders_by_travel() {
        let trace = DiskTrace::new(&input(vec![60, 20, 55, 40, 50]), None);
        assert_eq!(trace.pending_toward(Direction::Right), vec![2, 0]);
        assert_eq!(trace.pending_toward(Direction::Left), vec![3, 1]);
    }

    #[test]
    fn test_serve_snapshots_are_independent() {
        let mut trace = DiskTrace::new(&input(vec![60, 40]), None);
        trace.start("start".into());
        trace.serve(0);
        trace.serve(1);
        let sequence = trace.finish("test");

        assert!(!sequence[0].payload.requests[0].processed);
        assert!(sequence[1].payload.requests[0].current);
        assert!(!sequence[2].payload.requests[0].current);
        assert!(sequence[2].payload.requests[1].current);
        assert_eq!(sequence[2].payload.total_seek, 10 + 20);
        assert_eq!(sequence[2].payload.order, vec![60, 40]);
        assert_eq!(sequence[2].payload.direction, Some(Direction::Left));
    }
}
