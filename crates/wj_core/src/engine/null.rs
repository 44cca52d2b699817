use crate::engine::{NativeEngine, RawTransform, RawVersion, ResourceDesc, ResourceType, Status};
use std::collections::BTreeMap;

/// Engine that does nothing, successfully.
///
/// Stands in for a native runtime in tests and headless runs. Handles are
/// sequential starting at 1. With a frame budget it requests close once that
/// many frames have ended, which lets interactive loops terminate on their own.
#[derive(Debug)]
pub struct NullEngine {
    next_id: u64,
    live: BTreeMap<u64, ResourceType>,
    initialized: bool,
    frames: u64,
    frame_budget: Option<u64>,
    transforms_pushed: u64,
    fail_creates: bool,
    last_error: Option<String>,
}

impl NullEngine {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            live: BTreeMap::new(),
            initialized: false,
            frames: 0,
            frame_budget: None,
            transforms_pushed: 0,
            fail_creates: false,
            last_error: None,
        }
    }

    /// Request close after `frames` completed frames.
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.frame_budget = Some(frames);
        self
    }

    /// Make every `create` fail with `OutOfMemory`.
    pub fn with_failing_creates(mut self) -> Self {
        self.fail_creates = true;
        self
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn live_resources(&self) -> usize {
        self.live.len()
    }

    pub fn transforms_pushed(&self) -> u64 {
        self.transforms_pushed
    }

    fn fail(&mut self, status: Status, message: impl Into<String>) -> Status {
        self.last_error = Some(message.into());
        status
    }
}

impl Default for NullEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeEngine for NullEngine {
    fn version(&self) -> RawVersion {
        RawVersion {
            major: 0,
            minor: 1,
            patch: 0,
        }
    }

    fn name(&self) -> &str {
        "null"
    }

    fn initialize(&mut self) -> Status {
        self.initialized = true;
        Status::Ok
    }

    fn begin_frame(&mut self, _delta_seconds: f32) -> Status {
        if !self.initialized {
            return self.fail(Status::OperationFailed, "engine not initialized");
        }
        Status::Ok
    }

    fn end_frame(&mut self) -> Status {
        self.frames += 1;
        Status::Ok
    }

    fn close_requested(&self) -> bool {
        self.frame_budget.is_some_and(|budget| self.frames >= budget)
    }

    fn shutdown(&mut self) -> Status {
        self.live.clear();
        self.initialized = false;
        Status::Ok
    }

    fn create(&mut self, desc: &ResourceDesc) -> u64 {
        if self.fail_creates {
            self.fail(Status::OutOfMemory, format!("cannot allocate {}", desc.resource_type()));
            return 0;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, desc.resource_type());
        id
    }

    fn destroy(&mut self, kind: ResourceType, raw: u64) -> Status {
        match self.live.get(&raw) {
            Some(&live_kind) if live_kind == kind => {
                self.live.remove(&raw);
                Status::Ok
            }
            _ => self.fail(Status::InvalidHandle, format!("no {kind} with id {raw}")),
        }
    }

    fn push_transform(&mut self, raw: u64, _transform: RawTransform) -> Status {
        if !self.live.contains_key(&raw) {
            return self.fail(Status::InvalidHandle, format!("no resource with id {raw}"));
        }
        self.transforms_pushed += 1;
        Status::Ok
    }

    fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take()
    }
}
