//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    DEFAULT_LIST_LIMIT, TaskCompletion, TaskErrorKind, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskRequest,
};
