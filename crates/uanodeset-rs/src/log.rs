use crate::types::NodeId;

/// Trait for structs that provide metadata for logging
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the node and pipeline stage a log line belongs to.
pub struct NodeContext<'a> {
    pub stage: &'static str,
    pub node: &'a NodeId,
}

impl<'a> NodeContext<'a> {
    pub fn new(stage: &'static str, node: &'a NodeId) -> Self {
        Self { stage, node }
    }
}

impl LogMetadata for NodeContext<'_> {
    fn meta(&self) -> String {
        format!("stage={}, node={}", self.stage, self.node)
    }
}

// =============================================
// Logging Macros (namespaced under crate::log)
// =============================================

// ===== node_info! =====
macro_rules! node_info {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::info!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== node_warn! =====
macro_rules! node_warn {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::warn!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== node_debug! =====
macro_rules! node_debug {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::debug!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// ===== node_trace! =====
macro_rules! node_trace {
    ($ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        ::log::trace!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
}

// Re-export macros for use in other files
pub(crate) use node_debug;
pub(crate) use node_info;
pub(crate) use node_trace;
pub(crate) use node_warn;
