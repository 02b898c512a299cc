//! tracing 桥接层
//!
//! 把 `tracing` 事件送入 [`LogRegistry`]：事件的 target 作为模块名（事件带有
//! `module` 字段时以该字段为准），`TRACE` 并入 `DEBUG`，其余字段以
//! `key=value` 形式追加在消息之后。

use crate::core::level::LogLevel;
use crate::registry::LogRegistry;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing_core::field::{Field, Visit};
use tracing_core::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

const OWN_TARGET: &str = "modlog";

fn is_own_target(target: &str) -> bool {
    target == OWN_TARGET
        || target
            .strip_prefix(OWN_TARGET)
            .is_some_and(|rest| rest.starts_with("::"))
}

/// 按模块分文件的 tracing 层
#[derive(Debug, Clone)]
pub struct ModuleFileLayer {
    registry: Arc<LogRegistry>,
}

impl ModuleFileLayer {
    pub fn new(registry: Arc<LogRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<LogRegistry> {
        &self.registry
    }
}

/// 收集消息与附加字段
#[derive(Default)]
struct EventVisitor {
    message: String,
    module: Option<String>,
    extra: String,
}

impl EventVisitor {
    fn push_extra(&mut self, field: &Field, value: fmt::Arguments<'_>) {
        let _ = write!(self.extra, " {}={}", field.name(), value);
    }

    fn into_message(self) -> String {
        if self.extra.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.extra.trim_start().to_string()
        } else {
            self.message + &self.extra
        }
    }
}

impl Visit for EventVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "module" => self.module = Some(value.to_string()),
            _ => self.push_extra(field, format_args!("{}", value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            "module" => self.module = Some(format!("{:?}", value)),
            _ => self.push_extra(field, format_args!("{:?}", value)),
        }
    }
}

impl<S> Layer<S> for ModuleFileLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let module = match visitor.module.take() {
            Some(module) => module,
            // 本库自身的诊断事件不回流到日志文件
            None if is_own_target(metadata.target()) => return,
            None => metadata.target().to_string(),
        };

        self.registry.write_log(
            &module,
            LogLevel::from(*metadata.level()),
            metadata.file().unwrap_or("unknown"),
            metadata.line().unwrap_or(0),
            &visitor.into_message(),
        );
    }
}
