pub mod event;
pub mod order;

pub use event::TimelineEvent;
pub use order::{BillingItem, Milestone, Order, OrderTask, TaskKind};
