// Task-Modul: Enthält alle Embassy Tasks
//
// Jeder Task läuft asynchron und unabhängig auf demselben Executor.
// Tasks teilen sich den PrinterContext (MQTT → Telemetrie, Link-Monitor → Hold,
// Renderer liest beides).

pub mod link_monitor;
pub mod mqtt;
pub mod render;
pub mod wifi;

// Re-export Tasks für einfachen Import
pub use link_monitor::link_monitor_task;
pub use mqtt::mqtt_task;
pub use render::render_task;
pub use wifi::{connection_task, dhcp_task, net_task};
