/// Messages produced off the GTK thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    ConfigReload,
}
