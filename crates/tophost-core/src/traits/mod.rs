//! Trait seams between the reconciliation flow and the outside world

pub mod control_panel;
pub mod value_source;

pub use control_panel::ControlPanel;
pub use value_source::UpdateValueSource;
