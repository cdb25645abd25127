//! Headless log panel on top of console capture.
//!
//! [`LogPanel`] owns one capture session at a time and a [`PanelView`] that
//! mirrors the captured entries as rendered rows. Drawing the rows is left
//! to the host.

mod panel;
mod view;

pub use panel::LogPanel;
pub use view::{MINIMIZE_LABEL, PanelRow, PanelView, RESTORE_LABEL, icon_for};
