mod controls;
mod popup;
pub use controls::WidgetControls;
pub use popup::ToiletPopup;
