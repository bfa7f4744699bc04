pub mod card;
pub mod feedback;
pub mod form;
pub mod model_viewer;
pub mod nav;
pub mod toast;
