pub mod form_event;
pub mod lead;
