pub mod form_dialog;
pub mod notice;
pub mod pagination;
pub mod status_tag;
pub mod table;
