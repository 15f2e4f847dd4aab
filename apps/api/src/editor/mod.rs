// Section Editor: per-type edit contract.
// Edits never touch the Document directly; they compute the next data value
// and go through `DocumentController::update_section` like every other change.

pub mod edits;
pub mod fields;
pub mod handlers;
pub mod improve;
pub mod summary;
