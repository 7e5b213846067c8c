// Drafts: unpublished post content and platform selection, editable until published.

pub mod handlers;
pub mod service;
