// Posts: the publish pipeline and the append-only log of what was sent.

pub mod handlers;
pub mod service;
pub mod webhook;
